//! Open-ended content tags: attraction categories and facilities
//!
//! The CMS offers a fixed pick-list for both, but older documents carry
//! free-form values, so unknown values are kept rather than rejected.

use serde::{Deserialize, Serialize};

/// Kind of attraction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Waterfall,
    HotSpring,
    Glacier,
    Beach,
    Mountain,
    Cave,
    Museum,
    Spa,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Waterfall => "waterfall",
            Category::HotSpring => "hotspring",
            Category::Glacier => "glacier",
            Category::Beach => "beach",
            Category::Mountain => "mountain",
            Category::Cave => "cave",
            Category::Museum => "museum",
            Category::Spa => "spa",
            Category::Other(value) => value,
        }
    }

    /// Display label for badges and card subtitles
    pub fn label(&self) -> String {
        match self {
            Category::Waterfall => "Waterfall".to_string(),
            Category::HotSpring => "Hot Spring".to_string(),
            Category::Glacier => "Glacier".to_string(),
            Category::Beach => "Beach".to_string(),
            Category::Mountain => "Mountain".to_string(),
            Category::Cave => "Cave".to_string(),
            Category::Museum => "Museum".to_string(),
            Category::Spa => "Spa".to_string(),
            Category::Other(value) => title_case(value),
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "waterfall" => Category::Waterfall,
            "hotspring" | "hot-spring" | "hot spring" => Category::HotSpring,
            "glacier" => Category::Glacier,
            "beach" => Category::Beach,
            "mountain" => Category::Mountain,
            "cave" => Category::Cave,
            "museum" => Category::Museum,
            "spa" => Category::Spa,
            _ => Category::Other(value.trim().to_string()),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

/// On-site facility tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Facility {
    Parking,
    Restrooms,
    Restaurant,
    GiftShop,
    VisitorCenter,
    Wheelchair,
    Other(String),
}

impl Facility {
    pub fn as_str(&self) -> &str {
        match self {
            Facility::Parking => "parking",
            Facility::Restrooms => "restrooms",
            Facility::Restaurant => "restaurant",
            Facility::GiftShop => "giftshop",
            Facility::VisitorCenter => "visitorcenter",
            Facility::Wheelchair => "wheelchair",
            Facility::Other(value) => value,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Facility::Parking => "Parking".to_string(),
            Facility::Restrooms => "Restrooms".to_string(),
            Facility::Restaurant => "Restaurant".to_string(),
            Facility::GiftShop => "Gift Shop".to_string(),
            Facility::VisitorCenter => "Visitor Center".to_string(),
            Facility::Wheelchair => "Wheelchair Accessible".to_string(),
            Facility::Other(value) => value.replace('-', " "),
        }
    }
}

impl From<String> for Facility {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "parking" => Facility::Parking,
            "restrooms" | "toilets" => Facility::Restrooms,
            "restaurant" => Facility::Restaurant,
            "giftshop" | "gift-shop" | "shop" => Facility::GiftShop,
            "visitorcenter" | "visitor-center" => Facility::VisitorCenter,
            "wheelchair" => Facility::Wheelchair,
            _ => Facility::Other(value.trim().to_string()),
        }
    }
}

impl From<Facility> for String {
    fn from(value: Facility) -> Self {
        value.as_str().to_string()
    }
}

/// Severity of a safety risk (wind, ice)
///
/// Editors type these by hand. Anything other than low, moderate or high is
/// kept verbatim and shown as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Other(String),
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Other(value) => value,
        }
    }
}

impl From<String> for RiskLevel {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "moderate" => RiskLevel::Moderate,
            "high" => RiskLevel::High,
            _ => RiskLevel::Other(value.trim().to_string()),
        }
    }
}

impl From<RiskLevel> for String {
    fn from(value: RiskLevel) -> Self {
        value.as_str().to_string()
    }
}

fn title_case(value: &str) -> String {
    value
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
