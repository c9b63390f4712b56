//! Attraction entity - A place worth visiting

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    Category, Facility, GeoPoint, ImageRef, RiskLevel, Slug, VisitDuration,
};

/// Region as seen through an attraction's or guide's reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRef {
    pub slug: Slug,
    pub name: String,
    /// Only present when the projection asked for it
    pub intro: Option<String>,
}

/// A fully resolved attraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attraction {
    pub slug: Slug,
    pub name: String,
    pub description: String,
    pub coords: GeoPoint,
    pub category: Option<Category>,
    /// Normalized to minutes at ingestion
    pub visit_duration: Option<VisitDuration>,
    pub facilities: Vec<Facility>,
    pub main_image: Option<ImageRef>,
    pub gallery: Vec<ImageRef>,
    pub practical: Option<PracticalInfo>,
    pub map_snippet: Option<MapSnippetConfig>,
    pub photo_tips: Option<String>,
    pub faqs: Vec<Faq>,
    /// `None` when the region reference dangles
    pub region: Option<RegionRef>,
}

#[cfg(test)]
impl Attraction {
    pub fn new(slug: Slug, name: impl Into<String>, coords: GeoPoint) -> Self {
        Self {
            slug,
            name: name.into(),
            description: String::new(),
            coords,
            category: None,
            visit_duration: None,
            facilities: Vec::new(),
            main_image: None,
            gallery: Vec::new(),
            practical: None,
            map_snippet: None,
            photo_tips: None,
            faqs: Vec::new(),
            region: None,
        }
    }

    pub fn with_region(mut self, region: RegionRef) -> Self {
        self.region = Some(region);
        self
    }
}

impl Attraction {
    /// Parking coordinates, if the editor recorded them
    pub fn parking_coords(&self) -> Option<GeoPoint> {
        self.practical
            .as_ref()
            .and_then(|p| p.parking.as_ref())
            .and_then(|parking| parking.coords)
    }
}

/// Slim attraction record used by lists and the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractionSummary {
    pub slug: Slug,
    pub name: String,
    pub coords: GeoPoint,
    pub category: Option<Category>,
    pub region: Option<RegionRef>,
}

/// Practical visiting information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PracticalInfo {
    pub parking: Option<Parking>,
    pub approach: Option<Approach>,
    pub safety: Option<Safety>,
    pub accessibility: Option<Accessibility>,
}

impl PracticalInfo {
    pub fn is_empty(&self) -> bool {
        self.parking.as_ref().map_or(true, Parking::is_empty)
            && self.approach.as_ref().map_or(true, Approach::is_empty)
            && self.safety.as_ref().map_or(true, Safety::is_empty)
            && self.accessibility.as_ref().map_or(true, Accessibility::is_empty)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parking {
    pub coords: Option<GeoPoint>,
    pub notes: Option<String>,
}

impl Parking {
    pub fn is_empty(&self) -> bool {
        self.coords.is_none() && self.notes.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Approach {
    pub walk_distance_m: Option<f64>,
    pub elevation_gain_m: Option<f64>,
    pub surface: Option<String>,
    pub notes: Option<String>,
}

impl Approach {
    pub fn is_empty(&self) -> bool {
        self.walk_distance_m.is_none()
            && self.elevation_gain_m.is_none()
            && self.surface.is_none()
            && self.notes.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Safety {
    pub wind_risk: Option<RiskLevel>,
    pub ice_risk: Option<RiskLevel>,
    pub other_notes: Option<String>,
}

impl Safety {
    pub fn is_empty(&self) -> bool {
        self.wind_risk.is_none() && self.ice_risk.is_none() && self.other_notes.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accessibility {
    pub wheelchair_friendly: Option<bool>,
    pub steps: Option<u32>,
    pub railings: Option<bool>,
    pub surface: Option<String>,
    pub notes: Option<String>,
}

impl Accessibility {
    pub fn is_empty(&self) -> bool {
        self.wheelchair_friendly.is_none()
            && self.steps.is_none()
            && self.railings.is_none()
            && self.surface.is_none()
            && self.notes.is_none()
    }
}

/// Display settings for the small embedded map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapSnippetConfig {
    pub zoom: Option<f64>,
    pub show_scale: Option<bool>,
}

/// Frequently asked question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}
