use serde::Serialize;

use crate::application::ports::outbound::MapBounds;
use crate::domain::entities::{
    AttractionSummary, BlockStyle, Faq, GuideSummary, ListKind, PracticalInfo, Region,
};
use crate::domain::value_objects::GeoPoint;

pub const SITE_NAME: &str = "TravelKnowledge";
pub const DURATION_FALLBACK: &str = "Not available";
pub const REGION_INTRO_FALLBACK: &str = "Region information coming soon";
pub const NO_REGION_ATTRACTIONS: &str = "No attractions available for this region yet.";
pub const NO_REGIONS: &str = "No regions available at the moment. Check back soon!";
pub const NO_GUIDES: &str = "No guides available at the moment. Check back soon!";
pub const NO_GUIDE_CONTENT: &str = "No content available for this guide.";

/// Longest meta description, in characters
pub const META_DESCRIPTION_LIMIT: usize = 160;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical_url: Option<String>,
}

impl PageMetadata {
    pub fn new(title: impl Into<String>, description: &str) -> Self {
        Self {
            title: title.into(),
            description: truncate_chars(description, META_DESCRIPTION_LIMIT),
            canonical_url: None,
        }
    }

    /// `"{name} - TravelKnowledge"`
    pub fn titled(name: &str, description: &str) -> Self {
        Self::new(format!("{} - {}", name, SITE_NAME), description)
    }

    pub fn with_canonical(mut self, url: impl Into<String>) -> Self {
        self.canonical_url = Some(url.into());
        self
    }
}

/// First `limit` characters, never splitting a code point
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((index, _)) => text[..index].to_string(),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocItem {
    pub href: String,
    pub label: String,
}

impl TocItem {
    pub fn new(anchor: &str, label: impl Into<String>) -> Self {
        Self {
            href: format!("#{}", anchor),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLinks {
    pub place: String,
    pub directions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryImage {
    pub url: String,
    pub thumbnail_url: String,
    pub alt: String,
    pub caption: Option<String>,
}

/// Card linking to an attraction page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttractionCard {
    pub slug: String,
    pub name: String,
    pub href: String,
    pub category: Option<String>,
    pub category_label: Option<String>,
}

impl From<&AttractionSummary> for AttractionCard {
    fn from(a: &AttractionSummary) -> Self {
        Self {
            slug: a.slug.to_string(),
            name: a.name.clone(),
            href: format!("/attractions/{}", a.slug),
            category: a.category.as_ref().map(|c| c.as_str().to_string()),
            category_label: a.category.as_ref().map(|c| c.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionCard {
    pub slug: String,
    pub name: String,
    pub href: String,
    pub excerpt: Option<String>,
}

impl From<&Region> for RegionCard {
    fn from(r: &Region) -> Self {
        let intro = r.intro.trim();
        let excerpt = (!intro.is_empty()).then(|| {
            let short = truncate_chars(intro, 150);
            if short.len() < intro.len() {
                format!("{}...", short.trim_end())
            } else {
                short
            }
        });
        Self {
            slug: r.slug.to_string(),
            name: r.name.clone(),
            href: format!("/regions/{}", r.slug),
            excerpt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideCard {
    pub slug: String,
    pub title: String,
    pub href: String,
    pub region_name: Option<String>,
}

impl From<&GuideSummary> for GuideCard {
    fn from(g: &GuideSummary) -> Self {
        Self {
            slug: g.slug.to_string(),
            title: g.title.clone(),
            href: format!("/guides/{}", g.slug),
            region_name: g.region.as_ref().map(|r| r.name.clone()),
        }
    }
}

// =============================================================================
// Attraction page
// =============================================================================

/// "About {region}" panel on the attraction page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionPanel {
    pub slug: String,
    pub name: String,
    pub href: String,
    /// Region intro, or a placeholder when it has none
    pub intro: String,
    pub has_intro: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSnippetView {
    pub center: GeoPoint,
    pub zoom: f64,
    pub show_scale: bool,
    pub full_map_href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareBlock {
    pub page_url: String,
    pub place_link: String,
    pub gpx_href: String,
    pub gpx_filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttractionPageView {
    pub metadata: PageMetadata,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub coords: GeoPoint,
    pub category: Option<String>,
    pub category_label: Option<String>,
    pub duration_label: String,
    pub average_visit_minutes: Option<u32>,
    pub facilities: Vec<String>,
    pub region: Option<RegionPanel>,
    pub practical: Option<PracticalInfo>,
    pub parking_links: Option<MapLinks>,
    pub photo_tips: Option<String>,
    pub faqs: Vec<Faq>,
    pub gallery: Vec<GalleryImage>,
    pub map_links: MapLinks,
    pub map_snippet: MapSnippetView,
    pub share: ShareBlock,
    pub toc: Vec<TocItem>,
    pub nearby: Vec<AttractionCard>,
    pub json_ld: serde_json::Value,
}

// =============================================================================
// Region pages
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionPageView {
    pub metadata: PageMetadata,
    pub slug: String,
    pub name: String,
    pub intro: String,
    pub attractions: Vec<AttractionCard>,
    /// Shown instead of the attraction grid when it is empty
    pub empty_message: Option<String>,
    pub guides: Vec<GuideCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionIndexView {
    pub metadata: PageMetadata,
    pub regions: Vec<RegionCard>,
    pub empty_message: Option<String>,
}

// =============================================================================
// Guide pages
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkView {
    pub href: String,
    /// Leaves the site; rendered with `target="_blank"`
    pub external: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanView {
    pub text: String,
    pub decorators: Vec<String>,
    pub link: Option<LinkView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyView {
    Block {
        style: BlockStyle,
        list: Option<ListKind>,
        /// Set on headings so the outline can link to them
        anchor: Option<String>,
        spans: Vec<SpanView>,
    },
    Image {
        url: String,
        alt: String,
        caption: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionLink {
    pub slug: String,
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidePageView {
    pub metadata: PageMetadata,
    pub slug: String,
    pub title: String,
    pub region: Option<RegionLink>,
    pub body: Vec<BodyView>,
    pub empty_message: Option<String>,
    pub outline: Vec<TocItem>,
    pub suggested_attractions: Vec<AttractionCard>,
    pub json_ld: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideIndexView {
    pub metadata: PageMetadata,
    pub guides: Vec<GuideCard>,
    pub empty_message: Option<String>,
}

// =============================================================================
// Map page
// =============================================================================

/// One attraction as the map widget sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointOfInterest {
    pub slug: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub category: Option<String>,
}

impl From<&AttractionSummary> for PointOfInterest {
    fn from(a: &AttractionSummary) -> Self {
        Self {
            slug: a.slug.to_string(),
            name: a.name.clone(),
            lat: a.coords.lat,
            lng: a.coords.lng,
            category: a.category.as_ref().map(|c| c.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPageView {
    pub metadata: PageMetadata,
    pub points: Vec<PointOfInterest>,
    pub center: GeoPoint,
    pub zoom: f64,
    pub min_zoom: f64,
    pub bounds: MapBounds,
    pub style: String,
    /// Slug of the attraction the map opened on, when it exists
    pub focus: Option<String>,
    pub preview_url: Option<String>,
}

/// A generated GPX file ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct GpxDownload {
    pub filename: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Slug;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("Þingvellir", 3), "Þin");
        assert_eq!(truncate_chars("short", 160), "short");
    }

    #[test]
    fn test_metadata_title_and_limit() {
        let long = "x".repeat(400);
        let meta = PageMetadata::titled("Gullfoss", &long);
        assert_eq!(meta.title, "Gullfoss - TravelKnowledge");
        assert_eq!(meta.description.chars().count(), META_DESCRIPTION_LIMIT);
        assert!(meta.canonical_url.is_none());
    }

    #[test]
    fn test_region_card_excerpt() {
        let slug = Slug::parse("north").unwrap();
        let card = RegionCard::from(&Region::new(slug.clone(), "North", "a ".repeat(100)));
        assert!(card.excerpt.as_deref().unwrap().ends_with("..."));
        assert_eq!(card.href, "/regions/north");

        let card = RegionCard::from(&Region::new(slug, "North", ""));
        assert!(card.excerpt.is_none());
    }
}
