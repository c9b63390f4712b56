//! Raw projection shapes returned by the content store, and their conversion
//! into domain records.
//!
//! Everything here is lenient on optional data and strict on identity: a
//! document without slug, name or valid coordinates is rejected as a whole,
//! while a broken image or parking spot only drops that piece.

use serde::Deserialize;

use crate::application::ports::outbound::FetchError;
use crate::domain::entities::{
    Accessibility, Approach, Attraction, AttractionSummary, BlockStyle, BodyNode, Faq, Guide,
    GuideSummary, ListKind, MapSnippetConfig, Parking, PracticalInfo, Region, RegionRef, Safety,
    Span, TextBlock,
};
use crate::domain::value_objects::{
    Category, DurationUnit, Facility, GeoPoint, ImageCrop, ImageHotspot, ImageRef, RiskLevel,
    Slug, VisitDuration,
};

/// Slugs arrive either projected (`"slug": slug.current`) or raw (`{current}`)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum SlugField {
    Plain(String),
    Object { current: Option<String> },
}

impl SlugField {
    fn into_slug(self) -> Option<Slug> {
        match self {
            SlugField::Plain(value) => Slug::parse(value),
            SlugField::Object { current } => current.and_then(Slug::parse),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CoordsDocument {
    lat: Option<f64>,
    lng: Option<f64>,
}

impl CoordsDocument {
    fn to_point(&self) -> Result<GeoPoint, String> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => GeoPoint::new(lat, lng).map_err(|e| e.to_string()),
            _ => Err("coordinates are incomplete".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AssetDocument {
    #[serde(rename = "_ref")]
    reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ImageDocument {
    asset: Option<AssetDocument>,
    crop: Option<serde_json::Value>,
    hotspot: Option<serde_json::Value>,
    alt: Option<String>,
    caption: Option<String>,
}

impl ImageDocument {
    fn into_image_ref(self) -> Option<ImageRef> {
        let Some(asset_ref) = self.asset.and_then(|a| a.reference).filter(|r| !r.is_empty())
        else {
            tracing::debug!("Skipping image without an asset reference");
            return None;
        };
        Some(ImageRef {
            asset_ref,
            crop: self
                .crop
                .and_then(|c| serde_json::from_value::<ImageCrop>(c).ok()),
            hotspot: self
                .hotspot
                .and_then(|h| serde_json::from_value::<ImageHotspot>(h).ok()),
            alt: non_blank(self.alt),
            caption: non_blank(self.caption),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RegionRefDocument {
    slug: Option<SlugField>,
    name: Option<String>,
    intro: Option<String>,
}

impl RegionRefDocument {
    /// `None` when the reference did not resolve to a usable region
    fn into_region_ref(self) -> Option<RegionRef> {
        let slug = self.slug.and_then(SlugField::into_slug)?;
        let name = non_blank(self.name)?;
        Some(RegionRef {
            slug,
            name,
            intro: non_blank(self.intro),
        })
    }
}

fn region_ref(document: Option<RegionRefDocument>, owner: &Slug) -> Option<RegionRef> {
    let region = document.and_then(RegionRefDocument::into_region_ref);
    if region.is_none() {
        tracing::debug!(slug = %owner, "Region reference unavailable");
    }
    region
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AttractionDocument {
    slug: Option<SlugField>,
    name: Option<String>,
    description: Option<String>,
    coords: Option<CoordsDocument>,
    category: Option<String>,
    visit_duration_min: Option<f64>,
    visit_duration_max: Option<f64>,
    facilities: Option<Vec<String>>,
    main_image: Option<ImageDocument>,
    gallery: Option<Vec<ImageDocument>>,
    practical: Option<PracticalDocument>,
    map_snippet: Option<MapSnippetDocument>,
    photo_tips: Option<String>,
    faqs: Option<Vec<FaqDocument>>,
    region: Option<RegionRefDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AttractionSummaryDocument {
    slug: Option<SlugField>,
    name: Option<String>,
    coords: Option<CoordsDocument>,
    category: Option<String>,
    region: Option<RegionRefDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PracticalDocument {
    parking: Option<ParkingDocument>,
    approach: Option<ApproachDocument>,
    safety: Option<SafetyDocument>,
    accessibility: Option<AccessibilityDocument>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ParkingDocument {
    lat: Option<f64>,
    lng: Option<f64>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApproachDocument {
    walk_distance_m: Option<f64>,
    elevation_gain_m: Option<f64>,
    surface: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SafetyDocument {
    wind_risk: Option<String>,
    ice_risk: Option<String>,
    other_notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AccessibilityDocument {
    wheelchair_friendly: Option<bool>,
    steps: Option<u32>,
    railings: Option<bool>,
    surface: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MapSnippetDocument {
    zoom: Option<f64>,
    show_scale: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FaqDocument {
    question: Option<String>,
    answer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RegionDocument {
    slug: Option<SlugField>,
    name: Option<String>,
    intro: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GuideDocument {
    slug: Option<SlugField>,
    title: Option<String>,
    body: Option<Vec<serde_json::Value>>,
    region: Option<RegionRefDocument>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GuideSummaryDocument {
    slug: Option<SlugField>,
    title: Option<String>,
    region: Option<RegionRefDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockDocument {
    style: Option<String>,
    list_item: Option<String>,
    #[serde(default)]
    children: Vec<SpanDocument>,
    #[serde(default)]
    mark_defs: Vec<MarkDefDocument>,
}

#[derive(Debug, Deserialize)]
struct SpanDocument {
    #[serde(default)]
    text: String,
    #[serde(default)]
    marks: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MarkDefDocument {
    #[serde(rename = "_key")]
    key: String,
    #[serde(rename = "_type")]
    kind: String,
    href: Option<String>,
}

fn invalid(kind: &'static str, id: &str, reason: impl Into<String>) -> FetchError {
    FetchError::InvalidDocument {
        kind,
        id: id.to_string(),
        reason: reason.into(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Slug, name and coordinates shared by both attraction projections
fn attraction_identity(
    slug: Option<SlugField>,
    name: Option<String>,
    coords: Option<&CoordsDocument>,
) -> Result<(Slug, String, GeoPoint), FetchError> {
    let slug = slug
        .and_then(SlugField::into_slug)
        .ok_or_else(|| invalid("attraction", "<unknown>", "missing slug"))?;
    let name = non_blank(name).ok_or_else(|| invalid("attraction", slug.as_str(), "missing name"))?;
    let coords = coords
        .ok_or_else(|| "missing coordinates".to_string())
        .and_then(CoordsDocument::to_point)
        .map_err(|reason| invalid("attraction", slug.as_str(), reason))?;
    Ok((slug, name, coords))
}

fn facilities(raw: Option<Vec<String>>) -> Vec<Facility> {
    let mut facilities: Vec<Facility> = Vec::new();
    for value in raw.unwrap_or_default() {
        if value.trim().is_empty() {
            continue;
        }
        let facility = Facility::from(value);
        if !facilities.contains(&facility) {
            facilities.push(facility);
        }
    }
    facilities
}

fn practical(document: PracticalDocument, owner: &Slug) -> Option<PracticalInfo> {
    let parking = document.parking.map(|p| {
        let coords = match (p.lat, p.lng) {
            (Some(lat), Some(lng)) => match GeoPoint::new(lat, lng) {
                Ok(point) => Some(point),
                Err(e) => {
                    tracing::warn!(slug = %owner, error = %e, "Ignoring invalid parking coordinates");
                    None
                }
            },
            _ => None,
        };
        Parking {
            coords,
            notes: non_blank(p.notes),
        }
    });
    let approach = document.approach.map(|a| Approach {
        walk_distance_m: a.walk_distance_m,
        elevation_gain_m: a.elevation_gain_m,
        surface: non_blank(a.surface),
        notes: non_blank(a.notes),
    });
    let safety = document.safety.map(|s| Safety {
        wind_risk: non_blank(s.wind_risk).map(RiskLevel::from),
        ice_risk: non_blank(s.ice_risk).map(RiskLevel::from),
        other_notes: non_blank(s.other_notes),
    });
    let accessibility = document.accessibility.map(|a| Accessibility {
        wheelchair_friendly: a.wheelchair_friendly,
        steps: a.steps,
        railings: a.railings,
        surface: non_blank(a.surface),
        notes: non_blank(a.notes),
    });

    let info = PracticalInfo {
        parking,
        approach,
        safety,
        accessibility,
    };
    if info.is_empty() {
        None
    } else {
        Some(info)
    }
}

pub(super) fn document_to_attraction(
    document: AttractionDocument,
    unit: DurationUnit,
) -> Result<Attraction, FetchError> {
    let (slug, name, coords) =
        attraction_identity(document.slug, document.name, document.coords.as_ref())?;

    let gallery = document
        .gallery
        .unwrap_or_default()
        .into_iter()
        .filter_map(ImageDocument::into_image_ref)
        .collect();
    let faqs = document
        .faqs
        .unwrap_or_default()
        .into_iter()
        .filter_map(|faq| match (non_blank(faq.question), non_blank(faq.answer)) {
            (Some(question), Some(answer)) => Some(Faq { question, answer }),
            _ => None,
        })
        .collect();

    let practical = document.practical.and_then(|p| practical(p, &slug));
    let region = region_ref(document.region, &slug);

    Ok(Attraction {
        description: non_blank(document.description).unwrap_or_default(),
        category: non_blank(document.category).map(Category::from),
        visit_duration: VisitDuration::from_stored(
            document.visit_duration_min,
            document.visit_duration_max,
            unit,
        ),
        facilities: facilities(document.facilities),
        main_image: document.main_image.and_then(ImageDocument::into_image_ref),
        gallery,
        practical,
        map_snippet: document.map_snippet.map(|m| MapSnippetConfig {
            zoom: m.zoom.filter(|z| z.is_finite() && (0.0..=22.0).contains(z)),
            show_scale: m.show_scale,
        }),
        photo_tips: non_blank(document.photo_tips),
        faqs,
        region,
        slug,
        name,
        coords,
    })
}

pub(super) fn document_to_attraction_summary(
    document: AttractionSummaryDocument,
) -> Result<AttractionSummary, FetchError> {
    let (slug, name, coords) =
        attraction_identity(document.slug, document.name, document.coords.as_ref())?;
    let region = region_ref(document.region, &slug);
    Ok(AttractionSummary {
        category: non_blank(document.category).map(Category::from),
        region,
        slug,
        name,
        coords,
    })
}

pub(super) fn document_to_region(document: RegionDocument) -> Result<Region, FetchError> {
    let slug = document
        .slug
        .and_then(SlugField::into_slug)
        .ok_or_else(|| invalid("region", "<unknown>", "missing slug"))?;
    let name = non_blank(document.name).ok_or_else(|| invalid("region", slug.as_str(), "missing name"))?;
    Ok(Region {
        intro: non_blank(document.intro).unwrap_or_default(),
        slug,
        name,
    })
}

pub(super) fn document_to_guide(document: GuideDocument) -> Result<Guide, FetchError> {
    let slug = document
        .slug
        .and_then(SlugField::into_slug)
        .ok_or_else(|| invalid("guide", "<unknown>", "missing slug"))?;
    let title = non_blank(document.title).ok_or_else(|| invalid("guide", slug.as_str(), "missing title"))?;
    let body = document
        .body
        .unwrap_or_default()
        .into_iter()
        .filter_map(|node| body_node(node, &slug))
        .collect();
    let region = document.region.and_then(RegionRefDocument::into_region_ref);
    Ok(Guide {
        slug,
        title,
        body,
        region,
    })
}

pub(super) fn document_to_guide_summary(
    document: GuideSummaryDocument,
) -> Result<GuideSummary, FetchError> {
    let slug = document
        .slug
        .and_then(SlugField::into_slug)
        .ok_or_else(|| invalid("guide", "<unknown>", "missing slug"))?;
    let title = non_blank(document.title).ok_or_else(|| invalid("guide", slug.as_str(), "missing title"))?;
    Ok(GuideSummary {
        slug,
        title,
        region: document.region.and_then(RegionRefDocument::into_region_ref),
    })
}

fn body_node(node: serde_json::Value, guide: &Slug) -> Option<BodyNode> {
    let kind = node.get("_type").and_then(|t| t.as_str()).unwrap_or_default().to_string();
    match kind.as_str() {
        "block" => match serde_json::from_value::<BlockDocument>(node) {
            Ok(block) => Some(BodyNode::Block(block_to_text(block))),
            Err(e) => {
                tracing::debug!(slug = %guide, error = %e, "Skipping malformed text block");
                None
            }
        },
        "image" => serde_json::from_value::<ImageDocument>(node)
            .ok()
            .and_then(ImageDocument::into_image_ref)
            .map(BodyNode::Image),
        other => {
            tracing::debug!(slug = %guide, node_type = other, "Skipping unsupported body node");
            None
        }
    }
}

fn block_to_text(block: BlockDocument) -> TextBlock {
    let links: Vec<(String, String)> = block
        .mark_defs
        .into_iter()
        .filter(|def| def.kind == "link")
        .filter_map(|def| def.href.map(|href| (def.key, href)))
        .collect();

    let spans = block
        .children
        .into_iter()
        .map(|span| {
            let mut link = None;
            let mut decorators = Vec::new();
            for mark in span.marks {
                match links.iter().find(|(key, _)| *key == mark) {
                    Some((_, href)) => link = Some(href.clone()),
                    None => decorators.push(mark),
                }
            }
            Span {
                text: span.text,
                decorators,
                link,
            }
        })
        .collect();

    TextBlock {
        style: BlockStyle::from_name(block.style.as_deref().unwrap_or("normal")),
        list: match block.list_item.as_deref() {
            Some("bullet") => Some(ListKind::Bullet),
            Some("number") => Some(ListKind::Number),
            _ => None,
        },
        spans,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode_attraction(value: serde_json::Value) -> Result<Attraction, FetchError> {
        let document: AttractionDocument = serde_json::from_value(value).unwrap();
        document_to_attraction(document, DurationUnit::Hours)
    }

    #[test]
    fn test_full_attraction_document() {
        let attraction = decode_attraction(json!({
            "slug": "skogafoss",
            "name": "Skógafoss",
            "description": "A 60 m waterfall.",
            "coords": { "_type": "geopoint", "lat": 63.5321, "lng": -19.5114 },
            "category": "waterfall",
            "visitDurationMin": 1,
            "visitDurationMax": 2,
            "facilities": ["parking", "restrooms", "parking", ""],
            "mainImage": { "asset": { "_ref": "image-abc-1200x800-jpg" } },
            "gallery": [
                { "asset": { "_ref": "image-def-800x600-png" }, "alt": "Stairs" },
                { "asset": null }
            ],
            "practical": {
                "parking": { "lat": 63.5300, "lng": -19.5120, "notes": "Free" },
                "safety": { "windRisk": "High", "iceRisk": " " }
            },
            "mapSnippet": { "zoom": 13, "showScale": true },
            "faqs": [
                { "question": "Can I climb it?", "answer": "Yes, 527 steps." },
                { "question": "Empty answer", "answer": "" }
            ],
            "region": { "slug": "south", "name": "South Iceland", "intro": "Glaciers." }
        }))
        .unwrap();

        assert_eq!(attraction.slug.as_str(), "skogafoss");
        assert_eq!(attraction.category, Some(Category::Waterfall));
        assert_eq!(attraction.visit_duration.unwrap().average_minutes(), 90);
        assert_eq!(attraction.facilities, vec![Facility::Parking, Facility::Restrooms]);
        assert_eq!(attraction.gallery.len(), 1);
        assert_eq!(attraction.gallery[0].alt.as_deref(), Some("Stairs"));
        assert_eq!(attraction.faqs.len(), 1);
        let practical = attraction.practical.as_ref().unwrap();
        assert_eq!(practical.safety.as_ref().unwrap().wind_risk, Some(RiskLevel::High));
        assert_eq!(practical.safety.as_ref().unwrap().ice_risk, None);
        assert_eq!(
            attraction.parking_coords(),
            Some(GeoPoint::new(63.53, -19.512).unwrap())
        );
        assert_eq!(attraction.region.as_ref().unwrap().name, "South Iceland");
    }

    #[test]
    fn test_unrecognized_risk_text_is_kept() {
        let attraction = decode_attraction(json!({
            "slug": "reynisfjara",
            "name": "Reynisfjara",
            "coords": { "lat": 63.4044, "lng": -19.0440 },
            "practical": {
                "safety": { "windRisk": "Extreme", "iceRisk": "Very high" }
            }
        }))
        .unwrap();

        let safety = attraction.practical.unwrap().safety.unwrap();
        assert_eq!(safety.wind_risk, Some(RiskLevel::Other("Extreme".to_string())));
        assert_eq!(safety.ice_risk, Some(RiskLevel::Other("Very high".to_string())));

        let json = serde_json::to_value(&safety).unwrap();
        assert_eq!(json["wind_risk"], "Extreme");
        assert_eq!(json["ice_risk"], "Very high");
    }

    #[test]
    fn test_dangling_region_is_omitted() {
        let attraction = decode_attraction(json!({
            "slug": "blue-lagoon",
            "name": "Blue Lagoon",
            "coords": { "lat": 64.25544, "lng": -21.131592 },
            "region": null
        }))
        .unwrap();
        assert!(attraction.region.is_none());
        assert!(attraction.practical.is_none());
        assert!(attraction.visit_duration.is_none());
    }

    #[test]
    fn test_invalid_coordinates_reject_document() {
        let result = decode_attraction(json!({
            "slug": "nowhere",
            "name": "Nowhere",
            "coords": { "lat": 123.0, "lng": 0.0 }
        }));
        assert!(matches!(
            result,
            Err(FetchError::InvalidDocument { kind: "attraction", .. })
        ));
    }

    #[test]
    fn test_missing_slug_rejects_document() {
        let result = decode_attraction(json!({
            "name": "Anonymous",
            "coords": { "lat": 1.0, "lng": 1.0 }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_slug_object_accepted() {
        let document: AttractionSummaryDocument = serde_json::from_value(json!({
            "slug": { "_type": "slug", "current": "kirkjufell" },
            "name": "Kirkjufell",
            "coords": { "lat": 64.941, "lng": -23.305 },
            "category": "mountain",
            "region": { "slug": { "current": "snaefellsnes" }, "name": "Snæfellsnes" }
        }))
        .unwrap();
        let summary = document_to_attraction_summary(document).unwrap();
        assert_eq!(summary.slug.as_str(), "kirkjufell");
        assert_eq!(summary.region.unwrap().slug.as_str(), "snaefellsnes");
    }

    #[test]
    fn test_invalid_parking_coordinates_dropped() {
        let attraction = decode_attraction(json!({
            "slug": "x",
            "name": "X",
            "coords": { "lat": 1.0, "lng": 1.0 },
            "practical": { "parking": { "lat": 200.0, "lng": 1.0, "notes": "Gravel lot" } }
        }))
        .unwrap();
        let parking = attraction.practical.unwrap().parking.unwrap();
        assert!(parking.coords.is_none());
        assert_eq!(parking.notes.as_deref(), Some("Gravel lot"));
    }

    #[test]
    fn test_guide_body_nodes() {
        let document: GuideDocument = serde_json::from_value(json!({
            "slug": "ring-road",
            "title": "Driving the Ring Road",
            "body": [
                {
                    "_type": "block",
                    "style": "h2",
                    "children": [{ "_type": "span", "text": "Day one", "marks": [] }],
                    "markDefs": []
                },
                {
                    "_type": "block",
                    "style": "normal",
                    "children": [
                        { "_type": "span", "text": "Book at ", "marks": ["strong"] },
                        { "_type": "span", "text": "road.is", "marks": ["k1"] }
                    ],
                    "markDefs": [{ "_key": "k1", "_type": "link", "href": "https://road.is" }]
                },
                { "_type": "image", "asset": { "_ref": "image-xyz-1000x500-webp" }, "caption": "Route 1" },
                { "_type": "youtube", "url": "https://example.com" }
            ]
        }))
        .unwrap();

        let guide = document_to_guide(document).unwrap();
        assert_eq!(guide.body.len(), 3);
        match &guide.body[0] {
            BodyNode::Block(block) => {
                assert_eq!(block.style, BlockStyle::H2);
                assert_eq!(block.plain_text(), "Day one");
            }
            other => panic!("expected block, got {other:?}"),
        }
        match &guide.body[1] {
            BodyNode::Block(block) => {
                assert_eq!(block.spans[0].decorators, vec!["strong".to_string()]);
                assert_eq!(block.spans[1].link.as_deref(), Some("https://road.is"));
            }
            other => panic!("expected block, got {other:?}"),
        }
        assert!(matches!(&guide.body[2], BodyNode::Image(img) if img.caption.as_deref() == Some("Route 1")));
        assert!(guide.region.is_none());
    }
}
