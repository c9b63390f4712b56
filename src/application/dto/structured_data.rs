//! schema.org JSON-LD for page heads

use serde_json::{json, Value};

use crate::domain::entities::{Attraction, Guide};

/// `TouristAttraction` with coordinates and, when known, image and region
pub fn attraction_json_ld(attraction: &Attraction, url: &str, image_url: Option<&str>) -> Value {
    let mut data = json!({
        "@context": "https://schema.org",
        "@type": "TouristAttraction",
        "name": attraction.name,
        "description": attraction.description,
        "url": url,
        "geo": {
            "@type": "GeoCoordinates",
            "latitude": attraction.coords.lat,
            "longitude": attraction.coords.lng,
        },
    });
    if let Some(image) = image_url {
        data["image"] = json!(image);
    }
    if let Some(region) = &attraction.region {
        data["containedInPlace"] = json!({ "@type": "Place", "name": region.name });
    }
    data
}

/// `Article` for a guide, about its region when it has one
pub fn guide_json_ld(guide: &Guide, url: &str) -> Value {
    let mut data = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": guide.title,
        "url": url,
    });
    if let Some(region) = &guide.region {
        data["about"] = json!({ "@type": "Place", "name": region.name });
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RegionRef;
    use crate::domain::value_objects::{GeoPoint, Slug};

    #[test]
    fn test_attraction_json_ld() {
        let attraction = Attraction::new(
            Slug::parse("gullfoss").unwrap(),
            "Gullfoss",
            GeoPoint::new(64.3271, -20.1199).unwrap(),
        )
        .with_region(RegionRef {
            slug: Slug::parse("south").unwrap(),
            name: "South Iceland".to_string(),
            intro: None,
        });

        let data = attraction_json_ld(&attraction, "https://t.k/attractions/gullfoss", None);
        assert_eq!(data["@type"], "TouristAttraction");
        assert_eq!(data["geo"]["latitude"], 64.3271);
        assert_eq!(data["containedInPlace"]["name"], "South Iceland");
        assert!(data.get("image").is_none());
    }

    #[test]
    fn test_guide_json_ld_without_region() {
        let guide = Guide {
            slug: Slug::parse("ring-road").unwrap(),
            title: "Ring Road".to_string(),
            body: Vec::new(),
            region: None,
        };
        let data = guide_json_ld(&guide, "https://t.k/guides/ring-road");
        assert_eq!(data["headline"], "Ring Road");
        assert!(data.get("about").is_none());
    }
}
