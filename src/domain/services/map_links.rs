//! Links into external map services

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const PLACE_BASE_URL: &str = "https://www.google.com/maps/place/";
const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir//";

/// Google Maps link to a place, optionally labelled
pub fn place_link(lat: f64, lng: f64, label: Option<&str>) -> String {
    let label = label
        .filter(|l| !l.is_empty())
        .map(|l| format!("/{}", utf8_percent_encode(l, URI_COMPONENT)))
        .unwrap_or_default();
    format!("{}{},{}{}", PLACE_BASE_URL, lat, lng, label)
}

/// Google Maps directions to a destination from the user's location
pub fn directions_link(lat: f64, lng: f64) -> String {
    format!("{}{},{}", DIRECTIONS_BASE_URL, lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_link_without_label() {
        assert_eq!(
            place_link(64.25544, -21.131592, None),
            "https://www.google.com/maps/place/64.25544,-21.131592"
        );
    }

    #[test]
    fn test_place_link_encodes_label() {
        assert_eq!(
            place_link(64.747913, -23.509254, Some("Kirkjufell & Foss")),
            "https://www.google.com/maps/place/64.747913,-23.509254/Kirkjufell%20%26%20Foss"
        );
        assert_eq!(
            place_link(1.0, 2.0, Some("Snæfellsnes (west)")),
            "https://www.google.com/maps/place/1,2/Sn%C3%A6fellsnes%20(west)"
        );
    }

    #[test]
    fn test_empty_label_is_omitted() {
        assert_eq!(place_link(1.5, 2.5, Some("")), place_link(1.5, 2.5, None));
    }

    #[test]
    fn test_directions_link() {
        assert_eq!(
            directions_link(63.5321, -19.5114),
            "https://www.google.com/maps/dir//63.5321,-19.5114"
        );
    }

    #[test]
    fn test_links_are_deterministic() {
        let coords = [(0.0, 0.0), (-33.8688, 151.2093), (89.999999, -179.999999)];
        for (lat, lng) in coords {
            let place = place_link(lat, lng, Some("x"));
            assert_eq!(place, place_link(lat, lng, Some("x")));
            assert!(place.contains(&format!("{},{}", lat, lng)));

            let directions = directions_link(lat, lng);
            assert_eq!(directions, directions_link(lat, lng));
            assert!(directions.ends_with(&format!("{},{}", lat, lng)));
        }
    }
}
