//! GPX waypoint export

/// Escape the five XML reserved characters
pub fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A single `<wpt>` node
pub fn waypoint_export(name: &str, lat: f64, lng: f64) -> String {
    format!(
        "<wpt lat=\"{}\" lon=\"{}\">\n  <name>{}</name>\n</wpt>",
        lat,
        lng,
        escape_xml(name)
    )
}

/// Complete GPX 1.1 document holding one waypoint
pub fn gpx_document(name: &str, lat: f64, lng: f64) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <gpx version=\"1.1\" creator=\"TravelKnowledge\" xmlns=\"http://www.topografix.com/GPX/1/1\">\n  \
         {}\n\
         </gpx>\n",
        waypoint_export(name, lat, lng).replace('\n', "\n  ")
    )
}

/// Download filename: the slug when known, else the dashed lower-case name
pub fn gpx_filename(slug: Option<&str>, name: &str) -> String {
    let stem = match slug.filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase(),
    };
    format!("{}.gpx", stem)
}
