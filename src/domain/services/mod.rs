//! Domain services - Pure functions over domain values

mod map_links;
mod waypoint;

pub use map_links::{directions_link, place_link};
pub use waypoint::{escape_xml, gpx_document, gpx_filename};
