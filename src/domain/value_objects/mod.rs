//! Value objects - Immutable objects defined by their attributes

mod coordinates;
mod image_ref;
mod slug;
mod tags;
mod visit_duration;

pub use coordinates::GeoPoint;
pub use image_ref::{ImageCrop, ImageHotspot, ImageRef};
pub use slug::Slug;
pub use tags::{Category, Facility, RiskLevel};
pub use visit_duration::{DurationUnit, VisitDuration};
