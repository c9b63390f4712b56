//! Data Transfer Objects - For API boundaries
//!
//! Page view-models are assembled per request by the page service and
//! serialized by the HTTP layer; nothing here is cached.

pub mod pages;
pub mod structured_data;

pub use pages::*;
pub use structured_data::{attraction_json_ld, guide_json_ld};
