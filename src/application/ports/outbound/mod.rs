//! Outbound ports - Interfaces that the application requires from external systems

mod content_port;
mod map_port;

pub use content_port::{CacheMode, ContentQueryPort, FetchError, FetchOptions, QueryParams};
pub use map_port::{MapBounds, MapEngine, MapInstance, MapOptions, MapWidgetError, MarkerSpec};
