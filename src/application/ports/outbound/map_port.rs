//! Map engine port - Interface for the third-party map widget
//!
//! The engine is a black box: it is handed a container and options, and
//! afterwards only receives markers and a final `remove`.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::GeoPoint;

/// South-west and north-east corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

/// Options used when constructing a map instance
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub access_token: String,
    pub style: String,
    pub center: GeoPoint,
    pub zoom: f64,
    pub bounds: Option<MapBounds>,
}

/// One marker with its popup markup
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: GeoPoint,
    pub popup_html: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapWidgetError {
    #[error("map access token is missing")]
    MissingToken,
    #[error("map failed to initialize: {0}")]
    Initialization(String),
    #[error("map error: {0}")]
    Engine(String),
}

/// A live map bound to a container
pub trait MapInstance {
    fn add_marker(&mut self, marker: MarkerSpec) -> Result<(), MapWidgetError>;

    /// Release everything the instance holds; called exactly once
    fn remove(&mut self);
}

/// Factory for map instances
pub trait MapEngine {
    type Instance: MapInstance;

    fn create(&self, container: &str, options: &MapOptions) -> Result<Self::Instance, MapWidgetError>;
}
