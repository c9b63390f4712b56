//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Sanity: HTTP client for the content store
//! - Content: Repositories over the content store
//! - Image URLs: CDN URLs for image references
//! - Map: Map widget lifecycle and the static-map engine
//! - HTTP: REST API routes
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod content;
pub mod http;
pub mod image_url;
pub mod map_widget;
pub mod sanity;
pub mod state;
pub mod static_map;
