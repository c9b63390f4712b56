//! HTTP REST API routes

mod attraction_routes;
mod guide_routes;
mod map_routes;
mod region_routes;

use axum::{http::StatusCode, routing::get, Router};
use std::sync::Arc;

use crate::application::services::PageError;
use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Raw content
        .route("/api/attraction", get(attraction_routes::get_attraction_document))
        // Attraction routes
        .route(
            "/api/pages/attractions/{slug}",
            get(attraction_routes::get_attraction_page),
        )
        .route(
            "/api/attractions/{slug}/gpx",
            get(attraction_routes::download_gpx),
        )
        // Region routes
        .route("/api/pages/regions", get(region_routes::list_regions))
        .route("/api/pages/regions/{slug}", get(region_routes::get_region_page))
        // Guide routes
        .route("/api/pages/guides", get(guide_routes::list_guides))
        .route("/api/pages/guides/{slug}", get(guide_routes::get_guide_page))
        // Map
        .route("/api/pages/map", get(map_routes::get_map_page))
}

/// Map a page failure to a status; upstream details stay in the log
pub(crate) fn page_error(error: PageError) -> (StatusCode, String) {
    match error {
        PageError::NotFound { kind, slug } => {
            (StatusCode::NOT_FOUND, format!("No {} found for '{}'", kind, slug))
        }
        PageError::Fetch(e) => {
            tracing::error!(error = %e, "Content fetch failed");
            (
                StatusCode::BAD_GATEWAY,
                "Content is temporarily unavailable".to_string(),
            )
        }
    }
}
