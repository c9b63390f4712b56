//! Map API routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::page_error;
use crate::application::dto::MapPageView;
use crate::application::services::PageService;
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MapQuery {
    #[serde(default)]
    pub focus: Option<String>,
}

/// Every mapped attraction plus map defaults
pub async fn get_map_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MapQuery>,
) -> Result<Json<MapPageView>, (StatusCode, String)> {
    state
        .page_service
        .map_page(query.focus.as_deref())
        .await
        .map(Json)
        .map_err(page_error)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::infrastructure::content::testing::FakeContentPort;
    use crate::infrastructure::http::testing::app;

    #[tokio::test]
    async fn test_map_page_with_focus() {
        let port = FakeContentPort::new().respond(
            "defined(coords)",
            json!([{ "slug": "geysir", "name": "Geysir", "coords": { "lat": 64.3104, "lng": -20.3024 } }]),
        );
        let request = Request::builder()
            .uri("/api/pages/map?focus=geysir")
            .body(Body::empty())
            .unwrap();
        let response = app(port).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["focus"], "geysir");
        assert_eq!(body["points"][0]["name"], "Geysir");
        assert!(body["preview_url"].as_str().unwrap().starts_with("https://api.mapbox.com/"));
    }
}
