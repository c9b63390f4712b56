//! Region API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::page_error;
use crate::application::dto::{RegionIndexView, RegionPageView};
use crate::application::services::PageService;
use crate::infrastructure::state::AppState;

/// All regions
pub async fn list_regions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RegionIndexView>, (StatusCode, String)> {
    state
        .page_service
        .regions_index()
        .await
        .map(Json)
        .map_err(page_error)
}

/// One region with its attractions and guides
pub async fn get_region_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<RegionPageView>, (StatusCode, String)> {
    state
        .page_service
        .region_page(&slug)
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

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_region_index() {
        let port = FakeContentPort::new().respond(
            r#"_type == "region""#,
            json!([{ "name": "East", "slug": "east", "intro": "Fjords and reindeer." }]),
        );
        let response = app(port).oneshot(get("/api/pages/regions")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["regions"][0]["href"], "/regions/east");
        assert!(body["empty_message"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_region_is_404() {
        let response = app(FakeContentPort::new())
            .oneshot(get("/api/pages/regions/atlantis"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
