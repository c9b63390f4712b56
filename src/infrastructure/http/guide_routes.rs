//! Guide API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::page_error;
use crate::application::dto::{GuideIndexView, GuidePageView};
use crate::application::services::PageService;
use crate::infrastructure::state::AppState;

/// All guides
pub async fn list_guides(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GuideIndexView>, (StatusCode, String)> {
    state
        .page_service
        .guides_index()
        .await
        .map(Json)
        .map_err(page_error)
}

/// One guide with its rendered body
pub async fn get_guide_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<GuidePageView>, (StatusCode, String)> {
    state
        .page_service
        .guide_page(&slug)
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
    async fn test_guide_page_body_nodes_are_tagged() {
        let port = FakeContentPort::new().respond(
            r#"_type == "guide" && slug.current == $slug"#,
            json!({
                "title": "Winter Driving",
                "slug": "winter-driving",
                "body": [
                    { "_type": "block", "style": "normal", "markDefs": [],
                      "children": [{ "_type": "span", "text": "Check road.is first." }] }
                ]
            }),
        );
        let response = app(port)
            .oneshot(get("/api/pages/guides/winter-driving"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["body"][0]["kind"], "block");
        assert_eq!(body["json_ld"]["@type"], "Article");
    }

    #[tokio::test]
    async fn test_guides_index_failure_is_bad_gateway() {
        let response = app(FakeContentPort::new().fail("guide"))
            .oneshot(get("/api/pages/guides"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
