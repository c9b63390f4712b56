//! Attraction API routes

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::page_error;
use crate::application::dto::AttractionPageView;
use crate::application::services::{PageError, PageService};
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AttractionQuery {
    #[serde(default)]
    pub slug: Option<String>,
}

fn error_body(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

/// Raw attraction document by `?slug=`
pub async fn get_attraction_document(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AttractionQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let slug = query
        .slug
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| error_body(StatusCode::BAD_REQUEST, "Slug is required"))?;

    match state.page_service.attraction_document(slug).await {
        Ok(document) => Ok(Json(document)),
        Err(PageError::NotFound { .. }) => {
            Err(error_body(StatusCode::NOT_FOUND, "Attraction not found"))
        }
        Err(PageError::Fetch(e)) => {
            tracing::error!(slug = slug, error = %e, "Error fetching attraction");
            Err(error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            ))
        }
    }
}

/// Attraction page view-model
pub async fn get_attraction_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<AttractionPageView>, (StatusCode, String)> {
    state
        .page_service
        .attraction_page(&slug)
        .await
        .map(Json)
        .map_err(page_error)
}

/// GPX waypoint file as a download
pub async fn download_gpx(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let gpx = state
        .page_service
        .attraction_gpx(&slug)
        .await
        .map_err(page_error)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/gpx+xml".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&gpx.filename)),
        ],
        gpx.body,
    ))
}

/// `attachment` disposition with the filename as a quoted-string
fn attachment(filename: &str) -> String {
    let mut quoted = String::with_capacity(filename.len());
    for c in filename.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_control() => quoted.push(c),
            _ => quoted.push('_'),
        }
    }
    format!("attachment; filename=\"{}\"", quoted)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::infrastructure::content::testing::FakeContentPort;
    use crate::infrastructure::http::testing::app;

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn blue_lagoon() -> FakeContentPort {
        FakeContentPort::new().respond(
            "slug.current == $slug",
            json!({
                "_id": "attraction-1",
                "slug": "blue-lagoon",
                "name": "Blue Lagoon",
                "coords": { "lat": 64.25544, "lng": -21.131592 }
            }),
        )
    }

    #[tokio::test]
    async fn test_document_requires_slug() {
        let response = app(FakeContentPort::new())
            .oneshot(get("/api/attraction"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "error": "Slug is required" }));
    }

    #[tokio::test]
    async fn test_document_unknown_slug_is_404() {
        let response = app(FakeContentPort::new())
            .oneshot(get("/api/attraction?slug=nowhere"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_document_failure_is_500() {
        let response = app(FakeContentPort::new().fail("attraction"))
            .oneshot(get("/api/attraction?slug=blue-lagoon"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_document_passthrough() {
        let response = app(blue_lagoon())
            .oneshot(get("/api/attraction?slug=blue-lagoon"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["_id"], "attraction-1");
    }

    #[tokio::test]
    async fn test_page_status_codes() {
        let response = app(FakeContentPort::new())
            .oneshot(get("/api/pages/attractions/nowhere"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app(FakeContentPort::new().fail("attraction"))
            .oneshot(get("/api/pages/attractions/blue-lagoon"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = app(blue_lagoon())
            .oneshot(get("/api/pages/attractions/blue-lagoon"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_gpx_headers() {
        let response = app(blue_lagoon())
            .oneshot(get("/api/attractions/blue-lagoon/gpx"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/gpx+xml"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"blue-lagoon.gpx\""
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("<name>Blue Lagoon</name>"));
    }

    #[tokio::test]
    async fn test_gpx_filename_is_quoted_safely() {
        let port = FakeContentPort::new().respond(
            "slug.current == $slug",
            json!({
                "_id": "attraction-2",
                "slug": "say-\"hi\"-\\-þórsmörk",
                "name": "Say Hi",
                "coords": { "lat": 63.68, "lng": -19.52 }
            }),
        );
        let response = app(port)
            .oneshot(get("/api/attractions/say-hi/gpx"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            r#"attachment; filename="say-\"hi\"-\\-__rsm_rk.gpx""#
        );
    }
}
