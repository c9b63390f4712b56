//! Guide queries

use std::sync::Arc;

use tracing::instrument;

use super::documents::{
    document_to_guide, document_to_guide_summary, GuideDocument, GuideSummaryDocument,
};
use super::{decode_list, decode_single};
use crate::application::ports::outbound::{ContentQueryPort, FetchError, FetchOptions, QueryParams};
use crate::domain::entities::{Guide, GuideSummary};

const GUIDE_PROJECTION: &str = r#"{
  title,
  "slug": slug.current,
  body,
  "region": region->{ "slug": slug.current, name }
}"#;

const GUIDE_SUMMARY_PROJECTION: &str = r#"{
  title,
  "slug": slug.current,
  "region": region->{ "slug": slug.current, name }
}"#;

/// Repository for guide documents
pub struct GuideRepository {
    client: Arc<dyn ContentQueryPort>,
}

impl GuideRepository {
    pub fn new(client: Arc<dyn ContentQueryPort>) -> Self {
        Self { client }
    }

    /// Get a guide with its body by slug
    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Guide>, FetchError> {
        let query = format!(
            r#"*[_type == "guide" && slug.current == $slug][0]{}"#,
            GUIDE_PROJECTION
        );
        let params = QueryParams::new().with("slug", slug);

        let value = self
            .client
            .query(&query, &params, FetchOptions::default())
            .await?;
        decode_single(value, "guide", |doc: GuideDocument| document_to_guide(doc))
    }

    /// List all guides by title
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<GuideSummary>, FetchError> {
        let query = format!(
            r#"*[_type == "guide"] | order(title asc){}"#,
            GUIDE_SUMMARY_PROJECTION
        );

        let value = self
            .client
            .query(&query, &QueryParams::new(), FetchOptions::default())
            .await?;
        let guides = decode_list(value, "guide", |doc: GuideSummaryDocument| {
            document_to_guide_summary(doc)
        })?;

        tracing::debug!(count = guides.len(), "Fetched guides");
        Ok(guides)
    }

    /// List guides attached to the region with the given slug
    #[instrument(skip(self))]
    pub async fn list_by_region(&self, region_slug: &str) -> Result<Vec<GuideSummary>, FetchError> {
        let query = format!(
            r#"*[_type == "guide" && region->slug.current == $regionSlug] | order(title asc){}"#,
            GUIDE_SUMMARY_PROJECTION
        );
        let params = QueryParams::new().with("regionSlug", region_slug);

        let value = self
            .client
            .query(&query, &params, FetchOptions::no_store())
            .await?;
        decode_list(value, "guide", |doc: GuideSummaryDocument| {
            document_to_guide_summary(doc)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::content::testing::FakeContentPort;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_by_slug_with_region() {
        let port = Arc::new(FakeContentPort::new().respond(
            r#"_type == "guide" && slug.current == $slug"#,
            json!({
                "title": "Golden Circle",
                "slug": "golden-circle",
                "body": [],
                "region": { "slug": "south", "name": "South Iceland" }
            }),
        ));
        let guide = GuideRepository::new(port)
            .get_by_slug("golden-circle")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(guide.title, "Golden Circle");
        assert_eq!(guide.region.unwrap().slug.as_str(), "south");
    }

    #[tokio::test]
    async fn test_list_orders_by_title() {
        let port = Arc::new(FakeContentPort::new().respond(
            r#"_type == "guide""#,
            json!([{ "title": "A", "slug": "a" }, { "title": "B", "slug": "b", "region": null }]),
        ));
        let guides = GuideRepository::new(port.clone()).list().await.unwrap();
        assert_eq!(guides.len(), 2);
        assert!(port.calls()[0].query.contains("order(title asc)"));
    }

    #[tokio::test]
    async fn test_list_by_region_binds_parameter() {
        let port = Arc::new(FakeContentPort::new());
        let guides = GuideRepository::new(port.clone())
            .list_by_region("north")
            .await
            .unwrap();
        assert!(guides.is_empty());
        assert_eq!(port.calls()[0].params.get("regionSlug"), Some(&json!("north")));
    }
}
