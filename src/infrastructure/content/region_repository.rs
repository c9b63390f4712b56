//! Region queries

use std::sync::Arc;

use tracing::instrument;

use super::documents::{document_to_region, RegionDocument};
use super::{decode_list, decode_single};
use crate::application::ports::outbound::{ContentQueryPort, FetchError, FetchOptions, QueryParams};
use crate::domain::entities::Region;

const REGION_PROJECTION: &str = r#"{
  name,
  "slug": slug.current,
  intro
}"#;

/// Repository for region documents
pub struct RegionRepository {
    client: Arc<dyn ContentQueryPort>,
}

impl RegionRepository {
    pub fn new(client: Arc<dyn ContentQueryPort>) -> Self {
        Self { client }
    }

    /// Get a region by slug
    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Region>, FetchError> {
        let query = format!(
            r#"*[_type == "region" && slug.current == $slug][0]{}"#,
            REGION_PROJECTION
        );
        let params = QueryParams::new().with("slug", slug);

        let value = self
            .client
            .query(&query, &params, FetchOptions::no_store())
            .await?;
        decode_single(value, "region", |doc: RegionDocument| document_to_region(doc))
    }

    /// List all regions by name
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Region>, FetchError> {
        let query = format!(
            r#"*[_type == "region"] | order(name asc){}"#,
            REGION_PROJECTION
        );

        let value = self
            .client
            .query(&query, &QueryParams::new(), FetchOptions::no_store())
            .await?;
        let regions = decode_list(value, "region", |doc: RegionDocument| document_to_region(doc))?;

        tracing::debug!(count = regions.len(), "Fetched regions");
        Ok(regions)
    }
}
