//! Attraction queries

use std::sync::Arc;

use tracing::instrument;

use super::documents::{
    document_to_attraction, document_to_attraction_summary, AttractionDocument,
    AttractionSummaryDocument,
};
use super::{decode_list, decode_single};
use crate::application::ports::outbound::{ContentQueryPort, FetchError, FetchOptions, QueryParams};
use crate::domain::entities::{Attraction, AttractionSummary};
use crate::domain::value_objects::DurationUnit;

const ATTRACTION_PROJECTION: &str = r#"{
  "slug": slug.current,
  name,
  description,
  coords,
  category,
  visitDurationMin,
  visitDurationMax,
  facilities,
  mainImage,
  gallery,
  practical,
  mapSnippet,
  photoTips,
  faqs[]{ question, answer },
  "region": region->{ "slug": slug.current, name, intro }
}"#;

const SUMMARY_PROJECTION: &str = r#"{
  "slug": slug.current,
  name,
  coords,
  category,
  "region": region->{ "slug": slug.current, name }
}"#;

/// Repository for attraction documents
pub struct AttractionRepository {
    client: Arc<dyn ContentQueryPort>,
    duration_unit: DurationUnit,
}

impl AttractionRepository {
    pub fn new(client: Arc<dyn ContentQueryPort>, duration_unit: DurationUnit) -> Self {
        Self {
            client,
            duration_unit,
        }
    }

    /// Get a fully resolved attraction by slug
    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Attraction>, FetchError> {
        let query = format!(
            r#"*[_type == "attraction" && slug.current == $slug][0]{}"#,
            ATTRACTION_PROJECTION
        );
        let params = QueryParams::new().with("slug", slug);

        let value = self
            .client
            .query(&query, &params, FetchOptions::default())
            .await?;
        let unit = self.duration_unit;
        let attraction = decode_single(value, "attraction", |doc: AttractionDocument| {
            document_to_attraction(doc, unit)
        })?;

        tracing::debug!(found = attraction.is_some(), "Fetched attraction");
        Ok(attraction)
    }

    /// List every attraction with coordinates, for the map
    #[instrument(skip(self))]
    pub async fn list_for_map(&self) -> Result<Vec<AttractionSummary>, FetchError> {
        let query = format!(
            r#"*[_type == "attraction" && defined(coords)] | order(name asc){}"#,
            SUMMARY_PROJECTION
        );

        let value = self
            .client
            .query(&query, &QueryParams::new(), FetchOptions::no_store())
            .await?;
        let attractions = decode_list(
            value,
            "attraction",
            |doc: AttractionSummaryDocument| document_to_attraction_summary(doc),
        )?;

        tracing::debug!(count = attractions.len(), "Fetched map attractions");
        Ok(attractions)
    }

    /// List attractions whose region has the given slug
    #[instrument(skip(self))]
    pub async fn list_by_region(&self, region_slug: &str) -> Result<Vec<AttractionSummary>, FetchError> {
        let query = format!(
            r#"*[_type == "attraction" && region->slug.current == $regionSlug] | order(name asc){}"#,
            SUMMARY_PROJECTION
        );
        let params = QueryParams::new().with("regionSlug", region_slug);

        let value = self
            .client
            .query(&query, &params, FetchOptions::no_store())
            .await?;
        let attractions = decode_list(
            value,
            "attraction",
            |doc: AttractionSummaryDocument| document_to_attraction_summary(doc),
        )?;

        tracing::debug!(count = attractions.len(), "Fetched region attractions");
        Ok(attractions)
    }

    /// The stored attraction document, unprojected
    #[instrument(skip(self))]
    pub async fn get_document(&self, slug: &str) -> Result<Option<serde_json::Value>, FetchError> {
        let query = r#"*[_type == "attraction" && slug.current == $slug][0]"#;
        let params = QueryParams::new().with("slug", slug);

        let value = self
            .client
            .query(query, &params, FetchOptions::default())
            .await?;
        Ok(if value.is_null() { None } else { Some(value) })
    }
}
