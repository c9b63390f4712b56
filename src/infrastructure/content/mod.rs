//! Content store adapters
//!
//! One repository per document type, each issuing GROQ queries through the
//! shared [`ContentQueryPort`] and normalizing the projections into domain
//! records.

mod attraction_repository;
mod documents;
mod guide_repository;
mod region_repository;

pub use attraction_repository::AttractionRepository;
pub use guide_repository::GuideRepository;
pub use region_repository::RegionRepository;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::application::ports::outbound::{ContentQueryPort, FetchError};
use crate::domain::value_objects::DurationUnit;

/// Combined repository providing access to all content repositories
#[derive(Clone)]
pub struct ContentRepository {
    client: Arc<dyn ContentQueryPort>,
    duration_unit: DurationUnit,
}

impl ContentRepository {
    pub fn new(client: Arc<dyn ContentQueryPort>, duration_unit: DurationUnit) -> Self {
        Self {
            client,
            duration_unit,
        }
    }

    pub fn attractions(&self) -> AttractionRepository {
        AttractionRepository::new(self.client.clone(), self.duration_unit)
    }

    pub fn regions(&self) -> RegionRepository {
        RegionRepository::new(self.client.clone())
    }

    pub fn guides(&self) -> GuideRepository {
        GuideRepository::new(self.client.clone())
    }
}

/// Decode a single-document result; JSON `null` means no match
fn decode_single<D, T>(
    value: serde_json::Value,
    kind: &'static str,
    convert: impl FnOnce(D) -> Result<T, FetchError>,
) -> Result<Option<T>, FetchError>
where
    D: DeserializeOwned,
{
    if value.is_null() {
        return Ok(None);
    }
    let document: D = serde_json::from_value(value)
        .map_err(|e| FetchError::Decode(format!("{} document: {}", kind, e)))?;
    convert(document).map(Some)
}

/// Decode a collection result, skipping entries that fail validation
fn decode_list<D, T>(
    value: serde_json::Value,
    kind: &'static str,
    convert: impl Fn(D) -> Result<T, FetchError>,
) -> Result<Vec<T>, FetchError>
where
    D: DeserializeOwned,
{
    let entries = match value {
        serde_json::Value::Null => return Ok(Vec::new()),
        serde_json::Value::Array(entries) => entries,
        other => {
            return Err(FetchError::Decode(format!(
                "expected a list of {} documents, got {}",
                kind,
                json_kind(&other)
            )))
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        let converted = serde_json::from_value::<D>(entry)
            .map_err(|e| FetchError::Decode(e.to_string()))
            .and_then(&convert);
        match converted {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(kind = kind, error = %e, "Skipping invalid document in list"),
        }
    }
    Ok(records)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
