//! Region entity - A geographic area grouping attractions and guides

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Slug;

/// A region of the country
///
/// Attractions and guides point at their region; the region itself stores no
/// back-references, so its members are always queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub slug: Slug,
    pub name: String,
    pub intro: String,
}

#[cfg(test)]
impl Region {
    pub fn new(slug: Slug, name: impl Into<String>, intro: impl Into<String>) -> Self {
        Self {
            slug,
            name: name.into(),
            intro: intro.into(),
        }
    }
}
