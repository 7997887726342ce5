use crate::error::GidaxError;
use crate::sensitivity::fold;
use crate::sources::AlternativeCatalog;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A product offered as a healthier alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub health_score: u8,
    #[serde(default)]
    pub key_benefit: Option<String>,
    #[serde(default)]
    pub is_domestic: bool,
}

/// Read-only catalog backed by a JSON list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, GidaxError> {
        for entry in &entries {
            if entry.health_score > 100 {
                return Err(GidaxError::TablesInvalid(format!(
                    "catalog entry '{}' has health score {} (expected 0-100)",
                    entry.name, entry.health_score
                )));
            }
            if entry.category.trim().is_empty() {
                return Err(GidaxError::TablesInvalid(format!(
                    "catalog entry '{}' has no category",
                    entry.name
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, GidaxError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        StaticCatalog::new(entries)
    }

    pub fn load(path: &Path) -> Result<Self, GidaxError> {
        let content = std::fs::read_to_string(path).map_err(|e| GidaxError::TablesLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        StaticCatalog::from_json(&content)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.iter().any(|c| fold(c) == fold(&entry.category)) {
                seen.push(&entry.category);
            }
        }
        seen
    }
}

impl AlternativeCatalog for StaticCatalog {
    fn for_category(&self, category: &str) -> Vec<CatalogEntry> {
        let wanted = fold(category.trim());
        self.entries
            .iter()
            .filter(|e| fold(e.category.trim()) == wanted)
            .cloned()
            .collect()
    }
}
