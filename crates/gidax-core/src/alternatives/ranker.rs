use super::catalog::CatalogEntry;
use crate::sensitivity::fold;
use crate::sources::AlternativeCatalog;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    pub brand: String,
    pub health_score: u8,
    /// Points above the analyzed product's health score.
    pub improvement: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_benefit: Option<String>,
    pub is_domestic: bool,
}

/// Catalog entries in `category` that score strictly higher than the current
/// product, best improvement first. Ties are ordered by name then brand.
pub fn rank(
    category: &str,
    current_score: u8,
    catalog: &dyn AlternativeCatalog,
) -> Vec<Alternative> {
    let wanted = fold(category.trim());
    let mut alternatives: Vec<Alternative> = catalog
        .for_category(category)
        .into_iter()
        .filter(|e| fold(e.category.trim()) == wanted && e.health_score > current_score)
        .map(|e| to_alternative(e, current_score))
        .collect();

    alternatives.sort_by(|a, b| {
        b.improvement
            .cmp(&a.improvement)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.brand.cmp(&b.brand))
    });
    alternatives
}

fn to_alternative(entry: CatalogEntry, current_score: u8) -> Alternative {
    Alternative {
        improvement: entry.health_score - current_score,
        name: entry.name,
        brand: entry.brand,
        health_score: entry.health_score,
        key_benefit: entry.key_benefit,
        is_domestic: entry.is_domestic,
    }
}
