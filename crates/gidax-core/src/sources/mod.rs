//! Seams for the collaborators that feed the analysis.
//!
//! Network lookups and image extraction live outside this crate; callers plug
//! in their own implementations and hand the engine a [`ProductRecord`].

use crate::alternatives::CatalogEntry;
use crate::model::ProductRecord;
use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("product not found: {0}")]
    NotFound(String),

    #[error("extraction confidence {confidence} is below the accepted minimum")]
    LowConfidence { confidence: Decimal },

    #[error("could not parse source response: {0}")]
    Parse(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Looks up a product by barcode or other stable identifier.
pub trait ProductLookupService: Send + Sync {
    fn fetch_by_identifier(&self, identifier: &str) -> Result<ProductRecord, SourceError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Turns a label photo into a product record.
pub trait VisionExtractionService: Send + Sync {
    fn extract(&self, image: &[u8]) -> Result<ProductRecord, SourceError>;

    fn backend_name(&self) -> &str;
}

/// Source of candidate alternatives, grouped by category.
pub trait AlternativeCatalog: Send + Sync {
    /// Entries whose category matches `category`. Order is not significant.
    fn for_category(&self, category: &str) -> Vec<CatalogEntry>;
}
