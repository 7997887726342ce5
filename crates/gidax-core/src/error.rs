use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GidaxError {
    #[error("invalid product data: {field} {reason}")]
    InvalidProductData { field: String, reason: String },

    #[error("failed to load rule tables from {path}: {reason}")]
    TablesLoad { path: PathBuf, reason: String },

    #[error("invalid rule tables: {0}")]
    TablesInvalid(String),

    #[error(
        "unknown preset '{0}'. Available: {available}",
        available = crate::tables::builtin::PRESETS.join(", ")
    )]
    UnknownPreset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
