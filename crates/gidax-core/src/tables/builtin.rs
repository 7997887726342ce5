use super::schema::RuleTables;
use super::validate_tables;
use crate::alternatives::StaticCatalog;
use crate::error::GidaxError;

const GIDAX_TR_JSON: &str = include_str!("../../../../rules/gidax-tr.json");
const ALTERNATIVES_TR_JSON: &str = include_str!("../../../../rules/alternatives-tr.json");

/// Available predefined table sets.
pub const PRESETS: &[&str] = &["tr"];

/// Load a predefined table set by name.
pub fn load_preset(name: &str) -> Result<RuleTables, GidaxError> {
    match name {
        "tr" => {
            let tables: RuleTables = serde_json::from_str(GIDAX_TR_JSON)?;
            validate_tables(&tables)?;
            Ok(tables)
        }
        _ => Err(GidaxError::UnknownPreset(name.to_string())),
    }
}

/// Catalog of alternatives shipped with a preset.
pub fn builtin_catalog(name: &str) -> Result<StaticCatalog, GidaxError> {
    match name {
        "tr" => StaticCatalog::from_json(ALTERNATIVES_TR_JSON),
        _ => Err(GidaxError::UnknownPreset(name.to_string())),
    }
}
