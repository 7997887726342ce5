pub mod builtin;
pub mod schema;

use crate::error::GidaxError;
use crate::scoring::Cuts;
use schema::RuleTables;
use std::path::Path;

/// Load rule tables from a JSON file.
pub fn load_tables(path: &Path) -> Result<RuleTables, GidaxError> {
    let content = std::fs::read_to_string(path).map_err(|e| GidaxError::TablesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_tables(&content, path)
}

/// Parse rule tables from a JSON string, reporting errors against `source`.
pub fn parse_tables(json: &str, source: &Path) -> Result<RuleTables, GidaxError> {
    let tables: RuleTables = serde_json::from_str(json).map_err(|e| GidaxError::TablesLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_tables(&tables)?;
    Ok(tables)
}

/// Parse rule tables from a JSON string (no file path context).
pub fn parse_tables_str(json: &str) -> Result<RuleTables, GidaxError> {
    let tables: RuleTables = serde_json::from_str(json)?;
    validate_tables(&tables)?;
    Ok(tables)
}

/// Validate that rule tables are well-formed.
///
/// Additive codes, risk range and keyword entries are already checked while
/// deserializing; this covers the cross-field ordering rules.
pub fn validate_tables(tables: &RuleTables) -> Result<(), GidaxError> {
    if tables.name.trim().is_empty() {
        return Err(GidaxError::TablesInvalid("name must not be empty".into()));
    }

    tables.nutrient_thresholds.validate()?;

    let s = &tables.score_thresholds;
    if s.sugar.low.is_sign_negative() || s.sugar.low > s.sugar.medium {
        return Err(GidaxError::TablesInvalid(format!(
            "score threshold 'sugar' has low {} above medium {}",
            s.sugar.low, s.sugar.medium
        )));
    }
    check_cuts("sugar", &Cuts { medium: s.sugar.medium, high: s.sugar.high })?;
    check_cuts("fat", &s.fat)?;
    check_cuts("saturated_fat", &s.saturated_fat)?;
    check_cuts("salt", &s.salt)?;
    check_cuts("fiber", &s.fiber)?;
    check_cuts("protein", &s.protein)?;

    let d = &tables.disease_limits;
    if d.diabetes_sugar_warning > d.diabetes_sugar_danger {
        return Err(GidaxError::TablesInvalid(format!(
            "diabetes sugar warning {} is above danger {}",
            d.diabetes_sugar_warning, d.diabetes_sugar_danger
        )));
    }

    Ok(())
}

fn check_cuts(name: &str, cuts: &Cuts) -> Result<(), GidaxError> {
    if cuts.medium.is_sign_negative() || cuts.medium > cuts.high {
        return Err(GidaxError::TablesInvalid(format!(
            "score threshold '{}' has medium {} above high {} or is negative",
            name, cuts.medium, cuts.high
        )));
    }
    Ok(())
}
