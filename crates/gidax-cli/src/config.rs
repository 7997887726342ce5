use std::env;
use std::path::PathBuf;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub log_level: String,
    /// Custom rule tables used when `--tables` is not given.
    pub tables: Option<PathBuf>,
}

impl CliConfig {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = lookup("GIDAX_LOG_LEVEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let tables = lookup("GIDAX_TABLES")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self { log_level, tables }
    }
}
