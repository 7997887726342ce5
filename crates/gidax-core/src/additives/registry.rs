use super::codes::{is_valid_code, normalize_code};
use crate::error::GidaxError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Religious dietary classification of an additive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HalalStatus {
    Halal,
    Haram,
    #[serde(alias = "şüpheli")]
    Suspicious,
    #[serde(alias = "bilinmiyor")]
    Unknown,
}

impl fmt::Display for HalalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HalalStatus::Halal => "halal",
            HalalStatus::Haram => "haram",
            HalalStatus::Suspicious => "suspicious",
            HalalStatus::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        write!(f, "{s}")
    }
}

impl RiskLevel {
    /// `<= 30` low, `<= 60` medium, above is high.
    pub fn from_score(risk: u8) -> RiskLevel {
        if risk <= 30 {
            RiskLevel::Low
        } else if risk <= 60 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// A registered food additive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditiveDefinition {
    pub code: String,
    pub name: String,
    pub category: String,
    /// 0 (harmless) to 100.
    pub risk: u8,
    pub halal: HalalStatus,
    #[serde(default)]
    pub concern: Option<String>,
}

impl AdditiveDefinition {
    /// Neutral definition used for codes that are not in the registry.
    pub fn unknown(code: &str) -> AdditiveDefinition {
        AdditiveDefinition {
            code: code.to_string(),
            name: "unknown".into(),
            category: "unknown".into(),
            risk: 50,
            halal: HalalStatus::Unknown,
            concern: None,
        }
    }
}

/// A resolved additive as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditiveDetail {
    pub code: String,
    pub name: String,
    pub category: String,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub halal_status: HalalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concern: Option<String>,
    /// False when the code fell back to the unknown definition.
    pub registered: bool,
}

impl AdditiveDetail {
    fn new(def: &AdditiveDefinition, registered: bool) -> Self {
        AdditiveDetail {
            code: def.code.clone(),
            name: def.name.clone(),
            category: def.category.clone(),
            risk_score: def.risk,
            risk_level: RiskLevel::from_score(def.risk),
            halal_status: def.halal,
            concern: def.concern.clone(),
            registered,
        }
    }
}

/// Lookup table of known additives, keyed by normalized code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AdditiveDefinition>", into = "Vec<AdditiveDefinition>")]
pub struct AdditiveRegistry {
    entries: BTreeMap<String, AdditiveDefinition>,
}

impl AdditiveRegistry {
    pub fn new(definitions: Vec<AdditiveDefinition>) -> Result<Self, GidaxError> {
        let mut entries = BTreeMap::new();
        for mut def in definitions {
            def.code = normalize_code(&def.code);
            if !is_valid_code(&def.code) {
                return Err(GidaxError::TablesInvalid(format!(
                    "malformed additive code '{}'",
                    def.code
                )));
            }
            if def.risk > 100 {
                return Err(GidaxError::TablesInvalid(format!(
                    "additive {} has risk {} (expected 0-100)",
                    def.code, def.risk
                )));
            }
            if entries.contains_key(&def.code) {
                return Err(GidaxError::TablesInvalid(format!(
                    "duplicate additive code '{}'",
                    def.code
                )));
            }
            entries.insert(def.code.clone(), def);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, code: &str) -> Option<&AdditiveDefinition> {
        self.entries.get(&normalize_code(code))
    }

    /// Look up a code; unregistered codes get [`AdditiveDefinition::unknown`].
    pub fn lookup(&self, code: &str) -> AdditiveDefinition {
        match self.get(code) {
            Some(def) => def.clone(),
            None => AdditiveDefinition::unknown(&normalize_code(code)),
        }
    }

    /// Resolve a set of codes into report details, in code order.
    pub fn resolve(&self, codes: &BTreeSet<String>) -> Vec<AdditiveDetail> {
        codes
            .iter()
            .map(|code| match self.get(code) {
                Some(def) => AdditiveDetail::new(def, true),
                None => {
                    tracing::warn!(%code, "additive not registered, using unknown definition");
                    AdditiveDetail::new(&AdditiveDefinition::unknown(code), false)
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AdditiveDefinition> {
        self.entries.values()
    }
}

impl TryFrom<Vec<AdditiveDefinition>> for AdditiveRegistry {
    type Error = GidaxError;

    fn try_from(value: Vec<AdditiveDefinition>) -> Result<Self, Self::Error> {
        AdditiveRegistry::new(value)
    }
}

impl From<AdditiveRegistry> for Vec<AdditiveDefinition> {
    fn from(value: AdditiveRegistry) -> Self {
        value.entries.into_values().collect()
    }
}
