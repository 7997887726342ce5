use crate::error::GidaxError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Nutrients reported per 100g, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Energy,
    Protein,
    Carbohydrates,
    Sugar,
    Fat,
    SaturatedFat,
    Fiber,
    Salt,
}

impl Nutrient {
    pub const ALL: [Nutrient; 8] = [
        Nutrient::Energy,
        Nutrient::Protein,
        Nutrient::Carbohydrates,
        Nutrient::Sugar,
        Nutrient::Fat,
        Nutrient::SaturatedFat,
        Nutrient::Fiber,
        Nutrient::Salt,
    ];

    /// Key used in threshold tables.
    pub fn name(self) -> &'static str {
        match self {
            Nutrient::Energy => "energy",
            Nutrient::Protein => "protein",
            Nutrient::Carbohydrates => "carbohydrates",
            Nutrient::Sugar => "sugar",
            Nutrient::Fat => "fat",
            Nutrient::SaturatedFat => "saturated_fat",
            Nutrient::Fiber => "fiber",
            Nutrient::Salt => "salt",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Energy => "kcal",
            _ => "g",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Energy => "Enerji",
            Nutrient::Protein => "Protein",
            Nutrient::Carbohydrates => "Karbonhidrat",
            Nutrient::Sugar => "Şeker",
            Nutrient::Fat => "Yağ",
            Nutrient::SaturatedFat => "Doymuş Yağ",
            Nutrient::Fiber => "Lif",
            Nutrient::Salt => "Tuz",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
    Unknown,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::Low => "Düşük",
            Level::Medium => "Orta",
            Level::High => "Yüksek",
            Level::Unknown => "Bilinmiyor",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Level::Low => "🟢",
            Level::Medium => "🟡",
            Level::High => "🔴",
            Level::Unknown => "⚪",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
            Level::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub level: Level,
    pub label: String,
    pub icon: String,
}

impl From<Level> for LevelSummary {
    fn from(level: Level) -> Self {
        LevelSummary {
            level,
            label: level.label().to_string(),
            icon: level.icon().to_string(),
        }
    }
}

/// Cut pair for one nutrient, in g per 100g.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientThreshold {
    pub low: Decimal,
    pub medium: Decimal,
}

impl NutrientThreshold {
    /// `value <= low` is low, `value <= medium` is medium, anything above is high.
    pub fn level(&self, value: Decimal) -> Level {
        if value <= self.low {
            Level::Low
        } else if value <= self.medium {
            Level::Medium
        } else {
            Level::High
        }
    }
}

/// Maps nutrient values to low/medium/high bands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutrientClassifier {
    thresholds: BTreeMap<String, NutrientThreshold>,
}

impl NutrientClassifier {
    pub fn new(thresholds: BTreeMap<String, NutrientThreshold>) -> Self {
        Self { thresholds }
    }

    /// Classify a value against the registered threshold pair for `nutrient`.
    ///
    /// Unregistered nutrients classify as [`Level::Unknown`].
    pub fn classify(&self, nutrient: &str, value: Decimal) -> LevelSummary {
        self.level(nutrient, value).into()
    }

    pub fn level(&self, nutrient: &str, value: Decimal) -> Level {
        match self.thresholds.get(nutrient) {
            Some(t) => t.level(value),
            None => Level::Unknown,
        }
    }

    pub fn threshold(&self, nutrient: &str) -> Option<&NutrientThreshold> {
        self.thresholds.get(nutrient)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NutrientThreshold)> {
        self.thresholds.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn validate(&self) -> Result<(), GidaxError> {
        for (name, t) in &self.thresholds {
            if t.low.is_sign_negative() || t.low > t.medium {
                return Err(GidaxError::TablesInvalid(format!(
                    "nutrient '{}' has invalid thresholds (low {} > medium {} or negative)",
                    name, t.low, t.medium
                )));
            }
        }
        Ok(())
    }
}
