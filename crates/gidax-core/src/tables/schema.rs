use crate::additives::AdditiveRegistry;
use crate::nutrients::NutrientClassifier;
use crate::scoring::ScoreThresholds;
use crate::sensitivity::{DiseaseLimits, KeywordTables};
use serde::{Deserialize, Serialize};

/// Every static table the engine evaluates against, versioned together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTables {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Classifier bands (low, medium) per nutrient.
    pub nutrient_thresholds: NutrientClassifier,
    /// Cut-points the health scorer compares raw values against.
    pub score_thresholds: ScoreThresholds,
    pub additives: AdditiveRegistry,
    pub keywords: KeywordTables,
    pub disease_limits: DiseaseLimits,
}
