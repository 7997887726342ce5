use crate::additives::AdditiveDetail;
use crate::alternatives::Alternative;
use crate::model::{Allergy, NovaGroup, NutriScore, Nutrients, ProductRecord};
use crate::nutrients::{Level, LevelSummary, Nutrient, NutrientClassifier};
use crate::scoring::HealthScore;
use crate::sensitivity::{Alert, HalalVerdict};
use crate::suitability::PersonalAnalysis;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Complete result of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub product: ProductSummary,
    pub scores: ScoresBlock,
    /// One entry per nutrient, in [`Nutrient::ALL`] order.
    pub nutrition: Vec<NutrientEntry>,
    pub ingredients: IngredientsBlock,
    pub alerts: Vec<Alert>,
    pub personal_analysis: PersonalAnalysis,
    pub alternatives: Vec<Alternative>,
    pub metadata: ReportMetadata,
}

impl AnalysisReport {
    pub fn nutrient(&self, nutrient: Nutrient) -> Option<&NutrientEntry> {
        self.nutrition.iter().find(|e| e.nutrient == nutrient)
    }
}

/// The analyzed product, echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub name: String,
    pub brand: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_grams: Option<Decimal>,
}

impl From<&ProductRecord> for ProductSummary {
    fn from(product: &ProductRecord) -> Self {
        ProductSummary {
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            serving_size: product.serving_size.clone(),
            serving_grams: product.serving_grams(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoresBlock {
    pub health_score: HealthScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutri_score: Option<NutriScore>,
    pub nova: NovaSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovaSummary {
    pub group: NovaGroup,
    pub label: String,
}

impl From<NovaGroup> for NovaSummary {
    fn from(group: NovaGroup) -> Self {
        NovaSummary {
            group,
            label: group.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientEntry {
    pub nutrient: Nutrient,
    pub label: String,
    /// Absent only for fiber when the label does not declare it.
    pub value: Option<Decimal>,
    pub unit: String,
    pub level: LevelSummary,
}

/// Build the nutrition block. Nutrients without a threshold pair, and a
/// missing fiber value, classify as unknown.
pub fn nutrition_block(nutrients: &Nutrients, classifier: &NutrientClassifier) -> Vec<NutrientEntry> {
    Nutrient::ALL
        .into_iter()
        .map(|nutrient| {
            let value = nutrient_value(nutrients, nutrient);
            let level = match value {
                Some(v) => classifier.classify(nutrient.name(), v),
                None => Level::Unknown.into(),
            };
            NutrientEntry {
                nutrient,
                label: nutrient.label().to_string(),
                value,
                unit: nutrient.unit().to_string(),
                level,
            }
        })
        .collect()
}

fn nutrient_value(n: &Nutrients, nutrient: Nutrient) -> Option<Decimal> {
    match nutrient {
        Nutrient::Energy => Some(n.energy),
        Nutrient::Protein => Some(n.protein),
        Nutrient::Carbohydrates => Some(n.carbohydrates),
        Nutrient::Sugar => Some(n.sugar),
        Nutrient::Fat => Some(n.fat),
        Nutrient::SaturatedFat => Some(n.saturated_fat),
        Nutrient::Fiber => n.fiber,
        Nutrient::Salt => Some(n.salt),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientsBlock {
    pub raw_text: String,
    /// Resolved additives in code order.
    pub additives: Vec<AdditiveDetail>,
    pub additives_count: usize,
    pub halal: HalalVerdict,
    /// Profile allergies found in the ingredient text.
    pub matched_allergens: Vec<Allergy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub confidence: Decimal,
    pub analyzed_at: DateTime<Utc>,
    pub tables_name: String,
    pub tables_version: String,
}
