use crate::error::GidaxError;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

static SERVING_GRAMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:g|gr|gram)\b").expect("serving size pattern is valid")
});

/// NOVA food-processing group (1 = unprocessed, 4 = ultra-processed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct NovaGroup(u8);

impl NovaGroup {
    pub fn new(value: u8) -> Result<NovaGroup, GidaxError> {
        if (1..=4).contains(&value) {
            Ok(NovaGroup(value))
        } else {
            Err(GidaxError::InvalidProductData {
                field: "nova_group".into(),
                reason: format!("{value} is outside 1-4"),
            })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "İşlenmemiş veya az işlenmiş gıda",
            2 => "İşlenmiş mutfak malzemesi",
            3 => "İşlenmiş gıda",
            _ => "Ultra işlenmiş gıda",
        }
    }
}

impl TryFrom<u8> for NovaGroup {
    type Error = GidaxError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        NovaGroup::new(value)
    }
}

impl From<NovaGroup> for u8 {
    fn from(value: NovaGroup) -> Self {
        value.0
    }
}

impl fmt::Display for NovaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NOVA {}", self.0)
    }
}

/// External front-of-pack grade, passed through unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NutriScore {
    A,
    B,
    C,
    D,
    E,
}

impl fmt::Display for NutriScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            NutriScore::A => "A",
            NutriScore::B => "B",
            NutriScore::C => "C",
            NutriScore::D => "D",
            NutriScore::E => "E",
        };
        write!(f, "{letter}")
    }
}

/// Per-100g nutrition as supplied by a collaborator. Fields may be missing;
/// [`NutritionFacts::require`] turns this into validated [`Nutrients`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    /// Energy in kcal.
    #[serde(default)]
    pub energy: Option<Decimal>,
    #[serde(default)]
    pub protein: Option<Decimal>,
    #[serde(default)]
    pub carbohydrates: Option<Decimal>,
    #[serde(default)]
    pub sugar: Option<Decimal>,
    #[serde(default)]
    pub fat: Option<Decimal>,
    #[serde(default)]
    pub saturated_fat: Option<Decimal>,
    #[serde(default)]
    pub fiber: Option<Decimal>,
    #[serde(default)]
    pub salt: Option<Decimal>,
}

/// Validated per-100g nutrition. Every value is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrients {
    pub energy: Decimal,
    pub protein: Decimal,
    pub carbohydrates: Decimal,
    pub sugar: Decimal,
    pub fat: Decimal,
    pub saturated_fat: Decimal,
    /// Fiber is often not declared on the label; absent means not scored.
    pub fiber: Option<Decimal>,
    pub salt: Decimal,
}

impl NutritionFacts {
    /// Check that every required field is present and non-negative.
    pub fn require(&self) -> Result<Nutrients, GidaxError> {
        let fiber = match self.fiber {
            Some(v) => Some(non_negative("fiber", v)?),
            None => None,
        };

        Ok(Nutrients {
            energy: required("energy", self.energy)?,
            protein: required("protein", self.protein)?,
            carbohydrates: required("carbohydrates", self.carbohydrates)?,
            sugar: required("sugar", self.sugar)?,
            fat: required("fat", self.fat)?,
            saturated_fat: required("saturated_fat", self.saturated_fat)?,
            fiber,
            salt: required("salt", self.salt)?,
        })
    }
}

fn required(field: &str, value: Option<Decimal>) -> Result<Decimal, GidaxError> {
    match value {
        Some(v) => non_negative(field, v),
        None => Err(GidaxError::InvalidProductData {
            field: field.into(),
            reason: "missing".into(),
        }),
    }
}

fn non_negative(field: &str, value: Decimal) -> Result<Decimal, GidaxError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(GidaxError::InvalidProductData {
            field: field.into(),
            reason: format!("negative value {value}"),
        });
    }
    Ok(value)
}

/// A packaged-food product as delivered by a lookup or extraction collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    #[serde(default)]
    pub brand: String,
    /// Free-text category tag, e.g. "İçecek".
    #[serde(default)]
    pub category: String,
    /// Serving size text with an embedded gram quantity, e.g. "1 paket (40 g)".
    #[serde(default)]
    pub serving_size: Option<String>,
    pub nutrition: NutritionFacts,
    #[serde(default)]
    pub ingredients_text: String,
    /// Additive codes listed explicitly by the data source.
    #[serde(default)]
    pub additives: Vec<String>,
    pub nova_group: NovaGroup,
    #[serde(default)]
    pub nutri_score: Option<NutriScore>,
    /// Extraction confidence in 0-1; absent for curated lookups.
    #[serde(default)]
    pub confidence: Option<Decimal>,
}

impl ProductRecord {
    /// Validate the record, returning the nutrients the engine works on.
    pub fn validate(&self) -> Result<Nutrients, GidaxError> {
        if self.name.trim().is_empty() {
            return Err(GidaxError::InvalidProductData {
                field: "name".into(),
                reason: "empty".into(),
            });
        }
        if let Some(c) = self.confidence {
            if c < Decimal::ZERO || c > Decimal::ONE {
                return Err(GidaxError::InvalidProductData {
                    field: "confidence".into(),
                    reason: format!("{c} is outside 0-1"),
                });
            }
        }
        self.nutrition.require()
    }

    /// Gram quantity embedded in the serving size text, if any.
    pub fn serving_grams(&self) -> Option<Decimal> {
        let text = self.serving_size.as_deref()?;
        let caps = SERVING_GRAMS.captures(text)?;
        caps[1].replace(',', ".").parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Disease {
    #[serde(rename = "diyabet", alias = "diabetes")]
    Diabetes,
    #[serde(rename = "hipertansiyon", alias = "hypertension")]
    Hypertension,
    #[serde(rename = "kolesterol", alias = "cholesterol")]
    Cholesterol,
    #[serde(rename = "gluten")]
    Gluten,
    #[serde(rename = "laktoz", alias = "lactose")]
    Lactose,
}

impl Disease {
    pub const ALL: [Disease; 5] = [
        Disease::Diabetes,
        Disease::Hypertension,
        Disease::Cholesterol,
        Disease::Gluten,
        Disease::Lactose,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Disease::Diabetes => "diyabet",
            Disease::Hypertension => "hipertansiyon",
            Disease::Cholesterol => "kolesterol",
            Disease::Gluten => "gluten",
            Disease::Lactose => "laktoz",
        }
    }

    pub fn parse(s: &str) -> Option<Disease> {
        match s.trim().to_lowercase().as_str() {
            "diyabet" | "diabetes" => Some(Disease::Diabetes),
            "hipertansiyon" | "hypertension" => Some(Disease::Hypertension),
            "kolesterol" | "cholesterol" => Some(Disease::Cholesterol),
            "gluten" => Some(Disease::Gluten),
            "laktoz" | "lactose" => Some(Disease::Lactose),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sensitivity {
    #[serde(rename = "halal", alias = "helal")]
    Halal,
    #[serde(rename = "boykot", alias = "boycott")]
    Boycott,
    #[serde(rename = "yerli", alias = "domestic")]
    Domestic,
    #[serde(rename = "vegan")]
    Vegan,
    #[serde(rename = "vejetaryen", alias = "vegetarian")]
    Vegetarian,
}

impl Sensitivity {
    pub const ALL: [Sensitivity; 5] = [
        Sensitivity::Halal,
        Sensitivity::Boycott,
        Sensitivity::Domestic,
        Sensitivity::Vegan,
        Sensitivity::Vegetarian,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Sensitivity::Halal => "halal",
            Sensitivity::Boycott => "boykot",
            Sensitivity::Domestic => "yerli",
            Sensitivity::Vegan => "vegan",
            Sensitivity::Vegetarian => "vejetaryen",
        }
    }

    pub fn parse(s: &str) -> Option<Sensitivity> {
        match s.trim().to_lowercase().as_str() {
            "halal" | "helal" => Some(Sensitivity::Halal),
            "boykot" | "boycott" => Some(Sensitivity::Boycott),
            "yerli" | "domestic" => Some(Sensitivity::Domestic),
            "vegan" => Some(Sensitivity::Vegan),
            "vejetaryen" | "vegetarian" => Some(Sensitivity::Vegetarian),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Allergy {
    Gluten,
    Sut,
    Yumurta,
    YerFistigi,
    Kuruyemis,
    Soya,
    Balik,
    KabukluDeniz,
    Susam,
    Hardal,
}

impl Allergy {
    pub const ALL: [Allergy; 10] = [
        Allergy::Gluten,
        Allergy::Sut,
        Allergy::Yumurta,
        Allergy::YerFistigi,
        Allergy::Kuruyemis,
        Allergy::Soya,
        Allergy::Balik,
        Allergy::KabukluDeniz,
        Allergy::Susam,
        Allergy::Hardal,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Allergy::Gluten => "gluten",
            Allergy::Sut => "sut",
            Allergy::Yumurta => "yumurta",
            Allergy::YerFistigi => "yer_fistigi",
            Allergy::Kuruyemis => "kuruyemis",
            Allergy::Soya => "soya",
            Allergy::Balik => "balik",
            Allergy::KabukluDeniz => "kabuklu_deniz",
            Allergy::Susam => "susam",
            Allergy::Hardal => "hardal",
        }
    }

    /// Display name used in alert titles.
    pub fn label(self) -> &'static str {
        match self {
            Allergy::Gluten => "Gluten",
            Allergy::Sut => "Süt",
            Allergy::Yumurta => "Yumurta",
            Allergy::YerFistigi => "Yer fıstığı",
            Allergy::Kuruyemis => "Kuruyemiş",
            Allergy::Soya => "Soya",
            Allergy::Balik => "Balık",
            Allergy::KabukluDeniz => "Kabuklu deniz ürünü",
            Allergy::Susam => "Susam",
            Allergy::Hardal => "Hardal",
        }
    }

    pub fn parse(s: &str) -> Option<Allergy> {
        let lower = s.trim().to_lowercase();
        Allergy::ALL.into_iter().find(|a| a.id() == lower)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Health,
    Energy,
    CleanEating,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::WeightLoss,
        Goal::MuscleGain,
        Goal::Health,
        Goal::Energy,
        Goal::CleanEating,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight_loss",
            Goal::MuscleGain => "muscle_gain",
            Goal::Health => "health",
            Goal::Energy => "energy",
            Goal::CleanEating => "clean_eating",
        }
    }

    pub fn parse(s: &str) -> Option<Goal> {
        let lower = s.trim().to_lowercase();
        Goal::ALL.into_iter().find(|g| g.id() == lower)
    }
}

/// The user's health profile. Sets are membership-tested only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub diseases: BTreeSet<Disease>,
    #[serde(default)]
    pub sensitivities: BTreeSet<Sensitivity>,
    #[serde(default)]
    pub allergies: BTreeSet<Allergy>,
    #[serde(default)]
    pub goals: BTreeSet<Goal>,
}

impl UserProfile {
    pub fn has_disease(&self, disease: Disease) -> bool {
        self.diseases.contains(&disease)
    }

    pub fn has_sensitivity(&self, sensitivity: Sensitivity) -> bool {
        self.sensitivities.contains(&sensitivity)
    }

    pub fn has_goal(&self, goal: Goal) -> bool {
        self.goals.contains(&goal)
    }

    /// Returns whether the disease is enabled after the toggle.
    pub fn toggle_disease(&mut self, disease: Disease) -> bool {
        toggle(&mut self.diseases, disease)
    }

    pub fn toggle_sensitivity(&mut self, sensitivity: Sensitivity) -> bool {
        toggle(&mut self.sensitivities, sensitivity)
    }

    pub fn toggle_allergy(&mut self, allergy: Allergy) -> bool {
        toggle(&mut self.allergies, allergy)
    }

    pub fn toggle_goal(&mut self, goal: Goal) -> bool {
        toggle(&mut self.goals, goal)
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, tag: T) -> bool {
    if set.remove(&tag) {
        false
    } else {
        set.insert(tag);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn facts() -> NutritionFacts {
        NutritionFacts {
            energy: Some(dec!(520)),
            protein: Some(dec!(6.5)),
            carbohydrates: Some(dec!(58)),
            sugar: Some(dec!(32)),
            fat: Some(dec!(28)),
            saturated_fat: Some(dec!(14)),
            fiber: None,
            salt: Some(dec!(0.3)),
        }
    }

    #[test]
    fn test_nova_range() {
        assert!(NovaGroup::new(0).is_err());
        assert!(NovaGroup::new(5).is_err());
        for v in 1..=4 {
            assert_eq!(NovaGroup::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn test_nova_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<NovaGroup>("7").is_err());
        assert_eq!(serde_json::from_str::<NovaGroup>("4").unwrap().value(), 4);
    }

    #[test]
    fn test_missing_required_nutrient_rejected() {
        let mut f = facts();
        f.salt = None;
        let err = f.require().unwrap_err();
        assert!(err.to_string().contains("salt"));
    }

    #[test]
    fn test_negative_nutrient_rejected() {
        let mut f = facts();
        f.sugar = Some(dec!(-1));
        assert!(f.require().is_err());
    }

    #[test]
    fn test_missing_fiber_is_not_zero() {
        let n = facts().require().unwrap();
        assert_eq!(n.fiber, None);
    }

    #[test]
    fn test_serving_grams() {
        let mut p = ProductRecord {
            name: "Gofret".into(),
            brand: "Ülker".into(),
            category: "Atıştırmalık".into(),
            serving_size: Some("1 paket (36,5 g)".into()),
            nutrition: facts(),
            ingredients_text: String::new(),
            additives: vec![],
            nova_group: NovaGroup::new(4).unwrap(),
            nutri_score: None,
            confidence: None,
        };
        assert_eq!(p.serving_grams(), Some(dec!(36.5)));

        p.serving_size = Some("1 kutu".into());
        assert_eq!(p.serving_grams(), None);
    }

    #[test]
    fn test_toggle_is_set_operation() {
        let mut profile = UserProfile::default();
        assert!(profile.toggle_disease(Disease::Diabetes));
        assert!(profile.has_disease(Disease::Diabetes));
        assert!(!profile.toggle_disease(Disease::Diabetes));
        assert!(profile.diseases.is_empty());

        assert!(profile.toggle_sensitivity(Sensitivity::Halal));
        assert!(profile.toggle_allergy(Allergy::Gluten));
        assert!(profile.toggle_goal(Goal::WeightLoss));
        assert!(!profile.toggle_allergy(Allergy::Gluten));
        assert!(profile.allergies.is_empty());
        assert_eq!(profile.sensitivities.len(), 1);
        assert_eq!(profile.goals.len(), 1);
    }

    #[test]
    fn test_profile_accepts_turkish_and_english_ids() {
        let json = r#"{
            "diseases": ["diyabet", "hypertension"],
            "sensitivities": ["halal", "boykot"],
            "allergies": ["yer_fistigi"],
            "goals": ["weight_loss"]
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(profile.has_disease(Disease::Diabetes));
        assert!(profile.has_disease(Disease::Hypertension));
        assert!(profile.has_sensitivity(Sensitivity::Boycott));
        assert!(profile.allergies.contains(&Allergy::YerFistigi));
        assert!(profile.has_goal(Goal::WeightLoss));
    }

    #[test]
    fn test_tag_parse() {
        assert_eq!(Disease::parse("Diyabet"), Some(Disease::Diabetes));
        assert_eq!(Sensitivity::parse("vegetarian"), Some(Sensitivity::Vegetarian));
        assert_eq!(Allergy::parse("susam"), Some(Allergy::Susam));
        assert_eq!(Goal::parse("clean_eating"), Some(Goal::CleanEating));
        assert_eq!(Goal::parse("nope"), None);
    }
}
