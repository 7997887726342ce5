use super::alert::{Alert, AlertKind, Severity};
use super::keywords::{fold, KeywordTables};
use crate::additives::{AdditiveDetail, HalalStatus};
use crate::model::{Allergy, Disease, Nutrients, Sensitivity, UserProfile};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Nutrient limits for disease-linked alerts, in g per 100g.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseLimits {
    pub diabetes_sugar_danger: Decimal,
    pub diabetes_sugar_warning: Decimal,
    pub hypertension_salt_danger: Decimal,
    pub cholesterol_saturated_fat_danger: Decimal,
}

/// The product as the sensitivity rules see it. Text fields are folded once.
#[derive(Debug, Clone)]
pub struct ProductFacts<'a> {
    pub brand: String,
    pub ingredients: String,
    pub additives: &'a [AdditiveDetail],
    pub nutrients: &'a Nutrients,
}

impl<'a> ProductFacts<'a> {
    pub fn new(
        brand: &str,
        ingredients_text: &str,
        additives: &'a [AdditiveDetail],
        nutrients: &'a Nutrients,
    ) -> Self {
        ProductFacts {
            brand: fold(brand),
            ingredients: fold(ingredients_text),
            additives,
            nutrients,
        }
    }
}

/// Overall religious compliance and what decided it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalalVerdict {
    pub status: HalalStatus,
    pub haram_codes: Vec<String>,
    pub suspicious_codes: Vec<String>,
    pub banned_ingredients: Vec<String>,
}

/// Haram wins over everything, then suspicious, otherwise halal.
///
/// Additives with unknown status do not affect the verdict.
pub fn halal_verdict(facts: &ProductFacts<'_>, keywords: &KeywordTables) -> HalalVerdict {
    let codes_with = |status: HalalStatus| -> Vec<String> {
        facts
            .additives
            .iter()
            .filter(|a| a.halal_status == status)
            .map(|a| a.code.clone())
            .collect()
    };

    let haram_codes = codes_with(HalalStatus::Haram);
    let suspicious_codes = codes_with(HalalStatus::Suspicious);
    let banned_ingredients: Vec<String> = keywords
        .haram_ingredients
        .matches(&facts.ingredients)
        .into_iter()
        .map(str::to_string)
        .collect();

    let status = if !haram_codes.is_empty() || !banned_ingredients.is_empty() {
        HalalStatus::Haram
    } else if !suspicious_codes.is_empty() {
        HalalStatus::Suspicious
    } else {
        HalalStatus::Halal
    };

    HalalVerdict {
        status,
        haram_codes,
        suspicious_codes,
        banned_ingredients,
    }
}

/// Allergies from the profile whose keywords appear in the ingredient text.
pub fn matched_allergens(
    facts: &ProductFacts<'_>,
    profile: &UserProfile,
    keywords: &KeywordTables,
) -> Vec<Allergy> {
    profile
        .allergies
        .iter()
        .copied()
        .filter(|allergy| {
            keywords
                .allergens
                .get(allergy)
                .is_some_and(|list| list.contains_any(&facts.ingredients))
        })
        .collect()
}

/// Run every rule the profile enables and collect the alerts.
pub fn evaluate(
    facts: &ProductFacts<'_>,
    profile: &UserProfile,
    keywords: &KeywordTables,
    limits: &DiseaseLimits,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if profile.has_sensitivity(Sensitivity::Halal) {
        alerts.push(religious_alert(&halal_verdict(facts, keywords)));
    }
    if profile.has_sensitivity(Sensitivity::Boycott) {
        alerts.extend(boycott_alert(facts, keywords));
    }
    if profile.has_sensitivity(Sensitivity::Domestic) {
        alerts.push(domestic_alert(facts, keywords));
    }
    if profile.has_sensitivity(Sensitivity::Vegan) {
        alerts.push(vegan_alert(facts, keywords));
    }
    if profile.has_sensitivity(Sensitivity::Vegetarian) {
        alerts.push(vegetarian_alert(facts, keywords));
    }

    for allergy in matched_allergens(facts, profile, keywords) {
        alerts.push(Alert::new(
            AlertKind::Allergen,
            Severity::Danger,
            "⚠️",
            format!("Alerjen: {}", allergy.label()),
            format!(
                "Bu ürün {} içeriyor. Alerjiniz nedeniyle tüketmeyin.",
                allergy.label().to_lowercase()
            ),
        ));
    }

    for disease in &profile.diseases {
        alerts.extend(disease_alert(*disease, facts, keywords, limits));
    }

    tracing::debug!(count = alerts.len(), "sensitivity alerts evaluated");
    alerts
}

fn religious_alert(verdict: &HalalVerdict) -> Alert {
    match verdict.status {
        HalalStatus::Haram => {
            let mut reasons: Vec<&str> = verdict.haram_codes.iter().map(String::as_str).collect();
            reasons.extend(verdict.banned_ingredients.iter().map(String::as_str));
            Alert::new(
                AlertKind::Halal,
                Severity::Danger,
                "🚫",
                "Helal Değil",
                format!("Helal olmayan içerik tespit edildi: {}", reasons.join(", ")),
            )
        }
        HalalStatus::Suspicious => Alert::new(
            AlertKind::Halal,
            Severity::Warning,
            "⚠️",
            "Şüpheli İçerik",
            format!(
                "Hayvan kökenli olabilecek katkı maddeleri: {}",
                verdict.suspicious_codes.join(", ")
            ),
        ),
        HalalStatus::Halal | HalalStatus::Unknown => Alert::new(
            AlertKind::Halal,
            Severity::Success,
            "☪️",
            "Helal Uyumlu",
            "Helal olmayan veya şüpheli içerik tespit edilmedi.",
        ),
    }
}

fn boycott_alert(facts: &ProductFacts<'_>, keywords: &KeywordTables) -> Option<Alert> {
    let hits = keywords.boycott_brands.matches(&facts.brand);
    let first = hits.first()?;
    Some(Alert::new(
        AlertKind::Boycott,
        Severity::Danger,
        "✊",
        "Boykot Listesinde",
        format!("Bu marka boykot listesindeki '{first}' ile eşleşiyor."),
    ))
}

fn domestic_alert(facts: &ProductFacts<'_>, keywords: &KeywordTables) -> Alert {
    if keywords.domestic_brands.contains_any(&facts.brand) {
        Alert::new(
            AlertKind::Domestic,
            Severity::Success,
            "🇹🇷",
            "Yerli Üretim",
            "Bu ürün yerli bir markaya ait.",
        )
    } else {
        Alert::new(
            AlertKind::Domestic,
            Severity::Warning,
            "🌍",
            "Yerli Marka Değil",
            "Bu marka yerli markalar listesinde bulunmuyor.",
        )
    }
}

fn vegan_alert(facts: &ProductFacts<'_>, keywords: &KeywordTables) -> Alert {
    let hits = keywords.animal_ingredients.matches(&facts.ingredients);
    if hits.is_empty() {
        Alert::new(
            AlertKind::Vegan,
            Severity::Success,
            "🌱",
            "Vegan Uyumlu",
            "Hayvansal içerik tespit edilmedi.",
        )
    } else {
        Alert::new(
            AlertKind::Vegan,
            Severity::Danger,
            "🐄",
            "Vegan Değil",
            format!("Hayvansal içerik: {}", hits.join(", ")),
        )
    }
}

fn vegetarian_alert(facts: &ProductFacts<'_>, keywords: &KeywordTables) -> Alert {
    let hits = keywords.meat_ingredients.matches(&facts.ingredients);
    if hits.is_empty() {
        Alert::new(
            AlertKind::Vegetarian,
            Severity::Success,
            "🥬",
            "Vejetaryen Uyumlu",
            "Et veya kesim kaynaklı içerik tespit edilmedi.",
        )
    } else {
        Alert::new(
            AlertKind::Vegetarian,
            Severity::Danger,
            "🍖",
            "Vejetaryen Değil",
            format!("Et veya kesim kaynaklı içerik: {}", hits.join(", ")),
        )
    }
}

fn disease_alert(
    disease: Disease,
    facts: &ProductFacts<'_>,
    keywords: &KeywordTables,
    limits: &DiseaseLimits,
) -> Option<Alert> {
    let n = facts.nutrients;
    match disease {
        Disease::Diabetes => {
            if n.sugar > limits.diabetes_sugar_danger {
                Some(Alert::new(
                    AlertKind::Diabetes,
                    Severity::Danger,
                    "🩸",
                    "Diyabet İçin Uygun Değil",
                    format!("100g'da {}g şeker içeriyor.", n.sugar),
                ))
            } else if n.sugar > limits.diabetes_sugar_warning {
                Some(Alert::new(
                    AlertKind::Diabetes,
                    Severity::Warning,
                    "🩸",
                    "Diyabet İçin Dikkat",
                    format!("100g'da {}g şeker içeriyor, porsiyonu sınırlayın.", n.sugar),
                ))
            } else {
                None
            }
        }
        Disease::Hypertension => (n.salt > limits.hypertension_salt_danger).then(|| {
            Alert::new(
                AlertKind::Hypertension,
                Severity::Danger,
                "💓",
                "Yüksek Tuz",
                format!("100g'da {}g tuz içeriyor. Hipertansiyon için uygun değil.", n.salt),
            )
        }),
        Disease::Cholesterol => (n.saturated_fat > limits.cholesterol_saturated_fat_danger)
            .then(|| {
                Alert::new(
                    AlertKind::Cholesterol,
                    Severity::Danger,
                    "🫀",
                    "Yüksek Doymuş Yağ",
                    format!(
                        "100g'da {}g doymuş yağ içeriyor. Kolesterol için uygun değil.",
                        n.saturated_fat
                    ),
                )
            }),
        Disease::Gluten => {
            let hits = keywords.gluten.matches(&facts.ingredients);
            (!hits.is_empty()).then(|| {
                Alert::new(
                    AlertKind::Gluten,
                    Severity::Danger,
                    "🌾",
                    "Gluten İçeriyor",
                    format!("Gluten kaynağı: {}", hits.join(", ")),
                )
            })
        }
        Disease::Lactose => {
            let hits = keywords.lactose.matches(&facts.ingredients);
            (!hits.is_empty()).then(|| {
                Alert::new(
                    AlertKind::Lactose,
                    Severity::Danger,
                    "🥛",
                    "Laktoz İçeriyor",
                    format!("Laktoz kaynağı: {}", hits.join(", ")),
                )
            })
        }
    }
}
