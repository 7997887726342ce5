use crate::additives::{AdditiveDetail, RiskLevel};
use crate::model::{Goal, NovaGroup, Nutrients, UserProfile};
use crate::scoring::ScoreThresholds;
use crate::sensitivity::Alert;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

const MANY_ADDITIVES: usize = 5;
const HIGH_ENERGY_KCAL: i64 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suitability {
    Suitable,
    PartiallySuitable,
    NotSuitable,
}

impl fmt::Display for Suitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Suitability::Suitable => "Uygun",
            Suitability::PartiallySuitable => "Kısmen Uygun",
            Suitability::NotSuitable => "Uygun Değil",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalAnalysis {
    pub suitability: Suitability,
    pub suitability_score: u8,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub benefits: Vec<String>,
    pub concerns: Vec<String>,
}

/// Everything the evaluator reads besides the alerts.
pub struct SuitabilityInput<'a> {
    pub health_score: u8,
    pub nutrients: &'a Nutrients,
    pub nova: NovaGroup,
    pub additives: &'a [AdditiveDetail],
    pub profile: &'a UserProfile,
    pub thresholds: &'a ScoreThresholds,
}

/// Aggregate alerts and the health score into a personal verdict.
///
/// Any danger alert makes the product unsuitable; more than one warning makes
/// it partially suitable.
pub fn evaluate(alerts: &[Alert], input: &SuitabilityInput<'_>) -> PersonalAnalysis {
    let danger_count = alerts.iter().filter(|a| a.is_danger()).count();
    let warning_count = alerts.iter().filter(|a| a.is_warning()).count();
    let health = i64::from(input.health_score);

    let (suitability, suitability_score) = if danger_count > 0 {
        let s = (health - danger_count as i64 * 20).max(10);
        (Suitability::NotSuitable, s)
    } else if warning_count > 1 {
        let s = (health - warning_count as i64 * 10).max(30);
        (Suitability::PartiallySuitable, s)
    } else {
        (Suitability::Suitable, health)
    };

    let mut notes = Notes::default();
    nutrient_checks(input, &mut notes);
    goal_checks(input, &mut notes);

    let summary = match suitability {
        Suitability::NotSuitable => format!(
            "Bu ürün profiliniz için uygun değil: {danger_count} kritik uyarı bulundu."
        ),
        Suitability::PartiallySuitable => format!(
            "Bu ürün profiliniz için kısmen uygun: {warning_count} uyarı bulundu, ölçülü tüketin."
        ),
        Suitability::Suitable => format!(
            "Bu ürün profiliniz için uygun görünüyor. Sağlık puanı {}/100.",
            input.health_score
        ),
    };

    tracing::debug!(?suitability, danger_count, warning_count, "suitability evaluated");

    PersonalAnalysis {
        suitability,
        suitability_score: suitability_score.clamp(0, 100) as u8,
        summary,
        recommendations: notes.recommendations,
        benefits: notes.benefits,
        concerns: notes.concerns,
    }
}

#[derive(Default)]
struct Notes {
    recommendations: Vec<String>,
    benefits: Vec<String>,
    concerns: Vec<String>,
}

fn nutrient_checks(input: &SuitabilityInput<'_>, notes: &mut Notes) {
    let n = input.nutrients;
    let t = input.thresholds;

    if n.sugar > t.sugar.high {
        notes.concerns.push(format!("Yüksek şeker içeriği ({}g/100g)", n.sugar));
        notes
            .recommendations
            .push("Şeker alımınızı sınırlayın, daha az şekerli alternatifleri tercih edin.".into());
    }
    if n.sugar <= t.sugar.low {
        notes.benefits.push("Düşük şeker içeriği".into());
    }
    if n.salt > t.salt.high {
        notes.concerns.push(format!("Yüksek tuz içeriği ({}g/100g)", n.salt));
        notes
            .recommendations
            .push("Günlük tuz alımınızı 5g'ın altında tutmaya çalışın.".into());
    }
    if n.saturated_fat > t.saturated_fat.high {
        notes
            .concerns
            .push(format!("Yüksek doymuş yağ içeriği ({}g/100g)", n.saturated_fat));
        notes
            .recommendations
            .push("Doymuş yağ yerine bitkisel yağ içeren ürünleri tercih edin.".into());
    }
    if n.fat > t.fat.high {
        notes.concerns.push(format!("Yüksek yağ içeriği ({}g/100g)", n.fat));
    }
    if n.fiber.is_some_and(|fiber| fiber > t.fiber.high) {
        notes.benefits.push("Lif açısından zengin".into());
    }
    if n.protein > t.protein.high {
        notes.benefits.push("Protein açısından zengin".into());
    }

    match input.nova.value() {
        1 => notes.benefits.push("İşlenmemiş veya az işlenmiş gıda (NOVA 1)".into()),
        4 => {
            notes.concerns.push("Ultra işlenmiş gıda (NOVA 4)".into());
            notes
                .recommendations
                .push("Mümkün olduğunca az işlenmiş gıdaları tercih edin.".into());
        }
        _ => {}
    }

    if input.additives.is_empty() {
        notes.benefits.push("Katkı maddesi içermiyor".into());
    }
    if input.additives.len() >= MANY_ADDITIVES {
        notes
            .concerns
            .push(format!("Çok sayıda katkı maddesi ({})", input.additives.len()));
    }
    for additive in input.additives {
        if additive.risk_level == RiskLevel::High {
            let reason = additive.concern.as_deref().unwrap_or("yüksek riskli");
            notes
                .concerns
                .push(format!("{} ({}): {}", additive.code, additive.name, reason));
        }
    }
}

fn goal_checks(input: &SuitabilityInput<'_>, notes: &mut Notes) {
    let n = input.nutrients;
    let t = input.thresholds;
    let profile = input.profile;

    if profile.has_goal(Goal::WeightLoss) && n.energy > Decimal::from(HIGH_ENERGY_KCAL) {
        notes
            .concerns
            .push(format!("Yüksek kalori ({} kcal/100g)", n.energy));
        notes
            .recommendations
            .push("Kilo verme hedefiniz için porsiyon kontrolü yapın.".into());
    }
    if profile.has_goal(Goal::MuscleGain) {
        if n.protein > t.protein.medium {
            notes.benefits.push("Kas gelişimi için iyi bir protein kaynağı".into());
        } else {
            notes
                .recommendations
                .push("Kas kazanma hedefiniz için daha yüksek proteinli ürünler seçin.".into());
        }
    }
    if profile.has_goal(Goal::Energy) && n.sugar > t.sugar.medium {
        notes.recommendations.push(
            "Kalıcı enerji için şeker yerine lif ve kompleks karbonhidrat içeren ürünleri seçin."
                .into(),
        );
    }
    if profile.has_goal(Goal::CleanEating) && input.nova.value() >= 3 {
        notes
            .recommendations
            .push("Temiz beslenme hedefiniz için daha az işlenmiş ürünler seçin.".into());
    }
    if profile.has_goal(Goal::Health) && input.health_score < 50 {
        notes
            .recommendations
            .push("Genel sağlığınız için daha yüksek puanlı alternatiflere göz atın.".into());
    }
}
