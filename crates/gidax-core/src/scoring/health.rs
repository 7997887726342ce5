use super::grade::{grade, Grade};
use crate::additives::AdditiveDetail;
use crate::model::{NovaGroup, Nutrients};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

const BASE_SCORE: i64 = 70;
const MIN_SCORE: i64 = 5;
const MAX_SCORE: i64 = 100;
const ADDITIVE_PENALTY_CAP: i64 = 20;

/// Comparison cut-points for a penalized or rewarded nutrient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cuts {
    pub medium: Decimal,
    pub high: Decimal,
}

/// Sugar additionally rewards values at or below `low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SugarCuts {
    pub low: Decimal,
    pub medium: Decimal,
    pub high: Decimal,
}

/// Cut-points the scorer compares raw values against. These are separate
/// from the classifier bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreThresholds {
    pub sugar: SugarCuts,
    pub fat: Cuts,
    pub saturated_fat: Cuts,
    pub salt: Cuts,
    pub fiber: Cuts,
    pub protein: Cuts,
}

/// One applied adjustment to the base score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAdjustment {
    pub factor: String,
    pub points: Decimal,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    pub value: u8,
    pub grade: Grade,
    pub color: String,
    pub label: String,
    pub adjustments: Vec<ScoreAdjustment>,
}

impl HealthScore {
    pub fn compute(
        nutrients: &Nutrients,
        additives: &[AdditiveDetail],
        nova: NovaGroup,
        thresholds: &ScoreThresholds,
    ) -> HealthScore {
        let (value, adjustments) = score_breakdown(nutrients, additives, nova, thresholds);
        let info = grade(value);
        HealthScore {
            value,
            grade: info.grade,
            color: info.color,
            label: info.label,
            adjustments,
        }
    }
}

/// Health score in 5..=100.
pub fn score(
    nutrients: &Nutrients,
    additives: &[AdditiveDetail],
    nova: NovaGroup,
    thresholds: &ScoreThresholds,
) -> u8 {
    score_breakdown(nutrients, additives, nova, thresholds).0
}

/// Health score plus the list of adjustments that produced it.
pub fn score_breakdown(
    nutrients: &Nutrients,
    additives: &[AdditiveDetail],
    nova: NovaGroup,
    thresholds: &ScoreThresholds,
) -> (u8, Vec<ScoreAdjustment>) {
    let mut adjustments = Vec::new();

    // Sugar has no adjustment between low and medium.
    let sugar = nutrients.sugar;
    let t = &thresholds.sugar;
    if sugar > t.high {
        push(&mut adjustments, "sugar", -15, format!("sugar {sugar}g > {}", t.high));
    } else if sugar > t.medium {
        push(&mut adjustments, "sugar", -8, format!("sugar {sugar}g > {}", t.medium));
    } else if sugar <= t.low {
        push(&mut adjustments, "sugar", 3, format!("sugar {sugar}g <= {}", t.low));
    }

    tiered(&mut adjustments, "fat", nutrients.fat, &thresholds.fat, -12, -6);
    tiered(
        &mut adjustments,
        "saturated_fat",
        nutrients.saturated_fat,
        &thresholds.saturated_fat,
        -10,
        -5,
    );
    tiered(&mut adjustments, "salt", nutrients.salt, &thresholds.salt, -8, -4);

    let additive_total: Decimal = additives
        .iter()
        .map(|a| Decimal::from(a.risk_score) / Decimal::TEN)
        .sum();
    let additive_penalty = additive_total.min(Decimal::from(ADDITIVE_PENALTY_CAP));
    if !additive_penalty.is_zero() {
        adjustments.push(ScoreAdjustment {
            factor: "additives".into(),
            points: -additive_penalty,
            note: format!(
                "{} additive(s), risk sum / 10 = {} (capped at {})",
                additives.len(),
                additive_total,
                ADDITIVE_PENALTY_CAP
            ),
        });
    }

    match nova.value() {
        4 => push(&mut adjustments, "nova", -15, "NOVA 4 ultra-processed".into()),
        3 => push(&mut adjustments, "nova", -8, "NOVA 3 processed".into()),
        1 => push(&mut adjustments, "nova", 10, "NOVA 1 unprocessed".into()),
        _ => {}
    }

    if let Some(fiber) = nutrients.fiber {
        tiered(&mut adjustments, "fiber", fiber, &thresholds.fiber, 8, 4);
    }
    tiered(&mut adjustments, "protein", nutrients.protein, &thresholds.protein, 6, 3);

    let raw = Decimal::from(BASE_SCORE) + adjustments.iter().map(|a| a.points).sum::<Decimal>();
    let clamped = raw
        .max(Decimal::from(MIN_SCORE))
        .min(Decimal::from(MAX_SCORE))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let value = clamped.to_u8().unwrap_or(MIN_SCORE as u8);

    tracing::debug!(%raw, value, adjustments = adjustments.len(), "health score computed");
    (value, adjustments)
}

fn push(adjustments: &mut Vec<ScoreAdjustment>, factor: &str, points: i64, note: String) {
    adjustments.push(ScoreAdjustment {
        factor: factor.to_string(),
        points: Decimal::from(points),
        note,
    });
}

fn tiered(
    adjustments: &mut Vec<ScoreAdjustment>,
    factor: &str,
    value: Decimal,
    cuts: &Cuts,
    high_points: i64,
    medium_points: i64,
) {
    if value > cuts.high {
        push(adjustments, factor, high_points, format!("{factor} {value}g > {}", cuts.high));
    } else if value > cuts.medium {
        push(adjustments, factor, medium_points, format!("{factor} {value}g > {}", cuts.medium));
    }
}
