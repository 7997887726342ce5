pub mod grade;
pub mod health;

pub use grade::{grade, Grade, GradeInfo};
pub use health::{score, score_breakdown, Cuts, HealthScore, ScoreAdjustment, ScoreThresholds, SugarCuts};
