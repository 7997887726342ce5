pub mod classifier;

pub use classifier::{Level, LevelSummary, Nutrient, NutrientClassifier, NutrientThreshold};
