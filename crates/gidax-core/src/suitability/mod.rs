pub mod evaluator;

pub use evaluator::{evaluate, PersonalAnalysis, Suitability, SuitabilityInput};
