pub mod alert;
pub mod engine;
pub mod keywords;

pub use alert::{Alert, AlertKind, Severity};
pub use engine::{evaluate, halal_verdict, matched_allergens, DiseaseLimits, HalalVerdict, ProductFacts};
pub use keywords::{fold, KeywordList, KeywordTables};
