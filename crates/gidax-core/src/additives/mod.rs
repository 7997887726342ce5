pub mod codes;
pub mod registry;

pub use codes::{extract_codes, is_valid_code, merge_codes, normalize_code};
pub use registry::{AdditiveDefinition, AdditiveDetail, AdditiveRegistry, HalalStatus, RiskLevel};
