pub mod additives;
pub mod analyze;
pub mod tables;
