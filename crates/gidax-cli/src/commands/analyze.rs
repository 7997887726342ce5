use gidax_core::alternatives::StaticCatalog;
use gidax_core::error::GidaxError;
use gidax_core::model::{Allergy, Disease, Goal, ProductRecord, Sensitivity, UserProfile};
use gidax_core::tables::builtin;
use gidax_core::tables::schema::RuleTables;
use gidax_core::AnalyzeOptions;
use std::path::{Path, PathBuf};

use crate::output;

pub struct AnalyzeArgs {
    pub input_file: PathBuf,
    pub profile_file: Option<PathBuf>,
    pub diseases: Vec<Disease>,
    pub sensitivities: Vec<Sensitivity>,
    pub allergies: Vec<Allergy>,
    pub goals: Vec<Goal>,
    pub tables_file: Option<PathBuf>,
    pub preset: String,
    pub catalog_file: Option<PathBuf>,
    pub max_alternatives: Option<usize>,
    pub output_format: String,
}

pub fn run(args: AnalyzeArgs) -> Result<(), GidaxError> {
    let tables: RuleTables = match &args.tables_file {
        Some(path) => gidax_core::tables::load_tables(path)?,
        None => builtin::load_preset(&args.preset)?,
    };

    let catalog = match &args.catalog_file {
        Some(path) => StaticCatalog::load(path)?,
        None => match builtin::builtin_catalog(&args.preset) {
            Ok(catalog) => catalog,
            Err(GidaxError::UnknownPreset(_)) => StaticCatalog::default(),
            Err(e) => return Err(e),
        },
    };

    // Flags add to whatever the profile file enables.
    let mut profile = match &args.profile_file {
        Some(path) => read_json::<UserProfile>(path)?,
        None => UserProfile::default(),
    };
    profile.diseases.extend(args.diseases);
    profile.sensitivities.extend(args.sensitivities);
    profile.allergies.extend(args.allergies);
    profile.goals.extend(args.goals);

    let product: ProductRecord = read_json(&args.input_file)?;

    tracing::info!(
        product = %product.name,
        tables = %tables.name,
        version = %tables.version,
        "analyzing product"
    );

    let options = AnalyzeOptions {
        max_alternatives: args.max_alternatives,
    };
    let report = gidax_core::analyze(&product, &profile, &tables, &catalog, &options)?;

    match args.output_format.as_str() {
        "json" => output::json::print(&report)?,
        _ => output::table::print(&report),
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, GidaxError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}
