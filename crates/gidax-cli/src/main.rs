mod commands;
mod config;
mod output;
mod telemetry;

use clap::{Parser, Subcommand};
use gidax_core::model::{Allergy, Disease, Goal, Sensitivity};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gidax",
    version,
    about = "Health scoring and suitability analysis for packaged food products"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a product record (JSON) against a user profile
    Analyze {
        /// Path to product JSON file
        input_file: PathBuf,

        /// User profile JSON file
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,

        /// Disease tag to add to the profile (diyabet, hipertansiyon, kolesterol, gluten, laktoz)
        #[arg(long = "disease", value_name = "TAG", value_parser = parse_disease)]
        diseases: Vec<Disease>,

        /// Sensitivity tag to add to the profile (halal, boykot, yerli, vegan, vejetaryen)
        #[arg(long = "sensitivity", value_name = "TAG", value_parser = parse_sensitivity)]
        sensitivities: Vec<Sensitivity>,

        /// Allergy tag to add to the profile (gluten, sut, yumurta, ...)
        #[arg(long = "allergy", value_name = "TAG", value_parser = parse_allergy)]
        allergies: Vec<Allergy>,

        /// Goal tag to add to the profile (weight_loss, muscle_gain, health, energy, clean_eating)
        #[arg(long = "goal", value_name = "TAG", value_parser = parse_goal)]
        goals: Vec<Goal>,

        /// Custom rule tables file (overrides GIDAX_TABLES)
        #[arg(short, long, value_name = "FILE")]
        tables: Option<PathBuf>,

        /// Predefined table set used when no tables file is given
        #[arg(long, default_value = "tr")]
        preset: String,

        /// Custom alternatives catalog file
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Show at most this many alternatives
        #[arg(long, value_name = "N")]
        max_alternatives: Option<usize>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Look up and extract additive codes
    Additives {
        #[command(subcommand)]
        action: AdditivesAction,
    },
    /// Manage and inspect rule tables
    Tables {
        #[command(subcommand)]
        action: TablesAction,
    },
}

#[derive(Subcommand)]
enum AdditivesAction {
    /// Show registry entries for one or more codes
    Lookup {
        /// Additive codes (e.g., E322 e471)
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Extract additive codes from ingredient text
    Extract {
        /// Ingredient text
        text: String,
    },
}

#[derive(Subcommand)]
enum TablesAction {
    /// List predefined table sets
    List,
    /// Explain a table set in plain language
    Explain {
        /// Preset name (e.g., "tr")
        #[arg(default_value = "tr")]
        preset: String,
    },
    /// Validate a custom tables file
    Validate {
        /// Path to JSON tables file
        file: PathBuf,
    },
}

fn parse_disease(s: &str) -> Result<Disease, String> {
    Disease::parse(s).ok_or_else(|| format!("unknown disease '{s}'"))
}

fn parse_sensitivity(s: &str) -> Result<Sensitivity, String> {
    Sensitivity::parse(s).ok_or_else(|| format!("unknown sensitivity '{s}'"))
}

fn parse_allergy(s: &str) -> Result<Allergy, String> {
    Allergy::parse(s).ok_or_else(|| format!("unknown allergy '{s}'"))
}

fn parse_goal(s: &str) -> Result<Goal, String> {
    Goal::parse(s).ok_or_else(|| format!("unknown goal '{s}'"))
}

fn main() {
    let cli = Cli::parse();
    let config = config::CliConfig::load();

    if let Err(e) = telemetry::init(&config.log_level) {
        eprintln!("Warning: {e}");
    }

    let result = match cli.command {
        Commands::Analyze {
            input_file,
            profile,
            diseases,
            sensitivities,
            allergies,
            goals,
            tables,
            preset,
            catalog,
            max_alternatives,
            output,
        } => commands::analyze::run(commands::analyze::AnalyzeArgs {
            input_file,
            profile_file: profile,
            diseases,
            sensitivities,
            allergies,
            goals,
            tables_file: tables.or(config.tables),
            preset,
            catalog_file: catalog,
            max_alternatives,
            output_format: output,
        }),
        Commands::Additives { action } => match action {
            AdditivesAction::Lookup { codes } => commands::additives::lookup(&codes),
            AdditivesAction::Extract { text } => commands::additives::extract(&text),
        },
        Commands::Tables { action } => match action {
            TablesAction::List => commands::tables::list(),
            TablesAction::Explain { preset } => commands::tables::explain(&preset),
            TablesAction::Validate { file } => commands::tables::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
