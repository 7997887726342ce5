pub mod additives;
pub mod alternatives;
pub mod error;
pub mod model;
pub mod nutrients;
pub mod report;
pub mod scoring;
pub mod sensitivity;
pub mod sources;
pub mod store;
pub mod suitability;
pub mod tables;

use additives::{extract_codes, merge_codes, normalize_code};
use chrono::{DateTime, Utc};
use error::GidaxError;
use model::{ProductRecord, UserProfile};
use report::{AnalysisReport, IngredientsBlock, ProductSummary, ReportMetadata, ScoresBlock};
use rust_decimal::Decimal;
use scoring::HealthScore;
use sensitivity::ProductFacts;
use sources::AlternativeCatalog;
use std::collections::BTreeSet;
use suitability::SuitabilityInput;
use tables::schema::RuleTables;

/// Options for [`analyze`].
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Keep at most this many alternatives (best first). `None` keeps all.
    pub max_alternatives: Option<usize>,
}

/// Main API entry point: analyze a product against a user profile.
///
/// Stages run in a fixed order and any failure aborts the call; there is
/// no partial report.
pub fn analyze(
    product: &ProductRecord,
    profile: &UserProfile,
    tables: &RuleTables,
    catalog: &dyn AlternativeCatalog,
    options: &AnalyzeOptions,
) -> Result<AnalysisReport, GidaxError> {
    analyze_at(product, profile, tables, catalog, options, Utc::now())
}

/// [`analyze`] with a fixed timestamp, so identical inputs give identical reports.
pub fn analyze_at(
    product: &ProductRecord,
    profile: &UserProfile,
    tables: &RuleTables,
    catalog: &dyn AlternativeCatalog,
    options: &AnalyzeOptions,
    analyzed_at: DateTime<Utc>,
) -> Result<AnalysisReport, GidaxError> {
    let nutrients = product.validate()?;

    let nutrition = report::nutrition_block(&nutrients, &tables.nutrient_thresholds);

    let explicit = explicit_codes(&product.additives);
    let extracted = extract_codes(&product.ingredients_text);
    let codes = merge_codes(&explicit, &extracted);
    let additives = tables.additives.resolve(&codes);

    let health = HealthScore::compute(
        &nutrients,
        &additives,
        product.nova_group,
        &tables.score_thresholds,
    );
    tracing::debug!(
        product = %product.name,
        score = health.value,
        grade = %health.grade,
        additives = additives.len(),
        "product scored"
    );

    let facts = ProductFacts::new(&product.brand, &product.ingredients_text, &additives, &nutrients);
    let alerts = sensitivity::evaluate(&facts, profile, &tables.keywords, &tables.disease_limits);
    let halal = sensitivity::halal_verdict(&facts, &tables.keywords);
    let matched_allergens = sensitivity::matched_allergens(&facts, profile, &tables.keywords);

    let personal_analysis = suitability::evaluate(
        &alerts,
        &SuitabilityInput {
            health_score: health.value,
            nutrients: &nutrients,
            nova: product.nova_group,
            additives: &additives,
            profile,
            thresholds: &tables.score_thresholds,
        },
    );

    let mut alternatives = alternatives::rank(&product.category, health.value, catalog);
    if let Some(max) = options.max_alternatives {
        alternatives.truncate(max);
    }
    tracing::debug!(
        suitability = %personal_analysis.suitability,
        alternatives = alternatives.len(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        product: ProductSummary::from(product),
        scores: ScoresBlock {
            health_score: health,
            nutri_score: product.nutri_score,
            nova: product.nova_group.into(),
        },
        nutrition,
        ingredients: IngredientsBlock {
            raw_text: product.ingredients_text.clone(),
            additives_count: additives.len(),
            additives,
            halal,
            matched_allergens,
        },
        alerts,
        personal_analysis,
        alternatives,
        metadata: ReportMetadata {
            confidence: product.confidence.unwrap_or(Decimal::ONE),
            analyzed_at,
            tables_name: tables.name.clone(),
            tables_version: tables.version.clone(),
        },
    })
}

/// Normalize the explicitly listed codes. Codes the registry does not know,
/// malformed ones included, resolve to the unknown definition later.
fn explicit_codes(listed: &[String]) -> BTreeSet<String> {
    listed
        .iter()
        .map(|raw| normalize_code(raw))
        .filter(|code| !code.is_empty())
        .collect()
}
