//! End-to-end tests for analyze() using the builtin "tr" tables.
//!
//! Catalog lookups go through MockCatalog so ranking can be checked against
//! a known list without touching the builtin alternatives.

use chrono::{DateTime, TimeZone, Utc};
use gidax_core::additives::HalalStatus;
use gidax_core::alternatives::CatalogEntry;
use gidax_core::error::GidaxError;
use gidax_core::model::{
    Allergy, Disease, NovaGroup, NutriScore, NutritionFacts, ProductRecord, Sensitivity,
    UserProfile,
};
use gidax_core::report::AnalysisReport;
use gidax_core::scoring::Grade;
use gidax_core::sensitivity::{AlertKind, Severity};
use gidax_core::sources::{
    AlternativeCatalog, ProductLookupService, SourceError, VisionExtractionService,
};
use gidax_core::suitability::Suitability;
use gidax_core::tables::builtin::{builtin_catalog, load_preset};
use gidax_core::tables::schema::RuleTables;
use gidax_core::{analyze, analyze_at, AnalyzeOptions};
use rust_decimal_macros::dec;

struct MockCatalog {
    entries: Vec<CatalogEntry>,
}

impl AlternativeCatalog for MockCatalog {
    fn for_category(&self, category: &str) -> Vec<CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect()
    }
}

fn empty_catalog() -> MockCatalog {
    MockCatalog { entries: vec![] }
}

fn entry(name: &str, category: &str, score: u8) -> CatalogEntry {
    CatalogEntry {
        name: name.into(),
        brand: "Marka".into(),
        category: category.into(),
        health_score: score,
        key_benefit: None,
        is_domestic: true,
    }
}

fn tables() -> RuleTables {
    load_preset("tr").unwrap()
}

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
}

/// Chocolate spread with the nutrition used throughout these tests.
fn spread() -> ProductRecord {
    ProductRecord {
        name: "Fındık Kremalı Çikolata".into(),
        brand: "Örnek Gıda".into(),
        category: "Çikolata".into(),
        serving_size: Some("1 porsiyon (15 g)".into()),
        nutrition: NutritionFacts {
            energy: Some(dec!(539)),
            protein: Some(dec!(6.5)),
            carbohydrates: Some(dec!(57)),
            sugar: Some(dec!(32)),
            fat: Some(dec!(28)),
            saturated_fat: Some(dec!(14)),
            fiber: Some(dec!(2.1)),
            salt: Some(dec!(0.3)),
        },
        ingredients_text: "Şeker, palm yağı, fındık (%13), kakao, emülgatör (soya lesitini), vanilin"
            .into(),
        additives: vec!["E322".into(), "E500".into()],
        nova_group: NovaGroup::new(4).unwrap(),
        nutri_score: Some(NutriScore::E),
        confidence: None,
    }
}

fn run(product: &ProductRecord, profile: &UserProfile) -> AnalysisReport {
    analyze_at(
        product,
        profile,
        &tables(),
        &empty_catalog(),
        &AnalyzeOptions::default(),
        fixed_time(),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[test]
fn reference_product_scores_18_grade_e() {
    let report = run(&spread(), &UserProfile::default());
    let health = &report.scores.health_score;
    // 70 - 15 (sugar) - 12 (fat) - 10 (sat. fat) - 0.5 (additives) - 15 (NOVA 4) = 17.5
    assert_eq!(health.value, 18);
    assert_eq!(health.grade, Grade::E);
    assert_eq!(health.color, "#EF4444");
    assert_eq!(report.scores.nutri_score, Some(NutriScore::E));
    assert_eq!(report.scores.nova.group.value(), 4);
}

#[test]
fn reference_product_additives_resolved() {
    let report = run(&spread(), &UserProfile::default());
    let codes: Vec<&str> = report
        .ingredients
        .additives
        .iter()
        .map(|a| a.code.as_str())
        .collect();
    assert_eq!(codes, vec!["E322", "E500"]);
    assert_eq!(report.ingredients.additives_count, 2);
    assert!(report.ingredients.additives.iter().all(|a| a.registered));
}

#[test]
fn codes_in_text_merged_with_explicit_list() {
    let mut product = spread();
    product.ingredients_text.push_str(", renklendirici (E120), e322");
    let report = run(&product, &UserProfile::default());
    let codes: Vec<&str> = report
        .ingredients
        .additives
        .iter()
        .map(|a| a.code.as_str())
        .collect();
    assert_eq!(codes, vec!["E120", "E322", "E500"]);
}

#[test]
fn unregistered_code_uses_unknown_definition() {
    let mut product = spread();
    product.additives = vec!["E999".into()];
    let report = run(&product, &UserProfile::default());
    let additive = &report.ingredients.additives[0];
    assert_eq!(additive.code, "E999");
    assert_eq!(additive.risk_score, 50);
    assert_eq!(additive.halal_status, HalalStatus::Unknown);
    assert!(!additive.registered);
}

#[test]
fn malformed_explicit_code_still_penalized() {
    let mut product = spread();
    product.additives = vec![];
    assert_eq!(run(&product, &UserProfile::default()).scores.health_score.value, 18);

    product.additives = vec!["E500ii".into()];
    let report = run(&product, &UserProfile::default());
    assert_eq!(report.ingredients.additives_count, 1);
    let additive = &report.ingredients.additives[0];
    assert_eq!(additive.code, "E500II");
    assert_eq!(additive.risk_score, 50);
    assert!(!additive.registered);
    // 18 minus 50 / 10
    assert_eq!(report.scores.health_score.value, 13);
}

// ---------------------------------------------------------------------------
// Sensitivities
// ---------------------------------------------------------------------------

#[test]
fn religious_rule_disabled_emits_no_religious_alert() {
    let mut product = spread();
    product.additives.push("E120".into());
    product.ingredients_text.push_str(", jelatin");
    let profile = UserProfile {
        sensitivities: [Sensitivity::Vegan].into(),
        ..Default::default()
    };
    let report = run(&product, &profile);
    assert!(report.alerts.iter().all(|a| a.kind != AlertKind::Halal));
    // the verdict itself is still reported with the ingredients
    assert_eq!(report.ingredients.halal.status, HalalStatus::Haram);
}

#[test]
fn haram_additive_overrides_suspicious() {
    let mut product = spread();
    product.additives = vec!["E471".into(), "E120".into()];
    let profile = UserProfile {
        sensitivities: [Sensitivity::Halal].into(),
        ..Default::default()
    };
    let report = run(&product, &profile);
    let religious: Vec<_> = report
        .alerts
        .iter()
        .filter(|a| a.kind == AlertKind::Halal)
        .collect();
    assert_eq!(religious.len(), 1);
    assert_eq!(religious[0].severity, Severity::Danger);
    assert_eq!(report.ingredients.halal.haram_codes, vec!["E120"]);
    assert_eq!(report.ingredients.halal.suspicious_codes, vec!["E471"]);
}

#[test]
fn suspicious_only_gives_warning() {
    let profile = UserProfile {
        sensitivities: [Sensitivity::Halal].into(),
        ..Default::default()
    };
    // E322 is suspicious, E500 is halal
    let report = run(&spread(), &profile);
    let alert = report.alerts.iter().find(|a| a.kind == AlertKind::Halal).unwrap();
    assert_eq!(alert.severity, Severity::Warning);
}

#[test]
fn sorbitan_and_glycol_esters_need_halal_check() {
    let profile = UserProfile {
        sensitivities: [Sensitivity::Halal].into(),
        ..Default::default()
    };
    for code in ["E474", "E477", "E478", "E483", "E492", "E493", "E494", "E495"] {
        let mut product = spread();
        product.additives = vec![];
        product.ingredients_text = format!("kakao, emülgatör ({code})");
        let report = run(&product, &profile);
        assert_eq!(report.ingredients.halal.status, HalalStatus::Suspicious, "{code}");
        let alert = report.alerts.iter().find(|a| a.kind == AlertKind::Halal).unwrap();
        assert_eq!(alert.severity, Severity::Warning, "{code}");
    }
}

#[test]
fn boycott_brand_makes_product_unsuitable() {
    let product = ProductRecord {
        name: "Sade Maden Suyu".into(),
        brand: "NESTLÉ Waters".into(),
        category: "İçecek".into(),
        serving_size: None,
        nutrition: NutritionFacts {
            energy: Some(dec!(0)),
            protein: Some(dec!(0)),
            carbohydrates: Some(dec!(0)),
            sugar: Some(dec!(0)),
            fat: Some(dec!(0)),
            saturated_fat: Some(dec!(0)),
            fiber: None,
            salt: Some(dec!(0.01)),
        },
        ingredients_text: "doğal maden suyu".into(),
        additives: vec![],
        nova_group: NovaGroup::new(1).unwrap(),
        nutri_score: Some(NutriScore::A),
        confidence: None,
    };
    let profile = UserProfile {
        sensitivities: [Sensitivity::Boycott].into(),
        ..Default::default()
    };
    let report = run(&product, &profile);
    assert!(report.scores.health_score.value >= 80);
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].severity, Severity::Danger);
    assert_eq!(report.personal_analysis.suitability, Suitability::NotSuitable);
    assert_eq!(
        report.personal_analysis.suitability_score,
        report.scores.health_score.value - 20
    );
}

#[test]
fn domestic_brand_matches_after_folding() {
    let mut product = spread();
    product.brand = "PINAR".into();
    let profile = UserProfile {
        sensitivities: [Sensitivity::Domestic].into(),
        ..Default::default()
    };
    let report = run(&product, &profile);
    assert_eq!(report.alerts[0].kind, AlertKind::Domestic);
    assert_eq!(report.alerts[0].severity, Severity::Success);
}

#[test]
fn allergen_alert_per_matched_allergy() {
    let mut product = spread();
    product.ingredients_text.push_str(", yağsız süt tozu");
    let profile = UserProfile {
        allergies: [Allergy::Sut, Allergy::Kuruyemis, Allergy::Susam].into(),
        ..Default::default()
    };
    let report = run(&product, &profile);
    assert_eq!(
        report.ingredients.matched_allergens,
        vec![Allergy::Sut, Allergy::Kuruyemis]
    );
    let allergen_alerts = report
        .alerts
        .iter()
        .filter(|a| a.kind == AlertKind::Allergen)
        .count();
    assert_eq!(allergen_alerts, 2);
    assert_eq!(report.personal_analysis.suitability, Suitability::NotSuitable);
}

#[test]
fn diabetes_and_cholesterol_alerts() {
    let profile = UserProfile {
        diseases: [Disease::Diabetes, Disease::Cholesterol, Disease::Hypertension].into(),
        ..Default::default()
    };
    let report = run(&spread(), &profile);
    let kinds: Vec<AlertKind> = report.alerts.iter().map(|a| a.kind).collect();
    // salt 0.3 stays under the hypertension limit
    assert_eq!(kinds, vec![AlertKind::Diabetes, AlertKind::Cholesterol]);
    assert!(report.alerts.iter().all(|a| a.severity == Severity::Danger));
    assert_eq!(report.personal_analysis.suitability_score, 10);
}

// ---------------------------------------------------------------------------
// Alternatives
// ---------------------------------------------------------------------------

#[test]
fn alternatives_strictly_better_and_ranked() {
    let catalog = MockCatalog {
        entries: vec![
            entry("Aynı Puan", "Çikolata", 18),
            entry("Bitter %70", "Çikolata", 55),
            entry("Bitter %85", "Çikolata", 62),
            entry("Kefir", "İçecek", 82),
        ],
    };
    let report = analyze_at(
        &spread(),
        &UserProfile::default(),
        &tables(),
        &catalog,
        &AnalyzeOptions::default(),
        fixed_time(),
    )
    .unwrap();
    let ranked: Vec<(&str, u8)> = report
        .alternatives
        .iter()
        .map(|a| (a.name.as_str(), a.improvement))
        .collect();
    assert_eq!(ranked, vec![("Bitter %85", 44), ("Bitter %70", 37)]);
}

#[test]
fn max_alternatives_truncates_after_ranking() {
    let catalog = builtin_catalog("tr").unwrap();
    let options = AnalyzeOptions {
        max_alternatives: Some(1),
    };
    let report = analyze_at(
        &spread(),
        &UserProfile::default(),
        &tables(),
        &catalog,
        &options,
        fixed_time(),
    )
    .unwrap();
    assert_eq!(report.alternatives.len(), 1);
    assert_eq!(report.alternatives[0].name, "%85 Bitter Çikolata");
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

struct MockLookup {
    products: Vec<(String, ProductRecord)>,
}

impl ProductLookupService for MockLookup {
    fn fetch_by_identifier(&self, identifier: &str) -> Result<ProductRecord, SourceError> {
        self.products
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, p)| p.clone())
            .ok_or_else(|| SourceError::NotFound(identifier.to_string()))
    }

    fn backend_name(&self) -> &str {
        "mock-lookup"
    }
}

/// Reads nothing from the image; an empty buffer stands in for a blurry photo.
struct MockVision;

impl VisionExtractionService for MockVision {
    fn extract(&self, image: &[u8]) -> Result<ProductRecord, SourceError> {
        if image.is_empty() {
            return Err(SourceError::LowConfidence { confidence: dec!(0.3) });
        }
        let mut product = spread();
        product.confidence = Some(dec!(0.74));
        Ok(product)
    }

    fn backend_name(&self) -> &str {
        "mock-vision"
    }
}

#[test]
fn looked_up_product_feeds_analysis() {
    let lookup = MockLookup {
        products: vec![("8690000000017".into(), spread())],
    };
    let product = lookup.fetch_by_identifier("8690000000017").unwrap();
    let report = run(&product, &UserProfile::default());
    assert_eq!(report.scores.health_score.value, 18);
    assert_eq!(report.metadata.confidence, dec!(1));
    assert_eq!(lookup.backend_name(), "mock-lookup");

    let err = lookup.fetch_by_identifier("0000").unwrap_err();
    assert!(matches!(err, SourceError::NotFound(ref id) if id == "0000"));
    assert_eq!(err.to_string(), "product not found: 0000");
}

#[test]
fn extracted_product_carries_confidence() {
    let vision = MockVision;
    let report = run(&vision.extract(b"jpeg").unwrap(), &UserProfile::default());
    assert_eq!(report.metadata.confidence, dec!(0.74));

    let err = vision.extract(&[]).unwrap_err();
    assert!(matches!(err, SourceError::LowConfidence { .. }));
    assert_eq!(
        err.to_string(),
        "extraction confidence 0.3 is below the accepted minimum"
    );
}

// ---------------------------------------------------------------------------
// Validation, determinism, serialization
// ---------------------------------------------------------------------------

#[test]
fn missing_nutrient_aborts_analysis() {
    let mut product = spread();
    product.nutrition.saturated_fat = None;
    let err = analyze(
        &product,
        &UserProfile::default(),
        &tables(),
        &empty_catalog(),
        &AnalyzeOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, GidaxError::InvalidProductData { ref field, .. } if field == "saturated_fat"));
}

#[test]
fn negative_nutrient_aborts_analysis() {
    let mut product = spread();
    product.nutrition.salt = Some(dec!(-0.1));
    assert!(analyze(
        &product,
        &UserProfile::default(),
        &tables(),
        &empty_catalog(),
        &AnalyzeOptions::default(),
    )
    .is_err());
}

#[test]
fn same_inputs_same_report() {
    let profile = UserProfile {
        sensitivities: [Sensitivity::Halal, Sensitivity::Vegan].into(),
        diseases: [Disease::Diabetes].into(),
        ..Default::default()
    };
    assert_eq!(run(&spread(), &profile), run(&spread(), &profile));
}

#[test]
fn report_round_trips_through_json() {
    let profile = UserProfile {
        sensitivities: Sensitivity::ALL.into_iter().collect(),
        diseases: Disease::ALL.into_iter().collect(),
        allergies: Allergy::ALL.into_iter().collect(),
        ..Default::default()
    };
    let catalog = builtin_catalog("tr").unwrap();
    let report = analyze_at(
        &spread(),
        &profile,
        &tables(),
        &catalog,
        &AnalyzeOptions::default(),
        fixed_time(),
    )
    .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let back: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(report, back);
}

#[test]
fn metadata_carries_confidence_and_serving_grams() {
    let mut product = spread();
    product.confidence = Some(dec!(0.82));
    let report = run(&product, &UserProfile::default());
    assert_eq!(report.metadata.confidence, dec!(0.82));
    assert_eq!(report.metadata.analyzed_at, fixed_time());
    assert_eq!(report.product.serving_grams, Some(dec!(15)));

    let report = run(&spread(), &UserProfile::default());
    assert_eq!(report.metadata.confidence, dec!(1));
}
