use gidax_core::error::GidaxError;
use gidax_core::model::Allergy;
use gidax_core::nutrients::Nutrient;
use gidax_core::tables::builtin;
use gidax_core::tables::schema::RuleTables;
use std::path::Path;

pub fn list() -> Result<(), GidaxError> {
    println!("Available predefined table sets:\n");
    for name in builtin::PRESETS {
        let t = builtin::load_preset(name)?;
        println!("  {:<6} {} (v{})", name, t.name, t.version);
        if let Some(ref desc) = t.description {
            println!("         {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), GidaxError> {
    let t = builtin::load_preset(preset)?;

    println!("{} (version {})\n", t.name, t.version);
    if let Some(ref desc) = t.description {
        println!("{}\n", desc);
    }

    println!("Nutrient bands (g per 100g): value <= low is low, <= medium is medium, above is high\n");
    println!("  {:<16}  {:<8}  {:<8}", "Nutrient", "Low", "Medium");
    println!("  {}", "-".repeat(36));
    for nutrient in Nutrient::ALL {
        if let Some(th) = t.nutrient_thresholds.threshold(nutrient.name()) {
            println!(
                "  {:<16}  {:<8}  {:<8}",
                nutrient.name(),
                th.low.to_string(),
                th.medium.to_string()
            );
        }
    }
    println!();

    let s = &t.score_thresholds;
    println!("Health score: base 70, clamped to 5-100\n");
    println!("  sugar          > {} -15, > {} -8, <= {} +3", s.sugar.high, s.sugar.medium, s.sugar.low);
    println!("  fat            > {} -12, > {} -6", s.fat.high, s.fat.medium);
    println!("  saturated_fat  > {} -10, > {} -5", s.saturated_fat.high, s.saturated_fat.medium);
    println!("  salt           > {} -8, > {} -4", s.salt.high, s.salt.medium);
    println!("  fiber          > {} +8, > {} +4", s.fiber.high, s.fiber.medium);
    println!("  protein        > {} +6, > {} +3", s.protein.high, s.protein.medium);
    println!("  additives      sum of risk/10, at most -20");
    println!("  NOVA           4 -15, 3 -8, 1 +10\n");

    let d = &t.disease_limits;
    println!("Disease limits (g per 100g):\n");
    println!(
        "  diabetes       sugar > {} danger, > {} warning",
        d.diabetes_sugar_danger, d.diabetes_sugar_warning
    );
    println!("  hypertension   salt > {} danger", d.hypertension_salt_danger);
    println!(
        "  cholesterol    saturated fat > {} danger\n",
        d.cholesterol_saturated_fat_danger
    );

    print_keywords(&t);
    Ok(())
}

fn print_keywords(t: &RuleTables) {
    let k = &t.keywords;
    println!("Keyword lists (substring match, case-insensitive):\n");
    let lists = [
        ("haram", &k.haram_ingredients),
        ("boycott", &k.boycott_brands),
        ("domestic", &k.domestic_brands),
        ("animal", &k.animal_ingredients),
        ("meat", &k.meat_ingredients),
        ("gluten", &k.gluten),
        ("lactose", &k.lactose),
    ];
    for (name, list) in lists {
        println!("  {:<14} {}", name, list.iter().collect::<Vec<_>>().join(", "));
    }
    for allergy in Allergy::ALL {
        if let Some(list) = k.allergens.get(&allergy) {
            println!(
                "  {:<14} {}",
                format!("allergy:{}", allergy.id()),
                list.iter().collect::<Vec<_>>().join(", ")
            );
        }
    }
    println!("\nAdditive registry: {} codes", t.additives.len());
}

pub fn validate(file: &Path) -> Result<(), GidaxError> {
    let t = gidax_core::tables::load_tables(file)?;

    println!("Tables '{}' (v{}) are valid.", t.name, t.version);
    println!("  Additives: {}", t.additives.len());

    // Gaps that are legal but probably unintended.
    let mut warnings = Vec::new();
    for nutrient in Nutrient::ALL {
        if nutrient == Nutrient::Energy || nutrient == Nutrient::Carbohydrates {
            continue;
        }
        if t.nutrient_thresholds.threshold(nutrient.name()).is_none() {
            warnings.push(format!("no band thresholds for '{}'", nutrient.name()));
        }
    }
    for allergy in Allergy::ALL {
        if !t.keywords.allergens.contains_key(&allergy) {
            warnings.push(format!("no keywords for allergy '{}'", allergy.id()));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
