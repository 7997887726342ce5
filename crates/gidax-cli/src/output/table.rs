use gidax_core::report::AnalysisReport;

pub fn print(report: &AnalysisReport) {
    let p = &report.product;
    println!("=== {} ({}) ===\n", p.name, p.brand);
    if !p.category.is_empty() {
        println!("  Category: {}", p.category);
    }
    if let Some(ref serving) = p.serving_size {
        println!("  Serving:  {}", serving);
    }

    let s = &report.scores;
    println!(
        "  Health score: {} / 100  [{}] {}",
        s.health_score.value, s.health_score.grade, s.health_score.label
    );
    if let Some(nutri) = s.nutri_score {
        println!("  Nutri-Score:  {}", nutri);
    }
    println!("  NOVA:         {} ({})\n", s.nova.group.value(), s.nova.label);

    println!("  Nutrition (per 100g):");
    for entry in &report.nutrition {
        let value = match entry.value {
            Some(v) => format!("{} {}", v, entry.unit),
            None => "-".to_string(),
        };
        println!(
            "    {} {:<14} {:>10}  {}",
            entry.level.icon, entry.label, value, entry.level.label
        );
    }
    println!();

    if !s.health_score.adjustments.is_empty() {
        println!("  Score breakdown (base 70):");
        for adj in &s.health_score.adjustments {
            println!("    {:>6}  {}", adj.points.to_string(), adj.note);
        }
        println!();
    }

    let ing = &report.ingredients;
    if !ing.additives.is_empty() {
        println!("  Additives ({}):", ing.additives_count);
        let max_name = ing.additives.iter().map(|a| a.name.chars().count()).max().unwrap_or(10);
        for a in &ing.additives {
            println!(
                "    {:<6} {:<width$}  risk {:>3} ({})  {}",
                a.code,
                a.name,
                a.risk_score,
                a.risk_level,
                a.halal_status,
                width = max_name
            );
        }
        println!();
    }

    if !report.alerts.is_empty() {
        println!("  Alerts:");
        for alert in &report.alerts {
            println!("    {} [{}] {}", alert.icon, alert.severity, alert.title);
            println!("       {}", alert.message);
        }
        println!();
    }

    let pa = &report.personal_analysis;
    println!("  Suitability: {} ({} / 100)", pa.suitability, pa.suitability_score);
    println!("  {}\n", pa.summary);
    print_list("Concerns", &pa.concerns);
    print_list("Benefits", &pa.benefits);
    print_list("Recommendations", &pa.recommendations);

    if !report.alternatives.is_empty() {
        println!("  Healthier alternatives:");
        for alt in &report.alternatives {
            let benefit = alt.key_benefit.as_deref().unwrap_or("");
            println!(
                "    {:>3} (+{:<2}) {} - {}  {}",
                alt.health_score, alt.improvement, alt.name, alt.brand, benefit
            );
        }
        println!();
    }
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("  {}:", title);
    for item in items {
        println!("    - {}", item);
    }
    println!();
}
