use gidax_core::additives::{extract_codes, RiskLevel};
use gidax_core::error::GidaxError;
use gidax_core::tables::builtin;

pub fn lookup(codes: &[String]) -> Result<(), GidaxError> {
    let tables = builtin::load_preset("tr")?;

    for code in codes {
        let def = tables.additives.lookup(code);
        let registered = tables.additives.get(code).is_some();
        println!("{}  {}", def.code, def.name);
        println!("  Category: {}", def.category);
        println!("  Risk:     {} ({})", def.risk, RiskLevel::from_score(def.risk));
        println!("  Halal:    {}", def.halal);
        if let Some(ref concern) = def.concern {
            println!("  Concern:  {}", concern);
        }
        if !registered {
            println!("  (not in registry, neutral defaults shown)");
        }
        println!();
    }
    Ok(())
}

pub fn extract(text: &str) -> Result<(), GidaxError> {
    let codes = extract_codes(text);
    if codes.is_empty() {
        println!("No additive codes found.");
    } else {
        for code in &codes {
            println!("{code}");
        }
    }
    Ok(())
}
