use gidax_core::error::GidaxError;
use gidax_core::report::AnalysisReport;

pub fn print(report: &AnalysisReport) -> Result<(), GidaxError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
