use docsift_core::error::DocsiftError;
use docsift_core::output::AnalysisOutput;

pub fn print(result: &AnalysisOutput) -> Result<(), DocsiftError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

pub fn print_value(value: &serde_json::Value) -> Result<(), DocsiftError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
