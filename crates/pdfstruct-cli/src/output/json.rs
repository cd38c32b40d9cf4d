use pdfstruct_core::error::PdfStructError;
use pdfstruct_core::model::ExtractionResult;
use std::path::Path;

pub fn print(result: &ExtractionResult, compact: bool) -> Result<(), PdfStructError> {
    println!("{}", render(result, compact)?);
    Ok(())
}

pub fn write(result: &ExtractionResult, path: &Path, compact: bool) -> Result<(), PdfStructError> {
    std::fs::write(path, render(result, compact)?)?;
    Ok(())
}

fn render(result: &ExtractionResult, compact: bool) -> Result<String, PdfStructError> {
    let json = if compact {
        serde_json::to_string(result)?
    } else {
        serde_json::to_string_pretty(result)?
    };
    Ok(json)
}
