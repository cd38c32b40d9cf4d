use pdfstruct_core::config::ExtractConfig;
use pdfstruct_core::error::PdfStructError;
use std::path::PathBuf;

use crate::commands::select_source;
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_file: Option<PathBuf>,
    compact: bool,
    backend: &str,
    strict: bool,
    config: ExtractConfig,
) -> Result<(), PdfStructError> {
    if !input_file.exists() {
        return Err(PdfStructError::NotFound { path: input_file });
    }

    let source = select_source(&input_file, backend)?;
    let doc_bytes = std::fs::read(&input_file)?;

    // Default behavior never fails past this point: errors come back as an
    // error-flagged result. --strict surfaces the typed error instead.
    let result = if strict {
        pdfstruct_core::extract(&doc_bytes, source.as_ref(), &config)?
    } else {
        pdfstruct_core::extract_or_degraded(&doc_bytes, source.as_ref(), &config)
    };

    match output_file {
        Some(path) => {
            output::json::write(&result, &path, compact)?;
            eprintln!(
                "Extracted {} section(s) from {} to {}",
                result.stats.num_sections,
                input_file.display(),
                path.display()
            );
        }
        None => output::json::print(&result, compact)?,
    }

    Ok(())
}
