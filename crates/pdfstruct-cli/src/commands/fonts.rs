use pdfstruct_core::config::ExtractConfig;
use pdfstruct_core::error::PdfStructError;
use pdfstruct_core::fonts::{assign_heading_levels, build_histogram};
use std::path::PathBuf;

use crate::commands::select_source;

/// Diagnostic view of the heading heuristic: the sampled histogram, the
/// chosen body size, and the tags each size received.
pub fn run(input_file: PathBuf, backend: &str, config: ExtractConfig) -> Result<(), PdfStructError> {
    if !input_file.exists() {
        return Err(PdfStructError::NotFound { path: input_file });
    }
    config.validate()?;

    let source = select_source(&input_file, backend)?;
    let doc_bytes = std::fs::read(&input_file)?;
    let pages = source.load_pages(&doc_bytes)?;

    let (histogram, total_chars) = build_histogram(&pages, &config);
    let (levels, body_size) = assign_heading_levels(&histogram, total_chars, &config);

    let sampled = pages.len().min(config.max_pages_for_font_analysis);
    println!(
        "Sampled {} of {} page(s), {} character(s) via {}\n",
        sampled,
        pages.len(),
        total_chars,
        source.backend_name()
    );

    if histogram.is_empty() {
        println!("  (no text found)");
        return Ok(());
    }

    println!("  {:>8}  {:>10}  {}", "size", "chars", "level");
    for (size, count) in histogram.iter().rev() {
        let tag = match levels.get(size) {
            Some(level) => level.to_string(),
            None if Some(*size) == body_size => "body".to_string(),
            None => String::new(),
        };
        println!("  {:>8}  {:>10}  {}", size.to_string(), count, tag);
    }

    Ok(())
}
