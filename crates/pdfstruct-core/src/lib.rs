pub mod config;
pub mod error;
pub mod extraction;
pub mod fonts;
pub mod lines;
pub mod model;
pub mod structure;
pub mod title;

use std::time::Instant;

use config::ExtractConfig;
use error::PdfStructError;
use extraction::SpanSource;
use model::{ExtractionResult, Stats};

/// Main API entry point: extract hierarchical structure from a document.
///
/// Runs the full pipeline — font-size histogram over a page-prefix sample,
/// heading-level assignment, line assembly, heading/paragraph structure
/// inference, first-page title pick — in one forward pass over the spans the
/// backend yields. Each call owns its histogram, buffers and section list;
/// concurrent calls with different configs need no synchronization.
pub fn extract(
    doc_bytes: &[u8],
    source: &dyn SpanSource,
    config: &ExtractConfig,
) -> Result<ExtractionResult, PdfStructError> {
    let start = Instant::now();
    config.validate()?;

    let pages = source.load_pages(doc_bytes)?;

    let (font_histogram, total_chars) = fonts::build_histogram(&pages, config);
    let (heading_levels, _body_size) =
        fonts::assign_heading_levels(&font_histogram, total_chars, config);

    let doc_title = title::extract_title(&pages);

    let line_stream = lines::assemble_lines(&pages, config.font_size_precision);
    let sections = structure::build_sections(line_stream, &heading_levels, config.gap_multiplier);

    let num_headings = sections.iter().filter(|s| s.level.is_heading()).count();
    let num_paragraphs = sections.iter().map(|s| s.paragraphs.len()).sum();

    Ok(ExtractionResult {
        title: doc_title,
        stats: Stats {
            page_count: pages.len(),
            processing_time: start.elapsed().as_secs_f64(),
            num_sections: sections.len(),
            num_headings,
            num_paragraphs,
        },
        sections,
        font_histogram,
        heading_levels,
    })
}

/// Like [`extract`], but never fails: any error becomes an error-flagged
/// [`ExtractionResult`] carrying the error text in a marker section and the
/// elapsed time up to the failure point.
pub fn extract_or_degraded(
    doc_bytes: &[u8],
    source: &dyn SpanSource,
    config: &ExtractConfig,
) -> ExtractionResult {
    let start = Instant::now();
    match extract(doc_bytes, source, config) {
        Ok(result) => result,
        Err(e) => ExtractionResult::degraded(&e, start.elapsed().as_secs_f64()),
    }
}
