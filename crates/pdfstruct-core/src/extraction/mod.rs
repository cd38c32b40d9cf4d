pub mod mutool;
pub mod spans_json;

use crate::error::PdfStructError;

/// Bounding box of a span in page coordinates (origin top-left, y grows down).
#[derive(Debug, Clone, PartialEq)]
pub struct BBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// A run of text in one font within a rendering line. Produced by a span
/// source and never mutated by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    /// Raw size as reported by the renderer; rounding happens downstream.
    pub font_size: f64,
    pub bbox: Option<BBox>,
}

/// Spans of a single page, grouped by their source rendering line.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSpans {
    /// 0-based page index, ascending across the document.
    pub page_index: usize,
    pub lines: Vec<Vec<Span>>,
}

/// Trait for span-producing backends.
///
/// A backend owns whatever it takes to turn document bytes into positioned,
/// font-annotated spans (external renderer, pre-rendered dump, ...); the
/// structure pipeline only ever consumes this interface.
pub trait SpanSource: Send + Sync {
    /// Load all pages of the document as rendering lines of spans.
    fn load_pages(&self, doc_bytes: &[u8]) -> Result<Vec<PageSpans>, PdfStructError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
