use crate::error::PdfStructError;
use crate::extraction::{BBox, PageSpans, Span, SpanSource};
use serde::Deserialize;

/// Span backend reading a pre-rendered span dump.
///
/// Accepts the JSON shape
/// `{"pages": [{"lines": [[{"text", "size", "bbox"?}, ...], ...]}, ...]}`
/// as produced by any external renderer; `bbox` is `[left, top, right,
/// bottom]` and may be omitted.
pub struct JsonSpanSource;

impl JsonSpanSource {
    pub fn new() -> Self {
        JsonSpanSource
    }
}

impl Default for JsonSpanSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct DumpFile {
    pages: Vec<DumpPage>,
}

#[derive(Debug, Deserialize)]
struct DumpPage {
    #[serde(default)]
    lines: Vec<Vec<DumpSpan>>,
}

#[derive(Debug, Deserialize)]
struct DumpSpan {
    text: String,
    #[serde(alias = "font_size")]
    size: f64,
    #[serde(default)]
    bbox: Option<[f64; 4]>,
}

impl SpanSource for JsonSpanSource {
    fn load_pages(&self, doc_bytes: &[u8]) -> Result<Vec<PageSpans>, PdfStructError> {
        let dump: DumpFile = serde_json::from_slice(doc_bytes)
            .map_err(|e| PdfStructError::InvalidDocument(format!("invalid span dump: {}", e)))?;

        let pages = dump
            .pages
            .into_iter()
            .enumerate()
            .map(|(page_index, page)| PageSpans {
                page_index,
                lines: page
                    .lines
                    .into_iter()
                    .map(|spans| spans.into_iter().map(into_span).collect())
                    .collect(),
            })
            .collect();

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "spans-json"
    }
}

fn into_span(s: DumpSpan) -> Span {
    Span {
        text: s.text,
        font_size: s.size,
        bbox: s.bbox.map(|[left, top, right, bottom]| BBox {
            left,
            top,
            right,
            bottom,
        }),
    }
}
