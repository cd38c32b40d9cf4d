pub mod extract;
pub mod fonts;

use pdfstruct_core::error::PdfStructError;
use pdfstruct_core::extraction::mutool::MutoolSource;
use pdfstruct_core::extraction::spans_json::JsonSpanSource;
use pdfstruct_core::extraction::SpanSource;
use std::path::Path;

/// Pick the span backend: forced by name, or by file extension for "auto"
/// (.json means a pre-rendered span dump, anything else goes to mutool).
pub fn select_source(path: &Path, backend: &str) -> Result<Box<dyn SpanSource>, PdfStructError> {
    match backend {
        "mutool" => Ok(Box::new(MutoolSource::new())),
        "spans-json" => Ok(Box::new(JsonSpanSource::new())),
        "auto" => {
            let is_dump = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            if is_dump {
                Ok(Box::new(JsonSpanSource::new()))
            } else {
                Ok(Box::new(MutoolSource::new()))
            }
        }
        other => Err(PdfStructError::InvalidConfig(format!(
            "unknown backend '{other}' (expected auto, mutool or spans-json)"
        ))),
    }
}
