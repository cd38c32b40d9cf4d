//! Title extraction: the single largest-font span on the first page.

use crate::extraction::PageSpans;

pub const UNTITLED: &str = "Untitled Document";

/// Pick the trimmed text of the strictly largest non-blank span on page 1.
/// First-encountered wins on size ties. Falls back to "Untitled Document"
/// when there are no pages or no non-blank spans.
pub fn extract_title(pages: &[PageSpans]) -> String {
    let Some(first_page) = pages.first() else {
        return UNTITLED.to_string();
    };

    let mut largest_text = "";
    let mut largest_size = 0.0f64;

    for spans in &first_page.lines {
        for span in spans {
            let trimmed = span.text.trim();
            if !trimmed.is_empty() && span.font_size > largest_size {
                largest_size = span.font_size;
                largest_text = trimmed;
            }
        }
    }

    if largest_text.is_empty() {
        UNTITLED.to_string()
    } else {
        largest_text.to_string()
    }
}
