//! Line assembly: merge the spans of each rendering line into one [`Line`]
//! record, in document order.

use crate::extraction::{PageSpans, Span};
use crate::model::{FontSize, Line};

/// Walk all pages in order and yield one [`Line`] per rendering line that has
/// any non-blank text. Lazy and restartable: calling it again on the same
/// slice replays the same sequence.
pub fn assemble_lines(pages: &[PageSpans], precision: f64) -> impl Iterator<Item = Line> + '_ {
    pages.iter().flat_map(move |page| {
        page.lines
            .iter()
            .filter_map(move |spans| assemble_line(page.page_index, spans, precision))
    })
}

/// Merge one rendering line: concatenate non-blank span texts (no separator),
/// take the max font size, and the extreme vertical bounds of bbox-carrying
/// spans. Returns `None` when nothing but whitespace remains.
fn assemble_line(page_index: usize, spans: &[Span], precision: f64) -> Option<Line> {
    let mut text = String::new();
    let mut max_size = 0.0f64;
    let mut top: Option<f64> = None;
    let mut bottom: Option<f64> = None;

    for span in spans {
        if span.text.trim().is_empty() {
            continue;
        }
        text.push_str(&span.text);
        if span.font_size > max_size {
            max_size = span.font_size;
        }
        if let Some(bbox) = &span.bbox {
            top = Some(top.map_or(bbox.top, |t| t.min(bbox.top)));
            bottom = Some(bottom.map_or(bbox.bottom, |b| b.max(bbox.bottom)));
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(Line {
        page_index,
        text: trimmed.to_string(),
        font_size: FontSize::round(max_size, precision),
        top,
        bottom,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::BBox;

    fn span(text: &str, size: f64, bbox: Option<(f64, f64)>) -> Span {
        Span {
            text: text.to_string(),
            font_size: size,
            bbox: bbox.map(|(top, bottom)| BBox {
                left: 0.0,
                top,
                right: 100.0,
                bottom,
            }),
        }
    }

    #[test]
    fn concatenates_spans_without_separator() {
        let pages = vec![PageSpans {
            page_index: 0,
            lines: vec![vec![
                span("Hello ", 10.0, Some((100.0, 112.0))),
                span("world", 10.2, Some((99.0, 113.0))),
            ]],
        }];
        let lines: Vec<Line> = assemble_lines(&pages, 0.1).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Hello world");
        assert_eq!(lines[0].font_size, FontSize::round(10.2, 0.1));
        assert_eq!(lines[0].top, Some(99.0));
        assert_eq!(lines[0].bottom, Some(113.0));
    }

    #[test]
    fn blank_only_lines_are_dropped() {
        let pages = vec![PageSpans {
            page_index: 0,
            lines: vec![
                vec![span("  ", 10.0, None), span("\t", 12.0, None)],
                vec![span("kept", 10.0, None)],
            ],
        }];
        let lines: Vec<Line> = assemble_lines(&pages, 0.1).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "kept");
    }

    #[test]
    fn blank_spans_do_not_affect_font_size_or_bounds() {
        let pages = vec![PageSpans {
            page_index: 0,
            lines: vec![vec![
                span("   ", 30.0, Some((0.0, 500.0))),
                span("text", 10.0, Some((100.0, 112.0))),
            ]],
        }];
        let lines: Vec<Line> = assemble_lines(&pages, 0.1).collect();
        assert_eq!(lines[0].font_size, FontSize::round(10.0, 0.1));
        assert_eq!(lines[0].top, Some(100.0));
    }

    #[test]
    fn missing_bboxes_leave_bounds_absent() {
        let pages = vec![PageSpans {
            page_index: 0,
            lines: vec![vec![span("no layout", 10.0, None)]],
        }];
        let lines: Vec<Line> = assemble_lines(&pages, 0.1).collect();
        assert_eq!(lines[0].top, None);
        assert_eq!(lines[0].bottom, None);
    }

    #[test]
    fn pages_are_walked_in_order_and_restartable() {
        let pages = vec![
            PageSpans {
                page_index: 0,
                lines: vec![vec![span("first", 10.0, None)]],
            },
            PageSpans {
                page_index: 1,
                lines: vec![vec![span("second", 10.0, None)]],
            },
        ];
        let first: Vec<Line> = assemble_lines(&pages, 0.1).collect();
        let second: Vec<Line> = assemble_lines(&pages, 0.1).collect();
        assert_eq!(first, second);
        assert_eq!(first[0].page_index, 0);
        assert_eq!(first[1].page_index, 1);
        assert_eq!(first[1].text, "second");
    }
}
