//! Structure inference: split the line stream into heading-delimited
//! sections and group body lines into paragraphs by vertical-gap analysis.

use crate::model::{HeadingLevelMap, Line, Section};

/// Walk lines in document order and build the ordered section list.
///
/// A line whose font size carries a heading tag starts a new section titled
/// with that line's text; runs of body lines between headings are grouped
/// into paragraphs and appended to the current section. Body text seen
/// before any heading lands in an auto-created `content` section.
pub fn build_sections(
    lines: impl Iterator<Item = Line>,
    heading_levels: &HeadingLevelMap,
    gap_multiplier: f64,
) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<usize> = None;
    let mut buffer: Vec<Line> = Vec::new();

    for line in lines {
        match heading_levels.get(&line.font_size).copied() {
            Some(level) => {
                flush_buffer(&mut buffer, &mut sections, &mut current, gap_multiplier);
                sections.push(Section::heading(level, line.text));
                current = Some(sections.len() - 1);
            }
            None => buffer.push(line),
        }
    }
    flush_buffer(&mut buffer, &mut sections, &mut current, gap_multiplier);

    sections
}

fn flush_buffer(
    buffer: &mut Vec<Line>,
    sections: &mut Vec<Section>,
    current: &mut Option<usize>,
    gap_multiplier: f64,
) {
    if buffer.is_empty() {
        return;
    }
    let paragraphs = group_paragraphs(buffer, gap_multiplier);
    buffer.clear();

    let idx = match *current {
        Some(i) => i,
        None => {
            sections.push(Section::content());
            *current = Some(sections.len() - 1);
            sections.len() - 1
        }
    };
    sections[idx].paragraphs.extend(paragraphs);
}

/// Group consecutive body lines into paragraphs.
///
/// A new paragraph starts when the vertical gap to the previous line exceeds
/// `font_size * gap_multiplier` (larger text has larger natural line
/// spacing, so the threshold scales with size; zero sizes fall back to
/// 10.0). Missing bounds on either side force a break — without layout data
/// we over-fragment rather than glue unrelated text together, a known
/// limitation for documents with no bounding boxes at all. Each paragraph is
/// the space-joined text of its lines.
pub fn group_paragraphs(lines: &[Line], gap_multiplier: f64) -> Vec<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut prev_bottom: Option<f64> = None;

    for line in lines {
        if current.is_empty() {
            current.push(&line.text);
        } else {
            let font = if line.font_size.is_zero() {
                10.0
            } else {
                line.font_size.value()
            };
            let threshold = font * gap_multiplier;
            let breaks = match (line.top, prev_bottom) {
                (Some(top), Some(bottom)) => top - bottom > threshold,
                _ => true,
            };
            if breaks {
                paragraphs.push(current.join(" "));
                current.clear();
            }
            current.push(&line.text);
        }
        prev_bottom = line.bottom;
    }

    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontSize, SectionLevel};
    use std::collections::BTreeMap;

    fn line(text: &str, size: f64, bounds: Option<(f64, f64)>) -> Line {
        Line {
            page_index: 0,
            text: text.to_string(),
            font_size: FontSize::round(size, 0.1),
            top: bounds.map(|(t, _)| t),
            bottom: bounds.map(|(_, b)| b),
        }
    }

    fn levels(entries: &[(f64, SectionLevel)]) -> HeadingLevelMap {
        let mut map = BTreeMap::new();
        for &(size, level) in entries {
            map.insert(FontSize::round(size, 0.1), level);
        }
        map
    }

    #[test]
    fn small_gaps_stay_in_one_paragraph() {
        let lines = vec![
            line("first line", 10.0, Some((100.0, 112.0))),
            line("second line", 10.0, Some((114.0, 126.0))),
        ];
        // gap 2.0 <= threshold 8.0
        assert_eq!(group_paragraphs(&lines, 0.8), vec!["first line second line"]);
    }

    #[test]
    fn large_gap_starts_new_paragraph() {
        let lines = vec![
            line("first", 10.0, Some((100.0, 112.0))),
            line("second", 10.0, Some((130.0, 142.0))),
        ];
        // gap 18.0 > threshold 8.0
        assert_eq!(group_paragraphs(&lines, 0.8), vec!["first", "second"]);
    }

    #[test]
    fn gap_exactly_at_threshold_does_not_break() {
        let lines = vec![
            line("a", 10.0, Some((100.0, 112.0))),
            line("b", 10.0, Some((120.0, 132.0))),
        ];
        // gap 8.0 == threshold 8.0
        assert_eq!(group_paragraphs(&lines, 0.8).len(), 1);
    }

    #[test]
    fn missing_bounds_force_a_break() {
        let lines = vec![
            line("has layout", 10.0, Some((100.0, 112.0))),
            line("no layout", 10.0, None),
            line("layout again", 10.0, Some((130.0, 142.0))),
        ];
        assert_eq!(
            group_paragraphs(&lines, 0.8),
            vec!["has layout", "no layout", "layout again"]
        );
    }

    #[test]
    fn zero_font_size_uses_fallback_threshold() {
        let lines = vec![
            line("a", 0.0, Some((100.0, 112.0))),
            line("b", 0.0, Some((114.0, 126.0))),
        ];
        // threshold falls back to 10.0 * 0.8 = 8.0; gap 2.0 keeps one paragraph
        assert_eq!(group_paragraphs(&lines, 0.8).len(), 1);
    }

    #[test]
    fn empty_input_yields_no_paragraphs() {
        assert!(group_paragraphs(&[], 0.8).is_empty());
    }

    #[test]
    fn body_before_any_heading_lands_in_content_section() {
        let map = levels(&[(24.0, SectionLevel::H1)]);
        let lines = vec![
            line("intro text", 10.0, Some((100.0, 112.0))),
            line("A Heading", 24.0, Some((130.0, 154.0))),
            line("body under heading", 10.0, Some((160.0, 172.0))),
        ];
        let sections = build_sections(lines.into_iter(), &map, 0.8);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].level, SectionLevel::Content);
        assert_eq!(sections[0].title, None);
        assert_eq!(sections[0].paragraphs, vec!["intro text"]);
        assert_eq!(sections[1].level, SectionLevel::H1);
        assert_eq!(sections[1].title.as_deref(), Some("A Heading"));
        assert_eq!(sections[1].paragraphs, vec!["body under heading"]);
    }

    #[test]
    fn consecutive_headings_produce_empty_sections() {
        let map = levels(&[(24.0, SectionLevel::H1), (18.0, SectionLevel::H2)]);
        let lines = vec![
            line("Chapter", 24.0, None),
            line("Subsection", 18.0, None),
            line("text", 10.0, Some((200.0, 212.0))),
        ];
        let sections = build_sections(lines.into_iter(), &map, 0.8);
        assert_eq!(sections.len(), 2);
        assert!(sections[0].paragraphs.is_empty());
        assert_eq!(sections[1].paragraphs, vec!["text"]);
    }

    #[test]
    fn trailing_buffer_is_flushed_into_last_section() {
        let map = levels(&[(24.0, SectionLevel::H1)]);
        let lines = vec![
            line("Heading", 24.0, None),
            line("tail one", 10.0, Some((100.0, 112.0))),
            line("tail two", 10.0, Some((140.0, 152.0))),
        ];
        let sections = build_sections(lines.into_iter(), &map, 0.8);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].paragraphs, vec!["tail one", "tail two"]);
    }

    #[test]
    fn no_headings_at_all_gives_single_content_section() {
        let map = HeadingLevelMap::new();
        let lines = vec![
            line("only", 10.0, Some((100.0, 112.0))),
            line("body", 10.0, Some((114.0, 126.0))),
        ];
        let sections = build_sections(lines.into_iter(), &map, 0.8);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].level, SectionLevel::Content);
        assert_eq!(sections[0].paragraphs, vec!["only body"]);
    }
}
