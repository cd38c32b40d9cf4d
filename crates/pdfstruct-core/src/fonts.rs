//! Font-size statistics: histogram over a page-prefix sample and the
//! heading-level assignment derived from it. Both are pure functions.

use crate::config::ExtractConfig;
use crate::extraction::PageSpans;
use crate::model::{FontHistogram, FontSize, HeadingLevelMap, SectionLevel};

/// Accumulate character counts per rounded font size over the first
/// `max_pages_for_font_analysis` pages. Whitespace-only spans are skipped.
///
/// Returns the histogram and the total character count sampled.
pub fn build_histogram(pages: &[PageSpans], config: &ExtractConfig) -> (FontHistogram, u64) {
    let mut histogram = FontHistogram::new();
    let mut total_chars: u64 = 0;

    for page in pages.iter().take(config.max_pages_for_font_analysis) {
        for spans in &page.lines {
            for span in spans {
                if span.text.trim().is_empty() {
                    continue;
                }
                let size = FontSize::round(span.font_size, config.font_size_precision);
                let count = span.text.chars().count() as u64;
                *histogram.entry(size).or_insert(0) += count;
                total_chars += count;
            }
        }
    }

    (histogram, total_chars)
}

/// Derive heading tags from the histogram.
///
/// The body size is the one with the most characters (ties broken toward the
/// larger size so the choice is deterministic). Sizes strictly larger than
/// the body qualify for tags in descending order, but only when their count
/// clears `total_chars * min_heading_frequency` — a lone oversized decorative
/// glyph should not become a heading tier. Tags past `max_heading_levels`
/// collapse onto the last tag.
pub fn assign_heading_levels(
    histogram: &FontHistogram,
    total_chars: u64,
    config: &ExtractConfig,
) -> (HeadingLevelMap, Option<FontSize>) {
    let mut levels = HeadingLevelMap::new();

    let mut body: Option<(FontSize, u64)> = None;
    for (&size, &count) in histogram.iter().rev() {
        if body.map_or(true, |(_, best)| count > best) {
            body = Some((size, count));
        }
    }
    let Some((body_size, _)) = body else {
        return (levels, None);
    };

    let floor = total_chars as f64 * config.min_heading_frequency;
    let mut tier = 1;
    for (&size, &count) in histogram.iter().rev() {
        if size > body_size && count as f64 > floor {
            levels.insert(
                size,
                SectionLevel::heading(tier.min(config.max_heading_levels)),
            );
            tier += 1;
        }
    }

    (levels, Some(body_size))
}
