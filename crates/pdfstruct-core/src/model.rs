use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::PdfStructError;

/// A font size rounded to the configured precision.
///
/// All font-size comparisons in the pipeline happen between already-rounded
/// values, making them canonical: bit-pattern equality and hashing are sound
/// and the type can key ordered maps. Serializes as its display string
/// ("24.0") so it can key JSON objects.
#[derive(Debug, Clone, Copy)]
pub struct FontSize(f64);

impl FontSize {
    /// Round a raw size to the given precision (e.g. 24.04 at 0.1 -> 24.0).
    pub fn round(raw: f64, precision: f64) -> FontSize {
        if !raw.is_finite() {
            return FontSize(0.0);
        }
        let v = (raw / precision).round() * precision;
        // Snap to four decimals so equal sizes share one bit pattern and
        // serialized keys stay short (10.2, not 10.200000000000001).
        let v = format!("{v:.4}").parse().unwrap_or(v);
        FontSize(v)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl PartialEq for FontSize {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FontSize {}

impl PartialOrd for FontSize {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FontSize {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for FontSize {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Whole sizes keep one decimal ("24.0") to match the serialized shape.
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for FontSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FontSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let v: f64 = s
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid font size key: {s:?}")))?;
        Ok(FontSize(v))
    }
}

/// Rounded font size -> accumulated character count over the sampled pages.
pub type FontHistogram = BTreeMap<FontSize, u64>;

/// Rounded font size -> heading tag. Never contains the body font size.
pub type HeadingLevelMap = BTreeMap<FontSize, SectionLevel>;

/// One visual line of text, merged from the spans of a rendering line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub page_index: usize,
    pub text: String,
    /// Max rounded size among the line's non-blank spans.
    pub font_size: FontSize,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

/// Structural tag of a section: a heading tier, plain body content, or the
/// error marker carried by degraded results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    #[serde(rename = "content")]
    Content,
    #[serde(rename = "error")]
    Error,
}

impl SectionLevel {
    /// Tag for the n-th heading tier (1-based); tiers past H6 collapse onto H6.
    pub fn heading(tier: usize) -> SectionLevel {
        match tier {
            0 | 1 => SectionLevel::H1,
            2 => SectionLevel::H2,
            3 => SectionLevel::H3,
            4 => SectionLevel::H4,
            5 => SectionLevel::H5,
            _ => SectionLevel::H6,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            SectionLevel::H1
                | SectionLevel::H2
                | SectionLevel::H3
                | SectionLevel::H4
                | SectionLevel::H5
                | SectionLevel::H6
        )
    }
}

impl fmt::Display for SectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SectionLevel::H1 => "H1",
            SectionLevel::H2 => "H2",
            SectionLevel::H3 => "H3",
            SectionLevel::H4 => "H4",
            SectionLevel::H5 => "H5",
            SectionLevel::H6 => "H6",
            SectionLevel::Content => "content",
            SectionLevel::Error => "error",
        };
        f.write_str(s)
    }
}

/// A contiguous block of document content: a heading and the paragraphs that
/// follow it, or a leading `content` block with no heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub level: SectionLevel,
    /// Heading text; `None` for auto-created content sections.
    pub title: Option<String>,
    pub paragraphs: Vec<String>,
}

impl Section {
    pub fn content() -> Section {
        Section {
            level: SectionLevel::Content,
            title: None,
            paragraphs: Vec::new(),
        }
    }

    pub fn heading(level: SectionLevel, title: String) -> Section {
        Section {
            level,
            title: Some(title),
            paragraphs: Vec::new(),
        }
    }
}

/// Summary statistics for one extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub page_count: usize,
    /// Wall-clock seconds for the extraction call.
    pub processing_time: f64,
    pub num_sections: usize,
    pub num_headings: usize,
    pub num_paragraphs: usize,
}

/// Full output of one extraction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub title: String,
    pub sections: Vec<Section>,
    pub font_histogram: FontHistogram,
    pub heading_levels: HeadingLevelMap,
    pub stats: Stats,
}

impl ExtractionResult {
    /// Error-flagged result returned when the pipeline fails partway: the
    /// error text rides in a single marker section instead of structure.
    pub fn degraded(err: &PdfStructError, processing_time: f64) -> ExtractionResult {
        ExtractionResult {
            title: "Error extracting title".to_string(),
            sections: vec![Section {
                level: SectionLevel::Error,
                title: Some(err.to_string()),
                paragraphs: Vec::new(),
            }],
            font_histogram: BTreeMap::new(),
            heading_levels: BTreeMap::new(),
            stats: Stats {
                page_count: 0,
                processing_time,
                num_sections: 0,
                num_headings: 0,
                num_paragraphs: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_tenths() {
        assert_eq!(FontSize::round(24.04, 0.1), FontSize::round(24.0, 0.1));
        assert_ne!(FontSize::round(24.06, 0.1), FontSize::round(24.0, 0.1));
    }

    #[test]
    fn display_keeps_one_decimal_for_whole_sizes() {
        assert_eq!(FontSize::round(24.0, 0.1).to_string(), "24.0");
        assert_eq!(FontSize::round(10.5, 0.1).to_string(), "10.5");
    }

    #[test]
    fn ordering_is_by_size() {
        let a = FontSize::round(10.0, 0.1);
        let b = FontSize::round(12.0, 0.1);
        assert!(a < b);
    }

    #[test]
    fn font_size_map_keys_round_trip() {
        let mut map: FontHistogram = BTreeMap::new();
        map.insert(FontSize::round(24.0, 0.1), 9);
        map.insert(FontSize::round(10.5, 0.1), 400);
        let json = serde_json::to_string(&map).unwrap();
        assert!(json.contains("\"24.0\""));
        let back: FontHistogram = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn heading_tier_clamps_at_h6() {
        assert_eq!(SectionLevel::heading(1), SectionLevel::H1);
        assert_eq!(SectionLevel::heading(6), SectionLevel::H6);
        assert_eq!(SectionLevel::heading(9), SectionLevel::H6);
    }

    #[test]
    fn section_level_serializes_as_tag_strings() {
        assert_eq!(
            serde_json::to_string(&SectionLevel::H2).unwrap(),
            "\"H2\""
        );
        assert_eq!(
            serde_json::to_string(&SectionLevel::Content).unwrap(),
            "\"content\""
        );
    }
}
