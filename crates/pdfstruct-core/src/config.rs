use crate::error::PdfStructError;

/// Tuning knobs for one extraction call.
///
/// A config value is immutable once handed to [`crate::extract`]; concurrent
/// extractions may each carry their own settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// How many pages from the start of the document feed the font-size
    /// histogram. Sampling a prefix keeps large documents cheap.
    pub max_pages_for_font_analysis: usize,
    /// Precision that font sizes are rounded to before any comparison.
    pub font_size_precision: f64,
    /// A font size must account for more than this fraction of sampled
    /// characters to qualify as a heading size.
    pub min_heading_frequency: f64,
    /// Deepest heading tag to assign; larger-but-rarer sizes collapse onto it.
    pub max_heading_levels: usize,
    /// Vertical gaps larger than `font_size * gap_multiplier` split paragraphs.
    pub gap_multiplier: f64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            max_pages_for_font_analysis: 10,
            font_size_precision: 0.1,
            min_heading_frequency: 0.001,
            max_heading_levels: 6,
            gap_multiplier: 0.8,
        }
    }
}

impl ExtractConfig {
    /// Build a config from `PDFSTRUCT_*` environment variables, falling back
    /// to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = ExtractConfig::default();
        ExtractConfig {
            max_pages_for_font_analysis: env_parse(
                "PDFSTRUCT_MAX_PAGES_FOR_FONT_ANALYSIS",
                defaults.max_pages_for_font_analysis,
            ),
            font_size_precision: env_parse(
                "PDFSTRUCT_FONT_SIZE_PRECISION",
                defaults.font_size_precision,
            ),
            min_heading_frequency: env_parse(
                "PDFSTRUCT_MIN_HEADING_FREQUENCY",
                defaults.min_heading_frequency,
            ),
            max_heading_levels: env_parse(
                "PDFSTRUCT_MAX_HEADING_LEVELS",
                defaults.max_heading_levels,
            ),
            gap_multiplier: env_parse("PDFSTRUCT_GAP_MULTIPLIER", defaults.gap_multiplier),
        }
    }

    pub fn validate(&self) -> Result<(), PdfStructError> {
        if !self.font_size_precision.is_finite() || self.font_size_precision <= 0.0 {
            return Err(PdfStructError::InvalidConfig(format!(
                "font_size_precision must be positive, got {}",
                self.font_size_precision
            )));
        }
        if !self.min_heading_frequency.is_finite() || self.min_heading_frequency < 0.0 {
            return Err(PdfStructError::InvalidConfig(format!(
                "min_heading_frequency must be non-negative, got {}",
                self.min_heading_frequency
            )));
        }
        if self.max_heading_levels < 1 || self.max_heading_levels > 6 {
            return Err(PdfStructError::InvalidConfig(format!(
                "max_heading_levels must be between 1 and 6, got {}",
                self.max_heading_levels
            )));
        }
        if !self.gap_multiplier.is_finite() || self.gap_multiplier <= 0.0 {
            return Err(PdfStructError::InvalidConfig(format!(
                "gap_multiplier must be positive, got {}",
                self.gap_multiplier
            )));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
