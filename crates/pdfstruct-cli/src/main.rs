mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pdfstruct",
    version,
    about = "Extract structured content from PDF files and output as JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title, sections and paragraphs as JSON
    Extract {
        /// Path to a PDF file or a pre-rendered span dump (.json)
        input_file: PathBuf,

        /// Write JSON output to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Compact JSON output (no indentation)
        #[arg(long)]
        compact: bool,

        /// Span backend: auto (by extension), mutool, or spans-json
        #[arg(long, default_value = "auto")]
        backend: String,

        /// Exit non-zero on failure instead of emitting an error-flagged result
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },
    /// Show the sampled font histogram and assigned heading levels
    Fonts {
        /// Path to a PDF file or a pre-rendered span dump (.json)
        input_file: PathBuf,

        /// Span backend: auto (by extension), mutool, or spans-json
        #[arg(long, default_value = "auto")]
        backend: String,

        #[command(flatten)]
        tuning: TuningArgs,
    },
}

/// Heuristic tuning flags shared by subcommands. Unset flags fall back to
/// PDFSTRUCT_* environment variables, then to built-in defaults.
#[derive(Args)]
struct TuningArgs {
    /// Pages sampled for font analysis
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Font size rounding precision
    #[arg(long, value_name = "F")]
    precision: Option<f64>,

    /// Minimum character-frequency fraction for a heading size
    #[arg(long, value_name = "F")]
    min_heading_frequency: Option<f64>,

    /// Deepest heading level to assign (1-6)
    #[arg(long, value_name = "N")]
    max_heading_levels: Option<usize>,

    /// Paragraph gap multiplier
    #[arg(long, value_name = "F")]
    gap_multiplier: Option<f64>,
}

impl TuningArgs {
    fn into_config(self) -> pdfstruct_core::config::ExtractConfig {
        let mut config = pdfstruct_core::config::ExtractConfig::from_env();
        if let Some(v) = self.max_pages {
            config.max_pages_for_font_analysis = v;
        }
        if let Some(v) = self.precision {
            config.font_size_precision = v;
        }
        if let Some(v) = self.min_heading_frequency {
            config.min_heading_frequency = v;
        }
        if let Some(v) = self.max_heading_levels {
            config.max_heading_levels = v;
        }
        if let Some(v) = self.gap_multiplier {
            config.gap_multiplier = v;
        }
        config
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            out,
            compact,
            backend,
            strict,
            tuning,
        } => commands::extract::run(
            input_file,
            out,
            compact,
            &backend,
            strict,
            tuning.into_config(),
        ),
        Commands::Fonts {
            input_file,
            backend,
            tuning,
        } => commands::fonts::run(input_file, &backend, tuning.into_config()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
