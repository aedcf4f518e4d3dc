//! Command-line interface components.

use crate::config::{AnalysisConfig, OutputFormat};
use crate::models::AnalysisReport;
use crate::pipeline::Analyzer;
use crate::report::{JsonReport, ReportEmitter, SeriesCsvExporter, TextReport};
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "pppnava-analyzer")]
#[command(about = "Compute mean position, RMS dispersion and metric deviations from a PPPNAVA log")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// PPPNAVA log file (one sentence per line)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Skip malformed lines with a warning instead of aborting the run
    #[arg(long)]
    pub skip_malformed: bool,

    /// Reject latitudes outside [-90, 90] and longitudes outside [-180, 180]
    #[arg(long)]
    pub validate_ranges: bool,

    /// Report format (text, json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Include sample count and mean position in the text report (text format only)
    #[arg(long)]
    pub summary: bool,

    /// Write per-sample positions and deviations (meters) to this CSV file
    #[arg(long, value_name = "PATH")]
    pub series_csv: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }

    /// Reject flag combinations that clap cannot express
    pub fn validate(&self) -> Result<()> {
        if self.summary && self.format != OutputFormat::Text {
            anyhow::bail!(
                "--summary only applies to text output; the {:?} report always includes \
                 the sample count and mean position",
                self.format
            );
        }
        Ok(())
    }

    /// Build the analysis configuration from the parsed arguments
    pub fn to_config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::new(&self.input).with_output_format(self.format);
        if self.skip_malformed {
            config = config.with_skip_malformed();
        }
        if self.validate_ranges {
            config = config.with_range_validation();
        }
        if self.summary {
            config = config.with_summary();
        }
        if let Some(path) = &self.series_csv {
            config = config.with_series_csv(path);
        }
        config
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pppnava_analyzer={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Run the analysis described by `args` and write the report to stdout
pub fn run(args: &Args) -> Result<AnalysisReport> {
    args.validate()?;
    let config = args.to_config();
    let analyzer = Analyzer::new(config.clone());

    let report = analyzer
        .run()
        .with_context(|| format!("Failed to analyze {}", config.input_path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.output_format == OutputFormat::Text && config.include_summary {
        writeln!(
            out,
            "{} {}",
            "PPPNAVA analysis:".bright_green().bold(),
            config.input_path.display()
        )?;
    }

    emitter_for(&config).emit(&report, &mut out)?;
    out.flush()?;

    if let Some(path) = &config.series_csv_path {
        SeriesCsvExporter
            .write_to_path(&report, path)
            .with_context(|| format!("Failed to write series CSV to {}", path.display()))?;
    }

    if report.parse_stats.lines_skipped > 0 {
        eprintln!(
            "{} {} malformed line(s) skipped",
            "Warning:".bright_yellow().bold(),
            report.parse_stats.lines_skipped
        );
    }

    Ok(report)
}

fn emitter_for(config: &AnalysisConfig) -> Box<dyn ReportEmitter> {
    match config.output_format {
        OutputFormat::Text if config.include_summary => {
            Box::new(TextReport::new().with_summary())
        }
        OutputFormat::Text => Box::new(TextReport::new()),
        OutputFormat::Json => Box::new(JsonReport),
    }
}
