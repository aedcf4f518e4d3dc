//! Configuration for an analysis run.
//!
//! Holds the input path, the malformed-line policy, optional coordinate
//! range validation and the report output format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What to do when a line cannot be turned into a position record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MalformedLinePolicy {
    /// Abort the run on the first malformed line; no partial results
    #[default]
    Abort,
    /// Log a warning, count the line and continue
    Skip,
}

/// Report output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Unknown output format '{}'. Valid formats: text, json",
                other
            )),
        }
    }
}

/// Configuration for a single analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// PPPNAVA log file to analyze
    pub input_path: PathBuf,

    /// Handling of lines that fail to parse
    pub malformed_lines: MalformedLinePolicy,

    /// Reject latitudes outside [-90, 90] and longitudes outside [-180, 180].
    /// Values are never clamped.
    pub validate_ranges: bool,

    /// Report format written to stdout
    pub output_format: OutputFormat,

    /// Include sample count and mean position in the text report
    pub include_summary: bool,

    /// Optional CSV export of the per-sample series
    pub series_csv_path: Option<PathBuf>,
}

impl AnalysisConfig {
    /// Create configuration for the given input file with default settings
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    /// Skip malformed lines with a warning instead of aborting
    pub fn with_skip_malformed(mut self) -> Self {
        self.malformed_lines = MalformedLinePolicy::Skip;
        self
    }

    /// Enable coordinate range validation
    pub fn with_range_validation(mut self) -> Self {
        self.validate_ranges = true;
        self
    }

    /// Set the report output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Include the summary block in the text report
    pub fn with_summary(mut self) -> Self {
        self.include_summary = true;
        self
    }

    /// Export the per-sample series as CSV
    pub fn with_series_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.series_csv_path = Some(path.into());
        self
    }
}
