//! PPPNAVA Analyzer Library
//!
//! Statistical analysis of position fixes logged by a navigation receiver
//! as PPPNAVA sentences.
//!
//! This library provides tools for:
//! - Parsing latitude, longitude and altitude from PPPNAVA log lines
//! - Computing the mean position and per-channel RMS dispersion
//! - Converting deviations from the mean into meters on a spherical Earth
//! - Emitting text and JSON reports and per-sample series for plotting

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod geodetic;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod statistics;

// Re-export commonly used types
pub use config::{AnalysisConfig, MalformedLinePolicy, OutputFormat};
pub use error::{NavError, ParseError, Result};
pub use models::{Aggregates, AnalysisReport, DeviationSeries, PositionRecord, SampleSet};
pub use pipeline::{Analyzer, analyze_samples};
