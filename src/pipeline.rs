//! Three-stage analysis pipeline: parse, aggregate/convert, present.
//!
//! [`Analyzer::run`] is the explicit entry point that acquires the input
//! file; [`analyze_samples`] is the pure computation stage and needs no
//! filesystem.

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::geodetic::deviation_series;
use crate::models::{AnalysisReport, ParseStats, SampleSet};
use crate::parser::{read_samples, read_samples_from_file};
use crate::statistics::aggregate;
use std::io::BufRead;
use std::time::Instant;
use tracing::{debug, info};

/// Reduce a complete sample set into aggregates and the deviation series
pub fn analyze_samples(samples: SampleSet, parse_stats: ParseStats) -> Result<AnalysisReport> {
    let aggregates = aggregate(&samples)?;
    let deviations = deviation_series(&samples, &aggregates);

    Ok(AnalysisReport {
        samples,
        aggregates,
        deviations,
        parse_stats,
    })
}

/// Runs one analysis over a PPPNAVA log
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Read the configured input file and analyze it
    pub fn run(&self) -> Result<AnalysisReport> {
        let start_time = Instant::now();
        info!("Analyzing {}", self.config.input_path.display());

        let (samples, parse_stats) =
            read_samples_from_file(&self.config.input_path, &self.config)?;
        let report = analyze_samples(samples, parse_stats)?;

        info!(
            "Analyzed {} samples in {}ms",
            report.aggregates.sample_count,
            start_time.elapsed().as_millis()
        );
        Ok(report)
    }

    /// Analyze records from an already-open reader
    pub fn run_reader<R: BufRead>(&self, reader: R) -> Result<AnalysisReport> {
        let (samples, parse_stats) = read_samples(reader, &self.config)?;
        debug!("Read {} samples from reader", samples.len());
        analyze_samples(samples, parse_stats)
    }
}
