//! Report emitters.
//!
//! Emitters only consume an [`AnalysisReport`]; nothing in the analysis
//! pipeline depends on them. Charts are left to external tools, which can
//! read the per-sample series written by [`SeriesCsvExporter`].

use crate::constants::{REPORT_DECIMAL_PLACES, SERIES_CSV_HEADER};
use crate::error::Result;
use crate::models::AnalysisReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Writes an analysis report to an output sink
pub trait ReportEmitter {
    fn emit(&self, report: &AnalysisReport, out: &mut dyn Write) -> Result<()>;
}

/// Plain-text RMS report
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport {
    include_summary: bool,
}

impl TextReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix the RMS lines with sample count and mean position
    pub fn with_summary(mut self) -> Self {
        self.include_summary = true;
        self
    }
}

impl ReportEmitter for TextReport {
    fn emit(&self, report: &AnalysisReport, out: &mut dyn Write) -> Result<()> {
        let agg = &report.aggregates;
        let p = REPORT_DECIMAL_PLACES;

        if self.include_summary {
            writeln!(out, "Samples: {}", agg.sample_count)?;
            writeln!(out, "Mean Latitude: {:.p$}°", agg.mean_latitude)?;
            writeln!(out, "Mean Longitude: {:.p$}°", agg.mean_longitude)?;
            writeln!(out, "Mean Altitude: {:.p$} m", agg.mean_altitude)?;
        }

        writeln!(out, "RMS Latitude: {:.p$}°", agg.rms_latitude)?;
        writeln!(out, "RMS Longitude: {:.p$}°", agg.rms_longitude)?;
        writeln!(out, "RMS Altitude: {:.p$} m", agg.rms_altitude)?;
        Ok(())
    }
}

/// Aggregates and parse statistics as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport;

impl ReportEmitter for JsonReport {
    fn emit(&self, report: &AnalysisReport, out: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Per-sample positions and metric deviations, one CSV row per sample index
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesCsvExporter;

impl SeriesCsvExporter {
    /// Write the series to a file at `path`
    pub fn write_to_path(&self, report: &AnalysisReport, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.emit(report, &mut writer)?;
        writer.flush()?;
        debug!("Wrote {} series rows to {}", report.samples.len(), path.display());
        Ok(())
    }
}

impl ReportEmitter for SeriesCsvExporter {
    fn emit(&self, report: &AnalysisReport, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", SERIES_CSV_HEADER)?;

        let rows = report
            .samples
            .records()
            .iter()
            .zip(&report.deviations.lat_diff_meters)
            .zip(&report.deviations.lon_diff_meters);

        for (index, ((record, lat_m), lon_m)) in rows.enumerate() {
            writeln!(
                out,
                "{},{},{},{},{},{}",
                index, record.latitude, record.longitude, record.altitude, lat_m, lon_m
            )?;
        }
        Ok(())
    }
}
