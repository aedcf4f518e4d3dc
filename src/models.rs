//! Core data structures for PPPNAVA analysis.
//!
//! Defines the parsed position record, the ordered sample set for a run,
//! and the derived aggregates and deviation series handed to report
//! emitters.

use serde::{Deserialize, Serialize};

/// One position fix extracted from a PPPNAVA sentence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Degrees
    pub latitude: f64,
    /// Degrees
    pub longitude: f64,
    /// Meters
    pub altitude: f64,
}

impl PositionRecord {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

/// Append-only, ordered collection of the samples of a single run.
///
/// Insertion order is file line order; the per-sample series are indexed by it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    records: Vec<PositionRecord>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PositionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PositionRecord] {
        &self.records
    }

    pub fn latitudes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.latitude).collect()
    }

    pub fn longitudes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.longitude).collect()
    }

    pub fn altitudes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.altitude).collect()
    }
}

impl FromIterator<PositionRecord> for SampleSet {
    fn from_iter<I: IntoIterator<Item = PositionRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Mean and RMS of a single channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub mean: f64,
    /// Population standard deviation about `mean`, not the RMS of raw values
    pub rms: f64,
}

/// Whole-run summary statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    pub sample_count: usize,
    pub mean_latitude: f64,
    pub mean_longitude: f64,
    pub mean_altitude: f64,
    pub rms_latitude: f64,
    pub rms_longitude: f64,
    pub rms_altitude: f64,
}

impl Aggregates {
    pub fn from_channels(
        sample_count: usize,
        latitude: ChannelStats,
        longitude: ChannelStats,
        altitude: ChannelStats,
    ) -> Self {
        Self {
            sample_count,
            mean_latitude: latitude.mean,
            mean_longitude: longitude.mean,
            mean_altitude: altitude.mean,
            rms_latitude: latitude.rms,
            rms_longitude: longitude.rms,
            rms_altitude: altitude.rms,
        }
    }

    /// Mean position as a record
    pub fn mean_position(&self) -> PositionRecord {
        PositionRecord::new(self.mean_latitude, self.mean_longitude, self.mean_altitude)
    }
}

/// Per-sample deviation from the mean position in meters, index-aligned with the sample set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviationSeries {
    pub lat_diff_meters: Vec<f64>,
    pub lon_diff_meters: Vec<f64>,
}

impl DeviationSeries {
    pub fn len(&self) -> usize {
        self.lat_diff_meters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lat_diff_meters.is_empty()
    }
}

/// Line accounting for one parse pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub lines_read: usize,
    pub records_parsed: usize,
    pub blank_lines: usize,
    pub lines_skipped: usize,
}

/// Everything a run produces; the only value report emitters consume
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    #[serde(skip)]
    pub samples: SampleSet,
    pub aggregates: Aggregates,
    #[serde(skip)]
    pub deviations: DeviationSeries,
    pub parse_stats: ParseStats,
}
