//! Whole-set statistical aggregation.
//!
//! "RMS" throughout this crate is the dispersion of a channel about its own
//! mean, `sqrt(mean((x_i - mean(x))^2))`, i.e. the population standard
//! deviation. It is not the root-mean-square of the raw values, which is a
//! larger number whenever the mean is non-zero.

use crate::error::{NavError, Result};
use crate::models::{Aggregates, ChannelStats, SampleSet};
use tracing::debug;

/// Arithmetic mean; `None` for an empty channel
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Dispersion of `values` about their mean; `None` for an empty channel
pub fn compute_rms(values: &[f64]) -> Option<f64> {
    channel_stats(values).map(|stats| stats.rms)
}

/// Mean and RMS of one channel, collected first and then reduced
pub fn channel_stats(values: &[f64]) -> Option<ChannelStats> {
    let mean = mean(values)?;
    let sum_sq = values
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>();
    let rms = (sum_sq / values.len() as f64).sqrt();

    Some(ChannelStats { mean, rms })
}

/// Compute mean and RMS of every channel over the full sample set.
///
/// An empty sample set has no defined mean and is rejected.
pub fn aggregate(samples: &SampleSet) -> Result<Aggregates> {
    let (Some(latitude), Some(longitude), Some(altitude)) = (
        channel_stats(&samples.latitudes()),
        channel_stats(&samples.longitudes()),
        channel_stats(&samples.altitudes()),
    ) else {
        return Err(NavError::EmptyInput);
    };

    let aggregates = Aggregates::from_channels(samples.len(), latitude, longitude, altitude);
    debug!(
        "Aggregated {} samples: mean=({:.10}, {:.10}, {:.4})",
        aggregates.sample_count,
        aggregates.mean_latitude,
        aggregates.mean_longitude,
        aggregates.mean_altitude
    );

    Ok(aggregates)
}
