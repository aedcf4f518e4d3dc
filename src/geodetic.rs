//! Angle-to-distance conversion on a spherical Earth.
//!
//! Angular deviations are scaled by the WGS84 equatorial radius treated as a
//! sphere radius. Longitude deviations are additionally scaled by the cosine
//! of a single reference latitude, the mean latitude of the whole run, which
//! is applied to every sample rather than each sample's own latitude. The
//! approximation holds for tightly clustered fixes; near the poles the
//! longitude scale factor goes to zero and longitude distances collapse.

use crate::constants::EARTH_RADIUS_M;
use crate::models::{Aggregates, DeviationSeries, SampleSet};

/// Meters per degree of arc on the reference sphere
fn meters_per_degree() -> f64 {
    (std::f64::consts::PI / 180.0) * EARTH_RADIUS_M
}

/// Convert an angular deviation (degrees) into meters at `reference_latitude`.
///
/// Returns `(lat_diff_meters, lon_diff_meters)`.
pub fn lat_lon_to_meters(lat_diff: f64, lon_diff: f64, reference_latitude: f64) -> (f64, f64) {
    let scale = meters_per_degree();
    let lat_diff_meters = lat_diff * scale;
    let lon_diff_meters = lon_diff * scale * reference_latitude.to_radians().cos();
    (lat_diff_meters, lon_diff_meters)
}

/// Inverse of [`lat_lon_to_meters`].
///
/// The longitude component is `None` when the scale factor at
/// `reference_latitude` vanishes (the poles), since the distance no longer
/// carries the angular difference.
pub fn meters_to_lat_lon(
    lat_diff_meters: f64,
    lon_diff_meters: f64,
    reference_latitude: f64,
) -> (f64, Option<f64>) {
    let scale = meters_per_degree();
    let lat_diff = lat_diff_meters / scale;

    let cos_ref = reference_latitude.to_radians().cos();
    let lon_diff = if cos_ref.abs() < f64::EPSILON {
        None
    } else {
        Some(lon_diff_meters / (scale * cos_ref))
    };

    (lat_diff, lon_diff)
}

/// Per-sample deviation from the mean position, in meters.
///
/// Every sample's longitude deviation uses `aggregates.mean_latitude` as the
/// reference latitude.
pub fn deviation_series(samples: &SampleSet, aggregates: &Aggregates) -> DeviationSeries {
    let (lat_diff_meters, lon_diff_meters) = samples
        .records()
        .iter()
        .map(|record| {
            lat_lon_to_meters(
                record.latitude - aggregates.mean_latitude,
                record.longitude - aggregates.mean_longitude,
                aggregates.mean_latitude,
            )
        })
        .unzip();

    DeviationSeries {
        lat_diff_meters,
        lon_diff_meters,
    }
}
