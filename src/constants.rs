//! Application constants for the PPPNAVA analyzer
//!
//! Field layout of the PPPNAVA sentence, the geodetic constants used for
//! angle-to-distance conversion, and report formatting defaults.

// =============================================================================
// PPPNAVA Sentence Layout
// =============================================================================

/// Field separator of a PPPNAVA sentence
pub const FIELD_SEPARATOR: char = ',';

/// Zero-based field positions of the consumed values
pub mod fields {
    pub const LATITUDE: usize = 11;
    pub const LONGITUDE: usize = 12;
    pub const ALTITUDE: usize = 13;
}

/// Minimum number of fields a line must carry to reach the altitude field
pub const MIN_FIELD_COUNT: usize = fields::ALTITUDE + 1;

// =============================================================================
// Geodetic Constants
// =============================================================================

/// WGS84 equatorial radius, used as the radius of a spherical Earth (meters)
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Valid latitude range in degrees
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Valid longitude range in degrees
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

// =============================================================================
// Report Formatting
// =============================================================================

/// Decimal places used for RMS values in the text report
pub const REPORT_DECIMAL_PLACES: usize = 10;

/// Header row of the per-sample series export
pub const SERIES_CSV_HEADER: &str = "index,latitude,longitude,altitude,lat_diff_m,lon_diff_m";

/// Check if a latitude lies within [-90, 90]
pub fn is_valid_latitude(latitude: f64) -> bool {
    (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&latitude)
}

/// Check if a longitude lies within [-180, 180]
pub fn is_valid_longitude(longitude: f64) -> bool {
    (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&longitude)
}
