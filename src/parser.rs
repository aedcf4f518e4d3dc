//! PPPNAVA record parsing.
//!
//! Extracts latitude, longitude and altitude from fields 11-13 of each
//! comma-separated log line and collects them, in file order, into a
//! [`SampleSet`]. All other fields of the sentence are ignored.

use crate::config::{AnalysisConfig, MalformedLinePolicy};
use crate::constants::{
    FIELD_SEPARATOR, MIN_FIELD_COUNT, fields, is_valid_latitude, is_valid_longitude,
};
use crate::error::{NavError, ParseError, Result};
use crate::models::{ParseStats, PositionRecord, SampleSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Parse one PPPNAVA line into a position record
pub fn parse_pppnava_line(line: &str) -> std::result::Result<PositionRecord, ParseError> {
    let parts: Vec<&str> = line.trim().split(FIELD_SEPARATOR).collect();
    if parts.len() < MIN_FIELD_COUNT {
        return Err(ParseError::TooFewFields {
            found: parts.len(),
            required: MIN_FIELD_COUNT,
        });
    }

    Ok(PositionRecord {
        latitude: parse_field(&parts, fields::LATITUDE, "latitude")?,
        longitude: parse_field(&parts, fields::LONGITUDE, "longitude")?,
        altitude: parse_field(&parts, fields::ALTITUDE, "altitude")?,
    })
}

/// Parse a finite decimal; `NaN` and infinities are rejected
fn parse_field(
    parts: &[&str],
    index: usize,
    field: &'static str,
) -> std::result::Result<f64, ParseError> {
    let raw = parts[index].trim();
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber {
            field,
            index,
            value: raw.to_string(),
        })
}

/// Reject coordinates outside their valid range; returns the offending field
fn check_ranges(record: &PositionRecord) -> Option<(&'static str, f64)> {
    if !is_valid_latitude(record.latitude) {
        Some(("latitude", record.latitude))
    } else if !is_valid_longitude(record.longitude) {
        Some(("longitude", record.longitude))
    } else {
        None
    }
}

/// Decode, parse and optionally range-check one raw line
fn parse_raw_line(raw: &[u8], line_num: usize, config: &AnalysisConfig) -> Result<PositionRecord> {
    let line = std::str::from_utf8(raw).map_err(|_| NavError::Parse {
        line: line_num,
        source: ParseError::InvalidUtf8,
    })?;

    let record = parse_pppnava_line(line).map_err(|source| NavError::Parse {
        line: line_num,
        source,
    })?;

    match check_ranges(&record).filter(|_| config.validate_ranges) {
        None => Ok(record),
        Some((field, value)) => Err(NavError::CoordinateOutOfRange {
            line: line_num,
            field,
            value,
        }),
    }
}

fn is_blank(raw: &[u8]) -> bool {
    raw.iter().all(u8::is_ascii_whitespace)
}

/// Read every record from a buffered reader.
///
/// Malformed lines, including lines that are not valid UTF-8, either abort
/// the run or are skipped according to `config.malformed_lines`. Blank lines
/// at the end of the input are counted and ignored; a blank line followed by
/// further records is malformed under [`MalformedLinePolicy::Abort`].
pub fn read_samples<R: BufRead>(
    mut reader: R,
    config: &AnalysisConfig,
) -> Result<(SampleSet, ParseStats)> {
    let mut samples = SampleSet::new();
    let mut stats = ParseStats::default();
    let mut first_pending_blank: Option<usize> = None;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines_read += 1;
        let line_num = stats.lines_read;

        if is_blank(&buf) {
            debug!("Blank line {}", line_num);
            stats.blank_lines += 1;
            first_pending_blank.get_or_insert(line_num);
            continue;
        }

        if let Some(blank_line) = first_pending_blank.take() {
            if config.malformed_lines == MalformedLinePolicy::Abort {
                return Err(NavError::Parse {
                    line: blank_line,
                    source: ParseError::BlankLine,
                });
            }
        }

        match parse_raw_line(&buf, line_num, config) {
            Ok(record) => {
                samples.push(record);
                stats.records_parsed += 1;
            }
            Err(error) => match config.malformed_lines {
                MalformedLinePolicy::Abort => return Err(error),
                MalformedLinePolicy::Skip => {
                    warn!("Skipping line: {}", error);
                    stats.lines_skipped += 1;
                }
            },
        }
    }

    debug!(
        "Parsed {} records from {} lines ({} blank, {} skipped)",
        stats.records_parsed, stats.lines_read, stats.blank_lines, stats.lines_skipped
    );

    Ok((samples, stats))
}

/// Open `path` and read every record from it
pub fn read_samples_from_file(
    path: &Path,
    config: &AnalysisConfig,
) -> Result<(SampleSet, ParseStats)> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => NavError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => NavError::Io(e),
    })?;

    read_samples(BufReader::new(file), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const SAMPLE_LINE: &str =
        "$PPPNAVA,1,2,3,4,5,6,7,8,9,10,30.5284563412,114.3561230981,42.7312,15,16*7A";

    fn line_with(lat: &str, lon: &str, alt: &str) -> String {
        format!("$PPPNAVA,a,b,c,d,e,f,g,h,i,j,{},{},{},tail", lat, lon, alt)
    }

    #[test]
    fn test_parse_extracts_fields_11_to_13() {
        let record = parse_pppnava_line(SAMPLE_LINE).unwrap();
        assert_eq!(record.latitude, 30.5284563412);
        assert_eq!(record.longitude, 114.3561230981);
        assert_eq!(record.altitude, 42.7312);
    }

    #[test]
    fn test_parse_exactly_fourteen_fields() {
        let line = "0,1,2,3,4,5,6,7,8,9,10,-33.9,151.2,-5.5";
        let record = parse_pppnava_line(line).unwrap();
        assert_eq!(record, PositionRecord::new(-33.9, 151.2, -5.5));
    }

    #[test]
    fn test_parse_trims_line_and_fields() {
        let line = format!("  {}\r\n", line_with(" 1.25", "2.5 ", " 3.75 "));
        let record = parse_pppnava_line(&line).unwrap();
        assert_eq!(record, PositionRecord::new(1.25, 2.5, 3.75));
    }

    #[test]
    fn test_parse_too_few_fields() {
        let err = parse_pppnava_line("$PPPNAVA,1,2,3,4,5,6,7,8,9,10,30.5,114.3").unwrap_err();
        assert_eq!(
            err,
            ParseError::TooFewFields {
                found: 13,
                required: 14
            }
        );
    }

    #[test]
    fn test_parse_non_numeric_field() {
        let err = parse_pppnava_line(&line_with("30.5", "east", "10")).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber {
                field: "longitude",
                index: 12,
                value: "east".to_string()
            }
        );

        let err = parse_pppnava_line(&line_with("30.5", "114.3", "")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { index: 13, .. }));
    }

    #[test]
    fn test_out_of_range_passes_through_by_default() {
        let input = line_with("95.0", "200.0", "1.0");
        let config = AnalysisConfig::default();
        let (samples, _) = read_samples(Cursor::new(input), &config).unwrap();
        assert_eq!(samples.records()[0], PositionRecord::new(95.0, 200.0, 1.0));
    }

    #[test]
    fn test_range_validation_rejects_without_clamping() {
        let input = format!("{}\n", line_with("-91.0", "10.0", "1.0"));
        let config = AnalysisConfig::default().with_range_validation();
        let err = read_samples(Cursor::new(input), &config).unwrap_err();
        match err {
            NavError::CoordinateOutOfRange { line, field, value } => {
                assert_eq!(line, 1);
                assert_eq!(field, "latitude");
                assert_eq!(value, -91.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_samples_aborts_on_malformed_line() {
        let input = format!(
            "{}\n{}\n{}\n",
            line_with("1", "2", "3"),
            "garbage",
            line_with("4", "5", "6")
        );
        let err = read_samples(Cursor::new(input), &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, NavError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_read_samples_skip_policy() {
        let input = format!(
            "{}\n{}\n\n{}\n",
            line_with("1", "2", "3"),
            line_with("x", "5", "6"),
            line_with("7", "8", "9")
        );
        let config = AnalysisConfig::default().with_skip_malformed();
        let (samples, stats) = read_samples(Cursor::new(input), &config).unwrap();

        assert_eq!(samples.latitudes(), vec![1.0, 7.0]);
        assert_eq!(
            stats,
            ParseStats {
                lines_read: 4,
                records_parsed: 2,
                blank_lines: 1,
                lines_skipped: 1,
            }
        );
    }

    #[test]
    fn test_parse_rejects_nan_and_infinity() {
        for value in ["NaN", "nan", "inf", "-infinity"] {
            let err = parse_pppnava_line(&line_with("30.5", "114.3", value)).unwrap_err();
            assert_eq!(
                err,
                ParseError::InvalidNumber {
                    field: "altitude",
                    index: 13,
                    value: value.to_string()
                }
            );
        }
        assert!(parse_pppnava_line(&line_with("inf", "114.3", "1.0")).is_err());
        assert!(parse_pppnava_line(&line_with("3.05e1", "114.3", "1.0")).is_ok());
    }

    fn bytes_with_invalid_utf8() -> Vec<u8> {
        let mut input = Vec::new();
        input.extend_from_slice(line_with("1", "2", "3").as_bytes());
        input.extend_from_slice(b"\n$PPPNAVA,\xff\xfe,garbage\n");
        input.extend_from_slice(line_with("7", "8", "9").as_bytes());
        input.push(b'\n');
        input
    }

    #[test]
    fn test_invalid_utf8_aborts_with_line_number() {
        let err = read_samples(Cursor::new(bytes_with_invalid_utf8()), &AnalysisConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            NavError::Parse {
                line: 2,
                source: ParseError::InvalidUtf8
            }
        ));
    }

    #[test]
    fn test_invalid_utf8_skipped_under_skip_policy() {
        let config = AnalysisConfig::default().with_skip_malformed();
        let (samples, stats) =
            read_samples(Cursor::new(bytes_with_invalid_utf8()), &config).unwrap();

        assert_eq!(samples.latitudes(), vec![1.0, 7.0]);
        assert_eq!(stats.lines_skipped, 1);
        assert_eq!(stats.lines_read, 3);
    }

    #[test]
    fn test_interior_blank_line_aborts() {
        let input = format!("{}\n\n{}\n", line_with("1", "2", "3"), line_with("4", "5", "6"));
        let err = read_samples(Cursor::new(input), &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            NavError::Parse {
                line: 2,
                source: ParseError::BlankLine
            }
        ));
    }

    #[test]
    fn test_trailing_blank_lines_tolerated() {
        let input = format!("{}\n  \n\r\n", line_with("1", "2", "3"));
        let (samples, stats) =
            read_samples(Cursor::new(input), &AnalysisConfig::default()).unwrap();

        assert_eq!(samples.len(), 1);
        assert_eq!(stats.blank_lines, 2);
        assert_eq!(stats.lines_skipped, 0);
    }

    #[test]
    fn test_last_line_without_newline() {
        let input = format!("{}\n{}", line_with("1", "2", "3"), line_with("4", "5", "6"));
        let (samples, stats) =
            read_samples(Cursor::new(input), &AnalysisConfig::default()).unwrap();
        assert_eq!(samples.altitudes(), vec![3.0, 6.0]);
        assert_eq!(stats.lines_read, 2);
    }

    #[test]
    fn test_read_samples_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{}", SAMPLE_LINE).unwrap();
        writeln!(temp_file, "{}", line_with("30.5", "114.35", "40.0")).unwrap();

        let (samples, stats) =
            read_samples_from_file(temp_file.path(), &AnalysisConfig::default()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.altitudes(), vec![42.7312, 40.0]);
        assert_eq!(stats.records_parsed, 2);
    }

    #[test]
    fn test_missing_file() {
        let err = read_samples_from_file(
            Path::new("/nonexistent/PPPNAVA_8_9-15-56.txt"),
            &AnalysisConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, NavError::FileNotFound { .. }));
    }
}
