//! Line-oriented IGC track-file parsing.
//!
//! Only the records this service needs are decoded: the H headers carrying
//! the flight date and pilot/glider identity, and the B records carrying
//! position fixes. Everything else in the file is ignored.
//!
//! Record shapes (fixed-width, one per line):
//! - `HFDTE160216` or `HFDTEDATE:160216,01` — flight date as DDMMYY
//! - `HFPLTPILOTINCHARGE:Per Morken` — pilot
//! - `HFGTYGLIDERTYPE:LS-8` — glider type
//! - `HFGIDGLIDERID:LN-ABC` — glider registration
//! - `B1101355206343N00006198WA0058700558` — fix: time, lat DDMMmmm[NS],
//!   lon DDDMMmmm[EW], validity, altitudes

use super::ParsedTrack;
use crate::core::{Result, TrackError, TrackPoint};
use chrono::NaiveDate;

/// Parses the text of an IGC file.
///
/// A file without a date header is rejected; a file without any position
/// fixes is accepted (its track length is simply zero).
pub fn parse_igc(content: &str) -> Result<ParsedTrack> {
    let mut date: Option<NaiveDate> = None;
    let mut pilot = String::new();
    let mut glider = String::new();
    let mut glider_id = String::new();
    let mut points = Vec::new();

    for line in content.lines().map(|l| l.trim_end_matches('\r')) {
        if line.starts_with("HFDTE") || line.starts_with("HODTE") {
            date = Some(parse_date_header(line)?);
        } else if is_header(line, "PLT") {
            pilot = header_value(line);
        } else if is_header(line, "GTY") {
            glider = header_value(line);
        } else if is_header(line, "GID") {
            glider_id = header_value(line);
        } else if line.starts_with('B') {
            points.push(parse_fix(line)?);
        }
    }

    let date = date.ok_or_else(|| TrackError::parse("missing HFDTE date header"))?;

    Ok(ParsedTrack {
        date,
        pilot,
        glider,
        glider_id,
        points,
    })
}

/// True when `line` is an H record with the given three-letter subject code.
fn is_header(line: &str, code: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 5 && bytes[0] == b'H' && bytes[2..5].eq_ignore_ascii_case(code.as_bytes())
}

/// The free-text value of an H record: everything after the first colon, or
/// empty when the record carries no value.
fn header_value(line: &str) -> String {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

/// Decodes a DDMMYY date header, with or without the long `DATE:` form.
fn parse_date_header(line: &str) -> Result<NaiveDate> {
    let digits: String = line
        .chars()
        .skip(5)
        .filter(|c| c.is_ascii_digit())
        .take(6)
        .collect();
    if digits.len() != 6 {
        return Err(TrackError::parse(format!("malformed date header: {}", line)));
    }

    let day: u32 = digits[0..2].parse().map_err(|_| bad_date(line))?;
    let month: u32 = digits[2..4].parse().map_err(|_| bad_date(line))?;
    let year: i32 = digits[4..6].parse().map_err(|_| bad_date(line))?;

    // Two-digit years are relative to 2000, matching flight recorders.
    NaiveDate::from_ymd_opt(2000 + year, month, day).ok_or_else(|| bad_date(line))
}

fn bad_date(line: &str) -> TrackError {
    TrackError::parse(format!("invalid date in header: {}", line))
}

/// Decodes the position out of a B record.
fn parse_fix(line: &str) -> Result<TrackPoint> {
    // B + time(6) + lat(8) + lon(9) + validity(1) + altitudes(10)
    if line.len() < 24 || !line.is_ascii() {
        return Err(TrackError::parse(format!("malformed B record: {}", line)));
    }

    let lat = parse_angle(&line[7..14], &line[14..15], 2, 'N', 'S')
        .ok_or_else(|| TrackError::parse(format!("invalid latitude in B record: {}", line)))?;
    let lon = parse_angle(&line[15..23], &line[23..24], 3, 'E', 'W')
        .ok_or_else(|| TrackError::parse(format!("invalid longitude in B record: {}", line)))?;

    Ok(TrackPoint::new(lat, lon))
}

/// Decodes `D{deg_digits}MMmmm` plus a hemisphere letter into decimal
/// degrees, negative for the second hemisphere.
fn parse_angle(
    digits: &str,
    hemisphere: &str,
    deg_digits: usize,
    positive: char,
    negative: char,
) -> Option<f64> {
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let degrees: f64 = digits[..deg_digits].parse().ok()?;
    let minutes: f64 = digits[deg_digits..deg_digits + 2].parse().ok()?;
    let thousandths: f64 = digits[deg_digits + 2..].parse().ok()?;
    let angle = degrees + (minutes + thousandths / 1000.0) / 60.0;

    match hemisphere.chars().next()? {
        h if h == positive => Some(angle),
        h if h == negative => Some(-angle),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "AXXXABC FLIGHT:1\r\n\
        HFDTE160216\r\n\
        HFFXA035\r\n\
        HFPLTPILOTINCHARGE:Per Morken\r\n\
        HFGTYGLIDERTYPE:LS-8\r\n\
        HFGIDGLIDERID:LN-ABC\r\n\
        B1101355206343N00006198WA0058700558\r\n\
        B1101455306259N00006295WA0059300556\r\n";

    #[test]
    fn test_parse_sample_track() {
        let track = parse_igc(SAMPLE).unwrap();
        assert_eq!(track.date, NaiveDate::from_ymd_opt(2016, 2, 16).unwrap());
        assert_eq!(track.pilot, "Per Morken");
        assert_eq!(track.glider, "LS-8");
        assert_eq!(track.glider_id, "LN-ABC");
        assert_eq!(track.points.len(), 2);
    }

    #[test]
    fn test_fix_coordinates_decode() {
        let track = parse_igc(SAMPLE).unwrap();
        let first = track.points[0];
        // 52 deg 06.343 min N
        assert!((first.lat - (52.0 + 6.343 / 60.0)).abs() < 1e-9);
        // 000 deg 06.198 min W
        assert!((first.lon - (-(6.198 / 60.0))).abs() < 1e-9);
    }

    #[test]
    fn test_long_date_header_form() {
        let track = parse_igc("HFDTEDATE:160216,01\nB1101355206343N00006198WA0058700558\n")
            .unwrap();
        assert_eq!(track.date, NaiveDate::from_ymd_opt(2016, 2, 16).unwrap());
    }

    #[test]
    fn test_missing_date_rejected() {
        let err = parse_igc("HFPLTPILOTINCHARGE:Someone\n").unwrap_err();
        assert!(matches!(err, TrackError::Parse(_)));
    }

    #[test]
    fn test_invalid_date_rejected() {
        assert!(parse_igc("HFDTE413216\n").is_err());
    }

    #[test]
    fn test_malformed_fix_rejected() {
        assert!(parse_igc("HFDTE160216\nB110135\n").is_err());
        assert!(parse_igc("HFDTE160216\nB1101355206343X00006198WA0058700558\n").is_err());
    }

    #[test]
    fn test_no_fixes_is_not_an_error() {
        let track = parse_igc("HFDTE160216\n").unwrap();
        assert!(track.points.is_empty());
    }

    #[test]
    fn test_headers_without_values_default_empty() {
        let track = parse_igc("HFDTE160216\nHFPLTPILOTINCHARGE\n").unwrap();
        assert_eq!(track.pilot, "");
    }
}
