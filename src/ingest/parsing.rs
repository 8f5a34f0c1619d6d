use chrono::NaiveDateTime;

use super::error::IngestError;

pub fn parse_timestamp(row: usize, date: &str, time: &str, format: &str) -> Result<NaiveDateTime, IngestError> {
    let text = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&text, format).map_err(|_| IngestError::Timestamp { row, value: text })
}

pub fn parse_satellite_count(row: usize, value: &str) -> Result<i64, IngestError> {
    value.trim().parse().map_err(|_| IngestError::SatelliteCount {
        row,
        value: value.to_string(),
    })
}

/// Parse a "latitude longitude" cell into (longitude, latitude).
///
/// An empty cell means the logger had no position.
pub fn parse_position(row: usize, value: &str) -> Result<Option<[f64; 2]>, IngestError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    let err = || IngestError::Position {
        row,
        value: value.to_string(),
    };
    let mut parts = value.split_whitespace().map(parse_finite);
    let lat = parts.next().flatten().ok_or_else(err)?;
    let lon = parts.next().flatten().ok_or_else(err)?;
    Ok(Some([lon, lat]))
}

/// Parse an optional altitude cell; empty means absent.
pub fn parse_altitude(row: usize, column: &str, value: Option<&str>) -> Result<Option<f64>, IngestError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_finite(text).map(Some).ok_or_else(|| IngestError::Altitude {
            row,
            column: column.to_string(),
            value: text.to_string(),
        }),
    }
}

/// `f64::from_str` also accepts "NaN" and "inf", which are never a fix.
fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use rstest::rstest;

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    #[rstest]
    #[case("2024-06-01", "12:30:15.250", 250)]
    #[case("2024-06-01", "12:30:15", 0)]
    fn parses_timestamps(#[case] date: &str, #[case] time: &str, #[case] millis: u32) {
        let ts = parse_timestamp(1, date, time, FORMAT).unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(ts.second(), 15);
        assert_eq!(ts.nanosecond() / 1_000_000, millis);
    }

    #[test]
    fn bad_timestamp_names_the_row() {
        let err = parse_timestamp(7, "01/06/2024", "12:00", FORMAT).unwrap_err();
        assert_eq!(err.to_string(), "row 7: invalid timestamp '01/06/2024 12:00'");
    }

    #[rstest]
    #[case("9", Some(9))]
    #[case(" 12 ", Some(12))]
    #[case("x", None)]
    #[case("", None)]
    #[case("7.5", None)]
    fn parses_satellite_counts(#[case] value: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_satellite_count(1, value).ok(), expected);
    }

    #[test]
    fn position_is_swapped_to_lon_lat() {
        assert_eq!(
            parse_position(1, "46.123456 6.654321").unwrap(),
            Some([6.654321, 46.123456])
        );
        assert_eq!(parse_position(1, "  ").unwrap(), None);
    }

    #[rstest]
    #[case("46.1")]
    #[case("north east")]
    #[case("46.1,6.2")]
    #[case("NaN NaN")]
    #[case("inf 6.1")]
    #[case("46.1 -infinity")]
    fn malformed_position_is_fatal(#[case] value: &str) {
        assert!(matches!(
            parse_position(3, value),
            Err(IngestError::Position { row: 3, .. })
        ));
    }

    #[test]
    fn altitude_may_be_missing() {
        assert_eq!(parse_altitude(1, "GPS Alt(m)", None).unwrap(), None);
        assert_eq!(parse_altitude(1, "GPS Alt(m)", Some("")).unwrap(), None);
        assert_eq!(parse_altitude(1, "GPS Alt(m)", Some("512.4")).unwrap(), Some(512.4));
        assert!(parse_altitude(1, "GPS Alt(m)", Some("high")).is_err());
    }

    #[rstest]
    #[case("NaN")]
    #[case("inf")]
    #[case("-Infinity")]
    fn non_finite_altitude_is_fatal(#[case] value: &str) {
        assert!(matches!(
            parse_altitude(4, "Vario Alt(m)", Some(value)),
            Err(IngestError::Altitude { row: 4, .. })
        ));
    }
}
