use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn idx(self) -> usize {
        self as usize
    }
}

/// A fix in (longitude, latitude, elevation) order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate(pub [f64; 3]);

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64, elevation: f64) -> Self {
        Self([longitude, latitude, elevation])
    }

    pub fn longitude(&self) -> f64 {
        self.0[0]
    }

    pub fn latitude(&self) -> f64 {
        self.0[1]
    }

    pub fn elevation(&self) -> f64 {
        self.0[2]
    }

    pub fn planar(&self) -> [f64; 2] {
        [self.0[0], self.0[1]]
    }
}

impl Index<Axis> for Coordinate {
    type Output = f64;

    fn index(&self, axis: Axis) -> &f64 {
        &self.0[axis.idx()]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.0[0], self.0[1], self.0[2])
    }
}

/// Position as reported by the logger, before any validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RawFix {
    /// (longitude, latitude)
    pub lon_lat: Option<[f64; 2]>,
    pub altitude: Option<f64>,
    /// Preferred altitude source, already relative to the ground.
    pub secondary_altitude: Option<f64>,
}

impl RawFix {
    pub fn elevation(&self) -> Option<f64> {
        self.secondary_altitude.or(self.altitude)
    }
}

/// Why a sample carries (or lost) its coordinate. Last writer wins.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleStatus {
    Unchecked,
    Valid,
    BadSatelliteCount(i64),
    MissingPosition,
    MissingAltitude,
    TooFarFromMedian {
        coordinate: Coordinate,
        median: Coordinate,
    },
    Duplicate,
    ImpossibleSpeed([f64; 3]),
}

impl SampleStatus {
    pub fn is_rejection(&self) -> bool {
        !matches!(self, SampleStatus::Unchecked | SampleStatus::Valid)
    }
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleStatus::Unchecked => write!(f, "Unchecked"),
            SampleStatus::Valid => write!(f, "Valid GPS"),
            SampleStatus::BadSatelliteCount(n) => write!(f, "Bad Satellite count: {}", n),
            SampleStatus::MissingPosition => write!(f, "Missing GPS position"),
            SampleStatus::MissingAltitude => write!(f, "Missing altitude"),
            SampleStatus::TooFarFromMedian { coordinate, median } => write!(
                f,
                "Too far from median location {} (median = {})",
                coordinate, median
            ),
            SampleStatus::Duplicate => write!(f, "Duplicate location"),
            SampleStatus::ImpossibleSpeed(speed) => write!(
                f,
                "Impossible speed: [{}, {}, {}]",
                speed[0], speed[1], speed[2]
            ),
        }
    }
}

impl Serialize for SampleStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TelemetrySample {
    /// 1-based position in the input, never renumbered.
    pub index: usize,
    pub timestamp: NaiveDateTime,
    pub satellite_count: i64,
    pub raw: RawFix,
    pub coordinate: Option<Coordinate>,
    pub status: SampleStatus,
    pub interpolated: bool,
    pub height_above_ground: Option<f64>,
    /// Input columns in their original order.
    #[serde(skip)]
    pub fields: Vec<(String, String)>,
}

impl TelemetrySample {
    pub fn new(index: usize, timestamp: NaiveDateTime, satellite_count: i64, raw: RawFix) -> Self {
        Self {
            index,
            timestamp,
            satellite_count,
            raw,
            coordinate: None,
            status: SampleStatus::Unchecked,
            interpolated: false,
            height_above_ground: None,
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<(String, String)>) -> Self {
        self.fields = fields;
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn reject(&mut self, status: SampleStatus) {
        self.coordinate = None;
        self.status = status;
    }
}

/// Inclusive value range of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinateRange {
    pub min: f64,
    pub max: f64,
}

/// A cleaned trajectory: every sample carries a coordinate and a height.
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    pub samples: Vec<TelemetrySample>,
    pub ranges: [CoordinateRange; 3],
}

impl Trajectory {
    pub fn interpolated_count(&self) -> usize {
        self.samples.iter().filter(|s| s.interpolated).count()
    }

    pub fn elevation_range(&self) -> CoordinateRange {
        self.ranges[Axis::Z.idx()]
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::{Duration, NaiveDate};

    pub fn epoch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    /// Sample `index` taken `index - 1` seconds after the epoch.
    pub fn sample(index: usize, sats: i64, lon: f64, lat: f64, alt: f64) -> TelemetrySample {
        TelemetrySample::new(
            index,
            epoch() + Duration::seconds(index as i64 - 1),
            sats,
            RawFix {
                lon_lat: Some([lon, lat]),
                altitude: Some(alt),
                secondary_altitude: None,
            },
        )
    }

    /// Sample that already went through the validity filter.
    pub fn measured(index: usize, lon: f64, lat: f64, alt: f64) -> TelemetrySample {
        let mut s = sample(index, 9, lon, lat, alt);
        s.coordinate = Some(Coordinate::new(lon, lat, alt));
        s.status = SampleStatus::Valid;
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secondary_altitude_is_preferred() {
        let raw = RawFix {
            lon_lat: Some([1.0, 2.0]),
            altitude: Some(350.0),
            secondary_altitude: Some(12.5),
        };
        assert_eq!(raw.elevation(), Some(12.5));

        let raw = RawFix {
            secondary_altitude: None,
            ..raw
        };
        assert_eq!(raw.elevation(), Some(350.0));
    }

    #[test]
    fn status_descriptions() {
        assert_eq!(SampleStatus::Valid.to_string(), "Valid GPS");
        assert_eq!(
            SampleStatus::BadSatelliteCount(3).to_string(),
            "Bad Satellite count: 3"
        );
        let far = SampleStatus::TooFarFromMedian {
            coordinate: Coordinate::new(5.0, 45.0, 100.0),
            median: Coordinate::new(4.0, 45.0, 100.0),
        };
        assert!(far.to_string().starts_with("Too far from median location [5, 45, 100]"));
        assert!(far.is_rejection());
        assert!(!SampleStatus::Valid.is_rejection());
    }

    #[test]
    fn coordinate_indexing_by_axis() {
        let c = Coordinate::new(1.0, 2.0, 3.0);
        assert_eq!(c[Axis::X], 1.0);
        assert_eq!(c[Axis::Z], c.elevation());
        assert_eq!(c.planar(), [1.0, 2.0]);
        assert_eq!(Axis::Y.to_string(), "y");
    }
}
