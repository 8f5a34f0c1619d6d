use chrono::NaiveDateTime;

use super::error::TrackError;
use super::pchip::Pchip;
use super::sample::{Axis, Coordinate, TelemetrySample};

/// Fill every sample left without a coordinate from three monotone cubic
/// splines (time to x, y and z) fitted through the measured samples.
///
/// `rounding` is the number of decimals kept per axis. Measured samples are
/// left untouched.
pub fn fill_gaps(mut samples: Vec<TelemetrySample>, rounding: [u32; 3]) -> Result<Vec<TelemetrySample>, TrackError> {
    for sample in samples.iter_mut() {
        sample.interpolated = sample.coordinate.is_none();
    }

    let anchors: Vec<(usize, NaiveDateTime, Coordinate)> = samples
        .iter()
        .filter_map(|s| s.coordinate.map(|c| (s.index, s.timestamp, c)))
        .collect();
    if anchors.len() < 2 {
        return Err(TrackError::InsufficientAnchors {
            found: anchors.len(),
        });
    }

    let origin = anchors[0].1;
    let times: Vec<f64> = anchors.iter().map(|(_, t, _)| seconds_since(origin, *t)).collect();
    let splines = Axis::ALL
        .iter()
        .map(|&axis| {
            let values = anchors.iter().map(|(_, _, c)| c[axis]).collect();
            Pchip::new(times.clone(), values)
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| match e {
            // Report the sample index rather than the knot position.
            TrackError::NonIncreasingTime { index } => TrackError::NonIncreasingTime {
                index: anchors[index].0,
            },
            other => other,
        })?;

    let mut filled = 0;
    for sample in samples.iter_mut().filter(|s| s.coordinate.is_none()) {
        let t = seconds_since(origin, sample.timestamp);
        let [x, y, z] = [0, 1, 2].map(|i| round_to(splines[i].eval(t), rounding[i]));
        sample.coordinate = Some(Coordinate::new(x, y, z));
        filled += 1;
    }
    log::info!(
        "interpolated {} of {} samples from {} anchors",
        filled,
        samples.len(),
        anchors.len()
    );

    Ok(samples)
}

pub fn seconds_since(origin: NaiveDateTime, t: NaiveDateTime) -> f64 {
    let delta = t - origin;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

/// Round half away from zero to `decimals` places.
/// Precisions beyond what an f64 can hold leave the value as is.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = i32::try_from(decimals).map(|d| 10f64.powi(d)).unwrap_or(f64::INFINITY);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
