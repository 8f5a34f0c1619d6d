use chrono::NaiveDateTime;

use super::error::TrackError;
use super::sample::{Axis, Coordinate, SampleStatus, TelemetrySample};
use crate::config::{DuplicateCheck, Settings, TrimPolicy};

/// The reference fix later candidates are judged against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LastGood {
    pub index: usize,
    pub timestamp: NaiveDateTime,
    pub coordinate: Coordinate,
}

/// Per-axis median of every coordinate currently set.
pub fn median(samples: &[TelemetrySample]) -> Option<Coordinate> {
    let mut axes: [Vec<f64>; 3] = Default::default();
    for coordinate in samples.iter().filter_map(|s| s.coordinate) {
        for axis in Axis::ALL {
            axes[axis.idx()].push(coordinate[axis]);
        }
    }
    if axes[0].is_empty() {
        return None;
    }
    let [x, y, z] = axes.map(|mut values| median_of(&mut values));
    Some(Coordinate::new(x, y, z))
}

fn median_of(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Run the median, duplicate and speed tests, in that order, and return the
/// first one that fires.
pub fn judge(
    coordinate: &Coordinate,
    timestamp: NaiveDateTime,
    median: &Coordinate,
    last_good: Option<&LastGood>,
    settings: &Settings,
) -> Option<SampleStatus> {
    let too_far = Axis::ALL
        .iter()
        .any(|&a| (coordinate[a] - median[a]).abs() >= settings.xyz_limit[a.idx()]);
    if too_far {
        return Some(SampleStatus::TooFarFromMedian {
            coordinate: *coordinate,
            median: *median,
        });
    }

    let last = last_good?;

    let duplicate = match settings.duplicate_check {
        DuplicateCheck::Planar => coordinate.planar() == last.coordinate.planar(),
        DuplicateCheck::Spatial => coordinate.0 == last.coordinate.0,
    };
    if duplicate {
        return Some(SampleStatus::Duplicate);
    }

    let speed = speed(&last.coordinate, last.timestamp, coordinate, timestamp);
    let impossible = Axis::ALL
        .iter()
        .any(|&a| speed[a.idx()] >= settings.xyz_delta_limit[a.idx()]);
    if impossible {
        return Some(SampleStatus::ImpossibleSpeed(speed));
    }

    None
}

/// Absolute per-axis rate of change between two fixes, in units per second.
pub fn speed(
    from: &Coordinate,
    from_time: NaiveDateTime,
    to: &Coordinate,
    to_time: NaiveDateTime,
) -> [f64; 3] {
    let elapsed = elapsed_seconds(from_time, to_time);
    Axis::ALL.map(|a| {
        let delta = (to[a] - from[a]).abs();
        if elapsed > 0.0 {
            delta / elapsed
        } else if delta > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    })
}

fn elapsed_seconds(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    let delta = to - from;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        None => delta.num_seconds() as f64,
    }
}

/// Null out implausible fixes, then trim unusable samples off the ends.
pub fn reject(samples: Vec<TelemetrySample>, settings: &Settings) -> Result<Vec<TelemetrySample>, TrackError> {
    let median = median(&samples).ok_or(TrackError::NoValidCoordinates)?;
    log::debug!("median fix {}", median);

    let capacity = samples.len();
    let (samples, _) = samples.into_iter().fold(
        (Vec::with_capacity(capacity), None::<LastGood>),
        |(mut out, last_good), mut sample| {
            let last_good = match sample.coordinate {
                Some(coordinate) => {
                    match judge(&coordinate, sample.timestamp, &median, last_good.as_ref(), settings) {
                        Some(status) => {
                            log::debug!(
                                "sample {}: {} (last good: {:?})",
                                sample.index,
                                status,
                                last_good.map(|g| g.index)
                            );
                            sample.reject(status);
                            last_good
                        }
                        None => Some(LastGood {
                            index: sample.index,
                            timestamp: sample.timestamp,
                            coordinate,
                        }),
                    }
                }
                None => last_good,
            };
            out.push(sample);
            (out, last_good)
        },
    );

    trim(samples, settings.trim)
}

/// Drop samples without a coordinate from the ends selected by `policy`.
pub fn trim(mut samples: Vec<TelemetrySample>, policy: TrimPolicy) -> Result<Vec<TelemetrySample>, TrackError> {
    let last = samples
        .iter()
        .rposition(|s| s.coordinate.is_some())
        .ok_or(TrackError::AllRejected)?;
    let trailing = samples.len() - last - 1;
    samples.truncate(last + 1);

    let leading = match policy {
        TrimPolicy::Both => {
            let first = samples
                .iter()
                .position(|s| s.coordinate.is_some())
                .unwrap_or(0);
            samples.drain(..first);
            first
        }
        TrimPolicy::Trailing => 0,
    };

    if leading + trailing > 0 {
        log::info!(
            "trimmed {} leading and {} trailing samples without a usable fix",
            leading,
            trailing
        );
    }
    Ok(samples)
}
