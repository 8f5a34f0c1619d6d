use std::collections::BTreeMap;

use super::error::TrackError;
use super::sample::{TelemetrySample, Trajectory};
use super::{derived, interpolate, outlier, validity};
use crate::config::Settings;

/// Run validity filtering, outlier rejection, gap interpolation and the
/// derived fields over one batch of samples, in that order.
pub fn clean(samples: Vec<TelemetrySample>, settings: &Settings) -> Result<Trajectory, TrackError> {
    if samples.is_empty() {
        return Err(TrackError::Empty);
    }
    let total = samples.len();

    let samples = validity::apply(samples, settings.valid_sat_range);
    let valid = samples.iter().filter(|s| s.coordinate.is_some()).count();
    if valid == 0 {
        return Err(TrackError::NoValidCoordinates);
    }
    log::info!("{} of {} samples have a usable fix", valid, total);

    let samples = outlier::reject(samples, settings)?;
    log_rejections(&samples);

    let samples = interpolate::fill_gaps(samples, settings.xyz_rounding)?;
    let trajectory = derived::derive(samples)?;

    if let (Some(first), Some(last)) = (trajectory.samples.first(), trajectory.samples.last()) {
        let span = (last.timestamp - first.timestamp).to_std().unwrap_or_default();
        log::info!(
            "cleaned track: {} samples over {}, {} interpolated",
            trajectory.samples.len(),
            humantime::format_duration(span),
            trajectory.interpolated_count()
        );
    }
    Ok(trajectory)
}

fn log_rejections(samples: &[TelemetrySample]) {
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for sample in samples.iter().filter(|s| s.status.is_rejection()) {
        *counts.entry(reason_key(sample)).or_default() += 1;
    }
    for (reason, count) in counts {
        log::info!("rejected {} samples: {}", count, reason);
    }
}

fn reason_key(sample: &TelemetrySample) -> &'static str {
    use super::sample::SampleStatus::*;
    match sample.status {
        BadSatelliteCount(_) => "bad satellite count",
        MissingPosition | MissingAltitude => "missing position",
        TooFarFromMedian { .. } => "too far from median",
        Duplicate => "duplicate location",
        ImpossibleSpeed(_) => "impossible speed",
        Unchecked | Valid => "unknown",
    }
}
