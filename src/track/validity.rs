use super::sample::{Coordinate, SampleStatus, TelemetrySample};

/// Assign a coordinate to every sample whose satellite count lies strictly
/// inside `sat_range`.
pub fn apply(samples: Vec<TelemetrySample>, sat_range: [i64; 2]) -> Vec<TelemetrySample> {
    samples
        .into_iter()
        .map(|mut sample| {
            let (coordinate, status) = check(&sample, sat_range);
            sample.coordinate = coordinate;
            sample.status = status;
            sample
        })
        .collect()
}

pub fn check(sample: &TelemetrySample, sat_range: [i64; 2]) -> (Option<Coordinate>, SampleStatus) {
    let [low, high] = sat_range;
    let sats = sample.satellite_count;
    if !(low < sats && sats < high) {
        return (None, SampleStatus::BadSatelliteCount(sats));
    }

    let Some([lon, lat]) = sample.raw.lon_lat else {
        return (None, SampleStatus::MissingPosition);
    };
    match sample.raw.elevation() {
        Some(elevation) => (Some(Coordinate::new(lon, lat, elevation)), SampleStatus::Valid),
        None => (None, SampleStatus::MissingAltitude),
    }
}
