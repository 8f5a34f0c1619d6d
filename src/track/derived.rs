use super::error::TrackError;
use super::sample::{Axis, CoordinateRange, TelemetrySample, Trajectory};

/// Per-axis (min, max) over every coordinate of the trajectory.
pub fn coordinate_ranges(samples: &[TelemetrySample]) -> Option<[CoordinateRange; 3]> {
    let mut coordinates = samples.iter().filter_map(|s| s.coordinate);
    let first = coordinates.next()?;
    let init = Axis::ALL.map(|a| CoordinateRange {
        min: first[a],
        max: first[a],
    });
    Some(coordinates.fold(init, |mut ranges, c| {
        for axis in Axis::ALL {
            let range = &mut ranges[axis.idx()];
            range.min = range.min.min(c[axis]);
            range.max = range.max.max(c[axis]);
        }
        ranges
    }))
}

/// Compute the coordinate ranges and each sample's height above ground.
///
/// A sample with a secondary altitude reading uses it directly, since that
/// source already measures height above the ground.
pub fn derive(mut samples: Vec<TelemetrySample>) -> Result<Trajectory, TrackError> {
    let ranges = coordinate_ranges(&samples).ok_or(TrackError::NoValidCoordinates)?;
    let ground = ranges[Axis::Z.idx()].min;

    for sample in samples.iter_mut() {
        sample.height_above_ground = match (sample.raw.secondary_altitude, sample.coordinate) {
            (Some(height), _) => Some(height),
            (None, Some(c)) => Some(c.elevation() - ground),
            (None, None) => None,
        };
    }

    Ok(Trajectory { samples, ranges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::sample::fixtures::measured;

    #[test]
    fn ranges_cover_all_axes() {
        let samples = vec![
            measured(1, 6.2, 46.1, 520.0),
            measured(2, 6.0, 46.3, 505.5),
            measured(3, 6.1, 46.2, 530.0),
        ];
        let ranges = coordinate_ranges(&samples).unwrap();
        assert_eq!(ranges[0], CoordinateRange { min: 6.0, max: 6.2 });
        assert_eq!(ranges[1], CoordinateRange { min: 46.1, max: 46.3 });
        assert_eq!(ranges[2], CoordinateRange { min: 505.5, max: 530.0 });
    }

    #[test]
    fn height_is_relative_to_lowest_fix() {
        let samples = vec![
            measured(1, 6.2, 46.1, 520.0),
            measured(2, 6.0, 46.3, 505.5),
            measured(3, 6.1, 46.2, 530.0),
        ];
        let trajectory = derive(samples).unwrap();
        let heights: Vec<_> = trajectory
            .samples
            .iter()
            .map(|s| s.height_above_ground.unwrap())
            .collect();
        assert_eq!(heights, vec![14.5, 0.0, 24.5]);
        assert_eq!(trajectory.elevation_range().min, 505.5);
    }

    #[test]
    fn secondary_altitude_is_used_as_height() {
        let mut samples = vec![measured(1, 6.0, 46.0, 500.0), measured(2, 6.1, 46.1, 480.0)];
        samples[0].raw.secondary_altitude = Some(37.2);
        let trajectory = derive(samples).unwrap();
        assert_eq!(trajectory.samples[0].height_above_ground, Some(37.2));
        assert_eq!(trajectory.samples[1].height_above_ground, Some(0.0));
    }

    #[test]
    fn fails_without_any_coordinate() {
        let mut samples = vec![measured(1, 6.0, 46.0, 500.0)];
        samples[0].coordinate = None;
        assert_eq!(derive(samples).unwrap_err(), TrackError::NoValidCoordinates);
    }
}
