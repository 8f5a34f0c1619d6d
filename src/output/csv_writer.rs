use std::io;
use std::path::Path;

use super::error::OutputError;
use super::{field_value, DATETIME, DESCRIPTION, HEIGHT, INDEX, INTERPOLATED};
use crate::track::{TelemetrySample, Trajectory};

const LONGITUDE: &str = "Longitude";
const LATITUDE: &str = "Latitude";
const ELEVATION: &str = "Elevation";

const DERIVED: [&str; 8] = [INDEX, DATETIME, LONGITUDE, LATITUDE, ELEVATION, INTERPOLATED, DESCRIPTION, HEIGHT];

pub fn save_csv(trajectory: &Trajectory, path: &Path) -> Result<(), OutputError> {
    let file = std::fs::File::create(path)?;
    write_csv(trajectory, file)?;
    log::info!("wrote {} rows to {}", trajectory.samples.len(), path.display());
    Ok(())
}

/// Write the cleaned samples as CSV: the original columns first, then the
/// derived ones.
pub fn write_csv<W: io::Write>(trajectory: &Trajectory, out: W) -> Result<(), OutputError> {
    let passthrough: Vec<&str> = trajectory
        .samples
        .first()
        .map(|s| {
            s.fields
                .iter()
                .map(|(name, _)| name.as_str())
                .filter(|name| !DERIVED.contains(name))
                .collect()
        })
        .unwrap_or_default();

    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(passthrough.iter().copied().chain(DERIVED))?;
    for sample in &trajectory.samples {
        let row = passthrough
            .iter()
            .map(|name| sample.field(name).unwrap_or_default().to_string())
            .chain(DERIVED.iter().map(|name| derived_value(sample, name)));
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn derived_value(sample: &TelemetrySample, name: &str) -> String {
    let coordinate = sample.coordinate;
    match name {
        LONGITUDE => coordinate.map(|c| c.longitude().to_string()),
        LATITUDE => coordinate.map(|c| c.latitude().to_string()),
        ELEVATION => coordinate.map(|c| c.elevation().to_string()),
        _ => field_value(sample, name),
    }
    .unwrap_or_default()
}
