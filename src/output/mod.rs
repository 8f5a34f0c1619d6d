mod csv_writer;
mod error;
mod kml_writer;
mod report;

pub use csv_writer::save_csv;
pub use error::OutputError;
pub use kml_writer::save_kml;
pub use report::{status_lines, to_json};

use crate::track::TelemetrySample;

pub const INDEX: &str = "Index";
pub const DATETIME: &str = "DateTime";
pub const DESCRIPTION: &str = "Point Description";
pub const INTERPOLATED: &str = "Interpolated";
pub const HEIGHT: &str = "Height above Ground (m)";

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Value of a derived or passthrough field, as displayed to the user.
pub fn field_value(sample: &TelemetrySample, name: &str) -> Option<String> {
    match name {
        INDEX => Some(sample.index.to_string()),
        DATETIME => Some(sample.timestamp.format(DATETIME_FORMAT).to_string()),
        DESCRIPTION => Some(sample.status.to_string()),
        INTERPOLATED => Some(sample.interpolated.to_string()),
        HEIGHT => sample.height_above_ground.map(|h| h.to_string()),
        _ => sample.field(name).map(String::from),
    }
}
