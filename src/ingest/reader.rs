use std::fs::File;
use std::io;
use std::path::Path;

use super::error::IngestError;
use super::fields::{self, remap_fieldnames};
use super::parsing::{parse_altitude, parse_position, parse_satellite_count, parse_timestamp};
use crate::config::Settings;
use crate::track::{RawFix, TelemetrySample};

/// Read and concatenate logger CSV files, in the order given.
///
/// Sample indices run on across files; row errors name the file and the
/// row within it.
pub fn read_files<P: AsRef<Path>>(paths: &[P], settings: &Settings) -> Result<Vec<TelemetrySample>, IngestError> {
    let mut samples = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let file = File::open(path)?;
        let rows = read(file, &path.display().to_string(), samples.len() + 1, settings)?;
        log::debug!("{}: {} rows", path.display(), rows.len());
        samples.extend(rows);
    }

    if samples.is_empty() {
        return Err(IngestError::Empty);
    }
    log::info!("{} points read from {} CSV file(s)", samples.len(), paths.len());
    Ok(samples)
}

/// Parse one CSV stream, numbering its samples from `first_index`.
pub fn read<R: io::Read>(
    input: R,
    source_name: &str,
    first_index: usize,
    settings: &Settings,
) -> Result<Vec<TelemetrySample>, IngestError> {
    let reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    read_rows(reader, source_name, first_index, settings)
}

fn read_rows<R: io::Read>(
    mut reader: csv::Reader<R>,
    source_name: &str,
    first_index: usize,
    settings: &Settings,
) -> Result<Vec<TelemetrySample>, IngestError> {
    let header: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let names = remap_fieldnames(&header, &settings.field_mappings);

    if let Some(column) = fields::REQUIRED
        .into_iter()
        .find(|c| !names.iter().any(|n| n.as_str() == *c))
    {
        return Err(IngestError::MissingColumn {
            source_name: source_name.to_string(),
            column: column.to_string(),
        });
    }

    reader
        .records()
        .enumerate()
        .map(|(i, record)| {
            let record = record?;
            let fields: Vec<(String, String)> = names
                .iter()
                .cloned()
                .zip(record.iter().map(String::from))
                .collect();
            to_sample(first_index + i, i + 1, fields, settings).map_err(|e| IngestError::InFile {
                source_name: source_name.to_string(),
                error: Box::new(e),
            })
        })
        .collect()
}

fn to_sample(
    index: usize,
    row: usize,
    fields: Vec<(String, String)>,
    settings: &Settings,
) -> Result<TelemetrySample, IngestError> {
    let get = |name: &str| fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str());

    let timestamp = parse_timestamp(
        row,
        get(fields::DATE).unwrap_or_default(),
        get(fields::TIME).unwrap_or_default(),
        &settings.timestamp_format,
    )?;
    let sats = parse_satellite_count(row, get(fields::SATS).unwrap_or_default())?;
    let raw = RawFix {
        lon_lat: parse_position(row, get(fields::GPS).unwrap_or_default())?,
        altitude: parse_altitude(row, fields::GPS_ALT, get(fields::GPS_ALT))?,
        secondary_altitude: parse_altitude(row, fields::VARIO_ALT, get(fields::VARIO_ALT))?,
    };

    Ok(TelemetrySample::new(index, timestamp, sats, raw).with_fields(fields))
}
