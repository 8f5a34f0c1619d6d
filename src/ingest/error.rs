use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("no data found")]
    Empty,
    #[error("{source_name}: missing column '{column}'")]
    MissingColumn { source_name: String, column: String },
    #[error("row {row}: invalid timestamp '{value}'")]
    Timestamp { row: usize, value: String },
    #[error("row {row}: non-numeric satellite count '{value}'")]
    SatelliteCount { row: usize, value: String },
    #[error("row {row}: malformed GPS position '{value}'")]
    Position { row: usize, value: String },
    #[error("row {row}: malformed altitude in '{column}': '{value}'")]
    Altitude {
        row: usize,
        column: String,
        value: String,
    },
    #[error("{source_name}: {error}")]
    InFile {
        source_name: String,
        #[source]
        error: Box<IngestError>,
    },
}
