use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("KML error: {0}")]
    Kml(#[from] kml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
