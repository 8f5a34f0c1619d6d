use thiserror::Error;

use crate::config::ConfigError;
use crate::ingest::IngestError;
use crate::output::OutputError;
use crate::track::TrackError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("settings: {0}")]
    Config(#[from] ConfigError),
    #[error("reading input: {0}")]
    Ingest(#[from] IngestError),
    #[error("processing track: {0}")]
    Track(#[from] TrackError),
    #[error("writing output: {0}")]
    Output(#[from] OutputError),
}
