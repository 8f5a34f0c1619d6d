use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TrackError {
    #[error("no telemetry samples to process")]
    Empty,
    #[error("no valid coordinates found")]
    NoValidCoordinates,
    #[error("every coordinate was rejected, nothing left after trimming")]
    AllRejected,
    #[error("fewer than two anchors for interpolation (found {found})")]
    InsufficientAnchors { found: usize },
    #[error("timestamps do not increase at sample {index}")]
    NonIncreasingTime { index: usize },
}
