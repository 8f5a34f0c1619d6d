mod derived;
mod error;
mod interpolate;
mod outlier;
mod pchip;
mod pipeline;
mod sample;
mod validity;

pub use error::TrackError;
pub use pipeline::clean;
pub use sample::{RawFix, TelemetrySample, Trajectory};
