use super::error::OutputError;
use crate::track::Trajectory;

/// One line per sample: index, time, coordinate and status.
pub fn status_lines(trajectory: &Trajectory) -> Vec<String> {
    trajectory
        .samples
        .iter()
        .map(|s| {
            let coordinate = s
                .coordinate
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            let marker = if s.interpolated { "*" } else { " " };
            format!(
                "{:>6} {} {}{} {}",
                s.index,
                s.timestamp.format("%H:%M:%S%.3f"),
                marker,
                coordinate,
                s.status
            )
        })
        .collect()
}

pub fn to_json(trajectory: &Trajectory) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(trajectory)?)
}
