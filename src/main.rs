mod config;
mod error;
mod ingest;
mod output;
mod track;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::Settings;
use crate::error::AppError;
use crate::track::Trajectory;

#[derive(Parser)]
#[command(name = "flighttrack")]
#[command(about = "Clean GPS telemetry logs and export them as KML flight paths")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean one or more logs and write a KML flight path
    Convert {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Settings file (YAML)
        #[arg(short, long)]
        settings: Option<PathBuf>,
        /// KML output path, defaults to the last input with a .kml extension
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write the cleaned samples as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Clean logs and print the status of every sample
    Check {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[arg(short, long)]
        settings: Option<PathBuf>,
        /// Print the cleaned trajectory as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective settings
    Settings {
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            inputs,
            settings,
            output,
            csv,
        } => convert(inputs, settings.as_deref(), output, csv),
        Commands::Check {
            inputs,
            settings,
            json,
        } => check(inputs, settings.as_deref(), json),
        Commands::Settings { settings } => show_settings(settings.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load(mut inputs: Vec<PathBuf>, settings: &Settings) -> Result<(Vec<PathBuf>, Trajectory), AppError> {
    // Logger files are named by time, so sorted order is chronological.
    inputs.sort();
    let samples = ingest::read_files(inputs.as_slice(), settings)?;
    let trajectory = track::clean(samples, settings)?;
    Ok((inputs, trajectory))
}

fn convert(
    inputs: Vec<PathBuf>,
    settings_path: Option<&Path>,
    output: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> Result<(), AppError> {
    let settings = Settings::load(settings_path)?;
    let (inputs, trajectory) = load(inputs, &settings)?;

    let last = inputs.last().cloned().unwrap_or_default();
    let kml_path = output.unwrap_or_else(|| last.with_extension("kml"));
    let name = track_name(&last);

    output::save_kml(&trajectory, &name, &settings, &kml_path)?;
    if let Some(csv_path) = csv {
        output::save_csv(&trajectory, &csv_path)?;
    }
    Ok(())
}

fn check(inputs: Vec<PathBuf>, settings_path: Option<&Path>, json: bool) -> Result<(), AppError> {
    let settings = Settings::load(settings_path)?;
    let (_, trajectory) = load(inputs, &settings)?;

    if json {
        println!("{}", output::to_json(&trajectory)?);
        return Ok(());
    }
    for line in output::status_lines(&trajectory) {
        println!("{}", line);
    }
    let elevation = trajectory.elevation_range();
    println!(
        "{} samples, {} interpolated, elevation {} to {} m",
        trajectory.samples.len(),
        trajectory.interpolated_count(),
        elevation.min,
        elevation.max
    );
    Ok(())
}

fn show_settings(settings_path: Option<&Path>) -> Result<(), AppError> {
    let settings = Settings::load(settings_path)?;
    print!("{}", settings.to_yaml()?);
    Ok(())
}

/// The track is named after the last (latest) input, whatever the output path.
fn track_name(last_input: &Path) -> String {
    last_input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "track".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("logs/2024-06-01-1200.csv", "2024-06-01-1200")]
    #[case("flight.csv", "flight")]
    #[case("", "track")]
    fn track_is_named_after_the_input(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(track_name(Path::new(input)), expected);
    }

    #[test]
    fn output_path_does_not_rename_the_track() {
        let cli = Cli::try_parse_from([
            "flighttrack",
            "convert",
            "b.csv",
            "a.csv",
            "-o",
            "other.kml",
        ])
        .unwrap();
        let Commands::Convert { mut inputs, output, .. } = cli.command else {
            panic!("expected convert");
        };
        inputs.sort();
        assert_eq!(output, Some(PathBuf::from("other.kml")));
        assert_eq!(track_name(inputs.last().unwrap()), "b");
    }
}
