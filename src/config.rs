use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid setting '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

/// An f64 carries about 15 significant decimal digits.
const MAX_ROUNDING: u32 = 15;

/// Which components of a fix take part in the duplicate test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DuplicateCheck {
    #[default]
    Planar,
    Spatial,
}

/// Which ends of the trajectory are trimmed of unusable samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrimPolicy {
    #[default]
    Both,
    Trailing,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Open interval of accepted satellite counts.
    pub valid_sat_range: [i64; 2],
    /// Maximum distance from the median fix, per axis.
    pub xyz_limit: [f64; 3],
    /// Maximum speed relative to the last good fix, per axis and second.
    pub xyz_delta_limit: [f64; 3],
    /// Decimals kept for interpolated coordinates, per axis.
    pub xyz_rounding: [u32; 3],
    pub duplicate_check: DuplicateCheck,
    pub trim: TrimPolicy,
    pub timestamp_format: String,
    pub field_mappings: BTreeMap<String, Vec<String>>,
    pub displayed_fields: Vec<String>,
    pub line_style: LineStyle,
    pub point_style: PointStyle,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LineStyle {
    /// KML colour, aabbggrr.
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PointStyle {
    pub label_points: bool,
    pub icon_scale: f64,
    pub icon_color: String,
    pub interp_icon_color: String,
    pub icon_href: String,
    pub label_color: String,
    pub label_scale: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            valid_sat_range: [4, 30],
            xyz_limit: [0.5, 0.5, 3000.0],
            xyz_delta_limit: [0.001, 0.001, 50.0],
            xyz_rounding: [7, 7, 1],
            duplicate_check: DuplicateCheck::default(),
            trim: TrimPolicy::default(),
            timestamp_format: default_timestamp_format(),
            field_mappings: default_field_mappings(),
            displayed_fields: default_displayed_fields(),
            line_style: LineStyle::default(),
            point_style: PointStyle::default(),
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "ff0000ff".to_string(),
            width: 2.0,
        }
    }
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            label_points: true,
            icon_scale: 0.5,
            icon_color: "ff00ff00".to_string(),
            interp_icon_color: "ff00ffff".to_string(),
            icon_href: "http://maps.google.com/mapfiles/kml/shapes/shaded_dot.png".to_string(),
            label_color: "ffffffff".to_string(),
            label_scale: 0.6,
        }
    }
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S%.f".to_string()
}

fn default_field_mappings() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([(
        "Alt(m)".to_string(),
        vec!["Vario Alt(m)".to_string(), "GPS Alt(m)".to_string()],
    )])
}

fn default_displayed_fields() -> Vec<String> {
    [
        "Index",
        "DateTime",
        "Point Description",
        "Sats",
        "GPS Alt(m)",
        "Vario Alt(m)",
        "Height above Ground (m)",
        "GSpd(kmh)",
        "Hdg(@)",
        "RxBt(V)",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document is valid and means "all defaults".
        let settings: Settings = if yaml.trim().is_empty() {
            Settings::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Load `path` if given, otherwise fall back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let [low, high] = self.valid_sat_range;
        if low >= high {
            return Err(ConfigError::Invalid {
                key: "valid_sat_range",
                message: format!("lower bound {} must be below upper bound {}", low, high),
            });
        }
        if let Some(v) = self.xyz_limit.iter().find(|v| !(**v > 0.0)) {
            return Err(ConfigError::Invalid {
                key: "xyz_limit",
                message: format!("limits must be positive, got {}", v),
            });
        }
        if let Some(v) = self.xyz_delta_limit.iter().find(|v| !(**v > 0.0)) {
            return Err(ConfigError::Invalid {
                key: "xyz_delta_limit",
                message: format!("limits must be positive, got {}", v),
            });
        }
        if let Some(d) = self.xyz_rounding.iter().find(|d| **d > MAX_ROUNDING) {
            return Err(ConfigError::Invalid {
                key: "xyz_rounding",
                message: format!("at most {} decimals are kept, got {}", MAX_ROUNDING, d),
            });
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
