//! Runtime configuration loaded from a RON file.

use crate::cms::CmsConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "portfolio-canvas";
const CONFIG_FILE_NAME: &str = "config.ron";

/// Errors that can occur when loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::de::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub cms: CmsConfig,
}

/// Tuning for canvas interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Lower bound of the zoom multiplier.
    pub min_scale: f32,
    /// Upper bound of the zoom multiplier.
    pub max_scale: f32,
    /// Scale restored by `reset`.
    pub initial_scale: f32,
    /// Pan restored by `reset`.
    pub initial_pan: [f32; 2],
    /// Per-frame velocity multiplier while coasting, in (0, 1).
    pub friction: f32,
    /// Coasting stops once both velocity components drop below this.
    pub velocity_threshold: f32,
    /// Duration of animated navigation in milliseconds.
    pub navigate_duration_ms: u64,
    /// Pan distance per arrow key press.
    pub key_pan_step: f32,
    /// Scale change per ctrl/meta + `+`/`-` press.
    pub key_zoom_step: f32,
    /// Multiplier applied to unmodified wheel deltas.
    pub wheel_pan_multiplier: f32,
    /// Zoom factor per wheel notch towards the user.
    pub wheel_zoom_in: f32,
    /// Zoom factor per wheel notch away from the user.
    pub wheel_zoom_out: f32,
    /// Minimap width in pixels; the height follows the plane aspect ratio.
    pub minimap_width: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.3,
            max_scale: 2.0,
            initial_scale: 1.0,
            initial_pan: [0.0, 0.0],
            friction: 0.92,
            velocity_threshold: 0.5,
            navigate_duration_ms: 800,
            key_pan_step: 100.0,
            key_zoom_step: 0.1,
            wheel_pan_multiplier: 1.5,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            minimap_width: 200.0,
        }
    }
}

impl CanvasConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        if !(self.max_scale.is_finite() && self.max_scale >= self.min_scale) {
            return Err(ConfigError::Invalid(format!(
                "max_scale ({}) must be finite and at least min_scale ({})",
                self.max_scale, self.min_scale
            )));
        }
        if !self.initial_scale.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "initial_scale must be finite, got {}",
                self.initial_scale
            )));
        }
        if !self.initial_pan.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "initial_pan must be finite, got {:?}",
                self.initial_pan
            )));
        }
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "friction must be in (0, 1), got {}",
                self.friction
            )));
        }
        if self.navigate_duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "navigate_duration_ms must be positive".to_owned(),
            ));
        }

        let positive = [
            ("velocity_threshold", self.velocity_threshold),
            ("key_pan_step", self.key_pan_step),
            ("key_zoom_step", self.key_zoom_step),
            ("wheel_pan_multiplier", self.wheel_pan_multiplier),
            ("wheel_zoom_in", self.wheel_zoom_in),
            ("wheel_zoom_out", self.wheel_zoom_out),
            ("minimap_width", self.minimap_width),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Parses and validates a configuration from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Config = ron::from_str(text)?;
        config.canvas.validate()?;
        Ok(config)
    }

    /// Loads the configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    /// Loads the explicit path if given, otherwise the per-user config file.
    ///
    /// A missing per-user file yields defaults; any other failure is logged
    /// and also falls back to defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.exists() => path,
                _ => return Self::default(),
            },
        };

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("{err}; using default config");
                Self::default()
            }
        }
    }
}

/// Returns `<config_dir>/portfolio-canvas/config.ron`.
pub fn default_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CanvasConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_ron_fills_in_defaults() {
        let config = Config::from_ron("(canvas: (max_scale: 3.0))").unwrap();
        assert_eq!(config.canvas.max_scale, 3.0);
        assert_eq!(config.canvas.min_scale, 0.3);
        assert_eq!(config.canvas.navigate_duration_ms, 800);
    }

    #[test]
    fn inverted_scale_bounds_are_rejected() {
        let err = Config::from_ron("(canvas: (min_scale: 2.5, max_scale: 1.0))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn friction_outside_unit_interval_is_rejected() {
        let err = Config::from_ron("(canvas: (friction: 1.0))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn nan_max_scale_is_rejected() {
        let err = Config::from_ron("(canvas: (max_scale: NaN))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn nan_initial_scale_is_rejected() {
        let err = Config::from_ron("(canvas: (initial_scale: NaN))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn non_positive_steps_are_rejected() {
        for text in [
            "(canvas: (key_pan_step: NaN))",
            "(canvas: (key_zoom_step: 0.0))",
            "(canvas: (wheel_zoom_out: -0.9))",
            "(canvas: (wheel_pan_multiplier: inf))",
            "(canvas: (minimap_width: 0.0))",
        ] {
            let err = Config::from_ron(text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{text} accepted");
        }
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        let err = Config::from_ron("(canvas: (").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unreadable_explicit_path_falls_back_to_defaults() {
        let config = Config::load_or_default(Some(Path::new("/nonexistent/portfolio.ron")));
        assert_eq!(config.canvas.max_scale, CanvasConfig::default().max_scale);
    }
}
