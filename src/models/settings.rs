//! User-tunable settings, loaded from a TOML file.

use crate::error::ConfigError;
use crate::states::StateId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default long-press threshold, in seconds.
pub const DEFAULT_HOLD_THRESHOLD: f32 = 0.25;

fn default_hold_threshold() -> f32 {
    DEFAULT_HOLD_THRESHOLD
}
fn default_viewport_width() -> f32 {
    800.0
}
fn default_viewport_height() -> f32 {
    480.0
}
fn default_seed() -> u64 {
    0xCA4D
}
fn default_card_count() -> usize {
    8
}
fn default_card_width() -> f32 {
    72.0
}
fn default_card_height() -> f32 {
    96.0
}
fn default_initial_state() -> StateId {
    StateId::PLAY
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    /// Seconds the pointer must stay pressed before a hold registers.
    #[serde(default = "default_hold_threshold")]
    pub hold_threshold: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            hold_threshold: default_hold_threshold(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

/// Layout of the play table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
    /// Seed for dealing; the same seed always deals the same table.
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_card_count")]
    pub card_count: usize,

    #[serde(default = "default_card_width")]
    pub card_width: f32,

    #[serde(default = "default_card_height")]
    pub card_height: f32,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            card_count: default_card_count(),
            card_width: default_card_width(),
            card_height: default_card_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_initial_state")]
    pub initial_state: StateId,

    #[serde(default)]
    pub input: InputSettings,

    #[serde(default)]
    pub camera: CameraSettings,

    #[serde(default)]
    pub table: TableSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_state: default_initial_state(),
            input: InputSettings::default(),
            camera: CameraSettings::default(),
            table: TableSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects sizes that are not finite and positive, and hold thresholds
    /// that are not finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("camera.viewport_width", self.camera.viewport_width),
            ("camera.viewport_height", self.camera.viewport_height),
            ("table.card_width", self.table.card_width),
            ("table.card_height", self.table.card_height),
        ];
        for (field, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid { field, value });
            }
        }

        let threshold = self.input.hold_threshold;
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "input.hold_threshold",
                value: threshold,
            });
        }
        Ok(())
    }

    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("CONFIG: {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&content, path)?;
        log::info!("CONFIG: Loaded {:?}", path);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = Settings::from_toml_str("", Path::new("cards.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.input.hold_threshold, DEFAULT_HOLD_THRESHOLD);
        assert_eq!(settings.initial_state, StateId::PLAY);
    }

    #[test]
    fn test_partial_sections() {
        let content = r#"
initial_state = 0

[input]
hold_threshold = 0.5

[table]
card_count = 3
"#;
        let settings = Settings::from_toml_str(content, Path::new("cards.toml")).unwrap();
        assert_eq!(settings.initial_state, StateId::MENU);
        assert_eq!(settings.input.hold_threshold, 0.5);
        assert_eq!(settings.table.card_count, 3);
        assert_eq!(settings.table.seed, default_seed());
        assert_eq!(settings.camera, CameraSettings::default());
    }

    #[test]
    fn test_parse_error_reports_path() {
        let err = Settings::from_toml_str("[input\n", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    fn invalid_field(content: &str) -> &'static str {
        match Settings::from_toml_str(content, Path::new("cards.toml")) {
            Err(ConfigError::Invalid { field, .. }) => field,
            other => panic!("expected Invalid for {content:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_viewport() {
        assert_eq!(invalid_field("[camera]\nviewport_width = inf\n"), "camera.viewport_width");
        assert_eq!(invalid_field("[camera]\nviewport_width = 0.0\n"), "camera.viewport_width");
        assert_eq!(invalid_field("[camera]\nviewport_height = -480.0\n"), "camera.viewport_height");
        assert_eq!(invalid_field("[camera]\nviewport_height = nan\n"), "camera.viewport_height");
    }

    #[test]
    fn test_rejects_bad_card_size() {
        assert_eq!(invalid_field("[table]\ncard_width = -1e39\n"), "table.card_width");
        assert_eq!(invalid_field("[table]\ncard_width = 0.0\n"), "table.card_width");
        assert_eq!(invalid_field("[table]\ncard_height = inf\n"), "table.card_height");
        assert_eq!(invalid_field("[table]\ncard_height = -1.0\n"), "table.card_height");
    }

    #[test]
    fn test_rejects_bad_hold_threshold() {
        assert_eq!(invalid_field("[input]\nhold_threshold = -0.1\n"), "input.hold_threshold");
        assert_eq!(invalid_field("[input]\nhold_threshold = inf\n"), "input.hold_threshold");
        assert_eq!(invalid_field("[input]\nhold_threshold = nan\n"), "input.hold_threshold");

        let instant = Settings::from_toml_str("[input]\nhold_threshold = 0.0\n", Path::new("cards.toml"));
        assert_eq!(instant.unwrap().input.hold_threshold, 0.0);
    }

    #[test]
    fn test_invalid_message_names_field() {
        let err = Settings::from_toml_str("[table]\ncard_width = 0.0\n", Path::new("cards.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("table.card_width"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let settings = Settings::load(Path::new("definitely/not/here/cards.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
