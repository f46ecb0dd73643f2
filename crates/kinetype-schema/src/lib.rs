//! JSON configuration model for an animated text.
//!
//! Field names are camelCase on the wire. Enumerated values (`type`, `unit`,
//! `style`, `horizontal`) are kept as strings here; unknown values are
//! resolved to safe defaults when the configuration is turned into engine
//! settings, not rejected at parse time.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A complete animated text: content, look, timing and frame.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextAnimationConfiguration {
    pub text: String,
    pub properties: TextProperties,
    pub animations: AnimationsConfiguration,
    pub position: Position,
}

impl TextAnimationConfiguration {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for TextAnimationConfiguration {
    fn default() -> Self {
        Self {
            text: "Hello, World!".to_string(),
            properties: TextProperties::default(),
            animations: AnimationsConfiguration::default(),
            position: Position::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextProperties {
    pub font: FontProperties,
    pub alignment: AlignmentProperties,
    pub color: ColorProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FontProperties {
    pub name: String,
    pub size: f64,
    /// "regular", "bold" or "italic"
    pub style: String,
}

impl Default for FontProperties {
    fn default() -> Self {
        Self {
            name: "System".to_string(),
            size: 24.0,
            style: "regular".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentProperties {
    /// "left", "center" or "right"
    pub horizontal: String,
}

impl Default for AlignmentProperties {
    fn default() -> Self {
        Self {
            horizontal: "left".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColorProperties {
    /// "singleColor" or "patternColor"
    #[serde(rename = "type")]
    pub kind: String,
    /// `#RRGGBB`, used by `singleColor`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_color: Option<String>,
    /// `#RRGGBB` list, used by `patternColor`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    /// How `patternColor` walks the list: "sequential" (default) or "random"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Default for ColorProperties {
    fn default() -> Self {
        Self {
            kind: "singleColor".to_string(),
            default_color: Some("#000000".to_string()),
            colors: None,
            pattern: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnimationsConfiguration {
    pub appearance: AnimationConfig,
    pub main: AnimationConfig,
    pub disappearance: AnimationConfig,
}

impl Default for AnimationsConfiguration {
    fn default() -> Self {
        Self {
            appearance: AnimationConfig::new("allAtOnce"),
            main: AnimationConfig::new("none"),
            disappearance: AnimationConfig::new("allAtOnce"),
        }
    }
}

/// Settings for one phase. Times are in milliseconds.
///
/// The same shape is used for all three phases; the motion parameters only
/// apply to `main`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Appearance/disappearance: "allAtOnce", "sequentially", "random".
    /// Main: "none", "cyclicMovement", "jumping", "wave".
    #[serde(rename = "type")]
    pub kind: String,
    /// "letters" (default) or "words"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
    /// 1-based inclusive ranges, e.g. "1-3,7"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    // cyclicMovement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deviation_intensity: Option<f64>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_duration: Option<f64>,

    // jumping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_intensity: Option<f64>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_step_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_degree: Option<f64>,

    // wave
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_jump_intensity: Option<f64>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave_cycle_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave_length: Option<u32>,
}

impl AnimationConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }
}

/// Frame of the text in the host view. `width` is the wrapping width.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 300.0,
            height: 200.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_field_names() {
        let mut config = TextAnimationConfiguration::default();
        config.animations.appearance.element_time = Some(50.0);
        config.animations.main = AnimationConfig {
            change_step_duration: Some(0.3),
            ..AnimationConfig::new("jumping")
        };

        let json = config.to_json_pretty().unwrap();
        assert!(json.contains("\"elementTime\": 50.0"));
        assert!(json.contains("\"changeStepDuration\": 0.3"));
        assert!(json.contains("\"defaultColor\": \"#000000\""));
        assert!(json.contains("\"type\": \"jumping\""));
        assert!(!json.contains("waveLength"));

        let loaded = TextAnimationConfiguration::from_json(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let err = TextAnimationConfiguration::from_json(r#"{"text": "hi"}"#).unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
        assert!(err.to_string().starts_with("Invalid configuration JSON"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TextAnimationConfiguration::from_path("/nonexistent/kinetype.json").unwrap_err();
        assert!(matches!(err, SchemaError::Io(_)));
    }
}
