use crate::error::{CardError, CardResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Resolved host configuration, consulted read-only while rendering
///
/// Unknown keys are ignored; missing sections take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostConfig {
    /// When false, inputs and actions render inert
    pub supports_interactivity: bool,
    pub image_set: ImageSetConfig,
    pub actions: ActionsConfig,
    pub media: MediaConfig,
    pub inputs: InputsConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            supports_interactivity: true,
            image_set: ImageSetConfig::default(),
            actions: ActionsConfig::default(),
            media: MediaConfig::default(),
            inputs: InputsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSetConfig {
    pub max_image_height: u32,
}

impl Default for ImageSetConfig {
    fn default() -> Self {
        Self {
            max_image_height: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionsConfig {
    /// Card-level actions beyond this count are not attached
    pub max_actions: usize,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self { max_actions: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaConfig {
    pub allow_inline_playback: bool,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            allow_inline_playback: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputsConfig {
    /// Compute error state when an input mounts, not only on edit
    pub validate_on_mount: bool,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            validate_on_mount: true,
        }
    }
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> CardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> CardResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| CardError::Io {
            path: display.clone(),
            reason: e.to_string(),
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(CardError::UnsupportedConfigFormat { path: display }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_support_interactivity() {
        let config = HostConfig::default();
        assert!(config.supports_interactivity);
        assert_eq!(config.actions.max_actions, 5);
        assert!(config.inputs.validate_on_mount);
    }

    #[test]
    fn test_from_json_partial() {
        let config = HostConfig::from_json_str(
            r#"{ "supportsInteractivity": false, "imageSet": { "maxImageHeight": 64 }, "fontSizes": { "small": 12 } }"#,
        )
        .unwrap();
        assert!(!config.supports_interactivity);
        assert_eq!(config.image_set.max_image_height, 64);
        assert_eq!(config.actions, ActionsConfig::default());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "supportsInteractivity: true\nactions:\n  maxActions: 2\n";
        let config = HostConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.actions.max_actions, 2);
    }

    #[test]
    fn test_from_json_invalid() {
        let result = HostConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(CardError::JsonError(_))));
    }

    #[test]
    fn test_from_path_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("adaptivecards-hostconfig-test.toml");
        fs::write(&path, "supportsInteractivity = true").unwrap();
        let result = HostConfig::from_path(&path);
        assert!(matches!(result, Err(CardError::UnsupportedConfigFormat { .. })));
        let _ = fs::remove_file(&path);
    }
}
