//! Application settings for M31 Code.
//!
//! Settings are read from a JSON file in the platform config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::ModelDescriptor;

// =============================================================================
// Defaults
// =============================================================================

/// Model that is active when a session starts.
pub const DEFAULT_MODEL: &str = "gpt4";

/// Models offered for selection, in listing order.
pub const DEFAULT_AVAILABLE_MODELS: &[&str] = &["gpt4", "codellama", "mistral"];

/// Tracing filter for host binaries when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn,m31_core=info,m31_cli=info";

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_available_models() -> Vec<String> {
    DEFAULT_AVAILABLE_MODELS.iter().map(|s| s.to_string()).collect()
}

fn default_descriptors() -> Vec<ModelDescriptor> {
    vec![ModelDescriptor::new("gpt4"), ModelDescriptor::new("codellama")]
}

// =============================================================================
// Application Settings
// =============================================================================

/// Application settings - persisted as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Model selected at startup.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Declared models, in the order they are offered.
    #[serde(default = "default_available_models")]
    pub available_models: Vec<String>,

    /// Descriptors to build handles for at startup.
    #[serde(default = "default_descriptors")]
    pub models: Vec<ModelDescriptor>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            available_models: default_available_models(),
            models: default_descriptors(),
        }
    }
}

impl Settings {
    /// Load settings from the default location, using defaults if missing.
    pub fn load() -> Self {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "No config directory, using default settings");
                return Self::default();
            }
        };

        Self::load_or_default(&path)
    }

    /// Load settings from `path`, using defaults if the file is missing.
    ///
    /// A file that can't be read or parsed is logged and replaced by defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let mut settings: Settings = serde_json::from_str(&json)?;
        settings.validate();
        Ok(settings)
    }

    /// Save settings to a specific file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Get the default settings path.
    ///
    /// Returns `~/.config/m31-code/settings.json` (or platform equivalent).
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("m31-code").join("settings.json"))
    }

    /// Restore empty values to their defaults.
    pub fn validate(&mut self) {
        if self.default_model.trim().is_empty() {
            self.default_model = default_model();
        }

        if self.available_models.is_empty() {
            self.available_models = default_available_models();
        }

        if !self.available_models.contains(&self.default_model) {
            tracing::warn!(
                model = %self.default_model,
                "Default model is not in the available model list"
            );
        }
    }

    /// Get the descriptor declared for a model name.
    pub fn descriptor(&self, name: &str) -> Option<&ModelDescriptor> {
        // Last declaration wins, matching registry initialization.
        self.models.iter().rev().find(|d| d.name == name)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_model, "gpt4");
        assert_eq!(settings.available_models, vec!["gpt4", "codellama", "mistral"]);
        assert_eq!(settings.models.len(), 2);
        assert!(settings.descriptor("mistral").is_none());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"default_model":"codellama"}"#).unwrap();
        assert_eq!(settings.default_model, "codellama");
        assert_eq!(settings.available_models, default_available_models());
    }

    #[test]
    fn test_validate_restores_empty_values() {
        let mut settings = Settings {
            default_model: "  ".to_string(),
            available_models: Vec::new(),
            models: Vec::new(),
        };
        settings.validate();

        assert_eq!(settings.default_model, DEFAULT_MODEL);
        assert_eq!(settings.available_models, default_available_models());
        // Descriptors are left alone: an empty list is a valid choice.
        assert!(settings.models.is_empty());
    }

    #[test]
    fn test_descriptor_last_declaration_wins() {
        let settings = Settings {
            models: vec![
                ModelDescriptor::new("gpt4").with_endpoint("first"),
                ModelDescriptor::new("gpt4").with_endpoint("second"),
            ],
            ..Default::default()
        };
        assert_eq!(
            settings.descriptor("gpt4").unwrap().endpoint.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        let settings = Settings {
            default_model: "codellama".to_string(),
            models: vec![ModelDescriptor::new("codellama").with_api_key("sk-test")],
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_or_default(&temp_dir.path().join("missing.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_or_default_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_load_or_default_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"default_model":"codellama"}"#).unwrap();

        let settings = Settings::load_or_default(&path);
        assert_eq!(settings.default_model, "codellama");
        assert_eq!(settings.models, default_descriptors());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Settings::load_from(&temp_dir.path().join("missing.json")).is_err());
    }
}
