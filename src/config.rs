//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::table::PAGE_SIZE_OPTIONS;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ui: UiConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Rows per table page (one of the size changer options).
    pub default_page_size: usize,
    /// Width of record dialogs in points.
    pub modal_width: f32,
    /// How long a notification stays on screen.
    pub toast_seconds: u64,
    pub dark_mode: bool,
}

/// Table export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Target directory when not asking; falls back to the download directory.
    pub directory: Option<PathBuf>,
    /// Show a save dialog for every export.
    pub ask_location: bool,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset.
    pub level: String,
    /// Directory for the rolling log file. `None` uses the platform data dir.
    pub directory: Option<PathBuf>,
    pub file_enabled: bool,
}

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !PAGE_SIZE_OPTIONS.contains(&self.ui.default_page_size) {
            return Err(ConfigError::Validation(format!(
                "Page size must be one of {:?}",
                PAGE_SIZE_OPTIONS
            )));
        }
        if !(300.0..=2000.0).contains(&self.ui.modal_width) {
            return Err(ConfigError::Validation(
                "Modal width must be between 300 and 2000".to_string(),
            ));
        }
        if self.ui.toast_seconds < 1 {
            return Err(ConfigError::Validation(
                "Toast duration must be at least 1 second".to_string(),
            ));
        }
        if self.ui.toast_seconds > 60 {
            return Err(ConfigError::Validation(
                "Toast duration cannot exceed 60 seconds".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "Log level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        if let Some(dir) = &self.export.directory
            && dir.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation("Export directory cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl ExportConfig {
    /// Directory exports are written to when no dialog is shown.
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .or_else(|| directories::UserDirs::new().and_then(|d| d.download_dir().map(Path::to_path_buf)))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl LoggingConfig {
    /// Directory the rolling log file lives in.
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("", "", "erp-dashboard").map(|d| d.data_local_dir().join("logs"))
            })
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_page_size: crate::table::DEFAULT_PAGE_SIZE,
            modal_width: crate::ui::modal::DEFAULT_MODAL_WIDTH,
            toast_seconds: 4,
            dark_mode: false,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            ask_location: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ui.default_page_size, 10);
        assert_eq!(config.ui.modal_width, 800.0);
    }

    #[test]
    fn test_validation_page_size_not_offered() {
        let mut config = AppConfig::default();
        config.ui.default_page_size = 15;
        assert!(config.validate().is_err());

        config.ui.default_page_size = 50;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_modal_width_bounds() {
        let mut config = AppConfig::default();

        config.ui.modal_width = 100.0;
        assert!(config.validate().is_err());

        config.ui.modal_width = 2500.0;
        assert!(config.validate().is_err());

        config.ui.modal_width = 640.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_toast_seconds_bounds() {
        let mut config = AppConfig::default();

        config.ui.toast_seconds = 0;
        assert!(config.validate().is_err());

        config.ui.toast_seconds = 61;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "DEBUG".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.ui.default_page_size = 20;
        config.export.ask_location = false;
        config.export.directory = Some(dir.path().to_path_buf());
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => {
                assert_eq!(loaded.ui.default_page_size, 20);
                assert!(!loaded.export.ask_location);
                assert_eq!(loaded.export.directory.as_deref(), Some(dir.path()));
            }
            other => panic!("expected loaded config, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\ndark_mode = true\n").unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => {
                assert!(loaded.ui.dark_mode);
                assert_eq!(loaded.ui.default_page_size, 10);
                assert_eq!(loaded.logging.level, "info");
            }
            other => panic!("expected loaded config, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\ndefault_page_size = 7\n").unwrap();
        assert!(matches!(
            AppConfig::try_load(&path),
            ConfigLoadResult::Invalid(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            AppConfig::try_load(&path),
            ConfigLoadResult::Invalid(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_export_directory_override() {
        let config = ExportConfig {
            directory: Some(PathBuf::from("/tmp/exports")),
            ask_location: false,
        };
        assert_eq!(config.resolved_directory(), PathBuf::from("/tmp/exports"));
    }
}
