//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Template and output settings
    #[serde(default)]
    pub template: TemplateSettings,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSettings {
    /// Path to the MoM Word template
    #[serde(default = "default_template_path")]
    pub path: PathBuf,

    /// Where generated documents are written (empty = system temp dir)
    #[serde(default)]
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind")]
    pub bind: String,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_template_path() -> PathBuf {
    PathBuf::from("templates").join("MOM_template.docx")
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            path: default_template_path(),
            output_dir: PathBuf::new(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Parse settings from TOML text, filling gaps with defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("MOMGEN_TEMPLATE") {
            if !path.trim().is_empty() {
                self.template.path = PathBuf::from(path);
            }
        }
        if let Ok(bind) = std::env::var("MOMGEN_BIND") {
            if !bind.trim().is_empty() {
                self.server.bind = bind;
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "momgen", "momgen")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory generated documents are written to
    pub fn output_dir(&self) -> PathBuf {
        if self.template.output_dir.as_os_str().is_empty() {
            std::env::temp_dir()
        } else {
            self.template.output_dir.clone()
        }
    }
}
