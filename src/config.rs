use crate::messages;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_SOURCE_LANGUAGE: &str = "Arabic";
pub const DEFAULT_GEOLOCATION_ENDPOINT: &str = "https://ipapi.co/json/";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub language_model: LanguageModelConfig,
    #[serde(default)]
    pub appointments: AppointmentsConfig,
    #[serde(default)]
    pub geolocation: GeolocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageModelConfig {
    pub model: String,
    pub endpoint: String,
    /// Language the smart-input text is written in
    pub source_language: String,
    /// No timeout unless set
    pub request_timeout_secs: Option<u64>,
}

impl Default for LanguageModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentsConfig {
    pub default_location: String,
    /// Defaults to ~/.termin
    pub storage_dir: Option<PathBuf>,
}

impl Default for AppointmentsConfig {
    fn default() -> Self {
        Self { default_location: messages::DEFAULT_LOCATION.to_string(), storage_dir: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    pub enabled: bool,
    pub endpoint: String,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self { enabled: true, endpoint: DEFAULT_GEOLOCATION_ENDPOINT.to_string() }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Read config at `path`, writing the defaults there first if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let default_config = Config::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Update one setting by its dotted name, e.g. `language_model.model`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "language_model.model" => self.language_model.model = value.to_string(),
            "language_model.endpoint" => self.language_model.endpoint = value.to_string(),
            "language_model.source_language" => {
                self.language_model.source_language = value.to_string()
            }
            "language_model.request_timeout_secs" => {
                self.language_model.request_timeout_secs = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().context("Timeout must be a whole number of seconds")?)
                }
            }
            "appointments.default_location" => {
                self.appointments.default_location = value.to_string()
            }
            "appointments.storage_dir" => {
                self.appointments.storage_dir =
                    if value.is_empty() { None } else { Some(PathBuf::from(value)) }
            }
            "geolocation.enabled" => {
                self.geolocation.enabled =
                    value.parse().context("Expected 'true' or 'false'")?
            }
            "geolocation.endpoint" => self.geolocation.endpoint = value.to_string(),
            _ => return Err(anyhow!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "termin", "termin")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}
