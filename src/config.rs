use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub results: ResultsSettings,
    #[serde(default)]
    pub settings: LocaleSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> PathBuf { PathBuf::from("data/cities.json") }

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
        }
    }
}

fn default_state_path() -> PathBuf { PathBuf::from(".city-match/state.json") }

/// Defaults applied before any persisted state is restored
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResultsSettings {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_data_view")]
    pub data_view: String,
}

impl Default for ResultsSettings {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            data_view: default_data_view(),
        }
    }
}

fn default_max_results() -> usize { 10 }
fn default_data_view() -> String { "photo-view".to_string() }

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocaleSettings {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            country_code: default_country_code(),
        }
    }
}

fn default_locale() -> String { "en-US".to_string() }
fn default_country_code() -> String { "US".to_string() }

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CITYMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CITYMATCH__RESULTS__MAX_RESULTS -> results.max_results
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CITYMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
