//! Application configuration management.
//!
//! Settings are layered, later layers overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config PATH`, else `config.toml` in the platform
//!    config directory)
//! 3. `STRINGSWEEP_*` environment variables
//! 4. CLI flags (applied by the caller via [`Settings::apply_cli`])
//!
//! # Example
//!
//! ```toml
//! api_key = "AIza..."
//! extensions = ["php", "js", "ts"]
//! backup_suffix = ".orig"
//! request_timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::scanner::DEFAULT_EXTENSIONS;
use crate::translate::google::DEFAULT_ENDPOINT;

/// Prefix of environment variables read into [`Settings`].
pub const ENV_PREFIX: &str = "STRINGSWEEP_";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API key for the translation service.
    pub api_key: Option<String>,

    /// Translation endpoint URL.
    pub endpoint: String,

    /// Per-request timeout in seconds. Unset means requests never time out.
    pub request_timeout_secs: Option<u64>,

    /// Extensions (without the dot) of files to translate.
    pub extensions: Vec<String>,

    /// Suffix appended to the target directory name for the backup copy.
    pub backup_suffix: String,

    /// Log file, appended to on every run.
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            backup_suffix: "_backup".to_string(),
            log_file: PathBuf::from("translation_script.log"),
        }
    }
}

impl Settings {
    /// Load settings from defaults, the config file and the environment.
    ///
    /// When `path` is `None` the platform default location is used; a
    /// missing file contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file or environment holds values
    /// of the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let file = path.map(Path::to_path_buf).or_else(Self::default_config_path);
        Self::figment(file.as_deref()).extract()
    }

    /// Build the layered figment without extracting it.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            log::debug!("Reading configuration from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Apply CLI overrides on top of the loaded settings.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref key) = cli.api_key {
            self.api_key = Some(key.clone());
        }
        if let Some(ref log_file) = cli.log_file {
            self.log_file = log_file.clone();
        }
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "stringsweep", "stringsweep")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
