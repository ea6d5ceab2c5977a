use crate::errors::{AppError, AppResult, ErrorContextExt};
use crate::options::{OptionSchema, OptionSet, OptionValue};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for apprise-dispatch
///
/// Holds the executable to invoke and the default options layered under every
/// request. Defaults are stored as written and only validated when a request
/// is dispatched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_command")]
    pub command: String,
    /// Seconds to wait for the executable; `0` disables the limit
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub options: OptionSet,
}

fn default_command() -> String {
    "apprise".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            command: default_command(),
            timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
            options: OptionSet::new(),
        }
    }
}

/// Configuration manager for apprise-dispatch
///
/// Loads, saves and edits the TOML configuration file.
///
/// # Configuration Hierarchy
///
/// 1. **Project-level**: `.apprise/config.toml` in the project root
/// 2. **Global**: `config.toml` in the platform config directory
///
/// # Example
///
/// ```rust,no_run
/// use apprise_dispatch::config::ConfigManager;
/// use std::path::PathBuf;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config_manager = ConfigManager::new(Some(PathBuf::from("/path/to/project")))?;
///     println!("Command: {}", config_manager.config().command);
///     Ok(())
/// }
/// ```
pub struct ConfigManager {
    config_path: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Keys accepted by [`get_value`](Self::get_value) and [`set_value`](Self::set_value)
    /// besides `options.<name>`
    pub const KEYS: &'static [&'static str] = &["command", "timeout_secs", "log_level"];

    /// Creates a new ConfigManager instance
    ///
    /// With a project path, uses `<project>/.apprise/config.toml`; otherwise the
    /// global file. A missing file is created with default values.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The configuration directory cannot be created
    /// - The configuration file cannot be read or parsed
    /// - Default configuration cannot be serialized and written
    pub fn new(project_path: Option<PathBuf>) -> AppResult<Self> {
        let config_path = Self::get_config_path(project_path)?;
        Self::load_from(config_path)
    }

    /// Load (or create) the configuration at an explicit path
    pub fn load_from(config_path: impl Into<PathBuf>) -> AppResult<Self> {
        let config_path = config_path.into();
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .in_file_operation(parent, "create config directory")?;
        }
        let config = Self::load_or_create(&config_path)?;
        Ok(ConfigManager { config_path, config })
    }

    pub fn get_config_path(project_path: Option<PathBuf>) -> AppResult<PathBuf> {
        let base_path = if let Some(path) = project_path {
            path.join(".apprise")
        } else {
            let dirs = ProjectDirs::from("", "", "apprise-dispatch")
                .ok_or_else(|| AppError::config("Failed to get config directory"))?;
            dirs.config_dir().to_path_buf()
        };

        Ok(base_path.join("config.toml"))
    }

    fn load_or_create(path: &Path) -> AppResult<Config> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .in_file_operation(path, "read config file")?;
            Ok(toml::from_str(&content)?)
        } else {
            let config = Config::default();
            let content = toml::to_string_pretty(&config)
                .map_err(|e| AppError::config_with_source("Failed to serialize default config", e))?;
            fs::write(path, content)
                .in_file_operation(path, "write default config")?;
            Ok(config)
        }
    }

    /// Saves the current configuration to the file it was loaded from
    pub fn save(&self) -> AppResult<()> {
        let content = toml::to_string_pretty(&self.config)
            .map_err(|e| AppError::config_with_source("Failed to serialize config", e))?;
        fs::write(&self.config_path, content)
            .in_file_operation(&self.config_path, "write config file")?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Read a value by dotted key
    pub fn get_value(&self, key: &str) -> AppResult<String> {
        if let Some(name) = key.strip_prefix("options.") {
            return Ok(self
                .config
                .options
                .get(name)
                .map(OptionValue::to_string)
                .unwrap_or_else(|| "None".to_string()));
        }

        match key {
            "command" => Ok(self.config.command.clone()),
            "timeout_secs" => Ok(self.config.timeout_secs.to_string()),
            "log_level" => Ok(self.config.log_level.clone()),
            _ => Err(AppError::UnknownConfigKey { key: key.to_string() }),
        }
    }

    /// Update a value by dotted key. Option values are checked against the
    /// schema; an empty value removes the option.
    pub fn set_value(&mut self, key: &str, value: &str) -> AppResult<()> {
        if let Some(name) = key.strip_prefix("options.") {
            if value.is_empty() {
                self.config.options.remove(name);
                return Ok(());
            }
            let parsed = OptionValue::parse_cli(name, value);
            OptionSchema::validate_option(name, &parsed)?;
            self.config.options.insert(name, parsed);
            return Ok(());
        }

        match key {
            "command" => {
                if value.is_empty() {
                    return Err(AppError::config("command cannot be empty"));
                }
                self.config.command = value.to_string();
            }
            "timeout_secs" => {
                self.config.timeout_secs = value.parse().map_err(|e| {
                    AppError::config_with_source("timeout_secs must be a whole number", e)
                })?;
            }
            "log_level" => {
                if value.parse::<tracing::Level>().is_err() {
                    return Err(AppError::config(format!("Unknown log level: {}", value)));
                }
                self.config.log_level = value.to_string();
            }
            _ => return Err(AppError::UnknownConfigKey { key: key.to_string() }),
        }
        Ok(())
    }
}
