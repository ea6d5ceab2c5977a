//! CLI Context for dependency injection and shared state
//!
//! Centralizes configuration loading so handlers only see a ready-made
//! [`CliContext`].

use anyhow::Result;
use apprise_dispatch::config::ConfigManager;
use apprise_dispatch::dispatch::DispatcherConfig;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI execution context containing shared dependencies and configuration
#[derive(Clone)]
pub struct CliContext {
    pub project_path: Option<PathBuf>,
    pub verbose: bool,
    pub executable: Option<String>,
    pub config_manager: Arc<ConfigManager>,
}

impl CliContext {
    /// Create a new CLI context with the specified project path and verbosity
    pub fn new(project_path: Option<PathBuf>, verbose: bool, executable: Option<String>) -> Result<Self> {
        let resolved_project_path = Self::resolve_project_path(project_path);
        let config_manager = Arc::new(ConfigManager::new(resolved_project_path.clone())?);

        Ok(Self {
            project_path: resolved_project_path,
            verbose,
            executable,
            config_manager,
        })
    }

    /// Auto-detect project path by looking for .apprise/config.toml
    fn resolve_project_path(project_path: Option<PathBuf>) -> Option<PathBuf> {
        if let Some(path) = project_path {
            return Some(path);
        }

        if let Ok(current_dir) = std::env::current_dir() {
            let config_path = current_dir.join(".apprise").join("config.toml");
            if config_path.exists() {
                return Some(current_dir);
            }
        }

        None
    }

    /// Dispatcher settings from the loaded configuration and `--command`
    pub fn dispatcher_config(&self) -> DispatcherConfig {
        let mut config = DispatcherConfig::from(self.config_manager.config());
        if let Some(executable) = &self.executable {
            config.command = executable.clone();
        }
        config
    }

    /// Initialize logging on stderr, based on verbosity and configuration
    pub fn init_logging(&self) -> Result<()> {
        let log_level = if self.verbose {
            "debug"
        } else {
            &self.config_manager.config().log_level
        };

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(log_level.parse().unwrap_or_else(|_| {
                        tracing::Level::INFO.into()
                    })),
            )
            .init();

        if self.verbose {
            tracing::debug!("Verbose logging enabled");
            tracing::debug!("Config path: {}", self.config_manager.config_path().display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_creation() {
        let temp_dir = TempDir::new().unwrap();
        let context = CliContext::new(Some(temp_dir.path().to_path_buf()), false, None).unwrap();

        assert_eq!(context.project_path, Some(temp_dir.path().to_path_buf()));
        assert!(!context.verbose);
        assert_eq!(context.config_manager.config().command, "apprise");
    }

    #[test]
    fn test_command_override() {
        let temp_dir = TempDir::new().unwrap();
        let context = CliContext::new(
            Some(temp_dir.path().to_path_buf()),
            false,
            Some("/usr/bin/echo".to_string()),
        )
        .unwrap();

        assert_eq!(context.dispatcher_config().command, "/usr/bin/echo");
    }

    #[test]
    fn test_dispatcher_config_carries_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let context = CliContext::new(Some(temp_dir.path().to_path_buf()), true, None).unwrap();

        let config = context.dispatcher_config();
        assert_eq!(config.command, "apprise");
        assert_eq!(config.timeout_secs, Some(60));
        assert!(config.options.is_empty());
    }
}
