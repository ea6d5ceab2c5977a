//! Configuration management handler
//!
//! Handles `init` and the `config` subcommands.

use super::super::{CliContext, ConfigAction};
use anyhow::{Context, Result};
use apprise_dispatch::config::{Config, ConfigManager};

/// Handler for configuration operations
pub struct ConfigHandler<'a> {
    context: &'a CliContext,
}

impl<'a> ConfigHandler<'a> {
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    /// Write the default configuration, leaving an existing file alone unless forced
    pub fn handle_init(&self, force: bool) -> Result<()> {
        let config_path = self.context.config_manager.config_path().to_path_buf();

        // The context already created the file if it was missing, so only a
        // non-default file counts as existing configuration.
        if self.context.config_manager.config() != &Config::default() && !force {
            println!("Configuration already initialized at: {}", config_path.display());
            println!("Use --force to overwrite");
            return Ok(());
        }

        let mut config_manager = ConfigManager::load_from(&config_path)?;
        *config_manager.config_mut() = Config::default();
        config_manager
            .save()
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        println!("Configuration initialized successfully at: {}", config_path.display());
        Ok(())
    }

    pub fn handle_config(&self, action: ConfigAction) -> Result<()> {
        let path = self.context.config_manager.config_path().to_path_buf();
        let mut config_manager = ConfigManager::load_from(&path)?;

        match action {
            ConfigAction::Show => {
                println!("# {}", path.display());
                println!("{}", toml::to_string_pretty(config_manager.config())?);
            }
            ConfigAction::Get { key } => {
                let value = config_manager.get_value(&key).with_context(|| {
                    format!("Valid keys: {}, options.<name>", ConfigManager::KEYS.join(", "))
                })?;
                println!("{value}");
            }
            ConfigAction::Set { key, value } => {
                config_manager.set_value(&key, &value).with_context(|| {
                    format!("Could not set '{}'", key)
                })?;
                config_manager.save()?;
                println!("Configuration updated: {key} = {value}");
            }
        }

        Ok(())
    }
}
