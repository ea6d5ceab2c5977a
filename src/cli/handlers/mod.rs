//! Command handlers for all CLI operations
//!
//! Keeps argument parsing apart from the work each command does.

pub mod config;
pub mod options;
pub mod send;

use super::{CliContext, Commands};
use anyhow::Result;

pub use config::ConfigHandler;
pub use options::OptionsHandler;
pub use send::SendHandler;

/// Routes parsed commands to their handlers
pub struct CommandHandler {
    context: CliContext,
}

impl CommandHandler {
    pub fn new(context: CliContext) -> Self {
        Self { context }
    }

    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Send(args) => SendHandler::new(&self.context).handle_send(args).await,
            Commands::Init { force } => ConfigHandler::new(&self.context).handle_init(force),
            Commands::Config { action } => ConfigHandler::new(&self.context).handle_config(action),
            Commands::Options => {
                OptionsHandler::new().handle_list();
                Ok(())
            }
        }
    }
}
