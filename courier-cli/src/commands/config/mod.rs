mod handler;

use clap::{Args, Subcommand};

pub use handler::handle_commands as config_handler;

#[derive(Args, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub commands: ConfigCommands,
}

#[derive(Subcommand, Clone)]
#[command(subcommand_help_heading = "Config")]
pub enum ConfigCommands {
    /// Parse and validate the configuration file
    Check,
}
