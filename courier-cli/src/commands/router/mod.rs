mod handler;

use clap::{Args, Subcommand};

pub use handler::handle_commands as router_handler;

#[derive(Args, Clone)]
pub struct RouterArgs {
    #[command(subcommand)]
    pub commands: RouterCommands,
}

#[derive(Subcommand, Clone)]
#[command(subcommand_help_heading = "Router")]
pub enum RouterCommands {
    /// Request a fresh out-of-band invitation from the router
    Invitation {
        /// Router endpoint, defaults to `mediator.router_endpoint`
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Label sent to the router, defaults to `mediator.router_label`
        #[arg(short, long)]
        label: Option<String>,
    },
}
