use rst_common::with_logging::log::{debug, info};

use crate::commands::handler::ContextHandler;
use crate::types::CliError;

use super::ConfigCommands;

pub fn handle_commands(ctx: &ContextHandler, commands: ConfigCommands) -> Result<(), CliError> {
    debug!("config command handler triggered...");

    match commands {
        ConfigCommands::Check => {
            let agent = ctx.agent()?;
            let options = agent.config().mediator().connector_options();
            let sync = agent.build_sync_options();

            info!("[config:check] file: {}", ctx.config_file());
            info!(
                "[config:check] router endpoint: {} | completion timeout: {:?}",
                agent.router_endpoint(),
                options.completion_timeout
            );
            info!(
                "[config:check] sds: {}",
                sync.server_url().unwrap_or(String::from("disabled"))
            );
        }
    }

    Ok(())
}
