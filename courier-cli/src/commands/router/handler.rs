use rst_common::standard::serde_json;
use rst_common::with_logging::log::{debug, info};

use prople_courier_core::identity::mediator::types::RouterClientBuilder;

use crate::commands::handler::ContextHandler;
use crate::types::CliError;

use super::RouterCommands;

pub async fn fetch_invitation(
    ctx: &ContextHandler,
    endpoint: Option<String>,
    label: Option<String>,
) -> Result<String, CliError> {
    let agent = ctx.agent()?;
    let endpoint = endpoint.unwrap_or(agent.router_endpoint());
    let label = label.unwrap_or(agent.config().mediator().connector_options().router_label);

    debug!("[router:invitation] endpoint: {} | label: {}", endpoint, label);

    let invitation = agent
        .build_router_client()
        .create_invitation(endpoint, label)
        .await
        .map_err(|err| CliError::RouterError(err.to_string()))?;

    serde_json::to_string_pretty(invitation.value())
        .map_err(|err| CliError::JSONError(err.to_string()))
}

pub async fn handle_commands(
    ctx: &ContextHandler,
    commands: RouterCommands,
) -> Result<(), CliError> {
    debug!("router command handler triggered...");

    match commands {
        RouterCommands::Invitation { endpoint, label } => {
            let invitation = fetch_invitation(ctx, endpoint, label).await?;
            info!("[router:invitation] invitation received");
            println!("{}", invitation)
        }
    }

    Ok(())
}
