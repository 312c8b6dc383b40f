use clap::{Parser, Subcommand};
use rst_common::with_tokio::tokio;

use prople_courier_cli::commands::config::{config_handler, ConfigArgs};
use prople_courier_cli::commands::handler::ContextHandler;
use prople_courier_cli::commands::router::{router_handler, RouterArgs};
use prople_courier_cli::logging;
use prople_courier_cli::types::{CliError, COURIER_DEFAULT_CONFIG};

#[derive(Parser)]
#[command(name = "courier")]
#[command(version = "0.1.0")]
#[command(long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE", default_value = COURIER_DEFAULT_CONFIG)]
    config: String,

    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Configuration file utilities")]
    Config(ConfigArgs),

    #[command(about = "Router endpoint utilities")]
    Router(RouterArgs),
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let ctx = ContextHandler::new(cli.config.to_owned());
    logging::init(ctx.log_level(cli.log_level.to_owned()));
    match cli.command {
        Commands::Config(args) => config_handler(&ctx, args.commands)?,
        Commands::Router(args) => router_handler(&ctx, args.commands).await?,
    }

    Ok(())
}
