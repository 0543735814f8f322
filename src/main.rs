use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use layer_client::adapters::ReqwestTransport;
use layer_client::config::AppConfig;
use layer_client::{telemetry, LayerClient};

#[derive(Parser)]
#[command(name = "layer-client")]
#[command(about = "Query the Layer Platform API for one application")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the conversations a user participates in
    Conversations { user_id: String },
    /// Show a user's block list
    Blocks { user_id: String },
    /// Show a user's unread counts
    Badge { user_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;
    telemetry::init(&config.logging)?;

    let transport = ReqwestTransport::new()?;
    let client = LayerClient::from_config(&config.client, Arc::new(transport))?;

    match cli.command {
        Command::Conversations { user_id } => {
            print_json(&client.get_conversations_for_user(&user_id).await?)
        }
        Command::Blocks { user_id } => print_json(&client.get_block_list(&user_id).await?),
        Command::Badge { user_id } => print_json(&client.get_user_badge(&user_id).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
