pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod llm;
pub mod models;
pub mod relay;
pub mod server;

use cli::{ Args, ClientArgs };
use client::ChatController;
use client::relay::HttpRelayClient;
use client::terminal::TerminalPresenter;
use history::ConversationLog;
use log::info;
use relay::ChatRelay;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr());
    info!("Environment: {}", args.environment);
    info!("AI Model: {}", args.model);
    info!("Completion API: {}", args.chat_base_url);
    info!("API Key Configured: {}", args.api_key.as_deref().map_or(false, |k| !k.trim().is_empty()));
    info!("Static Directory: {}", args.static_dir);
    info!("System Prompt: {}", args.system_prompt_path.as_deref().unwrap_or("built-in"));
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let relay = ChatRelay::from_args(&args)?;
    let addr = args.server_addr();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, relay, args.clone());
    server.run().await?;

    Ok(())
}

/// Builds the terminal chat client: HTTP relay, configured history store,
/// stdout presenter.
pub fn build_terminal_client(
    args: &ClientArgs
) -> Result<ChatController, Box<dyn Error + Send + Sync>> {
    let relay = Arc::new(HttpRelayClient::new(&args.relay_url)?);
    let store = history::initialize_history_store(args)?;
    let presenter = Arc::new(TerminalPresenter::new(std::io::stdout()));
    Ok(ChatController::new(relay, ConversationLog::new(store), presenter))
}
