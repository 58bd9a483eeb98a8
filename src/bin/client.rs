use clap::Parser;
use dotenv::dotenv;
use relay_chat::cli::ClientArgs;
use relay_chat::client::terminal::{ parse_input, TerminalInput, HELP_TEXT };
use relay_chat::client::UiCommand;
use std::error::Error;
use tokio::io::{ AsyncBufReadExt, BufReader };

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    // Chat output goes to stdout; keep log noise down unless asked for.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = ClientArgs::parse();

    let controller = relay_chat::build_terminal_client(&args)?;
    controller.start().await;
    println!("{}", HELP_TEXT);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            TerminalInput::Command(command) => {
                if let UiCommand::SendMessage(text) = &command {
                    controller.on_input_changed(text);
                }
                controller.dispatch(command).await;
            }
            TerminalInput::ListHistory => {
                let conversations = controller.conversations().await;
                if conversations.is_empty() {
                    println!("No saved conversations.");
                }
                let active = controller.active_chat_id();
                for c in conversations {
                    let marker = if c.id == active { "*" } else { " " };
                    println!(
                        " {} {}  {} ({} messages, {})",
                        marker,
                        c.id,
                        c.title,
                        c.messages.len(),
                        c.timestamp.format("%Y-%m-%d %H:%M")
                    );
                }
            }
            TerminalInput::Help => println!("{}", HELP_TEXT),
            TerminalInput::Quit => break,
            TerminalInput::Unknown(input) => println!("Unknown command: {}. {}", input, HELP_TEXT),
        }
    }

    Ok(())
}
