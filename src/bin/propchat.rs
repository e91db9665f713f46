//! Interactive terminal chat with the property search agent.
//!
//! This binary provides a REPL that forwards each line to the agent service
//! and renders replies and matching listings.
//!
//! # Usage
//!
//! ```bash
//! # Talk to an agent running on localhost:8000
//! propchat
//!
//! # Point at another deployment
//! propchat --api-url https://agent.example.com/api/v1/agent
//!
//! # Peruvian soles, no listing delay, no colors
//! propchat --locale es-PE --currency PEN --listing-delay-ms 0 --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/reset` - Start a new search
//! - `/close` - Hide the listings panel
//! - `/listings` - Show the listings panel again
//! - `/session` - Show the current session
//! - `/export <file>` - Save the chat as HTML
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use propchat::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, help_text,
    is_affirmative, parse_command,
};
use propchat::observability::log_filter;
use propchat::{AgentClient, FileSessionStore};

const RESET_PROMPT: &str = "¿Seguro que quieres iniciar una nueva búsqueda? [s/N] ";

/// Main entry point for the propchat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .with_writer(std::io::stderr)
        .init();

    let (args, _) = ChatArgs::from_command_line_relaxed("propchat [OPTIONS]");
    let config = ChatConfig::try_from(args)?;
    let use_color = config.use_color;
    let confirm_reset = config.confirm_reset;

    let client = AgentClient::with_options(&config.api_url, config.timeout)?;
    let store = match config.session_file.clone() {
        Some(path) => FileSessionStore::new(path),
        None => FileSessionStore::default_location()?,
    };
    tracing::debug!(
        endpoint = %client.endpoint(),
        session_file = %store.path().display(),
        "starting chat"
    );
    let session = ChatSession::new(client, store, config)?;
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    println!("Property search chat");
    println!("Type /help for commands, /quit to exit\n");
    renderer.print_session_status(&session.status());
    session.print_welcome(&mut renderer);

    loop {
        let readline = rl.readline("Tú: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("¡Hasta luego!");
                            break;
                        }
                        ChatCommand::Reset => {
                            if confirm_reset && !confirm(&mut rl, RESET_PROMPT) {
                                continue;
                            }
                            if let Err(err) = session.reset(&mut renderer) {
                                renderer.print_error(&format!("Failed to reset session: {err}"));
                            }
                        }
                        ChatCommand::CloseListings => {
                            session.dismiss_listings(&mut renderer);
                        }
                        ChatCommand::ShowListings => {
                            session.show_listings(&mut renderer);
                        }
                        ChatCommand::Session => {
                            renderer.print_session_status(&session.status());
                        }
                        ChatCommand::Export(path) => match session.export_html(&path) {
                            Ok(()) => renderer.print_info(&format!("Chat exported to {path}")),
                            Err(err) => {
                                renderer.print_error(&format!("Failed to export chat: {err}"))
                            }
                        },
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                session.send_message(line, &mut renderer).await;
            }
            Err(ReadlineError::Interrupted) => {
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\n¡Hasta luego!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

/// Asks a yes/no question; anything but an affirmative answer is a no.
fn confirm(rl: &mut DefaultEditor, prompt: &str) -> bool {
    match rl.readline(prompt) {
        Ok(answer) => is_affirmative(&answer),
        Err(_) => false,
    }
}
