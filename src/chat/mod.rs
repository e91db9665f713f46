//! Interactive chat with the property search agent.
//!
//! This module provides a line-oriented REPL front end built on top of the
//! agent client. It supports:
//!
//! - One exchange at a time, with input ignored while a reply is pending
//! - Session identifiers that survive restarts
//! - Listing cards shown after the reply that carried them
//! - Slash commands for session control
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Exchange orchestration and view state
//! - [`commands`]: Slash command parsing and handling

mod commands;
mod config;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer, SessionStatus};
pub use commands::{ChatCommand, help_text, is_affirmative, parse_command};
pub use config::{API_URL_ENV, ChatArgs, ChatConfig, ChatConfigFile};
pub use session::{ChatSession, ExchangeState, SendOutcome};
