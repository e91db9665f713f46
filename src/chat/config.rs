//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg`, an optional YAML
//! configuration file, and the resolved [`ChatConfig`].  Precedence, from
//! highest to lowest: command line, configuration file, environment,
//! built-in defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use arrrg_derive::CommandLine;
use serde::Deserialize;

use crate::client::DEFAULT_API_URL;
use crate::currency::CurrencyFormat;
use crate::error::{Error, Result};

/// Environment variable consulted for the agent base URL.
pub const API_URL_ENV: &str = "PROPCHAT_API_URL";

/// Default pause between an assistant reply and its listings.
const DEFAULT_LISTING_DELAY: Duration = Duration::from_millis(500);

/// Command-line arguments for the propchat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// YAML file supplying defaults for the other options.
    #[arrrg(optional, "YAML configuration file", "PATH")]
    pub config: Option<String>,

    /// Base URL of the agent service.
    #[arrrg(optional, "Agent base URL (default: http://localhost:8000/api/v1/agent)", "URL")]
    pub api_url: Option<String>,

    /// Where the session identifier is persisted.
    #[arrrg(optional, "Session file (default: <data dir>/propchat/session_id)", "PATH")]
    pub session_file: Option<String>,

    /// Pause before listings are drawn, in milliseconds.
    #[arrrg(optional, "Delay before showing listings in ms (default: 500)", "MS")]
    pub listing_delay_ms: Option<u64>,

    /// Client-side request timeout, in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: none)", "SECS")]
    pub timeout_secs: Option<u64>,

    /// Locale used for prices.
    #[arrrg(optional, "Price locale (default: es-AR)", "TAG")]
    pub locale: Option<String>,

    /// Currency used for prices.
    #[arrrg(optional, "Price currency (default: ARS)", "CODE")]
    pub currency: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Reset without asking for confirmation.
    #[arrrg(flag, "Do not ask before resetting the session")]
    pub no_confirm: bool,
}

/// Contents of the YAML configuration file.  Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ChatConfigFile {
    pub api_url: Option<String>,
    pub session_file: Option<PathBuf>,
    pub listing_delay_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub locale: Option<String>,
    pub currency: Option<String>,
    pub color: Option<bool>,
    pub confirm_reset: Option<bool>,
}

impl ChatConfigFile {
    /// Loads and parses a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|err| Error::io(format!("failed to read {}", path.display()), err))?;
        Self::from_yaml(&content)
    }

    /// Parses configuration from YAML text.  Empty text is an empty config.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments, the configuration file and the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Base URL of the agent service; messages go to `<api_url>/message`.
    pub api_url: String,

    /// Session file; `None` selects the per-user default.
    pub session_file: Option<PathBuf>,

    /// Pause between an assistant reply and the listings it carries.
    pub listing_delay: Duration,

    /// Client-side request timeout; `None` waits for the transport.
    pub timeout: Option<Duration>,

    /// Currency formatting for listing prices.
    pub currency: CurrencyFormat,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether `/reset` asks for confirmation.
    pub confirm_reset: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - API URL: http://localhost:8000/api/v1/agent
    /// - Session file: per-user default
    /// - Listing delay: 500 ms
    /// - Timeout: none
    /// - Currency: es-AR/ARS
    /// - Color: enabled
    /// - Reset confirmation: enabled
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: None,
            listing_delay: DEFAULT_LISTING_DELAY,
            timeout: None,
            currency: CurrencyFormat::default(),
            use_color: true,
            confirm_reset: true,
        }
    }

    /// Sets the agent base URL.
    pub fn with_api_url<S: Into<String>>(mut self, api_url: S) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Sets the session file.
    pub fn with_session_file(mut self, path: Option<PathBuf>) -> Self {
        self.session_file = path;
        self
    }

    /// Sets the listing delay.
    pub fn with_listing_delay(mut self, delay: Duration) -> Self {
        self.listing_delay = delay;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the currency format.
    pub fn with_currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Sets whether reset asks for confirmation.
    pub fn with_confirm_reset(mut self, confirm: bool) -> Self {
        self.confirm_reset = confirm;
        self
    }

    /// Resolves arguments against a parsed file and an environment value.
    pub fn resolve(
        args: ChatArgs,
        file: ChatConfigFile,
        env_api_url: Option<String>,
    ) -> Result<Self> {
        let defaults = ChatConfig::new();

        let api_url = args
            .api_url
            .or(file.api_url)
            .or(env_api_url.filter(|url| !url.trim().is_empty()))
            .unwrap_or(defaults.api_url);

        let locale = args
            .locale
            .or(file.locale)
            .unwrap_or_else(|| defaults.currency.locale().to_string());
        let currency = args
            .currency
            .or(file.currency)
            .unwrap_or_else(|| defaults.currency.currency().to_string());

        Ok(ChatConfig {
            api_url,
            session_file: args.session_file.map(PathBuf::from).or(file.session_file),
            listing_delay: args
                .listing_delay_ms
                .or(file.listing_delay_ms)
                .map(Duration::from_millis)
                .unwrap_or(defaults.listing_delay),
            timeout: args
                .timeout_secs
                .or(file.timeout_secs)
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            currency: CurrencyFormat::from_pair(&locale, &currency)?,
            use_color: !args.no_color && file.color.unwrap_or(true),
            confirm_reset: !args.no_confirm && file.confirm_reset.unwrap_or(true),
        })
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<ChatArgs> for ChatConfig {
    type Error = Error;

    fn try_from(args: ChatArgs) -> Result<Self> {
        let file = match args.config.as_deref() {
            Some(path) => ChatConfigFile::from_file(path)?,
            None => ChatConfigFile::default(),
        };
        ChatConfig::resolve(args, file, env::var(API_URL_ENV).ok())
    }
}
