//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction so the chat
//! session can drive any surface.  The default implementation writes to a
//! terminal, optionally using ANSI escape codes for styling.  All text that
//! originates from the user or the agent service passes through
//! [`sanitize_terminal`] before it is written.

use std::io::{self, Stdout, Write};

use crate::listing::{ListingCard, ListingPanel, NO_RESULTS, PanelContent};
use crate::markup::sanitize_terminal;
use crate::transcript::{ChatTurn, Sender, WelcomeBlock};

/// ANSI escape code for dim text (used for timestamps and the spinner).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for bold text (used for headings and titles).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for assistant turns).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for amenity badges).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for green text (used for prices).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI sequence that clears the screen and homes the cursor.
const ANSI_CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Session status line contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// No identifier has been issued yet.
    Inactive,
    /// An identifier is held; only a prefix is ever displayed.
    Active(String),
}

impl SessionStatus {
    /// Builds a status from the current identifier.
    pub fn from_id(id: Option<&str>) -> Self {
        match id {
            Some(id) => SessionStatus::Active(id.to_string()),
            None => SessionStatus::Inactive,
        }
    }

    /// The status line text.
    pub fn describe(&self) -> String {
        match self {
            SessionStatus::Inactive => "No active session".to_string(),
            SessionStatus::Active(id) => {
                let prefix: String = id.chars().take(8).collect();
                format!("Session: {prefix}...")
            }
        }
    }
}

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - Recording renderers in tests
pub trait Renderer: Send {
    /// Show a new turn at the end of the transcript and scroll to it.
    fn print_turn(&mut self, turn: &ChatTurn);

    /// Show the welcome block.
    fn print_welcome(&mut self, welcome: &WelcomeBlock);

    /// Remove every turn from the view.
    fn clear_transcript(&mut self);

    /// Show the listing panel with its current content.
    fn print_listings(&mut self, panel: &ListingPanel);

    /// Hide the listing panel.
    fn hide_listings(&mut self);

    /// Show the session status line.
    fn print_session_status(&mut self, status: &SessionStatus);

    /// Show or hide the in-flight indicator.
    fn show_loading(&mut self, loading: bool);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
    loading: bool,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a new PlainTextRenderer on stdout with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer on stdout with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Creates a renderer writing to `out`.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            loading: false,
        }
    }

    /// Consumes the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn style(&self, code: &'static str) -> &'static str {
        if self.use_color { code } else { "" }
    }

    fn reset(&self) -> &'static str {
        self.style(ANSI_RESET)
    }

    // Terminal write failures are not actionable mid-conversation.
    fn emit(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }

    fn clear_loading(&mut self) {
        if self.loading {
            let line = if self.use_color { "\r\x1b[2K" } else { "\n" };
            self.emit(line);
            self.loading = false;
        }
    }

    fn card_lines(&self, card: &ListingCard) -> String {
        let bold = self.style(ANSI_BOLD);
        let green = self.style(ANSI_GREEN);
        let yellow = self.style(ANSI_YELLOW);
        let reset = self.reset();

        let mut lines = format!(
            "┌ {bold}{}{reset}  {green}{}{reset}\n",
            sanitize_terminal(&card.title),
            card.price
        );
        lines.push_str(&format!(
            "│ 📐 {} m²  🛏️ {} dormitorios  🚿 {} baños  🏗️ {}\n",
            card.area,
            card.bedrooms,
            card.bathrooms,
            sanitize_terminal(&card.status)
        ));
        if !card.badges.is_empty() {
            let badges: Vec<String> = card
                .badges
                .iter()
                .map(|badge| format!("{yellow}[{}]{reset}", badge.label()))
                .collect();
            lines.push_str(&format!("│ {}\n", badges.join(" ")));
        }
        lines.push_str(&format!("└ 📍 {}\n", sanitize_terminal(&card.district)));
        lines
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn print_turn(&mut self, turn: &ChatTurn) {
        self.clear_loading();
        let dim = self.style(ANSI_DIM);
        let color = match turn.sender {
            Sender::User => "",
            Sender::Assistant => self.style(ANSI_CYAN),
        };
        let reset = self.reset();
        let text = format!(
            "{} {color}{}{reset} {dim}{}{reset}\n",
            turn.sender.avatar(),
            sanitize_terminal(&turn.text),
            turn.clock()
        );
        self.emit(&text);
    }

    fn print_welcome(&mut self, welcome: &WelcomeBlock) {
        let bold = self.style(ANSI_BOLD);
        let dim = self.style(ANSI_DIM);
        let reset = self.reset();
        let mut text = format!("🏠 {bold}{}{reset}\n{}\n\n", welcome.heading, welcome.intro);
        text.push_str(&format!("{bold}{}{reset}\n", welcome.examples_heading));
        for example in welcome.examples {
            text.push_str(&format!("{dim}  • \"{example}\"{reset}\n"));
        }
        text.push_str(&format!("\n{}\n\n", welcome.prompt));
        self.emit(&text);
    }

    fn clear_transcript(&mut self) {
        self.clear_loading();
        if self.use_color {
            self.emit(ANSI_CLEAR_SCREEN);
        } else {
            self.emit("\n----------------------------------------\n\n");
        }
    }

    fn print_listings(&mut self, panel: &ListingPanel) {
        self.clear_loading();
        let bold = self.style(ANSI_BOLD);
        let reset = self.reset();
        let mut text = format!("\n{bold}Propiedades{reset} (/close para ocultar)\n");
        match panel.content() {
            PanelContent::NoResults => text.push_str(&format!("  {NO_RESULTS}\n")),
            PanelContent::Cards(cards) => {
                for card in cards {
                    text.push_str(&self.card_lines(card));
                }
            }
        }
        text.push('\n');
        self.emit(&text);
    }

    fn hide_listings(&mut self) {
        self.emit("Listado de propiedades oculto.\n");
    }

    fn print_session_status(&mut self, status: &SessionStatus) {
        let dim = self.style(ANSI_DIM);
        let reset = self.reset();
        let line = format!(
            "{dim}{}{reset}\n",
            sanitize_terminal(&status.describe())
        );
        self.emit(&line);
    }

    fn show_loading(&mut self, loading: bool) {
        if loading && !self.loading {
            let dim = self.style(ANSI_DIM);
            let reset = self.reset();
            let line = format!("{dim}🤖 …{reset}");
            self.emit(&line);
            self.loading = true;
        } else if !loading {
            self.clear_loading();
        }
    }

    fn print_error(&mut self, error: &str) {
        self.clear_loading();
        let red = self.style(ANSI_RED);
        let reset = self.reset();
        let _ = writeln!(io::stderr(), "{red}Error: {}{reset}", sanitize_terminal(error));
    }

    fn print_info(&mut self, info: &str) {
        self.clear_loading();
        let line = format!("{}\n", sanitize_terminal(info));
        self.emit(&line);
    }
}
