//! The chat transcript: turns shown so far and the welcome block.

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Appended in place of a reply when an exchange fails.
pub const APOLOGY: &str =
    "Lo siento, hubo un error al procesar tu mensaje. Por favor, intenta de nuevo.";

const CLOCK: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    /// The avatar glyph shown next to the sender's turns.
    pub fn avatar(self) -> &'static str {
        match self {
            Sender::User => "👤",
            Sender::Assistant => "🤖",
        }
    }

    /// A short CSS-friendly name.
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

/// One message in the transcript.  Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub sender: Sender,
    pub text: String,
    pub timestamp: OffsetDateTime,
}

impl ChatTurn {
    /// Creates a turn stamped with the current local time.
    pub fn now<S: Into<String>>(sender: Sender, text: S) -> Self {
        Self::at(sender, text, local_now())
    }

    /// Creates a turn with an explicit timestamp.
    pub fn at<S: Into<String>>(sender: Sender, text: S, timestamp: OffsetDateTime) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp,
        }
    }

    /// The 24-hour `HH:MM` time shown with the turn.
    pub fn clock(&self) -> String {
        self.timestamp
            .format(CLOCK)
            .unwrap_or_else(|_| String::from("--:--"))
    }
}

/// Static content shown on an empty transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WelcomeBlock {
    pub heading: &'static str,
    pub intro: &'static str,
    pub examples_heading: &'static str,
    pub examples: &'static [&'static str],
    pub prompt: &'static str,
}

/// The welcome block.
pub const WELCOME: WelcomeBlock = WelcomeBlock {
    heading: "¡Hola! Soy tu asistente inmobiliario",
    intro: "Estoy aquí para ayudarte a encontrar la propiedad perfecta.",
    examples_heading: "Ejemplos de búsqueda:",
    examples: &[
        "Busco un departamento en La Molina de 2 ambientes",
        "Quiero un depto de 80m² en San Isidro",
        "Necesito 3 dormitorios con balcón",
    ],
    prompt: "Cuéntame qué estás buscando...",
};

/// The turns shown in the current view.
///
/// Grows without bound until [`Transcript::reset`].
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
    welcome_visible: bool,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty transcript that starts with the welcome block.
    pub fn with_welcome() -> Self {
        Self {
            turns: Vec::new(),
            welcome_visible: true,
        }
    }

    /// Appends a turn stamped now and returns a copy for rendering.
    pub fn append(&mut self, sender: Sender, text: &str) -> ChatTurn {
        let turn = ChatTurn::now(sender, text);
        self.turns.push(turn.clone());
        turn
    }

    /// Drops every turn and brings back the welcome block.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.welcome_visible = true;
    }

    /// The turns, oldest first.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Returns the number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if there are no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The welcome block, if it is part of the view.
    pub fn welcome(&self) -> Option<&'static WelcomeBlock> {
        self.welcome_visible.then_some(&WELCOME)
    }
}

fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
