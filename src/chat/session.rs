//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the session
//! identifier, the transcript and the listing panel, and runs exchanges with
//! the agent service.  At most one exchange is in flight at a time; a send
//! attempted while one is pending is dropped, not queued.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::chat::config::ChatConfig;
use crate::client::AgentTransport;
use crate::error::{Error, Result};
use crate::html;
use crate::listing::ListingPanel;
use crate::observability::{
    EXCHANGE_DURATION, EXCHANGE_FAILURES, EXCHANGES, EXCHANGES_IGNORED, LISTINGS_RENDERED,
    SESSION_RESETS, SESSION_STORE_ERRORS, SESSION_UPDATES,
};
use crate::render::{Renderer, SessionStatus};
use crate::session_store::SessionStore;
use crate::transcript::{APOLOGY, Sender, Transcript};
use crate::types::{AgentRequest, AgentResponse};

/// Whether an exchange is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeState {
    #[default]
    Idle,
    AwaitingResponse,
}

/// What happened to a call to [`ChatSession::send_message`].
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// The message was blank; nothing was sent.
    Empty,
    /// Another exchange was in flight; nothing was sent.
    Busy,
    /// The agent replied.
    Replied {
        /// Whether a new session identifier was adopted.
        session_changed: bool,
        /// Number of listings drawn; zero leaves the panel untouched.
        listings: usize,
    },
    /// The exchange failed and an apology was shown.
    Failed(Error),
}

impl SendOutcome {
    /// Returns true if a request went out.
    pub fn was_sent(&self) -> bool {
        matches!(self, SendOutcome::Replied { .. } | SendOutcome::Failed(_))
    }
}

struct SessionState {
    exchange: ExchangeState,
    session_id: Option<String>,
    transcript: Transcript,
    listings: ListingPanel,
}

/// A chat session that manages conversation state and agent exchanges.
///
/// All methods take `&self`; the state lives behind a mutex that is never
/// held across an `.await`.
pub struct ChatSession<T: AgentTransport, S: SessionStore> {
    transport: T,
    store: S,
    config: ChatConfig,
    state: Mutex<SessionState>,
}

impl<T: AgentTransport, S: SessionStore> ChatSession<T, S> {
    /// Creates a session, loading any identifier already in `store`.
    ///
    /// The transcript starts with the welcome block when no identifier is
    /// stored.
    pub fn new(transport: T, store: S, config: ChatConfig) -> Result<Self> {
        let session_id = store.get()?;
        let transcript = if session_id.is_none() {
            Transcript::with_welcome()
        } else {
            Transcript::new()
        };
        let listings = ListingPanel::new(config.currency.clone());
        Ok(Self {
            transport,
            store,
            config,
            state: Mutex::new(SessionState {
                exchange: ExchangeState::Idle,
                session_id,
                transcript,
                listings,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sends a user message and renders the outcome.
    ///
    /// This method:
    /// 1. Ignores blank input and input arriving while an exchange is pending
    /// 2. Shows the user's turn and issues one request
    /// 3. Adopts a new session identifier if the reply carries one
    /// 4. Shows the reply, then any listings after the configured delay
    ///
    /// A failed exchange shows a fixed apology instead of a reply and changes
    /// nothing else.  The session is always idle again when this returns.
    pub async fn send_message(&self, text: &str, renderer: &mut dyn Renderer) -> SendOutcome {
        let message = text.trim();
        if message.is_empty() {
            return SendOutcome::Empty;
        }

        let (request, turn) = {
            let mut state = self.lock();
            if state.exchange == ExchangeState::AwaitingResponse {
                EXCHANGES_IGNORED.click();
                return SendOutcome::Busy;
            }
            state.exchange = ExchangeState::AwaitingResponse;
            let turn = state.transcript.append(Sender::User, message);
            (AgentRequest::new(state.session_id.clone(), message), turn)
        };
        let pending = PendingExchange { state: &self.state };

        renderer.print_turn(&turn);
        renderer.show_loading(true);
        EXCHANGES.click();
        let started = Instant::now();
        let result = self.transport.exchange(&request).await;
        EXCHANGE_DURATION.add(started.elapsed().as_secs_f64());
        renderer.show_loading(false);

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                EXCHANGE_FAILURES.click();
                tracing::warn!(error = %err, "agent exchange failed");
                let apology = self.lock().transcript.append(Sender::Assistant, APOLOGY);
                drop(pending);
                renderer.print_turn(&apology);
                return SendOutcome::Failed(err);
            }
        };

        let session_changed = self.adopt_session(&response, renderer);
        let reply = self
            .lock()
            .transcript
            .append(Sender::Assistant, &response.reply);
        drop(pending);
        renderer.print_turn(&reply);

        let listings = match response.listings() {
            Some(listings) => {
                if !self.config.listing_delay.is_zero() {
                    tokio::time::sleep(self.config.listing_delay).await;
                }
                let mut state = self.lock();
                state.listings.render(listings);
                LISTINGS_RENDERED.count(listings.len() as u64);
                renderer.print_listings(&state.listings);
                listings.len()
            }
            None => 0,
        };

        SendOutcome::Replied {
            session_changed,
            listings,
        }
    }

    /// Adopts the identifier in `response` if it is new.
    fn adopt_session(&self, response: &AgentResponse, renderer: &mut dyn Renderer) -> bool {
        let Some(new_id) = response.session_id.as_deref().filter(|id| !id.is_empty()) else {
            return false;
        };
        {
            let mut state = self.lock();
            if state.session_id.as_deref() == Some(new_id) {
                return false;
            }
            state.session_id = Some(new_id.to_string());
        }
        SESSION_UPDATES.click();
        tracing::debug!(
            session = %new_id.chars().take(8).collect::<String>(),
            "adopted new agent session"
        );
        if let Err(err) = self.store.set(new_id) {
            SESSION_STORE_ERRORS.click();
            tracing::warn!(error = %err, "failed to persist session identifier");
        }
        renderer.print_session_status(&SessionStatus::from_id(Some(new_id)));
        true
    }

    /// Clears the transcript and forgets the session identifier.
    ///
    /// Refused while an exchange is pending.  The listing panel is left as
    /// is.  The in-memory state is cleared even if the store cannot be.
    pub fn reset(&self, renderer: &mut dyn Renderer) -> Result<()> {
        {
            let mut state = self.lock();
            if state.exchange == ExchangeState::AwaitingResponse {
                return Err(Error::validation(
                    "cannot reset while a message is awaiting a reply",
                ));
            }
            state.session_id = None;
            state.transcript.reset();
        }
        SESSION_RESETS.click();
        renderer.clear_transcript();
        if let Some(welcome) = self.lock().transcript.welcome() {
            renderer.print_welcome(welcome);
        }
        renderer.print_session_status(&SessionStatus::Inactive);
        self.store.clear()
    }

    /// Hides the listing panel.
    pub fn dismiss_listings(&self, renderer: &mut dyn Renderer) {
        self.lock().listings.dismiss();
        renderer.hide_listings();
    }

    /// Shows the listing panel with whatever it last held.
    pub fn show_listings(&self, renderer: &mut dyn Renderer) {
        let mut state = self.lock();
        state.listings.show();
        renderer.print_listings(&state.listings);
    }

    /// Renders the welcome block if it is part of the view.
    pub fn print_welcome(&self, renderer: &mut dyn Renderer) {
        if let Some(welcome) = self.lock().transcript.welcome() {
            renderer.print_welcome(welcome);
        }
    }

    /// Writes an HTML snapshot of the transcript and listings to `path`.
    pub fn export_html<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let state = self.lock();
        html::export(path, &state.transcript, &state.listings)
    }

    /// Returns the current session identifier.
    pub fn session_id(&self) -> Option<String> {
        self.lock().session_id.clone()
    }

    /// Returns the session status line contents.
    pub fn status(&self) -> SessionStatus {
        SessionStatus::from_id(self.lock().session_id.as_deref())
    }

    /// Returns whether an exchange is pending.
    pub fn exchange_state(&self) -> ExchangeState {
        self.lock().exchange
    }

    /// Returns a copy of the transcript.
    pub fn transcript(&self) -> Transcript {
        self.lock().transcript.clone()
    }

    /// Returns a copy of the listing panel.
    pub fn listings(&self) -> ListingPanel {
        self.lock().listings.clone()
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }
}

/// Marks the exchange settled when dropped, including when the owning
/// future is dropped mid-await.
struct PendingExchange<'a> {
    state: &'a Mutex<SessionState>,
}

impl Drop for PendingExchange<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .exchange = ExchangeState::Idle;
    }
}
