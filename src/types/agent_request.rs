use serde::{Deserialize, Serialize};

/// The body of a `POST <base>/message` call to the agent service.
///
/// `session_id` is always serialized, as `null` before the service has
/// issued one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentRequest {
    /// Opaque session token previously issued by the service.
    pub session_id: Option<String>,

    /// The user's message, already trimmed.
    pub message: String,
}

impl AgentRequest {
    /// Creates a new request.
    pub fn new<S: Into<String>>(session_id: Option<String>, message: S) -> Self {
        Self {
            session_id,
            message: message.into(),
        }
    }
}
