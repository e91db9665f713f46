use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::PropertyListing;

/// A successful reply from the agent service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AgentResponse {
    /// Session token the service wants echoed on the next request.
    #[serde(default)]
    pub session_id: Option<String>,

    /// The assistant's reply text.
    #[serde(default)]
    pub reply: String,

    /// Listings matching the conversation so far.
    ///
    /// Anything other than an array is treated as absent.
    #[serde(
        default,
        deserialize_with = "listings",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Vec<PropertyListing>>,
}

impl AgentResponse {
    /// Creates a response carrying only a reply.
    pub fn new<S: Into<String>>(session_id: Option<String>, reply: S) -> Self {
        Self {
            session_id,
            reply: reply.into(),
            data: None,
        }
    }

    /// Attaches listings to the response.
    pub fn with_listings(mut self, listings: Vec<PropertyListing>) -> Self {
        self.data = Some(listings);
        self
    }

    /// Returns the listings if there is at least one.
    pub fn listings(&self) -> Option<&[PropertyListing]> {
        self.data.as_deref().filter(|listings| !listings.is_empty())
    }
}

fn listings<'de, D>(deserializer: D) -> Result<Option<Vec<PropertyListing>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().map(PropertyListing::from_value).collect()),
        _ => None,
    })
}
