// Public modules
pub mod agent_request;
pub mod agent_response;
pub mod property_listing;

// Re-exports
pub use agent_request::AgentRequest;
pub use agent_response::AgentResponse;
pub use property_listing::PropertyListing;
