//! @ai:module:intent Error types for agent construction and chat calls
//! @ai:module:layer domain
//! @ai:module:public_api AgentError, AgentResult
//! @ai:module:stateless true

use thiserror::Error;

/// @ai:intent Unified error type for agents and LLM clients
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("Tool '{name}' failed: {message}")]
    Tool { name: String, message: String },

    #[error("API key not set (expected in {0})")]
    MissingApiKey(String),

    #[error("Agent task failed: {0}")]
    Task(String),
}

pub type AgentResult<T> = std::result::Result<T, AgentError>;
