//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the raw status
//! code and body for debugging. `Transport` covers requests that never got a
//! response at all.

use thiserror::Error;

/// Errors produced while building, sending or parsing a todo API exchange.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request could not be sent or no response arrived.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// True when a response was received but signalled failure.
    pub fn is_application(&self) -> bool {
        matches!(self, ApiError::NotFound | ApiError::Http { .. })
    }
}
