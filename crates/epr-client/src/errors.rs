//! Client error hierarchy.
//!
//! Errors are classified as fatal (the request can never succeed as built)
//! or operational (the registry or the network misbehaved). Nothing is
//! retried; every error propagates to the caller.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while building, sending, or unpacking registry requests.
#[derive(Debug, Error)]
pub enum ClientError {
    // Fatal: configuration
    /// Operation name has no entry in the operation tables.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    /// Base URL could not be combined with the GraphQL endpoint path.
    #[error("invalid registry url {url}: {reason}")]
    InvalidUrl {
        /// URL as configured.
        url: String,
        /// Parser message.
        reason: String,
    },
    /// A configured header name or value is not valid HTTP.
    #[error("invalid header {name}: {reason}")]
    InvalidHeader {
        /// Header name as configured.
        name: String,
        /// Parser message.
        reason: String,
    },
    /// A record could not be turned into a variables payload.
    #[error(transparent)]
    Record(#[from] epr_core::CoreError),

    // Operational: transport
    /// Connection, TLS, or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// The request did not complete within the configured timeout.
    #[error("timeout after {0:?}")]
    Timeout(Duration),
    /// Non-success HTTP status with a body that is not JSON.
    #[error("registry returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// Response body (or payload) could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    // Operational: envelope
    /// The registry rejected the request with GraphQL errors.
    #[error("registry rejected {operation}: {}", messages.join("; "))]
    Remote {
        /// Operation that was rejected.
        operation: String,
        /// Error messages from the envelope.
        messages: Vec<String>,
    },
    /// `data.<operation>` was absent or null.
    #[error("response has no data for {operation}")]
    MissingData {
        /// Operation whose payload was expected.
        operation: String,
    },
    /// Payload had the wrong JSON shape.
    #[error("unexpected payload for {operation}: expected {expected}")]
    UnexpectedPayload {
        /// Operation whose payload was inspected.
        operation: String,
        /// Shape that was expected.
        expected: &'static str,
    },
}

impl ClientError {
    /// Whether the same request can never succeed without changing inputs.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnknownOperation(_)
                | Self::InvalidUrl { .. }
                | Self::InvalidHeader { .. }
                | Self::Record(_)
        )
    }

    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::UnknownOperation(_) => "unknown_operation",
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidHeader { .. } => "invalid_header",
            Self::Record(_) => "record",
            Self::Transport(_) => "transport",
            Self::Timeout(_) => "timeout",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
            Self::Remote { .. } => "remote_rejected",
            Self::MissingData { .. } => "missing_data",
            Self::UnexpectedPayload { .. } => "unexpected_payload",
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
