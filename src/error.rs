//! Error taxonomy for the trainer core.
//!
//! Every backend-facing operation resolves to an explicit `Result`; nothing
//! escapes a controller boundary as a panic. The variants mirror how failures
//! surface to the user: timeouts and network errors are retryable by
//! re-submission, server errors are not auto-retried, validation errors never
//! reach the network, and state errors resolve to no-ops at the caller.

use thiserror::Error;

/// Result type alias for trainer operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Deadline exceeded; the message names the originating operation.
    #[error("{0}")]
    Timeout(String),

    /// Non-2xx response with a message (parsed error body or `HTTP <status>`).
    #[error("{0}")]
    Server(String),

    /// Transport-level failure (unreachable host, DNS, aborted connection).
    #[error("网络错误: {0}")]
    Network(String),

    /// Client-side rejection (upload size/format, empty input). No network
    /// call was made.
    #[error("{0}")]
    Validation(String),

    /// Operation invoked against an absent or invalid session. Callers treat
    /// this as a no-op; the controller logs the diagnosable signal.
    #[error("invalid state: {0}")]
    State(String),
}

impl ClientError {
    /// User-readable message for transient notifications.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
