//! Error types for SIGNET

use thiserror::Error;

/// Result type for SIGNET operations
pub type SignetResult<T> = Result<T, SignetError>;

/// Main error type for SIGNET
#[derive(Error, Debug)]
pub enum SignetError {
    // ============ Key Errors ============
    /// Reserved: Ed25519 signing over a well-formed key cannot fail,
    /// but other backends may.
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    // ============ Codec Errors ============
    #[error("Unknown {capability} route: {route:?}")]
    UnknownRoute {
        capability: &'static str,
        route: String,
    },

    #[error("Invalid {route:?} payload length: expected {expected}, got {got}")]
    PayloadLength {
        route: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Decoding failed: {0}")]
    Decode(String),
}

impl From<bincode::Error> for SignetError {
    fn from(err: bincode::Error) -> Self {
        SignetError::Decode(err.to_string())
    }
}
