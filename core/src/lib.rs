//! SIGNET Core Library
//!
//! Shared value types and errors for the SIGNET identity primitives.
//! This crate provides the foundation for the crypto layer and for any
//! component that references identities by address.

pub mod error;
pub mod types;

pub use error::*;
pub use types::*;
