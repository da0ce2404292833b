//! SIGNET Cryptography Module
//!
//! Identity primitives using standard, audited algorithms:
//! - Ed25519 for signing keys and signatures
//! - BLAKE3 for address derivation (SHA-256 for key derivation)
//! - A routed canonical encoding so interface-typed keys and signatures
//!   round-trip to their exact concrete algorithm

pub mod codec;
pub mod hashing;
pub mod keys;
pub mod signing;

pub use codec::*;
pub use hashing::*;
pub use keys::*;
pub use signing::*;
