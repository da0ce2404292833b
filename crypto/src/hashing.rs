//! Hashing functions: SHA-256 for key derivation, BLAKE3 for addresses

use sha2::{Digest, Sha256};
use signet_core::ADDRESS_LENGTH;

/// Compute the SHA-256 hash of data.
///
/// Used for secret-based key generation and child-key derivation.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&result);
    bytes
}

/// Compute the 20-byte address digest of data.
///
/// BLAKE3 truncated to 20 bytes. Deliberately a different algorithm than
/// the SHA-256 used for key derivation, so the address space and the key
/// derivation chain never share a hash function.
pub fn address_digest(data: &[u8]) -> [u8; ADDRESS_LENGTH] {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; ADDRESS_LENGTH];
    bytes.copy_from_slice(&hash.as_bytes()[..ADDRESS_LENGTH]);
    bytes
}
