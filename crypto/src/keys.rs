//! Ed25519 key types for SIGNET
//!
//! Handles key generation, deterministic derivation, and address
//! derivation.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use signet_core::{Address, SignetResult};
use std::fmt;
use subtle::ConstantTimeEq;

use crate::hashing::{address_digest, sha256};
use crate::signing::Signature;

/// Length of a private-key seed in bytes
pub const SEED_LENGTH: usize = 32;

/// Length of a private key in bytes (seed followed by public half)
pub const PRIVATE_KEY_LENGTH: usize = 64;

/// Length of a public key in bytes
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// 64-byte Ed25519 private key: `seed[0..32] || public_half[32..64]`.
///
/// The public half is fixed exactly once at construction, where it is
/// computed from the seed; it is never recomputed or mutated afterwards.
#[derive(Clone, Copy)]
pub struct PrivateKey([u8; PRIVATE_KEY_LENGTH]);

impl PrivateKey {
    /// Generate a new private key from the system's secure random source.
    ///
    /// A failing random source aborts the process inside `OsRng`; it is
    /// not a recoverable condition.
    pub fn generate() -> Self {
        let mut seed = [0u8; SEED_LENGTH];
        OsRng.fill_bytes(&mut seed);
        Self::from_seed(seed)
    }

    /// Deterministically generate a private key from a secret.
    ///
    /// The seed is `SHA-256(secret)`. No entropy stretching is performed:
    /// if the secret comes from user input, it should be the output of a
    /// slow KDF.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self::from_seed(sha256(secret))
    }

    /// Build a private key from a 32-byte seed, computing the public half.
    pub fn from_seed(seed: [u8; SEED_LENGTH]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        let public = signing_key.verifying_key().to_bytes();
        let mut bytes = [0u8; PRIVATE_KEY_LENGTH];
        bytes[..SEED_LENGTH].copy_from_slice(&seed);
        bytes[SEED_LENGTH..].copy_from_slice(&public);
        PrivateKey(bytes)
    }

    /// Reconstruct a key from its full 64-byte form.
    ///
    /// Only the codec calls this; the bytes are trusted to uphold the
    /// seed/public-half invariant because they originate from `as_bytes`.
    pub(crate) fn from_bytes(bytes: [u8; PRIVATE_KEY_LENGTH]) -> Self {
        PrivateKey(bytes)
    }

    /// Deterministically derive a child key at the given index.
    ///
    /// The child seed is the SHA-256 hash of the canonical encoding of
    /// `(key bytes, index)`, so it depends on the full 64-byte key and
    /// is stable across processes and platforms.
    pub fn derive(&self, index: u64) -> Self {
        #[derive(Serialize)]
        struct ChildKeyInput<'a> {
            key: &'a [u8],
            index: u64,
        }
        let encoded = bincode::serialize(&ChildKeyInput {
            key: &self.0,
            index,
        })
        .expect("fixed-size derivation input always encodes");
        Self::from_seed(sha256(&encoded))
    }

    /// Sign a message with this key.
    ///
    /// Ed25519 signing cannot fail for any input; the `Result` shape is
    /// kept so callers are ready for backends where it can.
    pub fn sign(&self, message: &[u8]) -> SignetResult<Signature> {
        let signing_key = SigningKey::from_bytes(&self.seed());
        let signature = signing_key.sign(message);
        Ok(Signature::from_fixed(signature.to_bytes()))
    }

    /// Return the public key embedded at construction time.
    pub fn public_key(&self) -> PublicKey {
        let mut public = [0u8; PUBLIC_KEY_LENGTH];
        public.copy_from_slice(&self.0[SEED_LENGTH..]);
        PublicKey(public)
    }

    /// Return the address of this key's public half.
    pub fn address(&self) -> Address {
        self.public_key().address()
    }

    /// Convert to an X25519 scalar for Diffie-Hellman key exchange.
    ///
    /// Applies the Ed25519-to-Curve25519 birational map; the result is
    /// the clamped scalar and is defined for every key. Key-exchange
    /// interop only, not part of the signing path.
    pub fn to_x25519(&self) -> [u8; 32] {
        SigningKey::from_bytes(&self.seed()).to_scalar_bytes()
    }

    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LENGTH] {
        &self.0
    }

    fn seed(&self) -> [u8; SEED_LENGTH] {
        let mut seed = [0u8; SEED_LENGTH];
        seed.copy_from_slice(&self.0[..SEED_LENGTH]);
        seed
    }
}

impl PartialEq for PrivateKey {
    /// Constant-time comparison over all 64 bytes.
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    /// Shows only the public half; the seed never reaches logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({:?})", self.public_key())
    }
}

/// 32-byte Ed25519 public key. Not secret; freely copyable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        PublicKey(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Derive the 20-byte address of this key.
    ///
    /// The digest covers the raw 32 key bytes, never the routed
    /// encoding, so addresses stay stable across codec changes.
    pub fn address(&self) -> Address {
        Address::from_bytes(address_digest(&self.0))
    }

    /// Verify a signature over a message with this key.
    ///
    /// Every failure mode collapses to `false`: a key encoding that is
    /// not a curve point, a signature from a different algorithm, or a
    /// plain cryptographic mismatch. No error is ever raised.
    pub fn verify_bytes(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
        verifying_key.verify(message, &sig).is_ok()
    }

    /// Convert to an X25519 public key for Diffie-Hellman key exchange.
    ///
    /// Returns `None` when these 32 bytes do not decompress to a curve
    /// point, in which case no Montgomery image exists. A documented
    /// edge case of the birational map, not an error.
    pub fn to_x25519(&self) -> Option<[u8; 32]> {
        let verifying_key = VerifyingKey::from_bytes(&self.0).ok()?;
        Some(verifying_key.to_montgomery().to_bytes())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pub:{}", &self.to_hex()[..12])
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(0x{})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_public_half_matches_seed() {
        let key = PrivateKey::generate();
        let recomputed = PrivateKey::from_seed(key.seed());
        assert_eq!(key.public_key(), recomputed.public_key());
    }

    #[test]
    fn test_from_secret_deterministic() {
        let k1 = PrivateKey::from_secret(b"correct horse battery staple");
        let k2 = PrivateKey::from_secret(b"correct horse battery staple");
        assert_eq!(k1.as_bytes(), k2.as_bytes());
        assert_eq!(k1.as_bytes().len(), PRIVATE_KEY_LENGTH);
    }

    #[test]
    fn test_distinct_secrets_distinct_keys() {
        let k1 = PrivateKey::from_secret(b"secret one");
        let k2 = PrivateKey::from_secret(b"secret two");
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_derive_deterministic_and_distinct() {
        let key = PrivateKey::from_secret(b"derivation parent");
        let child0 = key.derive(0);
        let child1 = key.derive(1);
        assert_ne!(child0.as_bytes(), child1.as_bytes());
        assert_eq!(child0.as_bytes(), key.derive(0).as_bytes());
    }

    #[test]
    fn test_derived_key_upholds_invariant() {
        let child = PrivateKey::from_secret(b"parent").derive(7);
        let recomputed = PrivateKey::from_seed(child.seed());
        assert_eq!(child.public_key(), recomputed.public_key());
    }

    #[test]
    fn test_private_key_equality() {
        let key = PrivateKey::from_secret(b"same");
        let copy = key;
        assert_eq!(key, copy);
        assert_ne!(key, PrivateKey::from_secret(b"other"));
    }

    #[test]
    fn test_address_deterministic() {
        let pubkey = PrivateKey::from_secret(b"addr").public_key();
        assert_eq!(pubkey.address(), pubkey.address());
    }

    #[test]
    fn test_address_bit_sensitivity() {
        let pubkey = PrivateKey::from_secret(b"addr").public_key();
        let mut flipped = *pubkey.as_bytes();
        flipped[0] ^= 0x01;
        assert_ne!(pubkey.address(), PublicKey::from_bytes(flipped).address());
    }

    #[test]
    fn test_to_x25519_valid_point() {
        let key = PrivateKey::from_secret(b"dh");
        assert!(key.public_key().to_x25519().is_some());
        assert_ne!(key.to_x25519(), [0u8; 32]);
    }

    #[test]
    fn test_to_x25519_invalid_point() {
        // y = 2 has no corresponding x on the Ed25519 curve, so this
        // encoding never decompresses.
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        bytes[0] = 2;
        assert_eq!(PublicKey::from_bytes(bytes).to_x25519(), None);
    }

    #[test]
    fn test_debug_hides_seed() {
        let key = PrivateKey::from_secret(b"hush");
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains(&hex::encode(&key.as_bytes()[..SEED_LENGTH])));
    }
}
