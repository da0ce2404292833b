//! Routed canonical encoding for interface-typed keys and signatures
//!
//! A field whose static type is only "some public key" is encoded as the
//! concrete type's route string followed by its raw fixed-size bytes, so a
//! decoder recovers the exact algorithm without external type hints. The
//! route registry is built once at startup and shared read-only; routes
//! feed nothing into address derivation, which covers raw key bytes only.

use serde::{Deserialize, Serialize};
use signet_core::{Address, SignetError, SignetResult};
use std::collections::HashMap;
use std::fmt;

use crate::keys::{PrivateKey, PublicKey, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH};
use crate::signing::{Signature, SIGNATURE_LENGTH};

/// Route identifying Ed25519 private keys in canonical encodings
pub const ED25519_PRIVATE_KEY_ROUTE: &str = "signet/PrivKeyEd25519";

/// Route identifying Ed25519 public keys in canonical encodings
pub const ED25519_PUBLIC_KEY_ROUTE: &str = "signet/PubKeyEd25519";

/// Route identifying Ed25519 signatures in canonical encodings
pub const ED25519_SIGNATURE_ROUTE: &str = "signet/SignatureEd25519";

/// The three interface positions a routed value can occupy.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Capability {
    PrivateKey,
    PublicKey,
    Signature,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::PrivateKey => "private key",
            Capability::PublicKey => "public key",
            Capability::Signature => "signature",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire frame: length-prefixed route string, then the raw payload.
#[derive(Serialize)]
struct Frame<'a> {
    route: &'a str,
    payload: &'a [u8],
}

#[derive(Deserialize)]
struct FrameOwned {
    route: String,
    payload: Vec<u8>,
}

fn frame(route: &str, payload: &[u8]) -> Vec<u8> {
    // Framing a fixed-size value cannot fail; a failure here is an
    // invariant violation, not a reportable error.
    bincode::serialize(&Frame { route, payload }).expect("framing a fixed-size value")
}

/// A private key of any registered algorithm.
///
/// Equality between different algorithms is a plain discriminant check
/// and returns false; within one algorithm it is the concrete type's
/// constant-time comparison.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnyPrivateKey {
    Ed25519(PrivateKey),
}

impl AnyPrivateKey {
    pub fn route(&self) -> &'static str {
        match self {
            AnyPrivateKey::Ed25519(_) => ED25519_PRIVATE_KEY_ROUTE,
        }
    }

    /// Canonical routed encoding: route, then the raw 64 key bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            AnyPrivateKey::Ed25519(key) => frame(ED25519_PRIVATE_KEY_ROUTE, key.as_bytes()),
        }
    }

    pub fn public_key(&self) -> AnyPublicKey {
        match self {
            AnyPrivateKey::Ed25519(key) => AnyPublicKey::Ed25519(key.public_key()),
        }
    }

    pub fn sign(&self, message: &[u8]) -> SignetResult<AnySignature> {
        match self {
            AnyPrivateKey::Ed25519(key) => key.sign(message).map(AnySignature::Ed25519),
        }
    }
}

impl From<PrivateKey> for AnyPrivateKey {
    fn from(key: PrivateKey) -> Self {
        AnyPrivateKey::Ed25519(key)
    }
}

/// A public key of any registered algorithm.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnyPublicKey {
    Ed25519(PublicKey),
}

impl AnyPublicKey {
    pub fn route(&self) -> &'static str {
        match self {
            AnyPublicKey::Ed25519(_) => ED25519_PUBLIC_KEY_ROUTE,
        }
    }

    /// Canonical routed encoding: route, then the raw 32 key bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            AnyPublicKey::Ed25519(key) => frame(ED25519_PUBLIC_KEY_ROUTE, key.as_bytes()),
        }
    }

    pub fn address(&self) -> Address {
        match self {
            AnyPublicKey::Ed25519(key) => key.address(),
        }
    }

    /// Verify a signature, requiring it to come from this key's
    /// algorithm. A signature of a different algorithm is false, never
    /// an error. New algorithms add mismatch arms here.
    pub fn verify_bytes(&self, message: &[u8], signature: &AnySignature) -> bool {
        match (self, signature) {
            (AnyPublicKey::Ed25519(key), AnySignature::Ed25519(sig)) => {
                key.verify_bytes(message, sig)
            }
        }
    }
}

impl From<PublicKey> for AnyPublicKey {
    fn from(key: PublicKey) -> Self {
        AnyPublicKey::Ed25519(key)
    }
}

/// A signature of any registered algorithm.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnySignature {
    Ed25519(Signature),
}

impl AnySignature {
    pub fn route(&self) -> &'static str {
        match self {
            AnySignature::Ed25519(_) => ED25519_SIGNATURE_ROUTE,
        }
    }

    /// Canonical routed encoding: route, then the raw 64 signature bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            AnySignature::Ed25519(sig) => frame(ED25519_SIGNATURE_ROUTE, sig.as_bytes()),
        }
    }
}

impl From<Signature> for AnySignature {
    fn from(sig: Signature) -> Self {
        AnySignature::Ed25519(sig)
    }
}

impl PrivateKey {
    /// Canonical routed encoding of this key.
    pub fn encode(&self) -> Vec<u8> {
        frame(ED25519_PRIVATE_KEY_ROUTE, self.as_bytes())
    }
}

impl PublicKey {
    /// Canonical routed encoding of this key.
    pub fn encode(&self) -> Vec<u8> {
        frame(ED25519_PUBLIC_KEY_ROUTE, self.as_bytes())
    }
}

impl Signature {
    /// Canonical routed encoding of this signature.
    pub fn encode(&self) -> Vec<u8> {
        frame(ED25519_SIGNATURE_ROUTE, self.as_bytes())
    }
}

type DecodeFn<T> = fn(&[u8]) -> SignetResult<T>;

fn register<T>(
    map: &mut HashMap<String, DecodeFn<T>>,
    capability: Capability,
    route: &'static str,
    decode: DecodeFn<T>,
) {
    // Two concrete types sharing a route would make decoding ambiguous,
    // so a collision is a fatal configuration error at startup.
    if map.insert(route.to_string(), decode).is_some() {
        panic!("duplicate {capability} route {route:?}");
    }
    tracing::debug!(%capability, route, "registered codec route");
}

fn fixed_payload<const N: usize>(route: &'static str, payload: &[u8]) -> SignetResult<[u8; N]> {
    if payload.len() != N {
        return Err(SignetError::PayloadLength {
            route,
            expected: N,
            got: payload.len(),
        });
    }
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(payload);
    Ok(bytes)
}

fn decode_ed25519_private_key(payload: &[u8]) -> SignetResult<AnyPrivateKey> {
    let bytes = fixed_payload::<PRIVATE_KEY_LENGTH>(ED25519_PRIVATE_KEY_ROUTE, payload)?;
    Ok(AnyPrivateKey::Ed25519(PrivateKey::from_bytes(bytes)))
}

fn decode_ed25519_public_key(payload: &[u8]) -> SignetResult<AnyPublicKey> {
    let bytes = fixed_payload::<PUBLIC_KEY_LENGTH>(ED25519_PUBLIC_KEY_ROUTE, payload)?;
    Ok(AnyPublicKey::Ed25519(PublicKey::from_bytes(bytes)))
}

fn decode_ed25519_signature(payload: &[u8]) -> SignetResult<AnySignature> {
    let bytes = fixed_payload::<SIGNATURE_LENGTH>(ED25519_SIGNATURE_ROUTE, payload)?;
    Ok(AnySignature::Ed25519(Signature::from_bytes(&bytes)))
}

/// Route registry for decoding interface-typed values.
///
/// Built once during initialization, read-only afterwards, and safe to
/// share across threads. Not ambient global state: callers hold a
/// reference and pass it where decoding happens.
pub struct CodecRegistry {
    private_keys: HashMap<String, DecodeFn<AnyPrivateKey>>,
    public_keys: HashMap<String, DecodeFn<AnyPublicKey>>,
    signatures: HashMap<String, DecodeFn<AnySignature>>,
}

impl CodecRegistry {
    /// Registry holding every algorithm SIGNET ships.
    pub fn standard() -> Self {
        let mut registry = CodecRegistry {
            private_keys: HashMap::new(),
            public_keys: HashMap::new(),
            signatures: HashMap::new(),
        };
        register(
            &mut registry.private_keys,
            Capability::PrivateKey,
            ED25519_PRIVATE_KEY_ROUTE,
            decode_ed25519_private_key,
        );
        register(
            &mut registry.public_keys,
            Capability::PublicKey,
            ED25519_PUBLIC_KEY_ROUTE,
            decode_ed25519_public_key,
        );
        register(
            &mut registry.signatures,
            Capability::Signature,
            ED25519_SIGNATURE_ROUTE,
            decode_ed25519_signature,
        );
        registry
    }

    /// Decode a routed private-key encoding back to its concrete type.
    pub fn decode_private_key(&self, bytes: &[u8]) -> SignetResult<AnyPrivateKey> {
        let frame: FrameOwned = bincode::deserialize(bytes)?;
        let decode = self.private_keys.get(&frame.route).ok_or_else(|| {
            SignetError::UnknownRoute {
                capability: Capability::PrivateKey.as_str(),
                route: frame.route.clone(),
            }
        })?;
        decode(&frame.payload)
    }

    /// Decode a routed public-key encoding back to its concrete type.
    pub fn decode_public_key(&self, bytes: &[u8]) -> SignetResult<AnyPublicKey> {
        let frame: FrameOwned = bincode::deserialize(bytes)?;
        let decode = self.public_keys.get(&frame.route).ok_or_else(|| {
            SignetError::UnknownRoute {
                capability: Capability::PublicKey.as_str(),
                route: frame.route.clone(),
            }
        })?;
        decode(&frame.payload)
    }

    /// Decode a routed signature encoding back to its concrete type.
    pub fn decode_signature(&self, bytes: &[u8]) -> SignetResult<AnySignature> {
        let frame: FrameOwned = bincode::deserialize(bytes)?;
        let decode = self.signatures.get(&frame.route).ok_or_else(|| {
            SignetError::UnknownRoute {
                capability: Capability::Signature.as_str(),
                route: frame.route.clone(),
            }
        })?;
        decode(&frame.payload)
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_shareable<T: Send + Sync>() {}

    #[test]
    fn test_registry_is_shareable() {
        assert_shareable::<CodecRegistry>();
    }

    #[test]
    fn test_private_key_roundtrip() {
        let registry = CodecRegistry::standard();
        let key = AnyPrivateKey::from(PrivateKey::from_secret(b"roundtrip"));
        let decoded = registry.decode_private_key(&key.encode()).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn test_public_key_roundtrip_preserves_address() {
        let registry = CodecRegistry::standard();
        let pubkey = AnyPublicKey::from(PrivateKey::from_secret(b"roundtrip").public_key());
        let decoded = registry.decode_public_key(&pubkey.encode()).unwrap();
        assert_eq!(decoded, pubkey);
        assert_eq!(decoded.address(), pubkey.address());
    }

    #[test]
    fn test_signature_roundtrip() {
        let registry = CodecRegistry::standard();
        let key = PrivateKey::from_secret(b"roundtrip");
        let signature = AnySignature::from(key.sign(b"payload").unwrap());
        let decoded = registry.decode_signature(&signature.encode()).unwrap();
        assert_eq!(decoded, signature);
    }

    #[test]
    fn test_decoded_signature_still_verifies() {
        let registry = CodecRegistry::standard();
        let key = PrivateKey::from_secret(b"roundtrip");
        let signature = AnySignature::from(key.sign(b"payload").unwrap());
        let decoded = registry.decode_signature(&signature.encode()).unwrap();
        let pubkey = AnyPublicKey::from(key.public_key());
        assert!(pubkey.verify_bytes(b"payload", &decoded));
        assert!(!pubkey.verify_bytes(b"tampered", &decoded));
    }

    #[test]
    fn test_unknown_route_fails() {
        let registry = CodecRegistry::standard();
        let bytes = frame("signet/PrivKeySecp256k1", &[0u8; PRIVATE_KEY_LENGTH]);
        let err = registry.decode_private_key(&bytes).unwrap_err();
        assert!(matches!(err, SignetError::UnknownRoute { .. }));
    }

    #[test]
    fn test_capability_routes_are_separate() {
        // A signature route is not a public-key route even though both
        // are registered.
        let registry = CodecRegistry::standard();
        let bytes = frame(ED25519_SIGNATURE_ROUTE, &[0u8; SIGNATURE_LENGTH]);
        let err = registry.decode_public_key(&bytes).unwrap_err();
        assert!(matches!(err, SignetError::UnknownRoute { .. }));
    }

    #[test]
    fn test_wrong_payload_length_fails() {
        let registry = CodecRegistry::standard();
        let bytes = frame(ED25519_PUBLIC_KEY_ROUTE, &[0u8; PUBLIC_KEY_LENGTH - 1]);
        let err = registry.decode_public_key(&bytes).unwrap_err();
        assert!(matches!(
            err,
            SignetError::PayloadLength {
                expected: PUBLIC_KEY_LENGTH,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_frame_fails() {
        let registry = CodecRegistry::standard();
        assert!(registry.decode_signature(&[0xff, 0xff, 0xff]).is_err());
    }

    #[test]
    #[should_panic(expected = "duplicate")]
    fn test_duplicate_route_panics() {
        let mut map = HashMap::new();
        register(
            &mut map,
            Capability::PrivateKey,
            ED25519_PRIVATE_KEY_ROUTE,
            decode_ed25519_private_key,
        );
        register(
            &mut map,
            Capability::PrivateKey,
            ED25519_PRIVATE_KEY_ROUTE,
            decode_ed25519_private_key,
        );
    }

    #[test]
    fn test_concrete_and_routed_encodings_agree() {
        let key = PrivateKey::from_secret(b"agree");
        assert_eq!(key.encode(), AnyPrivateKey::from(key).encode());
        let pubkey = key.public_key();
        assert_eq!(pubkey.encode(), AnyPublicKey::from(pubkey).encode());
    }

    #[test]
    fn test_address_ignores_route_scheme() {
        // The address digests raw key bytes, not the routed encoding, so
        // it cannot drift when routes change.
        let pubkey = PrivateKey::from_secret(b"stable").public_key();
        let address = pubkey.address();
        assert_ne!(pubkey.encode().len(), pubkey.as_bytes().len());
        assert_eq!(pubkey.address(), address);
    }
}
