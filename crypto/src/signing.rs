//! Ed25519 signature type and signing helpers

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::Bytes;
use signet_core::SignetResult;
use std::fmt;
use subtle::ConstantTimeEq;

use crate::keys::{PrivateKey, PublicKey};

/// Length of a signature in bytes
pub const SIGNATURE_LENGTH: usize = 64;

/// 64-byte Ed25519 signature.
#[serde_as]
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct Signature(#[serde_as(as = "Bytes")] [u8; SIGNATURE_LENGTH]);

impl Signature {
    /// Build a signature from raw bytes, copying at most 64 of them.
    ///
    /// No length validation, matching the wire behavior: shorter input
    /// leaves the trailing bytes zero, longer input is truncated.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        let n = data.len().min(SIGNATURE_LENGTH);
        bytes[..n].copy_from_slice(&data[..n]);
        Signature(bytes)
    }

    pub(crate) fn from_fixed(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Signature(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// True when all 64 bytes are zero.
    ///
    /// Defined over content, not encoded length: the encoded length of
    /// a fixed-size value is a constant and could never distinguish an
    /// unset signature.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; SIGNATURE_LENGTH]
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl PartialEq for Signature {
    /// Constant-time comparison over all 64 bytes.
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for Signature {}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(0x{}...)", &self.to_hex()[..16])
    }
}

/// Sign a message with a private key.
pub fn sign(key: &PrivateKey, message: &[u8]) -> SignetResult<Signature> {
    key.sign(message)
}

/// Check a signature against a public key and message.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    public_key.verify_bytes(message, signature)
}
