//! Immutable key and signature buffers
//!
//! [`KeyMaterial`] remembers which parameter set produced (or validated) it and
//! whether it is public or secret, so a key can never be handed to the wrong
//! scheme or used in the wrong role. Secret bytes are wiped on drop and are
//! never printed by `Debug`.

use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha3::{Digest, Sha3_256};
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Role of a key buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Public,
    Secret,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Public => f.write_str("public"),
            KeyKind::Secret => f.write_str("secret"),
        }
    }
}

/// Fixed-length key bytes bound to one parameter set
#[derive(Clone)]
pub struct KeyMaterial {
    algorithm: &'static str,
    kind: KeyKind,
    bytes: Vec<u8>,
}

impl KeyMaterial {
    /// Length is checked by the caller (`Scheme`), never here.
    pub(crate) fn new(algorithm: &'static str, kind: KeyKind, bytes: Vec<u8>) -> Self {
        Self {
            algorithm,
            kind,
            bytes,
        }
    }

    /// Parameter set this key belongs to
    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// SHA3-256 of the key bytes, hex encoded
    ///
    /// Safe to log for both key kinds.
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha3_256::digest(&self.bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

impl AsRef<[u8]> for KeyMaterial {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq for KeyMaterial {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm
            && self.kind == other.kind
            && bool::from(self.bytes.ct_eq(&other.bytes))
    }
}

impl Eq for KeyMaterial {}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("KeyMaterial");
        s.field("algorithm", &self.algorithm)
            .field("kind", &self.kind)
            .field("len", &self.bytes.len());
        match self.kind {
            KeyKind::Public => s.field("fingerprint", &self.fingerprint()),
            KeyKind::Secret => s.field("bytes", &"<redacted>"),
        };
        s.finish()
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Detached signature bytes
///
/// Length is checked against the scheme when the signature is verified, so a
/// `Signature` can carry bytes received from anywhere.
#[derive(Clone)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Signature {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn from_hex(text: &str) -> Result<Self> {
        Ok(Self::from_bytes(hex::decode(text.trim())?))
    }

    pub fn from_base64(text: &str) -> Result<Self> {
        Ok(Self::from_bytes(STANDARD.decode(text.trim())?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for Signature {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for Signature {}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PqcError;

    #[test]
    fn test_secret_debug_is_redacted() {
        let key = KeyMaterial::new("Dilithium3", KeyKind::Secret, vec![0xAB; 32]);
        let printed = format!("{:?}", key);

        assert!(printed.contains("<redacted>"));
        assert!(!printed.to_lowercase().contains("abab"));
    }

    #[test]
    fn test_public_debug_shows_fingerprint() {
        let key = KeyMaterial::new("Falcon-512", KeyKind::Public, vec![1, 2, 3]);
        let printed = format!("{:?}", key);

        assert!(printed.contains(&key.fingerprint()));
        assert_eq!(key.fingerprint().len(), 64);
    }

    #[test]
    fn test_key_equality_includes_role_and_algorithm() {
        let a = KeyMaterial::new("Dilithium3", KeyKind::Public, vec![7; 8]);
        let b = KeyMaterial::new("Dilithium3", KeyKind::Public, vec![7; 8]);
        let other_kind = KeyMaterial::new("Dilithium3", KeyKind::Secret, vec![7; 8]);
        let other_alg = KeyMaterial::new("Dilithium2", KeyKind::Public, vec![7; 8]);
        let other_bytes = KeyMaterial::new("Dilithium3", KeyKind::Public, vec![8; 8]);

        assert_eq!(a, b);
        assert_ne!(a, other_kind);
        assert_ne!(a, other_alg);
        assert_ne!(a, other_bytes);
    }

    #[test]
    fn test_signature_text_encodings() {
        let sig = Signature::from_bytes(vec![0x00, 0xFF, 0x10]);

        assert_eq!(sig.to_hex(), "00ff10");
        assert_eq!(Signature::from_hex(&sig.to_hex()).unwrap(), sig);
        assert_eq!(Signature::from_base64(&sig.to_base64()).unwrap(), sig);
    }

    #[test]
    fn test_signature_invalid_text() {
        assert!(matches!(
            Signature::from_hex("not hex"),
            Err(PqcError::EncodingError(_))
        ));
        assert!(matches!(
            Signature::from_base64("!!!"),
            Err(PqcError::EncodingError(_))
        ));
    }

    #[test]
    fn test_signature_length_mismatch_is_unequal() {
        let a = Signature::from_bytes(vec![1, 2, 3]);
        let b = Signature::from_bytes(vec![1, 2]);
        assert_ne!(a, b);
    }
}
