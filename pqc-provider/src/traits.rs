/// Unified interface for post-quantum signatures
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Algorithm family a parameter set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemeFamily {
    Dilithium,
    Falcon,
}

impl SchemeFamily {
    /// Name the family is registered under by default
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemeFamily::Dilithium => "Dilithium",
            SchemeFamily::Falcon => "Falcon",
        }
    }
}

impl fmt::Display for SchemeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How signature lengths are constrained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignatureLength {
    /// Every signature is exactly `signature_size` bytes
    Fixed,
    /// Signatures are between 1 and `signature_size` bytes
    Bounded,
}

/// Static description of a parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemeDescriptor {
    /// Parameter set name, e.g. `Dilithium3`
    pub name: &'static str,
    pub family: SchemeFamily,
    /// NIST security level
    pub nist_level: u8,
    /// Public key size (bytes)
    pub public_key_size: usize,
    /// Secret key size (bytes)
    pub secret_key_size: usize,
    /// Signature size (bytes); the upper bound for `SignatureLength::Bounded`
    pub signature_size: usize,
    pub signature_length: SignatureLength,
}

impl SchemeDescriptor {
    /// Whether `len` is an acceptable signature length
    pub fn accepts_signature_len(&self, len: usize) -> bool {
        match self.signature_length {
            SignatureLength::Fixed => len == self.signature_size,
            SignatureLength::Bounded => len > 0 && len <= self.signature_size,
        }
    }
}

/// Backend binding for one signature parameter set.
///
/// Implementations receive inputs whose lengths were already checked against
/// [`SchemeDescriptor`]; they are called through [`crate::Scheme`].
pub trait SignatureScheme: Send + Sync {
    /// Sizes and identity of this parameter set
    fn descriptor(&self) -> SchemeDescriptor;

    /// Generate a `(public_key, secret_key)` pair
    fn keypair(&self) -> Result<(Vec<u8>, Vec<u8>)>;

    /// Produce a detached signature
    fn sign_detached(&self, secret_key: &[u8], message: &[u8]) -> Result<Vec<u8>>;

    /// Check a detached signature; `Ok(false)` for a cryptographic rejection
    fn verify_detached(&self, public_key: &[u8], message: &[u8], signature: &[u8])
        -> Result<bool>;
}
