//! Falcon (NTRU lattice, fast-Fourier sampling) bindings
//!
//! Falcon signatures are compressed and therefore variable-length; the
//! backend reports the maximum size, which is what the descriptor carries.

use crate::error::{Operation, PqcError, Result};
use crate::traits::{SchemeDescriptor, SchemeFamily, SignatureLength, SignatureScheme};
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _, SecretKey as _};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! with_parameter_set {
    ($params:expr, $alg:ident => $body:expr) => {
        match $params {
            FalconParameterSet::Falcon512 => {
                use pqcrypto_falcon::falcon512 as $alg;
                $body
            }
            FalconParameterSet::Falcon1024 => {
                use pqcrypto_falcon::falcon1024 as $alg;
                $body
            }
        }
    };
}

/// Falcon parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FalconParameterSet {
    #[default]
    #[serde(rename = "Falcon-512", alias = "Falcon512")]
    Falcon512,
    #[serde(rename = "Falcon-1024", alias = "Falcon1024")]
    Falcon1024,
}

impl FalconParameterSet {
    pub fn name(&self) -> &'static str {
        match self {
            FalconParameterSet::Falcon512 => "Falcon-512",
            FalconParameterSet::Falcon1024 => "Falcon-1024",
        }
    }

    pub fn nist_level(&self) -> u8 {
        match self {
            FalconParameterSet::Falcon512 => 1,
            FalconParameterSet::Falcon1024 => 5,
        }
    }
}

impl fmt::Display for FalconParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Falcon signature scheme for one parameter set
///
/// # Example
///
/// ```rust
/// use pqc_provider::falcon::{Falcon, FalconParameterSet};
/// use pqc_provider::Scheme;
///
/// let scheme = Scheme::new(Falcon::new(FalconParameterSet::Falcon512));
/// let keypair = scheme.generate().unwrap();
///
/// let message = b"Hello, world! This is a test.";
/// let signature = keypair.sign(message).unwrap();
/// assert!(signature.len() <= scheme.signature_size());
/// assert!(keypair.verify(message, &signature).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Falcon {
    params: FalconParameterSet,
}

impl Falcon {
    pub fn new(params: FalconParameterSet) -> Self {
        Self { params }
    }

    pub fn parameter_set(&self) -> FalconParameterSet {
        self.params
    }
}

impl SignatureScheme for Falcon {
    fn descriptor(&self) -> SchemeDescriptor {
        with_parameter_set!(self.params, alg => SchemeDescriptor {
            name: self.params.name(),
            family: SchemeFamily::Falcon,
            nist_level: self.params.nist_level(),
            public_key_size: alg::public_key_bytes(),
            secret_key_size: alg::secret_key_bytes(),
            signature_size: alg::signature_bytes(),
            signature_length: SignatureLength::Bounded,
        })
    }

    fn keypair(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        with_parameter_set!(self.params, alg => {
            let (pk, sk) = alg::keypair();
            Ok((pk.as_bytes().to_vec(), sk.as_bytes().to_vec()))
        })
    }

    fn sign_detached(&self, secret_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        let name = self.params.name();
        with_parameter_set!(self.params, alg => {
            let sk = alg::SecretKey::from_bytes(secret_key).map_err(|e| {
                PqcError::signing(name, format!("Failed to parse secret key: {:?}", e))
            })?;

            Ok(alg::detached_sign(message, &sk).as_bytes().to_vec())
        })
    }

    fn verify_detached(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
        let name = self.params.name();
        with_parameter_set!(self.params, alg => {
            let pk = alg::PublicKey::from_bytes(public_key).map_err(|e| {
                PqcError::invalid_key(
                    name,
                    Operation::Verify,
                    format!("Failed to parse public key: {:?}", e),
                )
            })?;

            let sig = alg::DetachedSignature::from_bytes(signature).map_err(|e| {
                PqcError::invalid_signature(
                    name,
                    Operation::Verify,
                    format!("Failed to parse signature: {:?}", e),
                )
            })?;

            Ok(alg::verify_detached_signature(&sig, message, &pk).is_ok())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falcon512_sizes() {
        let desc = Falcon::default().descriptor();

        assert_eq!(desc.name, "Falcon-512");
        assert_eq!(desc.nist_level, 1);
        assert_eq!(desc.public_key_size, 897);
        assert_eq!(desc.signature_length, SignatureLength::Bounded);

        let (pk, sk) = Falcon::default().keypair().unwrap();
        assert_eq!(pk.len(), desc.public_key_size);
        assert_eq!(sk.len(), desc.secret_key_size);
    }

    #[test]
    fn test_sign_and_verify() {
        let scheme = Falcon::default();
        let (pk, sk) = scheme.keypair().unwrap();

        let message = b"Hello, world! This is a test.";
        let signature = scheme.sign_detached(&sk, message).unwrap();
        assert!(signature.len() <= scheme.descriptor().signature_size);

        assert!(scheme.verify_detached(&pk, message, &signature).unwrap());
        assert!(!scheme.verify_detached(&pk, b"Hello, world!", &signature).unwrap());
    }

    #[test]
    fn test_falcon1024_round_trip() {
        let scheme = Falcon::new(FalconParameterSet::Falcon1024);
        let (pk, sk) = scheme.keypair().unwrap();

        let signature = scheme.sign_detached(&sk, b"falcon-1024").unwrap();
        assert!(scheme.verify_detached(&pk, b"falcon-1024", &signature).unwrap());
        assert_eq!(scheme.descriptor().public_key_size, 1793);
    }

    #[test]
    fn test_parameter_set_serde_names() {
        let parsed: FalconParameterSet = serde_json::from_str("\"Falcon-1024\"").unwrap();
        assert_eq!(parsed, FalconParameterSet::Falcon1024);

        let alias: FalconParameterSet = serde_json::from_str("\"Falcon512\"").unwrap();
        assert_eq!(alias, FalconParameterSet::Falcon512);
    }
}
