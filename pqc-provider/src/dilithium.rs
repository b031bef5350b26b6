//! Dilithium (CRYSTALS-Dilithium / FIPS 204) bindings
//!
//! # About Dilithium
//!
//! Dilithium is one of the digital signature schemes selected in the NIST
//! post-quantum cryptography standardization process (FIPS 204). Its security
//! rests on the Module-LWE and Module-SIS lattice problems. Signatures are
//! fixed-length.
//!
//! ## Parameter sets
//! | Parameter set | NIST level | Public key |
//! |---------------|-----------|------------|
//! | Dilithium2 | 2 | 1,312 bytes |
//! | **Dilithium3** | **3** | **1,952 bytes** |
//! | Dilithium5 | 5 | 2,592 bytes |
//!
//! The registry name `Dilithium` binds Dilithium3 unless configured otherwise:
//! level 3 keeps a comfortable margin for long-lived signatures while staying
//! well below the Dilithium5 signature size.
//!
//! Secret key and signature sizes differ between Dilithium round 3 and FIPS
//! 204 releases of the backend; `pqcrypto-dilithium` is the authority and
//! every size in [`SchemeDescriptor`] is read from it.

use crate::error::{Operation, PqcError, Result};
use crate::traits::{SchemeDescriptor, SchemeFamily, SignatureLength, SignatureScheme};
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _, SecretKey as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runs `$body` with `$alg` bound to the backend module of `$params`.
macro_rules! with_parameter_set {
    ($params:expr, $alg:ident => $body:expr) => {
        match $params {
            DilithiumParameterSet::Dilithium2 => {
                use pqcrypto_dilithium::dilithium2 as $alg;
                $body
            }
            DilithiumParameterSet::Dilithium3 => {
                use pqcrypto_dilithium::dilithium3 as $alg;
                $body
            }
            DilithiumParameterSet::Dilithium5 => {
                use pqcrypto_dilithium::dilithium5 as $alg;
                $body
            }
        }
    };
}

/// Dilithium parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DilithiumParameterSet {
    Dilithium2,
    #[default]
    Dilithium3,
    Dilithium5,
}

impl DilithiumParameterSet {
    pub fn name(&self) -> &'static str {
        match self {
            DilithiumParameterSet::Dilithium2 => "Dilithium2",
            DilithiumParameterSet::Dilithium3 => "Dilithium3",
            DilithiumParameterSet::Dilithium5 => "Dilithium5",
        }
    }

    pub fn nist_level(&self) -> u8 {
        match self {
            DilithiumParameterSet::Dilithium2 => 2,
            DilithiumParameterSet::Dilithium3 => 3,
            DilithiumParameterSet::Dilithium5 => 5,
        }
    }
}

impl fmt::Display for DilithiumParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dilithium signature scheme for one parameter set
///
/// # Example
///
/// ```rust
/// use pqc_provider::dilithium::{Dilithium, DilithiumParameterSet};
/// use pqc_provider::Scheme;
///
/// let scheme = Scheme::new(Dilithium::new(DilithiumParameterSet::Dilithium3));
/// let keypair = scheme.generate().unwrap();
///
/// let message = b"Hello, world! This is a test.";
/// let signature = keypair.sign(message).unwrap();
/// assert!(keypair.verify(message, &signature).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dilithium {
    params: DilithiumParameterSet,
}

impl Dilithium {
    pub fn new(params: DilithiumParameterSet) -> Self {
        Self { params }
    }

    pub fn parameter_set(&self) -> DilithiumParameterSet {
        self.params
    }
}

impl SignatureScheme for Dilithium {
    fn descriptor(&self) -> SchemeDescriptor {
        with_parameter_set!(self.params, alg => SchemeDescriptor {
            name: self.params.name(),
            family: SchemeFamily::Dilithium,
            nist_level: self.params.nist_level(),
            public_key_size: alg::public_key_bytes(),
            secret_key_size: alg::secret_key_bytes(),
            signature_size: alg::signature_bytes(),
            signature_length: SignatureLength::Fixed,
        })
    }

    /// Backend keygen seeds itself from the OS CSPRNG on every call.
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

            let signature = alg::detached_sign(message, &sk);
            Ok(signature.as_bytes().to_vec())
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
