//! Post-quantum signature provider
//!
//! Uniform keypair generation, signing and verification over NIST
//! post-quantum signature schemes: Dilithium (FIPS 204) and Falcon. Schemes are
//! picked by name through a [`Registry`]; every scheme behaves the same way
//! behind the [`Scheme`] handle.
//!
//! # Quick Start
//!
//! ```rust
//! use pqc_provider::Registry;
//!
//! let message = b"Hello, world! This is a test.";
//!
//! for name in Registry::global().available_schemes() {
//!     let scheme = pqc_provider::lookup(&name).unwrap();
//!
//!     // Generate keypair
//!     let keypair = scheme.generate().unwrap();
//!
//!     // Sign message
//!     let signature = keypair.sign(message).unwrap();
//!
//!     // Verify with the raw public key bytes
//!     let is_valid = scheme
//!         .verify_bytes(keypair.public_key().as_bytes(), message, signature.as_bytes())
//!         .unwrap();
//!     assert!(is_valid);
//! }
//!
//! assert!(pqc_provider::lookup("RSAKeyPair").is_err());
//! ```

pub mod config;
pub mod dilithium;
pub mod error;
pub mod falcon;
pub mod keypair;
pub mod keys;
pub mod registry;
pub mod scheme;
pub mod traits;

// Re-export commonly used types
pub use config::ProviderConfig;
pub use error::{Operation, PqcError, Result};
pub use keypair::KeyPair;
pub use keys::{KeyKind, KeyMaterial, Signature};
pub use registry::Registry;
pub use scheme::Scheme;
pub use traits::{SchemeDescriptor, SchemeFamily, SignatureLength, SignatureScheme};

use std::collections::BTreeSet;

/// Look `name` up in the global registry
pub fn lookup(name: &str) -> Result<Scheme> {
    Registry::global().lookup(name)
}

/// Names registered in the global registry
pub fn available_schemes() -> BTreeSet<String> {
    Registry::global().available_schemes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_registry_integration() {
        let scheme = lookup("Dilithium").unwrap();
        let keypair = scheme.generate().unwrap();

        let message = b"Integration test message";
        let signature = keypair.sign(message).unwrap();
        let is_valid = keypair.verify(message, &signature).unwrap();

        assert!(is_valid);
        assert!(available_schemes().contains("Falcon"));
    }
}
