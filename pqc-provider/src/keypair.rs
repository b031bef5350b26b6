/// Keypair bound to the scheme that generated it
use crate::error::Result;
use crate::keys::{KeyMaterial, Signature};
use crate::scheme::Scheme;
use std::fmt;

/// Public and secret key generated together by one scheme
///
/// Only [`Scheme::generate`] creates keypairs, so both keys are always present
/// and length-checked.
#[derive(Clone)]
pub struct KeyPair {
    scheme: Scheme,
    public_key: KeyMaterial,
    secret_key: KeyMaterial,
}

impl KeyPair {
    pub(crate) fn new(scheme: Scheme, public_key: KeyMaterial, secret_key: KeyMaterial) -> Self {
        Self {
            scheme,
            public_key,
            secret_key,
        }
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn public_key(&self) -> &KeyMaterial {
        &self.public_key
    }

    /// # Security Warning
    /// Secret keys should not be transmitted over the network or logged
    pub fn secret_key(&self) -> &KeyMaterial {
        &self.secret_key
    }

    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        self.scheme.sign(&self.secret_key, message)
    }

    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<bool> {
        self.scheme.verify(&self.public_key, message, signature)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("scheme", &self.scheme.name())
            .field("public_key", &self.public_key)
            .field("secret_key", &self.secret_key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::dilithium::Dilithium;
    use crate::falcon::Falcon;
    use crate::keys::KeyKind;
    use crate::scheme::Scheme;

    #[test]
    fn test_keys_are_tagged() {
        let keypair = Scheme::new(Falcon::default()).generate().unwrap();

        assert_eq!(keypair.public_key().kind(), KeyKind::Public);
        assert_eq!(keypair.secret_key().kind(), KeyKind::Secret);
        assert_eq!(keypair.public_key().algorithm(), "Falcon-512");
        assert_eq!(keypair.scheme().name(), "Falcon-512");
    }

    #[test]
    fn test_debug_redacts_secret_key() {
        let keypair = Scheme::new(Dilithium::default()).generate().unwrap();
        let printed = format!("{:?}", keypair);

        assert!(printed.contains("Dilithium3"));
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains(&keypair.secret_key().to_hex()[..32]));
    }

    #[test]
    fn test_clone_signs_with_same_key() {
        let keypair = Scheme::new(Dilithium::default()).generate().unwrap();
        let copy = keypair.clone();

        let signature = copy.sign(b"cloned").unwrap();
        assert!(keypair.verify(b"cloned", &signature).unwrap());
        assert_eq!(copy.public_key(), keypair.public_key());
    }
}
