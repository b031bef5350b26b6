//! Scheme handle
//!
//! [`Scheme`] wraps a [`SignatureScheme`] binding and gives every parameter set
//! the same contract: key and signature lengths are validated here, errors are
//! tagged with the scheme name and operation, and keys are only ever handed to
//! the backend in the role they were created for.

use crate::error::{Operation, PqcError, Result};
use crate::keypair::KeyPair;
use crate::keys::{KeyKind, KeyMaterial, Signature};
use crate::traits::{SchemeDescriptor, SignatureScheme};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Cloneable, thread-safe handle to a signature scheme
#[derive(Clone)]
pub struct Scheme {
    inner: Arc<dyn SignatureScheme>,
    descriptor: SchemeDescriptor,
}

impl Scheme {
    pub fn new<S: SignatureScheme + 'static>(scheme: S) -> Self {
        Self::from_arc(Arc::new(scheme))
    }

    pub fn from_arc(inner: Arc<dyn SignatureScheme>) -> Self {
        let descriptor = inner.descriptor();
        Self { inner, descriptor }
    }

    pub fn descriptor(&self) -> &SchemeDescriptor {
        &self.descriptor
    }

    /// Parameter set name, e.g. `Falcon-512`
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn public_key_size(&self) -> usize {
        self.descriptor.public_key_size
    }

    pub fn secret_key_size(&self) -> usize {
        self.descriptor.secret_key_size
    }

    /// Exact (Dilithium) or maximum (Falcon) signature size
    pub fn signature_size(&self) -> usize {
        self.descriptor.signature_size
    }

    /// Generate a fresh keypair
    ///
    /// # Errors
    /// - `KeyGenerationError` if the backend fails or returns keys of the
    ///   wrong size; no partial keypair is ever returned
    pub fn generate(&self) -> Result<KeyPair> {
        let name = self.name();
        let (pk, sk) = self.inner.keypair()?;

        // Wrap the secret first so it is wiped even if validation fails.
        let secret_key = KeyMaterial::new(name, KeyKind::Secret, sk);
        let public_key = KeyMaterial::new(name, KeyKind::Public, pk);

        if public_key.len() != self.public_key_size() {
            return Err(PqcError::key_generation(
                name,
                format!(
                    "backend returned public key of {} bytes, expected {}",
                    public_key.len(),
                    self.public_key_size()
                ),
            ));
        }

        if secret_key.len() != self.secret_key_size() {
            return Err(PqcError::key_generation(
                name,
                format!(
                    "backend returned secret key of {} bytes, expected {}",
                    secret_key.len(),
                    self.secret_key_size()
                ),
            ));
        }

        info!(
            "Generated {} keypair: pk_len={} bytes, sk_len={} bytes, pk_fingerprint={}",
            name,
            public_key.len(),
            secret_key.len(),
            public_key.fingerprint()
        );

        Ok(KeyPair::new(self.clone(), public_key, secret_key))
    }

    /// Sign `message` with `secret_key`
    ///
    /// # Errors
    /// - `InvalidKey` if the key is not a secret key of this scheme
    /// - `SigningError` if the backend rejects the key or produces a signature
    ///   outside the scheme's size bounds
    pub fn sign(&self, secret_key: &KeyMaterial, message: &[u8]) -> Result<Signature> {
        self.check_key(secret_key, KeyKind::Secret, Operation::Sign)?;

        let signature = self.inner.sign_detached(secret_key.as_bytes(), message)?;

        if !self.descriptor.accepts_signature_len(signature.len()) {
            return Err(PqcError::signing(
                self.name(),
                format!(
                    "backend produced a {}-byte signature, limit is {} bytes",
                    signature.len(),
                    self.signature_size()
                ),
            ));
        }

        debug!(
            "Signed message with {}: msg_len={} bytes, sig_len={} bytes",
            self.name(),
            message.len(),
            signature.len()
        );

        Ok(Signature::from_bytes(signature))
    }

    /// Verify `signature` over `message`
    ///
    /// # Returns
    /// - `Ok(true)`: signature is valid
    /// - `Ok(false)`: well-formed but invalid signature
    ///
    /// # Errors
    /// - `InvalidKey` if the key is not a public key of this scheme
    /// - `InvalidSignatureFormat` if the signature length is impossible for
    ///   this scheme
    pub fn verify(
        &self,
        public_key: &KeyMaterial,
        message: &[u8],
        signature: &Signature,
    ) -> Result<bool> {
        self.check_key(public_key, KeyKind::Public, Operation::Verify)?;
        self.verify_raw(public_key.as_bytes(), message, signature.as_bytes())
    }

    /// [`Scheme::verify`] over raw bytes, e.g. a public key received from a peer
    pub fn verify_bytes(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
        if public_key.len() != self.public_key_size() {
            return Err(PqcError::invalid_key(
                self.name(),
                Operation::Verify,
                format!(
                    "Invalid public key length: expected {} bytes, got {}",
                    self.public_key_size(),
                    public_key.len()
                ),
            ));
        }

        self.verify_raw(public_key, message, signature)
    }

    /// Import public key bytes for this scheme
    pub fn public_key_from_bytes(&self, bytes: &[u8]) -> Result<KeyMaterial> {
        self.import(KeyKind::Public, bytes)
    }

    /// Import secret key bytes for this scheme
    pub fn secret_key_from_bytes(&self, bytes: &[u8]) -> Result<KeyMaterial> {
        self.import(KeyKind::Secret, bytes)
    }

    fn import(&self, kind: KeyKind, bytes: &[u8]) -> Result<KeyMaterial> {
        let expected = self.key_size(kind);
        if bytes.len() != expected {
            return Err(PqcError::invalid_key(
                self.name(),
                Operation::Import,
                format!(
                    "Invalid {} key length: expected {} bytes, got {}",
                    kind,
                    expected,
                    bytes.len()
                ),
            ));
        }

        Ok(KeyMaterial::new(self.name(), kind, bytes.to_vec()))
    }

    fn verify_raw(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
        if !self.descriptor.accepts_signature_len(signature.len()) {
            return Err(PqcError::invalid_signature(
                self.name(),
                Operation::Verify,
                format!(
                    "signature of {} bytes is outside the {:?} limit of {} bytes",
                    signature.len(),
                    self.descriptor.signature_length,
                    self.signature_size()
                ),
            ));
        }

        let is_valid = self.inner.verify_detached(public_key, message, signature)?;

        debug!(
            "Signature verification with {}: valid={}, msg_len={} bytes",
            self.name(),
            is_valid,
            message.len()
        );

        Ok(is_valid)
    }

    fn key_size(&self, kind: KeyKind) -> usize {
        match kind {
            KeyKind::Public => self.public_key_size(),
            KeyKind::Secret => self.secret_key_size(),
        }
    }

    fn check_key(&self, key: &KeyMaterial, kind: KeyKind, operation: Operation) -> Result<()> {
        if key.algorithm() != self.name() {
            return Err(PqcError::invalid_key(
                self.name(),
                operation,
                format!("key belongs to {}", key.algorithm()),
            ));
        }

        if key.kind() != kind {
            return Err(PqcError::invalid_key(
                self.name(),
                operation,
                format!("expected a {} key, got a {} key", kind, key.kind()),
            ));
        }

        let expected = self.key_size(kind);
        if key.len() != expected {
            return Err(PqcError::invalid_key(
                self.name(),
                operation,
                format!(
                    "Invalid {} key length: expected {} bytes, got {}",
                    kind,
                    expected,
                    key.len()
                ),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheme")
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{SchemeFamily, SignatureLength};

    /// Backend returning whatever sizes it is told to, for exercising the checks.
    struct FakeBackend {
        pk_len: usize,
        sk_len: usize,
        sig_len: usize,
    }

    impl SignatureScheme for FakeBackend {
        fn descriptor(&self) -> SchemeDescriptor {
            SchemeDescriptor {
                name: "Fake",
                family: SchemeFamily::Falcon,
                nist_level: 1,
                public_key_size: 8,
                secret_key_size: 16,
                signature_size: 32,
                signature_length: SignatureLength::Bounded,
            }
        }

        fn keypair(&self) -> Result<(Vec<u8>, Vec<u8>)> {
            Ok((vec![1; self.pk_len], vec![2; self.sk_len]))
        }

        fn sign_detached(&self, _secret_key: &[u8], _message: &[u8]) -> Result<Vec<u8>> {
            Ok(vec![3; self.sig_len])
        }

        fn verify_detached(&self, _pk: &[u8], message: &[u8], _sig: &[u8]) -> Result<bool> {
            Ok(message == b"accept")
        }
    }

    fn fake(pk_len: usize, sk_len: usize, sig_len: usize) -> Scheme {
        Scheme::new(FakeBackend {
            pk_len,
            sk_len,
            sig_len,
        })
    }

    #[test]
    fn test_generate_rejects_wrong_public_key_size() {
        let err = fake(7, 16, 10).generate().unwrap_err();
        assert!(matches!(err, PqcError::KeyGenerationError { .. }));
        assert_eq!(err.scheme(), Some("Fake"));
        assert_eq!(err.operation(), Some(Operation::Generate));
    }

    #[test]
    fn test_generate_rejects_wrong_secret_key_size() {
        let err = fake(8, 15, 10).generate().unwrap_err();
        assert!(matches!(err, PqcError::KeyGenerationError { .. }));
    }

    #[test]
    fn test_sign_rejects_oversized_signature() {
        let keypair = fake(8, 16, 33).generate().unwrap();
        let err = keypair.sign(b"msg").unwrap_err();
        assert!(matches!(err, PqcError::SigningError { .. }));
    }

    #[test]
    fn test_sign_requires_secret_key() {
        let scheme = fake(8, 16, 10);
        let keypair = scheme.generate().unwrap();

        let err = scheme.sign(keypair.public_key(), b"msg").unwrap_err();
        assert!(matches!(err, PqcError::InvalidKey { .. }));
        assert_eq!(err.operation(), Some(Operation::Sign));
    }

    #[test]
    fn test_verify_requires_public_key() {
        let scheme = fake(8, 16, 10);
        let keypair = scheme.generate().unwrap();
        let signature = keypair.sign(b"accept").unwrap();

        let err = scheme
            .verify(keypair.secret_key(), b"accept", &signature)
            .unwrap_err();
        assert!(matches!(err, PqcError::InvalidKey { .. }));
    }

    #[test]
    fn test_verify_distinguishes_malformed_from_invalid() {
        let scheme = fake(8, 16, 10);
        let keypair = scheme.generate().unwrap();
        let signature = keypair.sign(b"accept").unwrap();

        assert!(keypair.verify(b"accept", &signature).unwrap());
        assert!(!keypair.verify(b"reject", &signature).unwrap());

        let empty = Signature::from_bytes(Vec::new());
        assert!(matches!(
            keypair.verify(b"accept", &empty),
            Err(PqcError::InvalidSignatureFormat { .. })
        ));

        let oversized = Signature::from_bytes(vec![0; 33]);
        assert!(matches!(
            keypair.verify(b"accept", &oversized),
            Err(PqcError::InvalidSignatureFormat { .. })
        ));
    }

    #[test]
    fn test_verify_bytes_checks_public_key_length() {
        let scheme = fake(8, 16, 10);
        let err = scheme.verify_bytes(&[0; 7], b"accept", &[0; 10]).unwrap_err();
        assert!(matches!(err, PqcError::InvalidKey { .. }));
        assert!(scheme.verify_bytes(&[0; 8], b"accept", &[0; 10]).unwrap());
    }

    #[test]
    fn test_import_validates_length() {
        let scheme = fake(8, 16, 10);

        let pk = scheme.public_key_from_bytes(&[9; 8]).unwrap();
        assert_eq!(pk.kind(), KeyKind::Public);
        assert_eq!(pk.algorithm(), "Fake");

        let err = scheme.secret_key_from_bytes(&[9; 8]).unwrap_err();
        assert!(matches!(err, PqcError::InvalidKey { .. }));
        assert_eq!(err.operation(), Some(Operation::Import));
    }
}
