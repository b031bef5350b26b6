/// Error type definitions
use std::fmt;
use thiserror::Error;

/// Operation during which an error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Generate,
    Sign,
    Verify,
    Lookup,
    Register,
    Import,
    Decode,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Generate => "generate",
            Operation::Sign => "sign",
            Operation::Verify => "verify",
            Operation::Lookup => "lookup",
            Operation::Register => "register",
            Operation::Import => "import",
            Operation::Decode => "decode",
        };
        f.write_str(name)
    }
}

/// Every scheme-level variant names the scheme and the operation that failed.
#[derive(Error, Debug)]
pub enum PqcError {
    #[error("Unknown signature scheme '{scheme}' ({operation})")]
    UnknownScheme { scheme: String, operation: Operation },

    #[error("Signature scheme '{scheme}' is already registered ({operation})")]
    DuplicateScheme { scheme: String, operation: Operation },

    #[error("Key generation failed for {scheme} ({operation}): {reason}")]
    KeyGenerationError {
        scheme: String,
        operation: Operation,
        reason: String,
    },

    #[error("Invalid key for {scheme} ({operation}): {reason}")]
    InvalidKey {
        scheme: String,
        operation: Operation,
        reason: String,
    },

    #[error("Signing failed for {scheme} ({operation}): {reason}")]
    SigningError {
        scheme: String,
        operation: Operation,
        reason: String,
    },

    #[error("Invalid signature format for {scheme} ({operation}): {reason}")]
    InvalidSignatureFormat {
        scheme: String,
        operation: Operation,
        reason: String,
    },

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Global registry has already been initialized")]
    RegistryAlreadyInitialized,
}

impl PqcError {
    pub(crate) fn unknown_scheme(name: &str) -> Self {
        PqcError::UnknownScheme {
            scheme: name.to_string(),
            operation: Operation::Lookup,
        }
    }

    pub(crate) fn duplicate_scheme(name: &str) -> Self {
        PqcError::DuplicateScheme {
            scheme: name.to_string(),
            operation: Operation::Register,
        }
    }

    pub(crate) fn key_generation(scheme: &str, reason: impl Into<String>) -> Self {
        PqcError::KeyGenerationError {
            scheme: scheme.to_string(),
            operation: Operation::Generate,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_key(scheme: &str, operation: Operation, reason: impl Into<String>) -> Self {
        PqcError::InvalidKey {
            scheme: scheme.to_string(),
            operation,
            reason: reason.into(),
        }
    }

    pub(crate) fn signing(scheme: &str, reason: impl Into<String>) -> Self {
        PqcError::SigningError {
            scheme: scheme.to_string(),
            operation: Operation::Sign,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_signature(
        scheme: &str,
        operation: Operation,
        reason: impl Into<String>,
    ) -> Self {
        PqcError::InvalidSignatureFormat {
            scheme: scheme.to_string(),
            operation,
            reason: reason.into(),
        }
    }

    /// Scheme name attached to the error, if any
    pub fn scheme(&self) -> Option<&str> {
        match self {
            PqcError::UnknownScheme { scheme, .. }
            | PqcError::DuplicateScheme { scheme, .. }
            | PqcError::KeyGenerationError { scheme, .. }
            | PqcError::InvalidKey { scheme, .. }
            | PqcError::SigningError { scheme, .. }
            | PqcError::InvalidSignatureFormat { scheme, .. } => Some(scheme),
            _ => None,
        }
    }

    /// Operation attached to the error, if any
    pub fn operation(&self) -> Option<Operation> {
        match self {
            PqcError::UnknownScheme { operation, .. }
            | PqcError::DuplicateScheme { operation, .. }
            | PqcError::KeyGenerationError { operation, .. }
            | PqcError::InvalidKey { operation, .. }
            | PqcError::SigningError { operation, .. }
            | PqcError::InvalidSignatureFormat { operation, .. } => Some(*operation),
            PqcError::EncodingError(_) => Some(Operation::Decode),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for PqcError {
    fn from(err: config::ConfigError) -> Self {
        PqcError::Config(err.to_string())
    }
}

impl From<hex::FromHexError> for PqcError {
    fn from(err: hex::FromHexError) -> Self {
        PqcError::EncodingError(format!("invalid hex: {}", err))
    }
}

impl From<base64::DecodeError> for PqcError {
    fn from(err: base64::DecodeError) -> Self {
        PqcError::EncodingError(format!("invalid base64: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, PqcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_carry_scheme_and_operation() {
        let err = PqcError::invalid_key("Falcon-512", Operation::Verify, "wrong length");
        assert_eq!(err.scheme(), Some("Falcon-512"));
        assert_eq!(err.operation(), Some(Operation::Verify));

        let msg = err.to_string();
        assert!(msg.contains("Falcon-512"));
        assert!(msg.contains("verify"));
        assert!(msg.contains("wrong length"));
    }

    #[test]
    fn test_unknown_scheme_message() {
        let err = PqcError::unknown_scheme("RSAKeyPair");
        assert_eq!(err.to_string(), "Unknown signature scheme 'RSAKeyPair' (lookup)");
        assert_eq!(err.operation(), Some(Operation::Lookup));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: PqcError = config::ConfigError::NotFound("enabled".to_string()).into();
        assert!(matches!(err, PqcError::Config(ref msg) if msg.contains("enabled")));
        assert_eq!(err.scheme(), None);
    }

    #[test]
    fn test_hex_error_conversion() {
        let err: PqcError = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, PqcError::EncodingError(_)));
        assert_eq!(err.operation(), Some(Operation::Decode));
        assert_eq!(err.scheme(), None);
    }
}
