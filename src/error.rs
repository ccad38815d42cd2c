//! Error types for key unwrapping and archive auth-data parsing.
//!
//! No variant carries key material, plaintext or derived secrets.

use thiserror::Error;

/// Errors returned by [`crate::unwrap_private_key`] and [`crate::KeyUnwrapper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnwrapError {
    /// The format selector is not one of 0=Any, 1=PEM, 2=DER, 3=X963.
    #[error("invalid private key format: {0}")]
    InvalidPrivateKeyFormat(i64),

    /// The wrapped-key buffer failed a structural precondition.
    #[error("invalid wrapped key: {0}")]
    InvalidWrappedKey(&'static str),

    /// No attempted encoding produced a P-256 private key.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(&'static str),

    /// The encapsulated key was malformed or decapsulation failed.
    #[error("decapsulation failed")]
    DecapsulationFailed,

    /// AEAD tag verification failed.
    #[error("authentication failed")]
    AuthenticationFailed,
}

impl UnwrapError {
    /// Short label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPrivateKeyFormat(_) => "invalid_private_key_format",
            Self::InvalidWrappedKey(_) => "invalid_wrapped_key",
            Self::InvalidPrivateKey(_) => "invalid_private_key",
            Self::DecapsulationFailed => "decapsulation_failed",
            Self::AuthenticationFailed => "authentication_failed",
        }
    }

    /// True when the caller supplied structurally bad input, false when
    /// cryptographic verification rejected it.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPrivateKeyFormat(_) | Self::InvalidWrappedKey(_) | Self::InvalidPrivateKey(_)
        )
    }
}

/// Errors returned while reading an AEA1 archive header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthDataError {
    #[error("archive header truncated")]
    Truncated,

    #[error("bad archive magic")]
    BadMagic,

    #[error("unsupported archive profile: {0}")]
    UnsupportedProfile(u32),

    #[error("archive has no auth data")]
    EmptyAuthData,

    #[error("malformed auth data field")]
    MalformedField,

    #[error("missing auth data field: {0}")]
    MissingField(&'static str),

    #[error("invalid fcs-response JSON")]
    InvalidJson,

    #[error("invalid base64 in fcs-response")]
    InvalidBase64,

    #[error(transparent)]
    Unwrap(#[from] UnwrapError),
}

impl From<serde_json::Error> for AuthDataError {
    fn from(_: serde_json::Error) -> Self {
        AuthDataError::InvalidJson
    }
}

impl From<base64::DecodeError> for AuthDataError {
    fn from(_: base64::DecodeError) -> Self {
        AuthDataError::InvalidBase64
    }
}
