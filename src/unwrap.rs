//! Key unwrap service: length check, key decoding, HPKE recipient open.
//!
//!   1. wrapped_key.len() == 48                       else InvalidWrappedKey
//!   2. format tag known                               else InvalidPrivateKeyFormat
//!   3. private key decodes (PEM -> DER -> X9.63)      else InvalidPrivateKey
//!   4. setup_receiver(Base, sk, enc, info = "")       else DecapsulationFailed
//!   5. ctx.open(wrapped_key, aad = "")                else AuthenticationFailed

use hpke::{Deserializable, Kem as KemTrait, OpModeR};
use p256::SecretKey;
use zeroize::Zeroizing;

use crate::error::UnwrapError;
use crate::format::PrivateKeyFormat;
use crate::key::{self, P256KeyParser, PrivateKeyParser};
use crate::suite::{Aead, Kdf, Kem, AAD, INFO, WRAPPED_KEY_BYTES};

/// Stateless unwrap engine. Holds only the key decoder; safe to share
/// across threads when the decoder is.
#[derive(Debug, Clone, Default)]
pub struct KeyUnwrapper<P = P256KeyParser> {
    parser: P,
}

impl KeyUnwrapper<P256KeyParser> {
    pub fn new() -> Self {
        Self {
            parser: P256KeyParser,
        }
    }
}

impl<P: PrivateKeyParser> KeyUnwrapper<P> {
    /// Use a custom key decoder.
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// Unwrap with a host-supplied numeric format tag (0=Any, 1=PEM, 2=DER, 3=X963).
    pub fn unwrap_raw(
        &self,
        raw_private_key: &[u8],
        format: i64,
        encapsulated_key: &[u8],
        wrapped_key: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, UnwrapError> {
        let result = check_wrapped_key(wrapped_key)
            .and_then(|()| PrivateKeyFormat::from_raw(format))
            .and_then(|format| self.decode_and_open(raw_private_key, format, encapsulated_key, wrapped_key));
        log_outcome(&result);
        result
    }

    /// Unwrap with a typed format selector.
    pub fn unwrap(
        &self,
        raw_private_key: &[u8],
        format: PrivateKeyFormat,
        encapsulated_key: &[u8],
        wrapped_key: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, UnwrapError> {
        let result = check_wrapped_key(wrapped_key)
            .and_then(|()| self.decode_and_open(raw_private_key, format, encapsulated_key, wrapped_key));
        log_outcome(&result);
        result
    }

    fn decode_and_open(
        &self,
        raw_private_key: &[u8],
        format: PrivateKeyFormat,
        encapsulated_key: &[u8],
        wrapped_key: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, UnwrapError> {
        tracing::debug!(
            format = %format,
            key_len = raw_private_key.len(),
            encapsulated_len = encapsulated_key.len(),
            "unwrapping key"
        );
        let sk = key::parse_private_key(&self.parser, format, raw_private_key)?;
        tracing::debug!(recipient = %key::fingerprint(&sk), "recipient key ready");
        open(&sk, encapsulated_key, wrapped_key)
    }
}

/// One-shot unwrap with the default P-256 decoder.
///
/// # Example
///
/// ```
/// use hpke_unwrap::{unwrap_private_key, UnwrapError};
///
/// let err = unwrap_private_key(b"", 0, b"", &[0u8; 47]).unwrap_err();
/// assert!(matches!(err, UnwrapError::InvalidWrappedKey(_)));
/// ```
pub fn unwrap_private_key(
    raw_private_key: &[u8],
    format: i64,
    encrypted_request: &[u8],
    wrapped_key: &[u8],
) -> Result<Zeroizing<Vec<u8>>, UnwrapError> {
    KeyUnwrapper::new().unwrap_raw(raw_private_key, format, encrypted_request, wrapped_key)
}

fn check_wrapped_key(wrapped_key: &[u8]) -> Result<(), UnwrapError> {
    if wrapped_key.len() != WRAPPED_KEY_BYTES {
        return Err(UnwrapError::InvalidWrappedKey("Wrapped key is not 0x30 bytes"));
    }
    Ok(())
}

/// Single-use recipient context: decapsulate, derive, open once, drop.
fn open(
    sk: &SecretKey,
    encapsulated_key: &[u8],
    wrapped_key: &[u8],
) -> Result<Zeroizing<Vec<u8>>, UnwrapError> {
    let scalar = key::scalar_bytes(sk);
    let recipient_sk = <Kem as KemTrait>::PrivateKey::from_bytes(scalar.as_slice())
        .map_err(|_| UnwrapError::InvalidPrivateKey("Invalid private key"))?;

    let encapped = <Kem as KemTrait>::EncappedKey::from_bytes(encapsulated_key)
        .map_err(|_| UnwrapError::DecapsulationFailed)?;

    let mut ctx = hpke::setup_receiver::<Aead, Kdf, Kem>(&OpModeR::Base, &recipient_sk, &encapped, INFO)
        .map_err(|_| UnwrapError::DecapsulationFailed)?;

    let plaintext = ctx
        .open(wrapped_key, AAD)
        .map_err(|_| UnwrapError::AuthenticationFailed)?;

    Ok(Zeroizing::new(plaintext))
}

fn log_outcome(result: &Result<Zeroizing<Vec<u8>>, UnwrapError>) {
    match result {
        Ok(pt) => tracing::debug!(plaintext_len = pt.len(), "key unwrapped"),
        Err(e) => tracing::warn!(kind = e.kind(), "key unwrap rejected"),
    }
}
