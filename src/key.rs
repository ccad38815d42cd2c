//! Recipient private key decoding.
//!
//! Accepted encodings for a P-256 key-agreement private key:
//!
//!   PEM   UTF-8 text, `EC PRIVATE KEY` (SEC1) or `PRIVATE KEY` (PKCS#8)
//!   DER   SEC1 ECPrivateKey or PKCS#8 PrivateKeyInfo
//!   X963  0x04 || x[32] || y[32] || d[32]   (97 bytes)
//!
//! Individual decoders report "no match" as `None`. Only the aggregate
//! outcome of [`parse_private_key`] is an error.

use p256::{
    elliptic_curve::sec1::ToEncodedPoint, pkcs8::DecodePrivateKey, FieldBytes, SecretKey,
};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::UnwrapError;
use crate::format::PrivateKeyFormat;
use crate::suite::{P256_POINT_BYTES, P256_SCALAR_BYTES, X963_PRIVATE_KEY_BYTES};

const INVALID_PRIVATE_KEY: &str = "Invalid private key";

// ---------------------------------------------------------------------------
// Parser trait + P-256 implementation
// ---------------------------------------------------------------------------

/// Decodes raw key bytes in one concrete encoding.
///
/// Called only with `Pem`, `Der` or `X963`; the `Any` fallback order is
/// driven by [`parse_private_key`].
pub trait PrivateKeyParser {
    fn parse(&self, format: PrivateKeyFormat, raw: &[u8]) -> Option<SecretKey>;
}

/// Default decoder backed by the `p256` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct P256KeyParser;

impl PrivateKeyParser for P256KeyParser {
    fn parse(&self, format: PrivateKeyFormat, raw: &[u8]) -> Option<SecretKey> {
        match format {
            PrivateKeyFormat::Pem => from_pem(raw),
            PrivateKeyFormat::Der => from_der(raw),
            PrivateKeyFormat::X963 => from_x963(raw),
            PrivateKeyFormat::Any => None,
        }
    }
}

/// Try each candidate encoding for `format` in order; first success wins.
pub fn parse_private_key<P: PrivateKeyParser + ?Sized>(
    parser: &P,
    format: PrivateKeyFormat,
    raw: &[u8],
) -> Result<SecretKey, UnwrapError> {
    for &candidate in format.candidates() {
        if let Some(sk) = parser.parse(candidate, raw) {
            tracing::debug!(requested = %format, matched = %candidate, "private key decoded");
            return Ok(sk);
        }
    }
    Err(UnwrapError::InvalidPrivateKey(INVALID_PRIVATE_KEY))
}

// ---------------------------------------------------------------------------
// Individual decoders
// ---------------------------------------------------------------------------

/// PEM applies only to UTF-8 input; anything else is simply not PEM.
pub fn from_pem(raw: &[u8]) -> Option<SecretKey> {
    let text = core::str::from_utf8(raw).ok()?.trim();
    SecretKey::from_pkcs8_pem(text)
        .ok()
        .or_else(|| SecretKey::from_sec1_pem(text).ok())
}

pub fn from_der(raw: &[u8]) -> Option<SecretKey> {
    SecretKey::from_sec1_der(raw)
        .ok()
        .or_else(|| SecretKey::from_pkcs8_der(raw).ok())
}

/// The embedded public point must match the one derived from the scalar.
pub fn from_x963(raw: &[u8]) -> Option<SecretKey> {
    if raw.len() != X963_PRIVATE_KEY_BYTES || raw[0] != 0x04 {
        return None;
    }
    let (point, scalar) = raw.split_at(P256_POINT_BYTES);
    let sk = SecretKey::from_bytes(FieldBytes::from_slice(scalar)).ok()?;

    let derived = sk.public_key().to_encoded_point(false);
    if bool::from(derived.as_bytes().ct_eq(point)) {
        Some(sk)
    } else {
        None
    }
}

/// Serialize as ANSI X9.63: 0x04 || x || y || d.
pub fn to_x963(sk: &SecretKey) -> Zeroizing<Vec<u8>> {
    let mut out = Zeroizing::new(Vec::with_capacity(X963_PRIVATE_KEY_BYTES));
    out.extend_from_slice(sk.public_key().to_encoded_point(false).as_bytes());
    out.extend_from_slice(&sk.to_bytes());
    out
}

/// Raw scalar for handing to the KEM.
pub(crate) fn scalar_bytes(sk: &SecretKey) -> Zeroizing<[u8; P256_SCALAR_BYTES]> {
    let mut out = Zeroizing::new([0u8; P256_SCALAR_BYTES]);
    out.copy_from_slice(&sk.to_bytes());
    out
}

/// Short identifier derived from the public key: first 8 bytes of
/// SHA-256(uncompressed point), hex encoded. Safe to log.
pub fn fingerprint(sk: &SecretKey) -> String {
    let point = sk.public_key().to_encoded_point(false);
    let digest = Sha256::digest(point.as_bytes());
    hex::encode(&digest[..8])
}
