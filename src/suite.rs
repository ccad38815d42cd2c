//! Fixed HPKE ciphersuite and payload sizes.
//!
//! Suite (RFC 9180 identifiers):
//!   KEM  = DHKEM(P-256, HKDF-SHA256)   0x0010
//!   KDF  = HKDF-SHA256                 0x0001
//!   AEAD = AES-256-GCM                 0x0002
//!
//! Wrapped key (on wire):
//!   aes_gcm_ciphertext[32] || tag[16]   (48 bytes)
//!
//! Encapsulated key:
//!   0x04 || x[32] || y[32]              (65 bytes, uncompressed SEC1)

use hpke::{aead::AesGcm256, kdf::HkdfSha256, kem::DhP256HkdfSha256};

/// KEM half of the suite.
pub type Kem = DhP256HkdfSha256;
/// KDF half of the suite.
pub type Kdf = HkdfSha256;
/// AEAD half of the suite.
pub type Aead = AesGcm256;

/// Suite identifiers (RFC 9180 registry values)
pub const SUITE_KEM_P256_HKDF_SHA256: u16 = 0x0010;
pub const SUITE_KDF_HKDF_SHA256: u16 = 0x0001;
pub const SUITE_AEAD_AES256GCM: u16 = 0x0002;

/// Application info bound into the key schedule. Always empty.
pub const INFO: &[u8] = b"";

/// Associated data for the single open. Always empty.
pub const AAD: &[u8] = b"";

// ---------------------------------------------------------------------------
// Component sizes
// ---------------------------------------------------------------------------

/// P-256 scalar / coordinate size
pub const P256_SCALAR_BYTES: usize = 32;

/// Uncompressed SEC1 point: 0x04 || x || y
pub const P256_POINT_BYTES: usize = 1 + 2 * P256_SCALAR_BYTES; // 65

/// HPKE encapsulated key for DHKEM(P-256)
pub const ENCAPSULATED_KEY_BYTES: usize = P256_POINT_BYTES;

/// ANSI X9.63 private key: public point || private scalar
pub const X963_PRIVATE_KEY_BYTES: usize = P256_POINT_BYTES + P256_SCALAR_BYTES; // 97

pub const AEAD_TAG_BYTES: usize = 16;

/// Unwrapped symmetric key (AES-256)
pub const UNWRAPPED_KEY_BYTES: usize = 32;

/// Wrapped key: the only accepted ciphertext length
pub const WRAPPED_KEY_BYTES: usize = UNWRAPPED_KEY_BYTES + AEAD_TAG_BYTES; // 0x30
