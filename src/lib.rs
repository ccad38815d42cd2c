//! # hpke-unwrap
//!
//! Recipient-side unwrap of HPKE-wrapped symmetric keys.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hpke_unwrap::{KeyUnwrapper, PrivateKeyFormat};
//!
//! # fn load() -> (Vec<u8>, Vec<u8>, Vec<u8>) { unimplemented!() }
//! let (private_key_pem, enc_request, wrapped_key) = load();
//!
//! let key = KeyUnwrapper::new()
//!     .unwrap(&private_key_pem, PrivateKeyFormat::Pem, &enc_request, &wrapped_key)
//!     .expect("unwrap");
//! assert_eq!(key.len(), 32);
//! ```
//!
//! ## Fixed Parameters
//!
//! - **Suite**: DHKEM(P-256, HKDF-SHA256) + HKDF-SHA256 + AES-256-GCM, Base mode
//! - **info / aad**: empty
//! - **Wrapped key**: exactly 48 bytes (32-byte key + 16-byte tag)
//! - **Private key**: PEM, DER (SEC1 or PKCS#8) or ANSI X9.63
//!
//! ## Errors
//!
//! Input errors (`InvalidWrappedKey`, `InvalidPrivateKeyFormat`,
//! `InvalidPrivateKey`) are distinct from cryptographic rejections
//! (`DecapsulationFailed`, `AuthenticationFailed`). No error carries key
//! material.
//!
//! ## What's NOT Provided
//!
//! - Key generation
//! - Sender-side wrapping
//! - Other ciphersuites
//! - Fetching keys over the network

#![deny(unsafe_code)]

mod error;
mod format;
mod unwrap;

pub mod aea;
pub mod key;
pub mod suite;

pub use error::{AuthDataError, UnwrapError};
pub use format::PrivateKeyFormat;
pub use key::{P256KeyParser, PrivateKeyParser};
pub use unwrap::{unwrap_private_key, KeyUnwrapper};

pub use aea::{unwrap_archive_key, AuthData, FcsResponse};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
