//! Sender side for tests: wrap a key to a P-256 recipient.

#![allow(dead_code)]

use hpke::{Deserializable, Kem as KemTrait, OpModeS, Serializable};
use hpke_unwrap::suite::{Aead, Kdf, Kem, AAD, INFO};
use p256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use rand_core::OsRng;

pub const KEY: [u8; 32] = [
    0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, 0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d, 0x77, 0x81,
    0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, 0x2d, 0x98, 0x10, 0xa3, 0x09, 0x14, 0xdf, 0xf4,
];

pub fn recipient() -> SecretKey {
    SecretKey::random(&mut OsRng)
}

/// Returns (encapsulated_key, wrapped_key).
pub fn wrap(sk: &SecretKey, key: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let point = sk.public_key().to_encoded_point(false);
    let pk = <Kem as KemTrait>::PublicKey::from_bytes(point.as_bytes()).unwrap();
    let (encapped, mut ctx) =
        hpke::setup_sender::<Aead, Kdf, Kem, _>(&OpModeS::Base, &pk, INFO, &mut OsRng).unwrap();
    let wrapped = ctx.seal(key, AAD).unwrap();
    (encapped.to_bytes().to_vec(), wrapped)
}
