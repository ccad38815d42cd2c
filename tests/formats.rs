//! Input validation properties: wrapped-key length and format tag.

mod common;

use common::{recipient, wrap, KEY};
use hpke_unwrap::suite::WRAPPED_KEY_BYTES;
use hpke_unwrap::{key, unwrap_private_key, UnwrapError};
use proptest::prelude::*;

#[test]
fn test_wrapped_key_constant() {
    assert_eq!(WRAPPED_KEY_BYTES, 0x30);
}

#[test]
fn valid_inputs_with_wrong_length_rejected() {
    let sk = recipient();
    let (enc, wrapped) = wrap(&sk, &KEY);
    let x963 = key::to_x963(&sk);

    let mut long = wrapped.clone();
    long.push(0);
    for bad in [&wrapped[..47], &long[..], &[][..]] {
        assert_eq!(
            unwrap_private_key(&x963, 3, &enc, bad),
            Err(UnwrapError::InvalidWrappedKey("Wrapped key is not 0x30 bytes"))
        );
    }
}

#[test]
fn longer_plaintext_cannot_be_unwrapped() {
    let sk = recipient();
    let (enc, wrapped) = wrap(&sk, &[0u8; 33]);
    let x963 = key::to_x963(&sk);
    assert!(matches!(
        unwrap_private_key(&x963, 3, &enc, &wrapped),
        Err(UnwrapError::InvalidWrappedKey(_))
    ));
}

proptest! {
    #[test]
    fn any_wrong_length_is_invalid_wrapped_key(
        len in (0usize..256).prop_filter("not 48", |l| *l != WRAPPED_KEY_BYTES),
        format in any::<i64>(),
        raw in proptest::collection::vec(any::<u8>(), 0..128),
        enc in proptest::collection::vec(any::<u8>(), 0..80),
    ) {
        let wrapped = vec![0u8; len];
        let result = unwrap_private_key(&raw, format, &enc, &wrapped);
        prop_assert!(matches!(result, Err(UnwrapError::InvalidWrappedKey(_))));
    }

    #[test]
    fn unknown_format_tag_is_invalid_format(
        format in any::<i64>().prop_filter("unknown tag", |f| !(0..=3).contains(f)),
        raw in proptest::collection::vec(any::<u8>(), 0..128),
    ) {
        let result = unwrap_private_key(&raw, format, &[0u8; 65], &[0u8; WRAPPED_KEY_BYTES]);
        prop_assert_eq!(result, Err(UnwrapError::InvalidPrivateKeyFormat(format)));
    }

    #[test]
    fn random_key_bytes_never_unwrap(
        format in 0i64..=3,
        raw in proptest::collection::vec(any::<u8>(), 0..200),
    ) {
        let result = unwrap_private_key(&raw, format, &[0u8; 65], &[0u8; WRAPPED_KEY_BYTES]);
        prop_assert!(result.is_err());
    }
}
