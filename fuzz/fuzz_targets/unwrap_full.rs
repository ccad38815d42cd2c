#![no_main]

use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;
use rand_core::OsRng;

static RECIPIENT_X963: Lazy<Vec<u8>> = Lazy::new(|| {
    let sk = p256::SecretKey::random(&mut OsRng);
    hpke_unwrap::key::to_x963(&sk).to_vec()
});

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let format = (data[0] % 6) as i64 - 1;
    let split = (data[1] as usize) % (data.len() - 1);
    let (enc, wrapped) = data[2..].split_at(split.min(data.len() - 2));

    // Fuzzed key bytes through every decoder.
    let _ = hpke_unwrap::unwrap_private_key(data, format, enc, wrapped);

    // Fixed valid key, fuzzed HPKE inputs.
    let _ = hpke_unwrap::unwrap_private_key(&RECIPIENT_X963, 3, enc, wrapped);
});
