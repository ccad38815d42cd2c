#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(auth) = hpke_unwrap::AuthData::parse(data) {
        let _ = auth.fcs_response();
        let _ = auth.key_url();
    }
    let _ = hpke_unwrap::AuthData::parse_blob(data);
});
