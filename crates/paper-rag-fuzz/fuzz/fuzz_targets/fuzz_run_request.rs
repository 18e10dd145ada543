#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_rag::server::routes::RunRequest;

fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<RunRequest>(data);
});
