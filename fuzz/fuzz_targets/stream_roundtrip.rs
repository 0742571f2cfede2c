#![no_main]
use std::io::Write;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the level, the rest is the payload.
    let (level, payload) = match data.split_first() {
        Some((b, rest)) => (u32::from(b % 9) + 1, rest),
        None => (9, data),
    };

    // Uneven write sizes exercise partial consumption in the writer.
    let mut writer = bzstream::BzWriter::new(Vec::new(), level).unwrap();
    let mut pos = 0usize;
    let mut step = 1usize;
    while pos < payload.len() {
        let end = (pos + step).min(payload.len());
        writer.write_all(&payload[pos..end]).unwrap();
        pos = end;
        step = step * 3 % 4099 + 1;
    }
    let compressed = writer.finish().unwrap();

    let recovered = match bzstream::bz_decompress_to_vec(&compressed) {
        Ok(v) => v,
        Err(e) => panic!(
            "round-trip: decompression of self-compressed data failed ({} bytes in, {} compressed): {e}",
            payload.len(),
            compressed.len()
        ),
    };

    assert_eq!(
        recovered, payload,
        "round-trip mismatch: {} bytes in, {} bytes back",
        payload.len(),
        recovered.len()
    );
});
