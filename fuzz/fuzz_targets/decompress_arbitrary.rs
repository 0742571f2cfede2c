#![no_main]
use libfuzzer_sys::fuzz_target;

use bzstream::{BzStream, FlushMode, StreamWrapper};

fuzz_target!(|data: &[u8]| {
    // Whole-buffer path: must return Ok or Err, never panic.
    let _ = bzstream::bz_decompress_to_vec(data);

    // Step path with a tiny output window.
    let mut d = match BzStream::decompressor() {
        Ok(d) => d,
        Err(_) => return,
    };
    let mut out = [0u8; 257];
    let mut pos = 0usize;
    let mut produced_total = 0usize;
    while !d.done() {
        match d.process(&data[pos..], &mut out, FlushMode::Run) {
            Ok(p) => {
                if p.consumed == 0 && p.produced == 0 {
                    break;
                }
                pos += p.consumed;
                produced_total += p.produced;
                // bzip2 expands at most ~46 MB per 900 kB block; cap runaway inputs.
                if produced_total > 64 << 20 {
                    break;
                }
            }
            Err(_) => break,
        }
    }
});
