// Integration tests for the raw cursor accessors and mutators on BzStream.
//
// These drive the adapter the way a buffered stream layer does: point the
// cursors at caller-owned buffers, step, read the cursors back.

use bzstream::file::bz_compress_to_vec;
use bzstream::stream::{BzStream, FlushMode, StreamWrapper};

const BZ_OK: i32 = 0;
const BZ_FINISH_OK: i32 = 3;
const BZ_STREAM_END: i32 = 4;

fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8 ^ (i / 997) as u8).collect()
}

#[test]
fn setters_are_visible_through_getters() {
    let mut s = BzStream::compressor(9).unwrap();
    let input = [1u8, 2, 3, 4];
    let mut output = [0u8; 16];
    unsafe {
        s.set_next_in(input.as_ptr());
        s.set_avail_in(input.len());
        s.set_next_out(output.as_mut_ptr());
        s.set_avail_out(output.len());
    }
    assert_eq!(s.next_in(), input.as_ptr());
    assert_eq!(s.avail_in(), 4);
    assert_eq!(s.next_out(), output.as_mut_ptr());
    assert_eq!(s.avail_out(), 16);
}

#[test]
fn input_cursor_advances_by_consumed_bytes() {
    let data = sample(300_000);
    let mut s = BzStream::compressor(1).unwrap();
    let mut out = vec![0u8; 512];

    unsafe {
        s.set_next_in(data.as_ptr());
        s.set_avail_in(data.len());
    }

    let mut steps = 0;
    while s.avail_in() > 0 {
        let before_avail = s.avail_in();
        let before_ptr = s.next_in();
        unsafe {
            s.set_next_out(out.as_mut_ptr());
            s.set_avail_out(out.len());
        }
        s.step(FlushMode::Run).unwrap();
        let after_avail = s.avail_in();
        assert!(after_avail <= before_avail);
        let advanced = s.next_in() as usize - before_ptr as usize;
        assert_eq!(advanced, before_avail - after_avail);
        steps += 1;
    }
    // 300 kB at level 1 spans several 100 kB blocks.
    assert!(steps > 1);
    assert_eq!(s.next_in() as usize, data.as_ptr() as usize + data.len());
}

#[test]
fn output_cursor_advances_by_produced_bytes() {
    let data = sample(20_000);
    let compressed = bz_compress_to_vec(&data, 9).unwrap();
    let mut s = BzStream::decompressor().unwrap();
    let mut out = vec![0u8; data.len() + 1];

    unsafe {
        s.set_next_in(compressed.as_ptr());
        s.set_avail_in(compressed.len());
    }
    let mut written = 0;
    while !s.done() {
        let room = (out.len() - written).min(1000);
        unsafe {
            s.set_next_out(out.as_mut_ptr().add(written));
            s.set_avail_out(room);
        }
        s.step(FlushMode::Run).unwrap();
        let produced = room - s.avail_out();
        assert_eq!(s.next_out() as usize, out.as_ptr() as usize + written + produced);
        written += produced;
    }
    assert_eq!(&out[..written], &data[..]);
}

#[test]
fn decompress_without_output_space_makes_no_output() {
    let data = sample(10_000);
    let compressed = bz_compress_to_vec(&data, 9).unwrap();
    let mut s = BzStream::decompressor().unwrap();

    let mut empty: [u8; 0] = [];
    let p = s.process(&compressed, &mut empty, FlushMode::Run).unwrap();
    assert_eq!(p.status, BZ_OK);
    assert_eq!(p.produced, 0);
    assert!(!s.done());

    // Supplying space afterwards finishes the stream normally.
    let mut out = vec![0u8; data.len() + 1];
    let p2 = s
        .process(&compressed[p.consumed..], &mut out, FlushMode::Run)
        .unwrap();
    assert_eq!(p2.status, BZ_STREAM_END);
    assert_eq!(&out[..p2.produced], &data[..]);
}

#[test]
fn compress_finish_without_output_space_waits() {
    let data = sample(5_000);
    let mut s = BzStream::compressor(9).unwrap();

    let mut empty: [u8; 0] = [];
    let p = s.process(&data, &mut empty, FlushMode::Finish).unwrap();
    assert_eq!(p.status, BZ_FINISH_OK);
    assert_eq!(p.produced, 0);
    assert!(!s.done());

    let mut out = vec![0u8; 64 * 1024];
    let p2 = s
        .process(&data[p.consumed..], &mut out, FlushMode::Finish)
        .unwrap();
    assert_eq!(p2.status, BZ_STREAM_END);
    assert!(s.done());
    assert_eq!(bzstream::file::bz_decompress_to_vec(&out[..p2.produced]).unwrap(), data);
}

#[test]
fn process_clears_cursors() {
    let data = sample(1_000);
    let mut s = BzStream::compressor(9).unwrap();
    let mut out = vec![0u8; 4096];
    s.process(&data, &mut out, FlushMode::Run).unwrap();
    assert!(s.next_in().is_null());
    assert_eq!(s.avail_in(), 0);
    assert!(s.next_out().is_null());
    assert_eq!(s.avail_out(), 0);
}
