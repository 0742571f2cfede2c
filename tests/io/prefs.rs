// Integration tests for src/io/prefs.rs - Prefs defaults and clamping setters.

use bzstream::config::{CLEVEL_DEFAULT, WORK_FACTOR_DEFAULT, WORK_FACTOR_MAX};
use bzstream::io::prefs::Prefs;

#[test]
fn defaults() {
    let p = Prefs::default();
    assert_eq!(p.params.level, CLEVEL_DEFAULT);
    assert_eq!(p.params.work_factor, WORK_FACTOR_DEFAULT);
    assert!(!p.params.small);
    assert!(!p.overwrite);
    assert!(!p.test_mode);
    assert!(!p.remove_src_file);
    assert!(p.multi_stream);
}

#[test]
fn new_equals_default() {
    let a = Prefs::new();
    let b = Prefs::default();
    assert_eq!(a.params, b.params);
    assert_eq!(a.multi_stream, b.multi_stream);
}

#[test]
fn compression_level_is_clamped() {
    let mut p = Prefs::default();
    assert_eq!(p.set_compression_level(0), 1);
    assert_eq!(p.params.level, 1);
    assert_eq!(p.set_compression_level(42), 9);
    assert_eq!(p.params.level, 9);
    assert_eq!(p.set_compression_level(4), 4);
}

#[test]
fn work_factor_is_clamped() {
    let mut p = Prefs::default();
    assert_eq!(p.set_work_factor(1000), WORK_FACTOR_MAX);
    assert_eq!(p.set_work_factor(0), 0);
}

#[test]
fn boolean_setters_return_stored_value() {
    let mut p = Prefs::default();
    assert!(p.set_small(true));
    assert!(p.params.small);
    assert!(p.set_overwrite(true));
    assert!(p.set_test_mode(true));
    assert!(p.set_remove_src_file(true));
    assert!(!p.set_multi_stream(false));
    assert!(!p.multi_stream);
}
