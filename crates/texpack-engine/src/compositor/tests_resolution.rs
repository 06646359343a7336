//! Tests for resolution handling and initialization.

use texpack_spec::{SamplingFilter, DEFAULT_RESOLUTION, SUPPORTED_RESOLUTIONS};

use super::*;
use crate::error::PackError;
use crate::slot::InputSlot;

#[test]
fn test_default_resolution() {
    assert_eq!(Compositor::new().resolution(), DEFAULT_RESOLUTION);
}

#[test]
fn test_set_resolution_accepts_every_supported_value() {
    let mut compositor = Compositor::new();
    for &r in &SUPPORTED_RESOLUTIONS {
        compositor.set_resolution(r).unwrap();
        assert_eq!(compositor.resolution(), r);
    }
}

#[test]
fn test_set_resolution_non_power_of_two_keeps_previous() {
    let mut compositor = Compositor::new();
    compositor.set_resolution(256).unwrap();

    let err = compositor.set_resolution(100).unwrap_err();
    assert!(matches!(err, PackError::InvalidResolution(_)));
    assert_eq!(compositor.resolution(), 256);
}

#[test]
fn test_set_resolution_out_of_range() {
    let mut compositor = Compositor::new();
    assert!(compositor.set_resolution(32).is_err());
    assert!(compositor.set_resolution(16384).is_err());
    assert!(compositor.set_resolution(0).is_err());
    assert_eq!(compositor.resolution(), DEFAULT_RESOLUTION);
}

#[test]
fn test_initialize_resets_state() {
    let mut compositor = Compositor::new();
    compositor.add(InputSlot::labeled("a")).unwrap();
    compositor.set_resolution(64).unwrap();
    compositor.set_filter(SamplingFilter::Nearest);

    compositor.initialize();
    assert!(compositor.is_empty());
    assert_eq!(compositor.resolution(), DEFAULT_RESOLUTION);
    assert_eq!(compositor.filter(), SamplingFilter::Bilinear);
}
