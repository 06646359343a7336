//! Tests for composition output.

use std::sync::Arc;

use texpack_spec::{Channel, ChannelSource, SamplingFilter, PREVIEW_RESOLUTION};

use super::*;
use crate::buffer::TextureBuffer;
use crate::cancel::CancelToken;
use crate::color::Color;
use crate::error::PackError;
use crate::slot::InputSlot;

fn solid(color: Color) -> Arc<TextureBuffer> {
    Arc::new(TextureBuffer::new(16, 16, color))
}

fn gradient(size: u32) -> Arc<TextureBuffer> {
    Arc::new(TextureBuffer::from_fn(size, size, |x, y| {
        Color::rgba(
            x as f64 / (size - 1) as f64,
            y as f64 / (size - 1) as f64,
            0.25,
            0.75,
        )
    }))
}

fn compositor_at(resolution: u32) -> Compositor {
    let mut compositor = Compositor::new();
    compositor.set_resolution(resolution).unwrap();
    compositor
}

fn assert_uniform(buffer: &TextureBuffer, expected: Color) {
    for (i, px) in buffer.data.iter().enumerate() {
        assert!(
            (px.r - expected.r).abs() < 1e-12
                && (px.g - expected.g).abs() < 1e-12
                && (px.b - expected.b).abs() < 1e-12
                && (px.a - expected.a).abs() < 1e-12,
            "pixel {} is {:?}, expected {:?}",
            i,
            px,
            expected
        );
    }
}

#[test]
fn test_output_dimensions_match_resolution() {
    for resolution in [64, 128, 256] {
        let mut compositor = compositor_at(resolution);
        compositor
            .add(InputSlot::new().with_image(gradient(100)))
            .unwrap();
        let output = compositor.compose();
        assert_eq!(output.width, resolution);
        assert_eq!(output.height, resolution);
        assert_eq!(output.data.len(), (resolution * resolution) as usize);
    }
}

#[test]
fn test_empty_compositor_is_all_zero() {
    let output = compositor_at(64).compose();
    assert_uniform(&output, Color::transparent());
}

#[test]
fn test_slot_without_image_is_all_zero() {
    let mut compositor = compositor_at(64);
    compositor.add(InputSlot::new()).unwrap();
    assert_uniform(&compositor.compose(), Color::transparent());
}

#[test]
fn test_default_mapping_copies_slot_zero() {
    let mut compositor = compositor_at(64);
    compositor
        .add(InputSlot::new().with_image(solid(Color::rgba(0.1, 0.2, 0.3, 0.4))))
        .unwrap();
    assert_uniform(&compositor.compose(), Color::rgba(0.1, 0.2, 0.3, 0.4));
}

#[test]
fn test_same_size_image_is_copied_exactly() {
    let image = gradient(64);
    let mut compositor = compositor_at(64);
    compositor.add(InputSlot::new().with_image(image.clone())).unwrap();
    assert_eq!(compositor.compose(), *image);
}

#[test]
fn test_compose_is_idempotent() {
    let mut compositor = compositor_at(128);
    compositor.add(InputSlot::new().with_image(gradient(37))).unwrap();
    compositor
        .add(
            InputSlot::new()
                .with_image(gradient(200))
                .with_source(Channel::Blue, ChannelSource::new(1, Channel::Red).with_inverted(true)),
        )
        .unwrap();

    let first = compositor.compose();
    let second = compositor.compose();
    assert_eq!(first.content_hash(), second.content_hash());
    assert_eq!(first, second);
}

#[test]
fn test_changing_one_channel_leaves_others() {
    let mut compositor = compositor_at(64);
    let id = compositor.add(InputSlot::new().with_image(gradient(50))).unwrap();
    compositor
        .add(InputSlot::new().with_image(solid(Color::rgba(0.9, 0.8, 0.7, 0.6))))
        .unwrap();
    let before = compositor.compose();

    if let Some(slot) = compositor.slot_mut(id) {
        slot.set_source(Channel::Green, ChannelSource::new(1, Channel::Alpha).with_inverted(true));
    }
    let after = compositor.compose();

    for (b, a) in before.data.iter().zip(&after.data) {
        assert_eq!(a.r, b.r);
        assert_eq!(a.b, b.b);
        assert_eq!(a.a, b.a);
        assert!((a.g - 0.4).abs() < 1e-12);
    }
}

#[test]
fn test_inversion_law() {
    let image = solid(Color::rgba(0.3, 0.6, 0.0, 1.0));
    let mut compositor = compositor_at(64);
    compositor
        .add(
            InputSlot::new()
                .with_image(image)
                .with_source(Channel::Red, ChannelSource::new(0, Channel::Red))
                .with_source(Channel::Green, ChannelSource::new(0, Channel::Red).with_inverted(true)),
        )
        .unwrap();

    let px = compositor.compose().get(10, 20);
    assert!((px.r - 0.3).abs() < 1e-12);
    assert!((px.g - 0.7).abs() < 1e-12);
}

#[test]
fn test_slot_inversion_composes_with_source_inversion() {
    let image = solid(Color::rgba(0.2, 0.2, 0.2, 1.0));
    let mut compositor = compositor_at(64);
    compositor
        .add(
            InputSlot::new()
                .with_image(image)
                .with_inverted(true)
                .with_source(Channel::Red, ChannelSource::new(0, Channel::Red))
                .with_source(Channel::Green, ChannelSource::new(0, Channel::Red).with_inverted(true))
                .with_source(Channel::Alpha, ChannelSource::new(0, Channel::Alpha)),
        )
        .unwrap();

    let px = compositor.compose().get(0, 0);
    assert!((px.r - 0.8).abs() < 1e-12, "slot inversion only");
    assert!((px.g - 0.2).abs() < 1e-12, "both inversions cancel");
    assert!(px.a.abs() < 1e-12, "alpha is inverted too");
}

#[test]
fn test_absent_image_zeroes_only_its_channels() {
    let mut compositor = compositor_at(64);
    compositor
        .add(
            InputSlot::new()
                .with_image(solid(Color::gray(1.0)))
                .with_source(Channel::Red, ChannelSource::new(0, Channel::Red)),
        )
        .unwrap();
    compositor
        .add(
            InputSlot::new()
                .with_source(Channel::Green, ChannelSource::new(1, Channel::Red))
                .with_source(Channel::Blue, ChannelSource::new(1, Channel::Red).with_inverted(true)),
        )
        .unwrap();

    let output = compositor.compose();
    assert_uniform(&output, Color::rgba(1.0, 0.0, 0.0, 1.0));
}

#[test]
fn test_stale_reference_after_removal_reads_zero() {
    let mut compositor = compositor_at(64);
    let first = compositor
        .add(InputSlot::new().with_image(solid(Color::rgba(0.5, 0.5, 0.5, 1.0))))
        .unwrap();
    let second = compositor
        .add(InputSlot::new().with_image(solid(Color::gray(1.0))))
        .unwrap();
    if let Some(slot) = compositor.slot_mut(first) {
        slot.set_source(Channel::Green, ChannelSource::new(1, Channel::Green));
    }
    assert!((compositor.compose().get(0, 0).g - 1.0).abs() < 1e-12);

    compositor.remove(second);
    let output = compositor.compose();
    assert_uniform(&output, Color::rgba(0.5, 0.0, 0.5, 1.0));
}

#[test]
fn test_clearing_image_zeroes_mapped_channels() {
    let mut compositor = compositor_at(64);
    let id = compositor
        .add(InputSlot::new().with_image(solid(Color::white())))
        .unwrap();
    if let Some(slot) = compositor.slot_mut(id) {
        slot.clear_image();
    }
    assert_uniform(&compositor.compose(), Color::transparent());
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let mut compositor = compositor_at(64);
    compositor
        .add(
            InputSlot::new()
                .with_image(solid(Color::rgba(4.0, -1.0, 0.5, 1.0)))
                .with_source(Channel::Blue, ChannelSource::new(0, Channel::Red).with_inverted(true)),
        )
        .unwrap();
    assert_uniform(&compositor.compose(), Color::rgba(1.0, 0.0, 0.0, 1.0));
}

#[test]
fn test_smaller_source_is_resampled_across_output() {
    let mut compositor = compositor_at(64);
    compositor.add(InputSlot::new().with_image(gradient(8))).unwrap();

    let output = compositor.compose();
    let left = output.get(0, 32);
    let right = output.get(63, 32);
    assert!(left.r.abs() < 1e-12, "left edge clamps to first texel");
    assert!((right.r - 1.0).abs() < 1e-12, "right edge clamps to last texel");

    // Monotonic along x for a horizontal gradient.
    for x in 1..64 {
        assert!(output.get(x, 32).r >= output.get(x - 1, 32).r);
    }
}

#[test]
fn test_nearest_filter_only_produces_source_values() {
    let image = gradient(8);
    let mut compositor = compositor_at(64);
    compositor.set_filter(SamplingFilter::Nearest);
    compositor.add(InputSlot::new().with_image(image.clone())).unwrap();

    let output = compositor.compose();
    for px in &output.data {
        assert!(image.data.contains(px), "{:?} is not a source texel", px);
    }

    compositor.set_filter(SamplingFilter::Bilinear);
    let smooth = compositor.compose();
    assert!(smooth.data.iter().any(|px| !image.data.contains(px)));
}

#[test]
fn test_compose_does_not_mutate_images() {
    let image = gradient(32);
    let snapshot = image.content_hash();
    let mut compositor = compositor_at(64);
    compositor
        .add(InputSlot::new().with_image(image.clone()).with_inverted(true))
        .unwrap();
    compositor.compose();
    assert_eq!(image.content_hash(), snapshot);
}

#[test]
fn test_preview_keeps_configured_resolution() {
    let mut compositor = compositor_at(512);
    compositor.add(InputSlot::new().with_image(gradient(16))).unwrap();

    let preview = compositor.compose_preview();
    assert_eq!(preview.width, PREVIEW_RESOLUTION);
    assert_eq!(preview.height, PREVIEW_RESOLUTION);
    assert_eq!(compositor.resolution(), 512);
}

#[test]
fn test_compose_with_cancel_matches_compose() {
    let mut compositor = compositor_at(64);
    compositor.add(InputSlot::new().with_image(gradient(20))).unwrap();

    let token = CancelToken::new();
    let cancellable = compositor.compose_with_cancel(&token).unwrap();
    assert_eq!(cancellable, compositor.compose());
}

#[test]
fn test_cancelled_compose_returns_no_buffer() {
    let mut compositor = compositor_at(256);
    compositor.add(InputSlot::new().with_image(gradient(20))).unwrap();

    let token = CancelToken::new();
    token.cancel();
    let result = compositor.compose_with_cancel(&token);
    assert!(matches!(result, Err(PackError::Cancelled)));
}
