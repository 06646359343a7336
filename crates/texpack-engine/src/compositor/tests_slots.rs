//! Tests for slot management and channel source resolution.

use std::sync::Arc;

use texpack_spec::{Channel, ChannelSource, MAX_INPUT_COUNT};

use super::*;
use crate::buffer::TextureBuffer;
use crate::color::Color;
use crate::error::PackError;
use crate::slot::InputSlot;

#[test]
fn test_new_compositor_is_empty() {
    let compositor = Compositor::new();
    assert!(compositor.is_empty());
    assert!(!compositor.is_full());
    assert_eq!(compositor.len(), 0);
}

#[test]
fn test_add_returns_distinct_ids_in_order() {
    let mut compositor = Compositor::new();
    let a = compositor.add(InputSlot::labeled("a")).unwrap();
    let b = compositor.add(InputSlot::labeled("b")).unwrap();
    assert_ne!(a, b);
    assert_eq!(compositor.index_of(a), Some(0));
    assert_eq!(compositor.index_of(b), Some(1));
    assert_eq!(compositor.id_at(1), Some(b));
    assert_eq!(compositor.slot(b).map(|s| s.label.as_str()), Some("b"));
}

#[test]
fn test_add_beyond_limit_is_rejected() {
    let mut compositor = Compositor::new();
    for i in 0..MAX_INPUT_COUNT {
        compositor.add(InputSlot::labeled(format!("s{}", i))).unwrap();
    }
    assert!(compositor.is_full());

    let err = compositor.add(InputSlot::labeled("extra")).unwrap_err();
    assert!(matches!(err, PackError::SlotLimitExceeded { max: 4 }));
    assert_eq!(compositor.len(), MAX_INPUT_COUNT);
    assert!(compositor.slots().all(|(_, s)| s.label != "extra"));
}

#[test]
fn test_remove_by_identity() {
    let mut compositor = Compositor::new();
    let a = compositor.add(InputSlot::labeled("a")).unwrap();
    let b = compositor.add(InputSlot::labeled("b")).unwrap();
    let c = compositor.add(InputSlot::labeled("c")).unwrap();

    let removed = compositor.remove(b).unwrap();
    assert_eq!(removed.label, "b");
    assert_eq!(compositor.len(), 2);
    assert_eq!(compositor.index_of(a), Some(0));
    assert_eq!(compositor.index_of(c), Some(1));
    assert_eq!(compositor.index_of(b), None);
}

#[test]
fn test_remove_unknown_is_noop() {
    let mut compositor = Compositor::new();
    let a = compositor.add(InputSlot::new()).unwrap();
    assert!(compositor.remove(a).is_some());
    assert!(compositor.remove(a).is_none());
    assert!(compositor.is_empty());
}

#[test]
fn test_removal_frees_room() {
    let mut compositor = Compositor::new();
    let ids: Vec<_> = (0..MAX_INPUT_COUNT)
        .map(|_| compositor.add(InputSlot::new()).unwrap())
        .collect();
    compositor.remove(ids[0]);
    assert!(compositor.add(InputSlot::new()).is_ok());
}

#[test]
fn test_ids_are_not_reused_after_initialize() {
    let mut compositor = Compositor::new();
    let first = compositor.add(InputSlot::new()).unwrap();
    compositor.initialize();
    let second = compositor.add(InputSlot::new()).unwrap();
    assert_ne!(first, second);
    assert!(compositor.slot(first).is_none());
}

#[test]
fn test_unmapped_channels_default_to_slot_zero() {
    let mut compositor = Compositor::new();
    compositor.add(InputSlot::new()).unwrap();
    compositor.add(InputSlot::new()).unwrap();

    for channel in Channel::ALL {
        assert_eq!(
            compositor.resolved_source(channel),
            ChannelSource::identity(0, channel)
        );
    }
}

#[test]
fn test_later_slot_overrides_earlier() {
    let mut compositor = Compositor::new();
    compositor
        .add(InputSlot::new().with_source(Channel::Red, ChannelSource::new(0, Channel::Blue)))
        .unwrap();
    compositor
        .add(InputSlot::new().with_source(Channel::Red, ChannelSource::new(1, Channel::Alpha)))
        .unwrap();

    assert_eq!(
        compositor.resolved_source(Channel::Red),
        ChannelSource::new(1, Channel::Alpha)
    );
    assert_eq!(
        compositor.resolved_source(Channel::Green),
        ChannelSource::identity(0, Channel::Green)
    );
}

#[test]
fn test_slot_mut_edits_mapping_and_image() {
    let mut compositor = Compositor::new();
    let id = compositor.add(InputSlot::labeled("a")).unwrap();

    let slot = compositor.slot_mut(id).unwrap();
    slot.set_source(Channel::Blue, ChannelSource::new(0, Channel::Red).with_inverted(true));
    slot.set_image(Arc::new(TextureBuffer::new(4, 4, Color::gray(0.25))));

    let sources = compositor.resolved_sources();
    assert_eq!(sources[Channel::Blue.index()], ChannelSource::new(0, Channel::Red).with_inverted(true));
    assert!(compositor.slot_at(0).unwrap().has_image());
}

#[test]
fn test_remove_renumbers_later_sources() {
    let mut compositor = Compositor::new();
    let first = compositor
        .add(InputSlot::new().with_source(Channel::Red, ChannelSource::new(0, Channel::Red)))
        .unwrap();
    compositor
        .add(InputSlot::new().with_source(Channel::Green, ChannelSource::new(1, Channel::Blue)))
        .unwrap();
    compositor
        .add(InputSlot::new().with_source(Channel::Blue, ChannelSource::new(2, Channel::Alpha)))
        .unwrap();

    compositor.remove(first);

    assert_eq!(
        compositor.resolved_sources(),
        [
            ChannelSource::new(0, Channel::Red).after_removal(0),
            ChannelSource::new(0, Channel::Blue),
            ChannelSource::new(1, Channel::Alpha),
            ChannelSource::identity(0, Channel::Alpha).after_removal(0),
        ]
    );
    assert!(compositor.resolved_source(Channel::Red).is_none());
    assert!(compositor.resolved_source(Channel::Alpha).is_none());
}

#[test]
fn test_removing_override_owner_clears_channel() {
    let mut compositor = Compositor::new();
    compositor.add(InputSlot::labeled("base")).unwrap();
    let second = compositor
        .add(
            InputSlot::labeled("green")
                .with_source(Channel::Green, ChannelSource::new(1, Channel::Red)),
        )
        .unwrap();

    compositor.remove(second);

    assert!(compositor.resolved_source(Channel::Green).is_none());
    for output in [Channel::Red, Channel::Blue, Channel::Alpha] {
        assert_eq!(
            compositor.resolved_source(output),
            ChannelSource::identity(0, output)
        );
    }
}

#[test]
fn test_remove_keeps_earlier_shadowed_override_hidden() {
    let mut compositor = Compositor::new();
    compositor
        .add(InputSlot::new().with_source(Channel::Red, ChannelSource::new(0, Channel::Green)))
        .unwrap();
    let second = compositor
        .add(InputSlot::new().with_source(Channel::Red, ChannelSource::new(1, Channel::Red)))
        .unwrap();
    let third = compositor.add(InputSlot::new()).unwrap();

    compositor.remove(second);

    assert!(compositor.resolved_source(Channel::Red).is_none());
    // Slots added afterwards still override as usual.
    compositor
        .add(InputSlot::new().with_source(Channel::Red, ChannelSource::new(0, Channel::Blue)))
        .unwrap();
    assert_eq!(
        compositor.resolved_source(Channel::Red),
        ChannelSource::new(0, Channel::Blue)
    );
    assert!(compositor.slot(third).is_some());
}
