//! Predefined packing layouts.
//!
//! Each preset appends labeled, empty slots whose mapping routes one or two
//! source channels into fixed output channels. The host assigns images
//! afterwards. A preset needs room for all of its slots; if the compositor is
//! too full, nothing is added.

use texpack_spec::{Channel, ChannelSource, MAX_INPUT_COUNT};

use crate::compositor::Compositor;
use crate::error::PackError;
use crate::slot::{InputSlot, SlotId};

/// A named packing layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// HDRP mask map: metallic (R), occlusion (G), detail mask (B), smoothness (A).
    HdrpMaskMap,
    /// HDRP detail map: desaturated albedo (R), normal Y (G), smoothness (B), normal X (A).
    HdrpDetailMap,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::HdrpMaskMap, Preset::HdrpDetailMap];

    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            Preset::HdrpMaskMap => "HDRP Mask Map",
            Preset::HdrpDetailMap => "HDRP Detail Map",
        }
    }

    /// Appends this preset's slots and returns their ids in order.
    pub fn apply(&self, compositor: &mut Compositor) -> Result<Vec<SlotId>, PackError> {
        match self {
            Preset::HdrpMaskMap => hdrp_mask_map(compositor),
            Preset::HdrpDetailMap => hdrp_detail_map(compositor),
        }
    }
}

/// One slot of a preset: label plus `(output, source channel)` routes.
struct PresetSlot {
    label: &'static str,
    routes: &'static [(Channel, Channel)],
}

const MASK_MAP: [PresetSlot; 4] = [
    PresetSlot {
        label: "Metallic",
        routes: &[(Channel::Red, Channel::Red)],
    },
    PresetSlot {
        label: "Occlusion",
        routes: &[(Channel::Green, Channel::Red)],
    },
    PresetSlot {
        label: "Detail Mask",
        routes: &[(Channel::Blue, Channel::Red)],
    },
    PresetSlot {
        label: "Smoothness",
        routes: &[(Channel::Alpha, Channel::Red)],
    },
];

const DETAIL_MAP: [PresetSlot; 3] = [
    PresetSlot {
        label: "Desaturated Albedo",
        routes: &[(Channel::Red, Channel::Red)],
    },
    PresetSlot {
        label: "Normal Map",
        routes: &[(Channel::Alpha, Channel::Red), (Channel::Green, Channel::Green)],
    },
    PresetSlot {
        label: "Smoothness",
        routes: &[(Channel::Blue, Channel::Red)],
    },
];

fn add_preset(compositor: &mut Compositor, slots: &[PresetSlot]) -> Result<Vec<SlotId>, PackError> {
    if compositor.len() + slots.len() > MAX_INPUT_COUNT {
        tracing::warn!(
            "Preset needs {} slots but only {} are free",
            slots.len(),
            MAX_INPUT_COUNT - compositor.len()
        );
        return Err(PackError::SlotLimitExceeded {
            max: MAX_INPUT_COUNT,
        });
    }

    let mut ids = Vec::with_capacity(slots.len());
    for preset_slot in slots {
        let index = compositor.len();
        let mut slot = InputSlot::labeled(preset_slot.label);
        for &(output, channel) in preset_slot.routes {
            slot.set_source(output, ChannelSource::new(index, channel));
        }
        ids.push(compositor.add(slot)?);
    }
    Ok(ids)
}

/// Adds the four HDRP mask map slots.
pub fn hdrp_mask_map(compositor: &mut Compositor) -> Result<Vec<SlotId>, PackError> {
    add_preset(compositor, &MASK_MAP)
}

/// Adds the three HDRP detail map slots.
///
/// The normal map slot feeds two outputs: its green channel to G and its red
/// channel to A. Output alpha follows the normal map slot, not slot 0.
pub fn hdrp_detail_map(compositor: &mut Compositor) -> Result<Vec<SlotId>, PackError> {
    add_preset(compositor, &DETAIL_MAP)
}
