//! Channel mapping types.
//!
//! A packed texture has exactly four output channels. Each output channel pulls
//! its value from one channel of one input slot, optionally inverted:
//!
//! ```text
//! output.g = 1.0 - slots[2].r     // { "slot": 2, "channel": "red", "inverted": true }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// One scalar component of an RGBA pixel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Red channel.
    #[serde(alias = "r")]
    Red,
    /// Green channel.
    #[serde(alias = "g")]
    Green,
    /// Blue channel.
    #[serde(alias = "b")]
    Blue,
    /// Alpha channel.
    #[serde(alias = "a")]
    Alpha,
}

impl Channel {
    /// All channels in RGBA order.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Position of this channel in an RGBA quadruple.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }

    /// Channel at the given RGBA position.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Channel::Red),
            1 => Some(Channel::Green),
            2 => Some(Channel::Blue),
            3 => Some(Channel::Alpha),
            _ => None,
        }
    }

    /// Single-letter name used in settings paths ("r", "g", "b", "a").
    pub const fn short_name(self) -> &'static str {
        match self {
            Channel::Red => "r",
            Channel::Green => "g",
            Channel::Blue => "b",
            Channel::Alpha => "a",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Alpha => "alpha",
        };
        f.write_str(name)
    }
}

/// Where one output channel gets its data.
///
/// `slot` is an index into the compositor's slot list. `None` means no source:
/// the channel evaluates to 0. An index past the end of the list (a slot that
/// was removed after the mapping was made) is treated the same way.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChannelSource {
    /// Index of the input slot to read, or `None` for no source.
    #[serde(default)]
    pub slot: Option<usize>,
    /// Which channel of the input slot to read.
    pub channel: Channel,
    /// Whether to output `1.0 - value` instead of `value`.
    #[serde(default, alias = "invert")]
    pub inverted: bool,
}

impl ChannelSource {
    /// Reads `channel` of slot `slot`, not inverted.
    pub const fn new(slot: usize, channel: Channel) -> Self {
        Self {
            slot: Some(slot),
            channel,
            inverted: false,
        }
    }

    /// A source that always evaluates to 0.
    pub const fn none() -> Self {
        Self {
            slot: None,
            channel: Channel::Red,
            inverted: false,
        }
    }

    /// Identity mapping: output channel `channel` reads the same channel of `slot`.
    pub const fn identity(slot: usize, channel: Channel) -> Self {
        Self::new(slot, channel)
    }

    /// Returns a copy with the inversion flag set to `inverted`.
    pub const fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Flips the inversion flag.
    pub fn toggle_inverted(&mut self) {
        self.inverted = !self.inverted;
    }

    /// Returns true if this source has no slot.
    pub const fn is_none(&self) -> bool {
        self.slot.is_none()
    }

    /// Adjusts the slot index for the removal of the slot at `removed`.
    ///
    /// A source reading the removed slot loses its slot and reads 0. Sources
    /// reading later slots follow them down one position.
    pub fn after_removal(self, removed: usize) -> Self {
        let slot = match self.slot {
            Some(index) if index == removed => None,
            Some(index) if index > removed => Some(index - 1),
            other => other,
        };
        Self { slot, ..self }
    }

    /// Evaluates this source against the current pixel's per-slot samples.
    ///
    /// `samples[i]` is slot `i`'s RGBA value at the pixel, or `None` when the
    /// slot has no image. Missing slots and missing images yield 0 whether or
    /// not the source is inverted.
    pub fn evaluate(&self, samples: &[Option<[f64; 4]>]) -> f64 {
        let Some(slot) = self.slot else {
            return 0.0;
        };
        let Some(Some(pixel)) = samples.get(slot) else {
            return 0.0;
        };

        let value = pixel[self.channel.index()];
        if self.inverted {
            1.0 - value
        } else {
            value
        }
    }
}

impl Default for ChannelSource {
    fn default() -> Self {
        Self::none()
    }
}
