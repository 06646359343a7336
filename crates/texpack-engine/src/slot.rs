//! Input slots.

use std::fmt;
use std::sync::Arc;

use texpack_spec::{Channel, ChannelSource};

use crate::buffer::TextureBuffer;

/// Stable identity of a slot inside one compositor.
///
/// Ids are handed out by `Compositor::add` and never reused by that compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) u64);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// One input image plus the output channel sources it contributes.
///
/// The image is shared, not copied. The compositor only reads it.
#[derive(Debug, Clone, Default)]
pub struct InputSlot {
    /// Display label ("Metallic", "Occlusion", ...).
    pub label: String,
    /// Invert every channel read from this slot before mapping.
    pub inverted: bool,
    image: Option<Arc<TextureBuffer>>,
    mapping: [Option<ChannelSource>; 4],
}

impl InputSlot {
    /// Creates an unlabeled slot with no image and no mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty slot with a label.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Identity source for the slot at `index`: output `channel` reads the
    /// same channel of that slot, not inverted.
    pub const fn default_source(index: usize, channel: Channel) -> ChannelSource {
        ChannelSource::identity(index, channel)
    }

    /// Sets the image.
    pub fn with_image(mut self, image: Arc<TextureBuffer>) -> Self {
        self.image = Some(image);
        self
    }

    /// Sets the source for one output channel.
    pub fn with_source(mut self, output: Channel, source: ChannelSource) -> Self {
        self.set_source(output, source);
        self
    }

    /// Sets the slot-level inversion flag.
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// The assigned image, if any. Empty images count as absent.
    pub fn image(&self) -> Option<&TextureBuffer> {
        self.image.as_deref().filter(|img| !img.is_empty())
    }

    /// Returns true if the slot has a non-empty image.
    pub fn has_image(&self) -> bool {
        self.image().is_some()
    }

    /// Assigns an image.
    pub fn set_image(&mut self, image: Arc<TextureBuffer>) {
        self.image = Some(image);
    }

    /// Removes the image. Channels mapped to this slot read 0 afterwards.
    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Source this slot sets for `output`, if any.
    pub fn source(&self, output: Channel) -> Option<ChannelSource> {
        self.mapping[output.index()]
    }

    /// All four sources in RGBA output order.
    pub fn sources(&self) -> [Option<ChannelSource>; 4] {
        self.mapping
    }

    pub fn set_source(&mut self, output: Channel, source: ChannelSource) {
        self.mapping[output.index()] = Some(source);
    }

    pub fn clear_source(&mut self, output: Channel) {
        self.mapping[output.index()] = None;
    }

    /// Mutable access to the source for `output`, e.g. to toggle inversion.
    pub fn source_mut(&mut self, output: Channel) -> Option<&mut ChannelSource> {
        self.mapping[output.index()].as_mut()
    }
}
