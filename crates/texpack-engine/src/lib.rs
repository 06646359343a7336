//! Texpack Channel Packing Engine
//!
//! This crate remaps the channels of up to four input textures into the four
//! channels of one square RGBA texture, the usual way of building mask maps
//! and detail maps from separate grayscale sources.
//!
//! # Features
//!
//! - **Compositor**: ordered input slots, per-output-channel sources with
//!   inversion, resampling to a power-of-two resolution
//! - **Presets**: HDRP mask map and detail map layouts
//! - **Export**: deterministic PNG, JPEG and OpenEXR encoding, image loading
//! - **Settings**: build a compositor from a JSON settings document
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use texpack_engine::{export, presets, Compositor, OutputFormat};
//!
//! let mut compositor = Compositor::new();
//! compositor.set_resolution(2048)?;
//!
//! let ids = presets::hdrp_mask_map(&mut compositor)?;
//! let metallic = export::load_texture(Path::new("metallic.png"))?;
//! if let Some(slot) = compositor.slot_mut(ids[0]) {
//!     slot.set_image(Arc::new(metallic));
//! }
//!
//! let packed = compositor.compose();
//! export::save(&packed, Path::new("mask_map.png"), OutputFormat::Png)?;
//! # Ok::<(), texpack_engine::PackError>(())
//! ```
//!
//! # Determinism
//!
//! Composition is a pure function of the slot list, images, resolution and
//! filter. Rows are computed in parallel, but each pixel depends only on its
//! coordinates, so repeated calls produce bit-identical buffers.

pub mod buffer;
pub mod cancel;
pub mod color;
pub mod compositor;
pub mod error;
pub mod export;
pub mod png;
pub mod presets;
pub mod settings;
pub mod slot;

// Re-export main types for convenience
pub use buffer::TextureBuffer;
pub use cancel::CancelToken;
pub use color::Color;
pub use compositor::Compositor;
pub use error::PackError;
pub use export::{decode_texture, encode, load_texture, save};
pub use png::{PngConfig, PngError};
pub use presets::Preset;
pub use slot::{InputSlot, SlotId};
pub use texpack_spec::{
    Channel, ChannelSource, OutputFormat, PackSettings, SamplingFilter, MAX_INPUT_COUNT,
    SUPPORTED_RESOLUTIONS,
};
