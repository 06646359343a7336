//! Texpack Spec Library
//!
//! This crate provides the value types, settings documents and validation rules
//! shared by the Texpack channel packing engine and the hosts that drive it.
//!
//! # Overview
//!
//! A packed texture has four output channels. Each one reads a single channel of
//! one input slot, optionally inverted. The types here describe that mapping
//! and the output it should produce:
//!
//! - **Channel mapping**: [`Channel`] and [`ChannelSource`]
//! - **Output**: resolution rules, [`OutputFormat`] and [`SamplingFilter`]
//! - **Settings**: the [`PackSettings`] JSON document and its validation
//!
//! # Example
//!
//! ```
//! use texpack_spec::{Channel, ChannelSource, PackSettings, SlotSettings};
//! use texpack_spec::validation::validate_settings;
//!
//! let settings = PackSettings {
//!     resolution: 512,
//!     slots: vec![
//!         SlotSettings::labeled("Metallic")
//!             .image("metallic.png")
//!             .source(Channel::Red, ChannelSource::new(0, Channel::Red)),
//!         SlotSettings::labeled("Smoothness")
//!             .image("roughness.png")
//!             .source(Channel::Alpha, ChannelSource::new(1, Channel::Red).with_inverted(true)),
//!     ],
//!     ..Default::default()
//! };
//!
//! assert!(validate_settings(&settings).is_ok());
//! ```

pub mod channel;
pub mod error;
pub mod resolution;
pub mod settings;
pub mod validation;

// Re-export commonly used types at the crate root
pub use channel::{Channel, ChannelSource};
pub use error::{
    BackendError, ErrorCode, SettingsError, ValidationError, ValidationResult,
    ValidationWarning, WarningCode,
};
pub use resolution::{
    is_supported_resolution, validate_resolution, ResolutionError, DEFAULT_RESOLUTION,
    MAX_RESOLUTION, MIN_RESOLUTION, PREVIEW_RESOLUTION, SUPPORTED_RESOLUTIONS,
};
pub use settings::{
    ChannelMapSettings, OutputFormat, PackSettings, SamplingFilter, SlotSettings, MAX_INPUT_COUNT,
};
pub use validation::{is_safe_image_path, validate_settings};
