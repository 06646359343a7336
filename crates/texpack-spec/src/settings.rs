//! Pack settings documents.
//!
//! A settings document captures one packing setup so it can be saved and
//! restored:
//!
//! ```json
//! {
//!   "resolution": 512,
//!   "filter": "bilinear",
//!   "format": "png",
//!   "slots": [
//!     { "label": "Metallic", "image": "metal.png",
//!       "mapping": { "r": { "slot": 0, "channel": "red" } } },
//!     { "label": "Smoothness", "image": "rough.png",
//!       "mapping": { "a": { "slot": 1, "channel": "red", "inverted": true } } }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::channel::{Channel, ChannelSource};
use crate::error::SettingsError;
use crate::resolution::DEFAULT_RESOLUTION;
use crate::validation::validate_settings;

/// Maximum number of input slots a compositor holds at once.
pub const MAX_INPUT_COUNT: usize = 4;

/// How input images are resampled to the output resolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SamplingFilter {
    /// Nearest texel.
    Nearest,
    /// Bilinear interpolation between the four nearest texels.
    #[default]
    Bilinear,
}

/// File format of the encoded output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 8-bit RGBA PNG.
    #[default]
    Png,
    /// 8-bit RGB JPEG. Alpha is dropped.
    Jpg,
    /// 32-bit float RGBA OpenEXR.
    Exr,
}

impl OutputFormat {
    /// All formats, in menu order.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Png, OutputFormat::Jpg, OutputFormat::Exr];

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Exr => "exr",
        }
    }

    /// Guess the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpg),
            "exr" => Some(OutputFormat::Exr),
            _ => None,
        }
    }

    /// Returns true if the format stores an alpha channel.
    pub fn has_alpha(&self) -> bool {
        !matches!(self, OutputFormat::Jpg)
    }
}

/// Per-output-channel sources of one slot. `None` leaves the channel unset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ChannelMapSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<ChannelSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g: Option<ChannelSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<ChannelSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<ChannelSource>,
}

impl ChannelMapSettings {
    /// Source set for `output`, if any.
    pub fn get(&self, output: Channel) -> Option<ChannelSource> {
        match output {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
            Channel::Alpha => self.a,
        }
    }

    /// Sets or clears the source for `output`.
    pub fn set(&mut self, output: Channel, source: Option<ChannelSource>) {
        match output {
            Channel::Red => self.r = source,
            Channel::Green => self.g = source,
            Channel::Blue => self.b = source,
            Channel::Alpha => self.a = source,
        }
    }

    /// RGBA-ordered array view.
    pub fn to_array(&self) -> [Option<ChannelSource>; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Builds from an RGBA-ordered array.
    pub fn from_array(sources: [Option<ChannelSource>; 4]) -> Self {
        let [r, g, b, a] = sources;
        Self { r, g, b, a }
    }
}

/// One input slot of a settings document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SlotSettings {
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Image path relative to the settings file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
    /// Invert every channel read from this slot.
    #[serde(default)]
    pub inverted: bool,
    /// Output channel sources contributed by this slot.
    #[serde(default)]
    pub mapping: ChannelMapSettings,
}

impl SlotSettings {
    /// Creates an empty slot with a label.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Sets the image path.
    pub fn image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }

    /// Sets the source for one output channel.
    pub fn source(mut self, output: Channel, source: ChannelSource) -> Self {
        self.mapping.set(output, Some(source));
        self
    }
}

fn default_resolution() -> u32 {
    DEFAULT_RESOLUTION
}

/// A complete packing setup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackSettings {
    /// Output side length in pixels.
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    /// Resampling filter applied to every slot.
    #[serde(default)]
    pub filter: SamplingFilter,
    /// Output file format.
    #[serde(default)]
    pub format: OutputFormat,
    /// Input slots in order.
    #[serde(default)]
    pub slots: Vec<SlotSettings>,
}

impl Default for PackSettings {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            filter: SamplingFilter::default(),
            format: OutputFormat::default(),
            slots: Vec::new(),
        }
    }
}

impl PackSettings {
    /// Parses a settings document. Does not validate.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads, parses and validates a settings file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        let result = validate_settings(&settings);
        if !result.is_ok() {
            return Err(SettingsError::ValidationFailed(result.errors.len()));
        }
        Ok(settings)
    }
}
