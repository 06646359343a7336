//! Output resolution rules.
//!
//! Packed textures are always square. The side length must be a power of two
//! between [`MIN_RESOLUTION`] and [`MAX_RESOLUTION`] inclusive.

use thiserror::Error;

/// Smallest supported output side length.
pub const MIN_RESOLUTION: u32 = 64;

/// Largest supported output side length.
pub const MAX_RESOLUTION: u32 = 8192;

/// Resolution a freshly initialized compositor uses.
pub const DEFAULT_RESOLUTION: u32 = 1024;

/// Resolution of the live preview.
pub const PREVIEW_RESOLUTION: u32 = 128;

/// Every supported resolution, smallest first.
pub const SUPPORTED_RESOLUTIONS: [u32; 8] = [64, 128, 256, 512, 1024, 2048, 4096, 8192];

/// Why a resolution was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The value is not a power of two.
    #[error("resolution must be a power of two, got {0}")]
    NotPowerOfTwo(u32),

    /// The value is a power of two outside the supported range.
    #[error(
        "resolution must be in [{min}, {max}], got {0}",
        min = MIN_RESOLUTION,
        max = MAX_RESOLUTION
    )]
    OutOfRange(u32),
}

impl ResolutionError {
    /// The rejected value.
    pub fn value(&self) -> u32 {
        match self {
            ResolutionError::NotPowerOfTwo(v) | ResolutionError::OutOfRange(v) => *v,
        }
    }
}

/// Returns the supported resolutions as labels for a selection list.
pub fn supported_resolution_names() -> Vec<String> {
    SUPPORTED_RESOLUTIONS.iter().map(|r| r.to_string()).collect()
}

/// Returns true if `resolution` can be used as an output size.
pub fn is_supported_resolution(resolution: u32) -> bool {
    validate_resolution(resolution).is_ok()
}

/// Validate an output resolution.
///
/// # Example
/// ```
/// use texpack_spec::resolution::validate_resolution;
///
/// assert!(validate_resolution(256).is_ok());
/// assert!(validate_resolution(100).is_err());
/// assert!(validate_resolution(32).is_err());
/// ```
pub fn validate_resolution(resolution: u32) -> Result<(), ResolutionError> {
    if !resolution.is_power_of_two() {
        return Err(ResolutionError::NotPowerOfTwo(resolution));
    }
    if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
        return Err(ResolutionError::OutOfRange(resolution));
    }
    Ok(())
}
