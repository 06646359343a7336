//! Settings validation.
//!
//! Errors make a document unusable. Warnings flag setups that compose fine but
//! leave channels blank: a mapping to a slot that does not exist, or a slot
//! without an image.

use std::path::{Component, Path};

use crate::channel::Channel;
use crate::error::{
    ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
use crate::resolution::validate_resolution;
use crate::settings::{PackSettings, MAX_INPUT_COUNT};

/// Checks that an image path is relative and stays inside its base directory.
pub fn is_safe_image_path(path: &Path) -> bool {
    if path.as_os_str().is_empty() {
        return false;
    }
    path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Validate a settings document.
pub fn validate_settings(settings: &PackSettings) -> ValidationResult {
    let mut result = ValidationResult::default();

    if let Err(e) = validate_resolution(settings.resolution) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidResolution,
            e.to_string(),
            "resolution",
        ));
    }

    if settings.slots.len() > MAX_INPUT_COUNT {
        result.add_error(ValidationError::with_path(
            ErrorCode::SlotLimitExceeded,
            format!(
                "at most {} slots are allowed, got {}",
                MAX_INPUT_COUNT,
                settings.slots.len()
            ),
            "slots",
        ));
    }

    for (i, slot) in settings.slots.iter().enumerate() {
        match &slot.image {
            Some(path) if !is_safe_image_path(path) => {
                result.add_error(ValidationError::with_path(
                    ErrorCode::UnsafeImagePath,
                    format!(
                        "image path must be relative and must not leave the settings directory: {}",
                        path.display()
                    ),
                    format!("slots[{}].image", i),
                ));
            }
            Some(_) => {}
            None => {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::MissingImage,
                    format!("slot '{}' has no image; channels read from it are 0", slot.label),
                    format!("slots[{}].image", i),
                ));
            }
        }

        for output in Channel::ALL {
            let Some(source) = slot.mapping.get(output) else {
                continue;
            };
            if let Some(index) = source.slot {
                if index >= settings.slots.len() {
                    result.add_warning(ValidationWarning::with_path(
                        WarningCode::DanglingSlotReference,
                        format!(
                            "mapping references slot {} but only {} slot(s) exist; channel is 0",
                            index,
                            settings.slots.len()
                        ),
                        format!("slots[{}].mapping.{}", i, output.short_name()),
                    ));
                }
            }
        }
    }

    result
}
