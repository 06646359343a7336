//! Building a compositor from a settings document.

use std::path::Path;
use std::sync::Arc;

use texpack_spec::{validate_settings, Channel, PackSettings};

use crate::compositor::Compositor;
use crate::error::PackError;
use crate::export::load_texture;
use crate::slot::InputSlot;

impl Compositor {
    /// Validates `settings`, loads every referenced image relative to
    /// `base_dir`, and returns a compositor ready to compose.
    ///
    /// Validation warnings are logged, not returned.
    pub fn from_settings(settings: &PackSettings, base_dir: &Path) -> Result<Self, PackError> {
        let result = validate_settings(settings);
        for warning in &result.warnings {
            tracing::warn!("{}", warning);
        }
        if let Err(errors) = result.into_result() {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            return Err(PackError::InvalidSettings(messages.join("; ")));
        }

        let mut compositor = Compositor::new();
        compositor.set_resolution(settings.resolution)?;
        compositor.set_filter(settings.filter);

        for slot_settings in &settings.slots {
            let mut slot = InputSlot::labeled(slot_settings.label.clone())
                .with_inverted(slot_settings.inverted);
            for output in Channel::ALL {
                if let Some(source) = slot_settings.mapping.get(output) {
                    slot.set_source(output, source);
                }
            }
            if let Some(path) = &slot_settings.image {
                let image = load_texture(&base_dir.join(path))?;
                slot.set_image(Arc::new(image));
            }
            compositor.add(slot)?;
        }

        tracing::info!(
            "Loaded pack settings: {} slot(s) at {}x{}",
            compositor.len(),
            compositor.resolution(),
            compositor.resolution()
        );
        Ok(compositor)
    }
}
