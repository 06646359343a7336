//! Channel packing compositor.
//!
//! The compositor owns an ordered list of input slots and a target resolution.
//! Composition resamples every referenced slot image to that resolution and
//! writes the four resolved channel sources into each output pixel.

mod compose;
#[allow(clippy::module_inception)]
mod compositor;

#[cfg(test)]
mod tests_compose;
#[cfg(test)]
mod tests_resolution;
#[cfg(test)]
mod tests_slots;

// Re-export public API
pub use compositor::Compositor;
