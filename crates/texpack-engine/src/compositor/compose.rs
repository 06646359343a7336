//! Per-pixel composition.
//!
//! Every output pixel is computed independently from the slot images, so rows
//! are filled in parallel. Nothing here mutates the compositor or its images.

use std::time::Instant;

use rayon::prelude::*;
use texpack_spec::{ChannelSource, SamplingFilter, MAX_INPUT_COUNT, PREVIEW_RESOLUTION};

use crate::buffer::TextureBuffer;
use crate::cancel::CancelToken;
use crate::color::Color;
use crate::error::PackError;

use super::Compositor;

#[derive(Debug, Clone, Copy)]
struct SlotInput<'a> {
    image: &'a TextureBuffer,
    inverted: bool,
}

/// Everything one composition needs, resolved once up front.
struct ComposePlan<'a> {
    size: u32,
    filter: SamplingFilter,
    sources: [ChannelSource; 4],
    /// Indexed by slot. `None` for slots without an image or that no output
    /// channel reads.
    inputs: [Option<SlotInput<'a>>; MAX_INPUT_COUNT],
}

impl<'a> ComposePlan<'a> {
    fn new(compositor: &'a Compositor, size: u32) -> Self {
        let sources = compositor.resolved_sources();
        let mut inputs = [None; MAX_INPUT_COUNT];

        for (index, slot) in compositor.slot_list().enumerate().take(MAX_INPUT_COUNT) {
            let referenced = sources.iter().any(|s| s.slot == Some(index));
            if !referenced {
                continue;
            }
            if let Some(image) = slot.image() {
                inputs[index] = Some(SlotInput {
                    image,
                    inverted: slot.inverted,
                });
            }
        }

        Self {
            size,
            filter: compositor.filter(),
            sources,
            inputs,
        }
    }

    fn pixel(&self, x: u32, y: u32) -> Color {
        let mut samples = [None; MAX_INPUT_COUNT];
        for (sample, input) in samples.iter_mut().zip(&self.inputs) {
            let Some(input) = input else {
                continue;
            };
            let color = input
                .image
                .sample_scaled(self.filter, x, y, self.size, self.size)
                .clamp();
            let color = if input.inverted { color.invert() } else { color };
            *sample = Some(color.to_array());
        }

        Color::from_array(self.sources.map(|source| source.evaluate(&samples)))
    }

    fn fill_row(&self, y: u32, row: &mut [Color]) {
        for (x, px) in row.iter_mut().enumerate() {
            *px = self.pixel(x as u32, y);
        }
    }
}

impl Compositor {
    /// Composes the packed texture at the configured resolution.
    ///
    /// The result is `resolution x resolution`. Channels whose source slot has
    /// no image, or no longer exists, are 0; with nothing mapped the output is
    /// all zeros, alpha included. Calling this again without changing the
    /// configuration yields a bit-identical buffer.
    pub fn compose(&self) -> TextureBuffer {
        self.render(self.resolution())
    }

    /// Composes at [`PREVIEW_RESOLUTION`] without touching the configured resolution.
    pub fn compose_preview(&self) -> TextureBuffer {
        self.render(PREVIEW_RESOLUTION)
    }

    /// Like [`compose`](Self::compose), but gives up with
    /// [`PackError::Cancelled`] once `cancel` is set. A cancelled run returns
    /// no buffer.
    pub fn compose_with_cancel(&self, cancel: &CancelToken) -> Result<TextureBuffer, PackError> {
        let size = self.resolution();
        let plan = ComposePlan::new(self, size);
        let start = Instant::now();
        tracing::debug!("Composing {}x{} from {} slot(s)", size, size, self.len());

        let mut output = TextureBuffer::new_transparent(size, size);
        let result = output
            .data
            .par_chunks_mut(size as usize)
            .enumerate()
            .try_for_each(|(y, row)| {
                if cancel.is_cancelled() {
                    return Err(PackError::Cancelled);
                }
                plan.fill_row(y as u32, row);
                Ok(())
            });

        if let Err(e) = result {
            tracing::info!("Composition of {}x{} cancelled", size, size);
            return Err(e);
        }

        tracing::debug!("Composed {}x{} in {:?}", size, size, start.elapsed());
        Ok(output)
    }

    fn render(&self, size: u32) -> TextureBuffer {
        let plan = ComposePlan::new(self, size);
        let start = Instant::now();
        tracing::debug!("Composing {}x{} from {} slot(s)", size, size, self.len());

        let mut output = TextureBuffer::new_transparent(size, size);
        output
            .data
            .par_chunks_mut(size as usize)
            .enumerate()
            .for_each(|(y, row)| plan.fill_row(y as u32, row));

        tracing::debug!("Composed {}x{} in {:?}", size, size, start.elapsed());
        output
    }
}
