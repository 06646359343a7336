//! Compositor state and slot management.

use texpack_spec::{
    validate_resolution, Channel, ChannelSource, SamplingFilter, DEFAULT_RESOLUTION,
    MAX_INPUT_COUNT,
};

use crate::error::PackError;
use crate::slot::{InputSlot, SlotId};

#[derive(Debug, Clone)]
struct SlotEntry {
    id: SlotId,
    slot: InputSlot,
}

/// Packs up to [`MAX_INPUT_COUNT`] input slots into one square RGBA texture.
///
/// Output channel `c` reads the source set for `c` by the last slot (in list
/// order) that sets one. When no slot sets a source for `c`, it reads channel
/// `c` of slot 0.
#[derive(Debug, Clone)]
pub struct Compositor {
    slots: Vec<SlotEntry>,
    resolution: u32,
    filter: SamplingFilter,
    next_id: u64,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    /// Creates an empty compositor at [`DEFAULT_RESOLUTION`] with bilinear sampling.
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(MAX_INPUT_COUNT),
            resolution: DEFAULT_RESOLUTION,
            filter: SamplingFilter::default(),
            next_id: 0,
        }
    }

    /// Removes every slot and restores the default resolution and filter.
    ///
    /// The list is left empty, with no placeholder slot 0, so a preset can
    /// still add all four of its slots. An empty compositor composes to all
    /// zeros, the same as one empty slot would. Slot ids handed out before the
    /// reset are never reused.
    pub fn initialize(&mut self) {
        self.slots.clear();
        self.resolution = DEFAULT_RESOLUTION;
        self.filter = SamplingFilter::default();
        tracing::debug!("Compositor initialized at {}x{}", self.resolution, self.resolution);
    }

    /// Appends a slot and returns its id.
    ///
    /// Fails with [`PackError::SlotLimitExceeded`] when [`MAX_INPUT_COUNT`]
    /// slots already exist; the list is left unchanged.
    pub fn add(&mut self, slot: InputSlot) -> Result<SlotId, PackError> {
        if self.slots.len() >= MAX_INPUT_COUNT {
            tracing::warn!(
                "Rejected slot '{}': compositor already holds {} slots",
                slot.label,
                MAX_INPUT_COUNT
            );
            return Err(PackError::SlotLimitExceeded {
                max: MAX_INPUT_COUNT,
            });
        }

        let id = SlotId(self.next_id);
        self.next_id += 1;
        tracing::debug!("Added {} '{}' at index {}", id, slot.label, self.slots.len());
        self.slots.push(SlotEntry { id, slot });
        Ok(id)
    }

    /// Removes a slot by id and returns it. Does nothing if the id is unknown.
    ///
    /// Every output channel keeps reading the slot it read before. Channels
    /// that read the removed slot read 0 from then on, including channels
    /// whose override lived on the removed slot and channels that fell back to
    /// a removed slot 0. Later slots shift down one index and their sources
    /// are renumbered to match.
    pub fn remove(&mut self, id: SlotId) -> Option<InputSlot> {
        let index = self.index_of(id)?;
        let before = self.resolved_sources();
        let entry = self.slots.remove(index);

        for other in &mut self.slots {
            for output in Channel::ALL {
                if let Some(source) = other.slot.source_mut(output) {
                    *source = source.after_removal(index);
                }
            }
        }

        // The winner for an output may have left with the slot. Pin the
        // renumbered source on the last slot so nothing earlier takes over.
        for output in Channel::ALL {
            let expected = before[output.index()].after_removal(index);
            if self.resolved_source(output) == expected {
                continue;
            }
            if let Some(last) = self.slots.last_mut() {
                last.slot.set_source(output, expected);
            }
        }

        tracing::debug!("Removed {} '{}' from index {}", id, entry.slot.label, index);
        Some(entry.slot)
    }

    /// Current output resolution.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Sets the output resolution.
    ///
    /// Fails with [`PackError::InvalidResolution`] unless `resolution` is a
    /// power of two in [64, 8192]; the previous value is kept.
    pub fn set_resolution(&mut self, resolution: u32) -> Result<(), PackError> {
        if let Err(e) = validate_resolution(resolution) {
            tracing::warn!("Rejected resolution {}: {}", resolution, e);
            return Err(e.into());
        }
        self.resolution = resolution;
        Ok(())
    }

    /// Resampling filter applied to every slot.
    pub fn filter(&self) -> SamplingFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: SamplingFilter) {
        self.filter = filter;
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if no more slots can be added.
    pub fn is_full(&self) -> bool {
        self.slots.len() >= MAX_INPUT_COUNT
    }

    /// Current index of a slot.
    pub fn index_of(&self, id: SlotId) -> Option<usize> {
        self.slots.iter().position(|e| e.id == id)
    }

    /// Id of the slot at `index`.
    pub fn id_at(&self, index: usize) -> Option<SlotId> {
        self.slots.get(index).map(|e| e.id)
    }

    pub fn slot(&self, id: SlotId) -> Option<&InputSlot> {
        self.slots.iter().find(|e| e.id == id).map(|e| &e.slot)
    }

    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut InputSlot> {
        self.slots.iter_mut().find(|e| e.id == id).map(|e| &mut e.slot)
    }

    pub fn slot_at(&self, index: usize) -> Option<&InputSlot> {
        self.slots.get(index).map(|e| &e.slot)
    }

    /// Slots in order with their ids.
    pub fn slots(&self) -> impl Iterator<Item = (SlotId, &InputSlot)> + '_ {
        self.slots.iter().map(|e| (e.id, &e.slot))
    }

    /// The source output channel `output` reads from.
    pub fn resolved_source(&self, output: Channel) -> ChannelSource {
        self.slots
            .iter()
            .rev()
            .find_map(|e| e.slot.source(output))
            .unwrap_or(InputSlot::default_source(0, output))
    }

    /// Resolved sources for all four output channels, in RGBA order.
    pub fn resolved_sources(&self) -> [ChannelSource; 4] {
        Channel::ALL.map(|c| self.resolved_source(c))
    }

    pub(super) fn slot_list(&self) -> impl Iterator<Item = &InputSlot> + '_ {
        self.slots.iter().map(|e| &e.slot)
    }
}
