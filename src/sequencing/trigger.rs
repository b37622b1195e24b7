use crate::{engine::EngineContext, SynthError};

use super::{
    clock::TickClock,
    cursor::TagSource,
    tag::TagEvent,
};

/// The triggers of one block: sparse, sorted by offset, no duplicates.
///
/// Storage is allocated up front and reused, so refilling a block on the
/// audio thread does not allocate while it stays within capacity.
#[derive(Debug, Clone)]
pub struct TriggerBlock {
    block_length: usize,
    events: Vec<(usize, TagEvent)>,
}

impl TriggerBlock {
    pub fn new(block_length: usize) -> Self {
        Self::with_capacity(block_length, block_length)
    }

    pub fn with_capacity(block_length: usize, capacity: usize) -> Self {
        Self {
            block_length,
            events: Vec::with_capacity(capacity),
        }
    }

    /// Empty the block and set the length for the next fill.
    pub fn reset(&mut self, block_length: usize) {
        self.block_length = block_length;
        self.events.clear();
    }

    pub fn insert(&mut self, offset: usize, event: TagEvent) -> Result<(), SynthError> {
        if offset >= self.block_length {
            return Err(SynthError::TriggerOutOfRange {
                offset,
                block_length: self.block_length,
            });
        }

        match self.events.binary_search_by_key(&offset, |(o, _)| *o) {
            Ok(_) => Err(SynthError::DuplicateTrigger(offset)),
            Err(index) => {
                self.events.insert(index, (offset, event));
                Ok(())
            }
        }
    }

    /// Build the event from raw host data and insert it.
    pub fn push(&mut self, offset: usize, tag: &str, width: f32) -> Result<(), SynthError> {
        let event = TagEvent::new(tag, width)?;
        self.insert(offset, event)
    }

    pub fn get(&self, offset: usize) -> Option<&TagEvent> {
        self.events
            .binary_search_by_key(&offset, |(o, _)| *o)
            .ok()
            .map(|index| &self.events[index].1)
    }

    /// Triggers in offset order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &TagEvent)> {
        self.events.iter().map(|(offset, event)| (*offset, event))
    }

    pub fn block_length(&self) -> usize {
        self.block_length
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Host callback producing the triggers for each block.
///
/// Called once per block from the audio thread; implementations must not
/// block. Cursor moves default to no-ops for sources without a cursor.
pub trait TriggerSource {
    fn fill(&mut self, ctx: &EngineContext, block: &mut TriggerBlock) -> Result<(), SynthError>;

    /// Move the underlying cursor by `delta` events.
    fn seek(&mut self, _delta: isize) {}

    fn seek_start(&mut self) {}
}

impl<F> TriggerSource for F
where
    F: FnMut(&EngineContext, &mut TriggerBlock) -> Result<(), SynthError>,
{
    fn fill(&mut self, ctx: &EngineContext, block: &mut TriggerBlock) -> Result<(), SynthError> {
        self(ctx, block)
    }
}

/// A source that never triggers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silence;

impl TriggerSource for Silence {
    fn fill(&mut self, _ctx: &EngineContext, _block: &mut TriggerBlock) -> Result<(), SynthError> {
        Ok(())
    }
}

/// Pulls one tag per sixteenth-note tick from a `TagSource`.
///
/// A tick with no event available stays silent; the clock keeps running.
pub struct ScheduledTriggers<S> {
    clock: TickClock,
    source: S,
}

impl<S: TagSource> ScheduledTriggers<S> {
    pub fn new(source: S) -> Self {
        Self {
            clock: TickClock::new(),
            source,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: TagSource> TriggerSource for ScheduledTriggers<S> {
    fn fill(&mut self, ctx: &EngineContext, block: &mut TriggerBlock) -> Result<(), SynthError> {
        let Self { clock, source } = self;
        let mut result = Ok(());

        clock.advance(block.block_length(), ctx.samples_per_tick(), |offset| {
            if result.is_err() {
                return;
            }
            if let Some(event) = source.next_event() {
                result = block.insert(offset, event);
            }
        });

        result
    }

    fn seek(&mut self, delta: isize) {
        self.source.seek(delta);
    }

    fn seek_start(&mut self) {
        self.source.seek_start();
    }
}
