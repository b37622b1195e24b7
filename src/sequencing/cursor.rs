#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

use super::tag::TagEvent;

/// Where scheduled triggers get their next element.
pub trait TagSource {
    /// The element for the next tick; `None` leaves the tick silent.
    fn next_event(&mut self) -> Option<TagEvent>;

    /// Move the cursor by `delta` events (negative rewinds).
    fn seek(&mut self, _delta: isize) {}

    fn seek_start(&mut self) {}
}

/// One position in a document: a visible element, or a rest where a hidden
/// element sits.
pub type Slot = Option<TagEvent>;

/// An in-memory document walked by a wrapping cursor.
///
/// Reaching the end starts over from the top, as do seeks past either end.
/// Rests take their tick and count towards seek distances like any element.
#[derive(Debug, Clone, Default)]
pub struct TagCursor {
    slots: Vec<Slot>,
    position: usize,
}

impl TagCursor {
    /// A document with every element visible.
    pub fn new(events: Vec<TagEvent>) -> Self {
        Self::with_rests(events.into_iter().map(Some).collect())
    }

    pub fn with_rests(slots: Vec<Slot>) -> Self {
        Self { slots, position: 0 }
    }

    /// The slot under the cursor, then step. `None` only when empty.
    pub fn next_slot(&mut self) -> Option<Slot> {
        let slot = *self.slots.get(self.position)?;
        self.position = (self.position + 1) % self.slots.len();
        Some(slot)
    }

    /// Index of the next slot to be played.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Visible elements, rests excluded.
    pub fn visible(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl TagSource for TagCursor {
    fn next_event(&mut self) -> Option<TagEvent> {
        self.next_slot().flatten()
    }

    fn seek(&mut self, delta: isize) {
        if self.slots.is_empty() {
            return;
        }
        let len = self.slots.len() as isize;
        self.position = (self.position as isize + delta).rem_euclid(len) as usize;
    }

    fn seek_start(&mut self) {
        self.position = 0;
    }
}

/// Default depth of a tag feed queue.
pub const TAG_QUEUE_SIZE: usize = 256;

/// Producer side of a bounded tag queue.
///
/// Lets a slow element lookup run on its own thread while the audio thread
/// pops ready slots from the `Consumer`. Rests travel through the queue too,
/// so the consumer keeps the document's rhythm. Cursor moves belong to
/// whatever feeds this handle; the consumer end cannot seek.
#[cfg(feature = "rtrb")]
pub struct TagFeed {
    tx: Producer<Slot>,
}

#[cfg(feature = "rtrb")]
impl TagFeed {
    /// Returns false if the queue is full.
    pub fn push(&mut self, slot: Slot) -> bool {
        self.tx.push(slot).is_ok()
    }

    /// Move slots from `cursor` until the queue is full or the cursor is empty.
    pub fn top_up(&mut self, cursor: &mut TagCursor) -> usize {
        let mut moved = 0;
        while self.tx.slots() > 0 {
            let Some(slot) = cursor.next_slot() else {
                break;
            };
            if !self.push(slot) {
                break;
            }
            moved += 1;
        }
        moved
    }

    /// Free slots in the queue.
    pub fn free(&self) -> usize {
        self.tx.slots()
    }
}

/// Create a bounded tag queue.
#[cfg(feature = "rtrb")]
pub fn tag_feed(capacity: usize) -> (TagFeed, Consumer<Slot>) {
    let (tx, rx) = RingBuffer::<Slot>::new(capacity.max(1));
    (TagFeed { tx }, rx)
}

/// A drained queue and a queued rest both leave the tick silent.
#[cfg(feature = "rtrb")]
impl TagSource for Consumer<Slot> {
    fn next_event(&mut self) -> Option<TagEvent> {
        self.pop().ok().flatten()
    }
}
