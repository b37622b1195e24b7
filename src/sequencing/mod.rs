//! From host elements to note requests.
//!
//! A `TagSource` supplies elements, `ScheduledTriggers` places one per tick
//! of the tempo grid into a `TriggerBlock`, and the `TonalSequencer` turns
//! each trigger into a pitched note for one or two voices.

pub mod clock;
pub mod cursor;
pub mod history;
pub mod tag;
pub mod tonal;
pub mod trigger;

pub use clock::TickClock;
#[cfg(feature = "rtrb")]
pub use cursor::{tag_feed, TagFeed};
pub use cursor::{Slot, TagCursor, TagSource};
pub use history::TagHistory;
pub use tag::{Tag, TagClass, TagEvent};
pub use tonal::{NoteRequest, TonalSequencer};
pub use trigger::{ScheduledTriggers, Silence, TriggerBlock, TriggerSource};
