use super::tag::Tag;

/// How many past tags the repetition rules can look at.
pub const HISTORY_DEPTH: usize = 6;

/// Fixed ring of the most recent tags.
///
/// Slots start empty, and an empty slot never equals a tag, so the rules
/// cannot fire before enough tags have been seen.
#[derive(Debug, Clone, Default)]
pub struct TagHistory {
    slots: [Option<Tag>; HISTORY_DEPTH],
    head: usize,
}

impl TagHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `tag` as the newest entry, dropping the oldest.
    pub fn push(&mut self, tag: Tag) {
        self.slots[self.head] = Some(tag);
        self.head = (self.head + 1) % HISTORY_DEPTH;
    }

    /// The tag pushed `ago` pushes back (1 = previous), if any.
    pub fn ago(&self, ago: usize) -> Option<Tag> {
        if ago == 0 || ago > HISTORY_DEPTH {
            return None;
        }
        self.slots[(self.head + HISTORY_DEPTH - ago) % HISTORY_DEPTH]
    }

    /// True if every listed lag holds `tag`.
    pub fn repeats(&self, tag: Tag, lags: &[usize]) -> bool {
        lags.iter().all(|&lag| self.ago(lag) == Some(tag))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
