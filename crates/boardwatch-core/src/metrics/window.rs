// ── Fixed-length sliding history window ──

use super::sample::Sample;

/// Number of slots in every [`SlidingWindow`].
pub const WINDOW_LEN: usize = 12;

/// A fixed-length FIFO history of the most recent telemetry samples,
/// oldest first.
///
/// The window always holds exactly [`WINDOW_LEN`] slots — it is created
/// fully populated with [`Sample::INVALID`] gaps and never grows or
/// shrinks; the fixed length is structural, not a runtime convention.
///
/// [`push`](Self::push) is pure: it returns a new window and leaves the
/// receiver untouched, so a renderer holding a previous window keeps a
/// stable view while the poller produces the next one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlidingWindow {
    slots: [Sample; WINDOW_LEN],
}

impl SlidingWindow {
    /// A window of all-gap slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `sample` at the tail, evicting the oldest slot.
    #[must_use = "push returns the updated window; the receiver is unchanged"]
    pub fn push(&self, sample: Sample) -> Self {
        let mut next = *self;
        next.slots.copy_within(1.., 0);
        next.slots[WINDOW_LEN - 1] = sample;
        next
    }

    /// All slots, oldest first.
    pub fn values(&self) -> &[Sample; WINDOW_LEN] {
        &self.slots
    }

    /// The most recent slot.
    pub fn latest(&self) -> Sample {
        self.slots[WINDOW_LEN - 1]
    }

    /// Iterator over the slots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        self.slots.iter().copied()
    }
}

impl<'a> IntoIterator for &'a SlidingWindow {
    type Item = Sample;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Sample>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter().copied()
    }
}
