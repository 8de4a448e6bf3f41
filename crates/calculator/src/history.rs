//! Const-generic result history with oldest-eviction and cyclic scroll-back.
//!
//! `HistoryRing<T, N>` keeps the last `N` pushed values without heap
//! allocation. Insertion is always at `rear`; once full, every push also
//! advances `front`, silently evicting the oldest entry.
//!
//! A scroll cursor walks backward from the newest entry on each
//! [`scroll_back`](HistoryRing::scroll_back): newest → … → oldest → newest.
//! Every [`push`](HistoryRing::push) puts the cursor back on the newest entry.

/// Fixed-capacity ring of past results.
#[derive(Debug, Clone)]
pub struct HistoryRing<T, const N: usize> {
    buf: [Option<T>; N],
    /// Index of the oldest entry.
    front: usize,
    /// Index of the next slot to write.
    rear: usize,
    /// Number of valid entries.
    len: usize,
    /// Index of the entry the next scroll returns.
    cursor: usize,
}

impl<T: Copy, const N: usize> HistoryRing<T, N> {
    /// Create an empty ring.
    pub const fn new() -> Self {
        Self {
            buf: [None; N],
            front: 0,
            rear: 0,
            len: 0,
            cursor: 0,
        }
    }

    /// Insert `value` as the newest entry, evicting the oldest when full.
    #[allow(clippy::arithmetic_side_effects)] // Safety: len < N before increment
    pub fn push(&mut self, value: T) {
        if let Some(slot) = self.buf.get_mut(self.rear) {
            *slot = Some(value);
        }
        self.rear = Self::forward(self.rear);
        if self.len == N {
            self.front = Self::forward(self.front);
        } else {
            self.len += 1;
        }
        self.reset_cursor();
    }

    /// Return the entry under the cursor and step the cursor one older,
    /// wrapping from the oldest back to the newest.
    ///
    /// Returns `None` when the ring is empty.
    pub fn scroll_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.buf.get(self.cursor).copied().flatten();
        self.cursor = if self.cursor == self.front {
            self.newest_index()
        } else {
            Self::backward(self.cursor)
        };
        value
    }

    /// Point the cursor at the newest entry.
    pub fn reset_cursor(&mut self) {
        self.cursor = self.newest_index();
    }

    /// The newest entry.
    pub fn newest(&self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.buf.get(self.newest_index()).copied().flatten()
    }

    /// Entries from newest to oldest.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = T> + '_ {
        let mut index = self.newest_index();
        (0..self.len).filter_map(move |_| {
            let value = self.buf.get(index).copied().flatten();
            index = Self::backward(index);
            value
        })
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of entries.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Forget all entries.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn newest_index(&self) -> usize {
        Self::backward(self.rear)
    }

    fn forward(index: usize) -> usize {
        index.wrapping_add(1).checked_rem(N).unwrap_or(0)
    }

    fn backward(index: usize) -> usize {
        match index.checked_sub(1) {
            Some(i) => i,
            None => N.saturating_sub(1),
        }
    }
}

impl<T: Copy, const N: usize> Default for HistoryRing<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
