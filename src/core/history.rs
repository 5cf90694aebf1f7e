//! Command history with up/down navigation.

use std::collections::VecDeque;

/// Bounded log of submitted lines, most recent last.
///
/// The cursor is `None` while the user is not browsing. Browsing starts at
/// the newest entry, saturates at the oldest, and returning past the newest
/// hands back the line that was being typed before browsing began.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<String>,
    capacity: usize,
    cursor: Option<usize>,
    /// Input that was in progress when browsing started.
    draft: String,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(100)
    }
}

impl HistoryBuffer {
    /// Create a history keeping at most `capacity` lines.
    ///
    /// A capacity of zero disables recording.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(256)),
            capacity,
            cursor: None,
            draft: String::new(),
        }
    }

    /// Record a submitted line, dropping the oldest entry when full.
    ///
    /// Resets navigation.
    pub fn append(&mut self, line: impl Into<String>) {
        self.reset_cursor();

        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.into());
    }

    /// Step towards older entries (up arrow).
    ///
    /// `current_input` is remembered when browsing starts so [`next`](Self::next)
    /// can restore it. With an empty history the input comes straight back.
    pub fn previous(&mut self, current_input: &str) -> &str {
        if self.entries.is_empty() {
            self.draft = current_input.to_string();
            return &self.draft;
        }

        let pos = match self.cursor {
            None => {
                self.draft = current_input.to_string();
                self.entries.len() - 1
            }
            Some(p) => p.saturating_sub(1),
        };

        self.cursor = Some(pos);
        &self.entries[pos]
    }

    /// Step towards newer entries (down arrow).
    ///
    /// Past the newest entry the cursor leaves browsing mode and the saved
    /// draft is returned. When not browsing this is the draft as well.
    pub fn next(&mut self) -> &str {
        match self.cursor {
            Some(p) if p + 1 < self.entries.len() => {
                self.cursor = Some(p + 1);
                &self.entries[p + 1]
            }
            _ => {
                self.cursor = None;
                &self.draft
            }
        }
    }

    /// Leave browsing mode, e.g. after the input was edited by hand.
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
        self.draft.clear();
    }

    /// Current browsing position (index into [`entries`](Self::entries)).
    #[inline]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.reset_cursor();
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, evicting the oldest entries if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.entries.len() > capacity {
            self.entries.pop_front();
        }
        self.reset_cursor();
    }

    /// Iterate over entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// The most recently recorded line.
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }
}
