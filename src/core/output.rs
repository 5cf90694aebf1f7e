//! Styled scrollback buffer.
//!
//! The console never draws text itself. It keeps an ordered list of styled
//! lines that a display collaborator (a window, a terminal, a rich-text label)
//! renders verbatim.

use std::collections::VecDeque;

/// Display kind of an output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputKind {
    /// Unstyled text.
    #[default]
    Plain,
    /// General information.
    Info,
    /// Warning (yellow in most themes).
    Warning,
    /// Error (red in most themes).
    Error,
}

impl OutputKind {
    /// Short label, used by plain-text renderers.
    pub fn label(&self) -> &'static str {
        match self {
            OutputKind::Plain => "",
            OutputKind::Info => "INFO",
            OutputKind::Warning => "WARN",
            OutputKind::Error => "ERROR",
        }
    }
}

/// One line of console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// Sequence number, strictly increasing over the buffer's lifetime.
    pub seq: u64,
    /// Display kind.
    pub kind: OutputKind,
    /// The text.
    pub text: String,
}

/// Append-only styled output with oldest-first eviction.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    lines: VecDeque<OutputLine>,
    /// Maximum retained lines, `0` for unbounded.
    max_lines: usize,
    next_seq: u64,
    auto_scroll: bool,
    scroll_requested: bool,
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl OutputBuffer {
    /// Create a buffer keeping at most `max_lines` lines (`0` = unbounded).
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines,
            next_seq: 0,
            auto_scroll: true,
            scroll_requested: false,
        }
    }

    /// Append a line.
    ///
    /// Text containing newlines is split into one line per row, all with the
    /// same kind.
    pub fn push(&mut self, kind: OutputKind, text: impl AsRef<str>) {
        for row in text.as_ref().split('\n') {
            let line = OutputLine {
                seq: self.next_seq,
                kind,
                text: row.trim_end_matches('\r').to_string(),
            };
            self.next_seq += 1;
            self.lines.push_back(line);
        }

        self.evict();

        if self.auto_scroll {
            self.scroll_requested = true;
        }
    }

    /// Append a plain line.
    pub fn plain(&mut self, text: impl AsRef<str>) {
        self.push(OutputKind::Plain, text);
    }

    /// Append an info line.
    pub fn info(&mut self, text: impl AsRef<str>) {
        self.push(OutputKind::Info, text);
    }

    /// Append a warning line.
    pub fn warning(&mut self, text: impl AsRef<str>) {
        self.push(OutputKind::Warning, text);
    }

    /// Append an error line.
    pub fn error(&mut self, text: impl AsRef<str>) {
        self.push(OutputKind::Error, text);
    }

    /// Remove every line. Sequence numbers keep counting.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of retained lines.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the buffer holds no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over retained lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &OutputLine> {
        self.lines.iter()
    }

    /// The newest line, if any.
    pub fn last(&self) -> Option<&OutputLine> {
        self.lines.back()
    }

    /// Lines with a sequence number of at least `seq`.
    pub fn since(&self, seq: u64) -> impl Iterator<Item = &OutputLine> {
        self.lines.iter().filter(move |line| line.seq >= seq)
    }

    /// Sequence number the next appended line will get.
    #[inline]
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Maximum retained lines (`0` = unbounded).
    #[inline]
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Change the line cap, evicting immediately if needed.
    pub fn set_max_lines(&mut self, max_lines: usize) {
        self.max_lines = max_lines;
        self.evict();
    }

    /// Whether appends request a scroll to the newest line.
    #[inline]
    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    pub fn set_auto_scroll(&mut self, auto_scroll: bool) {
        self.auto_scroll = auto_scroll;
    }

    /// Ask the display to scroll to the newest line.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_requested = true;
    }

    /// Consume a pending scroll request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    /// Render the whole buffer as plain text, one line per row.
    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn evict(&mut self) {
        if self.max_lines == 0 {
            return;
        }
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }
}
