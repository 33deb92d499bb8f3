//! Sign label text.

use serde::{Deserialize, Serialize};

/// Number of text lines on every sign variant.
pub const SIGN_LINES: usize = 4;

/// The four lines of text carried by a sign block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SignText {
    lines: [String; SIGN_LINES],
}

impl SignText {
    pub fn new(lines: [String; SIGN_LINES]) -> Self {
        Self { lines }
    }

    /// Build from up to four lines; missing lines are blank, extras dropped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut text = Self::default();
        for (slot, line) in text.lines.iter_mut().zip(lines) {
            *slot = line.into();
        }
        text
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Replace one line. Out-of-range indices are ignored.
    pub fn set_line(&mut self, index: usize, text: impl Into<String>) {
        if let Some(slot) = self.lines.get_mut(index) {
            *slot = text.into();
        }
    }

    pub fn lines(&self) -> &[String; SIGN_LINES] {
        &self.lines
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }
}
