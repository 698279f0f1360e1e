//! The text buffer.
//!
//! All positions are char offsets in `[0, len]`. Every other component
//! addresses text only through these offsets.

use std::fmt;
use std::ops::Range;

use ropey::Rope;

use crate::error::{Error, Result};

/// Mutable character storage backed by a rope.
#[derive(Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a buffer holding `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    /// Whether the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The char at `pos`, or `None` past the end.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        (pos < self.len()).then(|| self.rope.char(pos))
    }

    /// Whether `pos` begins a line: the buffer start, or right after `'\n'`.
    pub fn is_line_start(&self, pos: usize) -> bool {
        pos == 0 || self.char_at(pos - 1) == Some('\n')
    }

    /// Copy out the text in `range`.
    pub fn slice(&self, range: Range<usize>) -> Result<String> {
        Error::check_range(range.start, range.end, self.len())?;
        Ok(self.rope.slice(range).to_string())
    }

    /// Insert `text` at `pos`, shifting everything after it.
    ///
    /// Returns the number of chars inserted.
    pub fn insert(&mut self, pos: usize, text: &str) -> Result<usize> {
        Error::check_range(pos, pos, self.len())?;
        self.rope.insert(pos, text);
        Ok(text.chars().count())
    }

    /// Remove the chars in `range`, shifting everything after it back.
    pub fn remove(&mut self, range: Range<usize>) -> Result<()> {
        Error::check_range(range.start, range.end, self.len())?;
        if !range.is_empty() {
            self.rope.remove(range);
        }
        Ok(())
    }

    /// Replace the whole content.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Remove all text.
    pub fn clear(&mut self) {
        self.rope = Rope::new();
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("len", &self.len())
            .field("text", &self.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        let buffer = TextBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.char_at(0), None);
        assert!(buffer.is_line_start(0));
    }

    #[test]
    fn test_positions_are_chars() {
        let buffer = TextBuffer::from_text("héllo");
        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.char_at(1), Some('é'));
        assert_eq!(buffer.slice(1..3).unwrap(), "él");
    }

    #[test]
    fn test_insert_and_remove() {
        let mut buffer = TextBuffer::from_text("Hello world");
        assert_eq!(buffer.insert(5, ",").unwrap(), 1);
        assert_eq!(buffer.to_string(), "Hello, world");

        buffer.remove(5..7).unwrap();
        assert_eq!(buffer.to_string(), "Helloworld");
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut buffer = TextBuffer::from_text("ab");
        assert_eq!(
            buffer.insert(3, "x"),
            Err(Error::InvalidRange { start: 3, end: 3, len: 2 })
        );
        assert!(buffer.remove(1..3).is_err());
        assert!(buffer.slice(2..1).is_err());
        assert_eq!(buffer.to_string(), "ab");
    }

    #[test]
    fn test_line_start() {
        let buffer = TextBuffer::from_text("one\ntwo");
        assert!(buffer.is_line_start(0));
        assert!(!buffer.is_line_start(3));
        assert!(buffer.is_line_start(4));
        assert!(!buffer.is_line_start(5));
    }
}
