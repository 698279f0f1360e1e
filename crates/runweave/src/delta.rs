//! Edit delta tracking.
//!
//! The editing surface announces an edit before it happens, as a start offset
//! and lengths, but the reconciler needs the range the edit occupies after the
//! buffer has re-flowed. [`EditDeltaTracker`] bridges the two by planting a
//! pair of markers over the announced region and letting the same insert and
//! delete notifications that re-flow the runs move the markers too.

use std::fmt;
use std::ops::Range;

use runweave_core::logging::targets;

use crate::error::{Error, Result};

/// Which side of text inserted exactly at a marker the marker ends up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    /// The marker stays before the inserted text.
    Before,
    /// The marker moves to after the inserted text.
    After,
}

/// A position that follows buffer edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pos: usize,
    gravity: Gravity,
}

impl Marker {
    /// A marker at `pos`.
    pub fn new(pos: usize, gravity: Gravity) -> Self {
        Self { pos, gravity }
    }

    /// Current position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Follow `len` chars inserted at `at`.
    pub fn adjust_for_insert(&mut self, at: usize, len: usize) {
        if self.pos > at || (self.pos == at && self.gravity == Gravity::After) {
            self.pos += len;
        }
    }

    /// Follow the chars in `range` being removed.
    pub fn adjust_for_delete(&mut self, range: &Range<usize>) {
        if self.pos >= range.end {
            self.pos -= range.len();
        } else if self.pos > range.start {
            self.pos = range.start;
        }
    }
}

/// The region a completed edit occupies in the buffer.
///
/// `begin == end` means the edit removed text and left nothing behind at
/// `begin`; otherwise `[begin, end)` is the freshly inserted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditDelta {
    /// First position of the edited region.
    pub begin: usize,
    /// One past the last position of the edited region.
    pub end: usize,
}

impl EditDelta {
    /// A delta over `[begin, end)`.
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Whether the edit was a pure deletion.
    pub fn is_deletion(&self) -> bool {
        self.begin == self.end
    }

    /// The delta as a range.
    pub fn range(&self) -> Range<usize> {
        self.begin..self.end
    }

    /// Number of chars in the edited region.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    /// Same as [`is_deletion`](Self::is_deletion).
    pub fn is_empty(&self) -> bool {
        self.is_deletion()
    }
}

impl fmt::Display for EditDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

/// Tracks at most one pending edit at a time.
#[derive(Debug, Clone, Default)]
pub struct EditDeltaTracker {
    pending: Option<(Marker, Marker)>,
}

impl EditDeltaTracker {
    /// Create a tracker with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an edit is between [`begin`](Self::begin) and
    /// [`finish`](Self::finish).
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Plant markers over `[start, start + removed)` before the edit runs.
    ///
    /// The start marker stays before text inserted at its position and the end
    /// marker moves after it, so after the edit the pair spans exactly the
    /// inserted text, or nothing if text was only removed.
    pub fn begin(&mut self, start: usize, removed: usize) -> Result<()> {
        if self.pending.is_some() {
            return Err(Error::EditInProgress);
        }
        self.pending = Some((
            Marker::new(start, Gravity::Before),
            Marker::new(start + removed, Gravity::After),
        ));
        tracing::trace!(target: targets::DELTA, start, removed, "delta markers placed");
        Ok(())
    }

    /// Follow an insertion made while the edit is pending.
    pub fn adjust_for_insert(&mut self, at: usize, len: usize) {
        if let Some((start, end)) = self.pending.as_mut() {
            start.adjust_for_insert(at, len);
            end.adjust_for_insert(at, len);
        }
    }

    /// Follow a deletion made while the edit is pending.
    pub fn adjust_for_delete(&mut self, range: &Range<usize>) {
        if let Some((start, end)) = self.pending.as_mut() {
            start.adjust_for_delete(range);
            end.adjust_for_delete(range);
        }
    }

    /// Read the markers and discard them.
    pub fn finish(&mut self) -> Result<EditDelta> {
        let (start, end) = self.pending.take().ok_or(Error::NoPendingEdit)?;
        let delta = EditDelta::new(start.pos(), end.pos());
        tracing::trace!(target: targets::DELTA, %delta, "delta resolved");
        Ok(delta)
    }

    /// Drop a pending edit without resolving it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
