//! Formatting runs.

use std::ops::Range;

use crate::attribute::AttributeKind;
use crate::error::{Error, Result};

/// How a run reacts to text inserted exactly at one of its endpoints.
///
/// Text inserted at a run's start never joins the run. Whether text inserted
/// at its end does is fixed when the run is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Growth {
    /// Text inserted at the end joins the run, so typing continues the style.
    #[default]
    AbsorbEnd,
    /// Neither endpoint grows. Useful for runs loaded from markup that should
    /// not spread to text typed after them.
    Fixed,
}

/// A formatting run: one attribute over the half-open range `[start, end)`.
///
/// Runs are always non-empty when they leave the store. Only the store itself
/// may hold a collapsed run, transiently, between a deletion and the
/// reconciliation that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    kind: AttributeKind,
    start: usize,
    end: usize,
    growth: Growth,
}

impl Run {
    /// Create a run that absorbs text typed at its end.
    ///
    /// Fails with [`Error::InvalidRun`] when `start >= end`.
    pub fn new(kind: AttributeKind, start: usize, end: usize) -> Result<Self> {
        Self::with_growth(kind, start, end, Growth::AbsorbEnd)
    }

    /// Create a run with explicit growth behaviour.
    pub fn with_growth(kind: AttributeKind, start: usize, end: usize, growth: Growth) -> Result<Self> {
        if start >= end {
            return Err(Error::invalid_run(kind, start, end));
        }
        Ok(Self {
            kind,
            start,
            end,
            growth,
        })
    }

    /// The attribute this run applies.
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// First position covered.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last position covered.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Growth behaviour fixed at creation.
    pub fn growth(&self) -> Growth {
        self.growth
    }

    /// The covered range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of positions covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the run has collapsed to zero length.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Nonempty intersection with `range`.
    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        self.start < range.end && range.start < self.end
    }

    /// Whether the run starts at or before `range.start` and ends at or after
    /// `range.end`.
    pub fn covers(&self, range: &Range<usize>) -> bool {
        self.start <= range.start && self.end >= range.end
    }

    /// Whether the run touches `pos`, counting both endpoints.
    pub fn touches(&self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Whether this run and `other` describe the same kind over the same range.
    pub fn same_span(&self, other: &Run) -> bool {
        self.kind == other.kind && self.start == other.start && self.end == other.end
    }

    /// Re-flow for `len` chars inserted at `pos`.
    pub(crate) fn shift_for_insert(&mut self, pos: usize, len: usize) {
        if self.start >= pos {
            self.start += len;
            self.end += len;
        } else if self.end > pos || (self.end == pos && self.growth == Growth::AbsorbEnd) {
            self.end += len;
        }
    }

    /// Re-flow for the chars in `range` being removed. May collapse the run.
    pub(crate) fn shift_for_delete(&mut self, range: &Range<usize>) {
        let clamp = |x: usize| {
            if x >= range.end {
                x - range.len()
            } else if x > range.start {
                range.start
            } else {
                x
            }
        };
        self.start = clamp(self.start);
        self.end = clamp(self.end);
    }
}
