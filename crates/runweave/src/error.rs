//! Error types for the editing core.

use crate::attribute::AttributeKind;

/// Result type alias for editing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the editing core.
///
/// Every variant signals caller misuse. Operations validate their input before
/// touching any state, so an `Err` leaves the buffer and run store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A run with `start >= end` was constructed.
    #[error("invalid {kind} run {start}..{end}: start must be before end")]
    InvalidRun {
        kind: AttributeKind,
        start: usize,
        end: usize,
    },

    /// A range was inverted or reached past the end of the buffer.
    #[error("invalid range {start}..{end} for buffer of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// `on_before_edit` was called while another edit was still pending.
    #[error("an edit is already in progress")]
    EditInProgress,

    /// The mutation or `on_after_edit` step arrived without a pending edit.
    #[error("no edit is pending")]
    NoPendingEdit,

    /// The text handed to the mutation step does not match the announced length.
    #[error("edit announced {expected} inserted chars but received {actual}")]
    InsertedLengthMismatch { expected: usize, actual: usize },

    /// `on_after_edit` was called before the announced mutation was applied,
    /// or the mutation was applied twice.
    #[error("the announced mutation has not been applied exactly once")]
    MutationNotApplied,

    /// Loaded runs of one kind overlap each other.
    #[error("{kind} run {start}..{end} overlaps another {kind} run")]
    OverlappingRun {
        kind: AttributeKind,
        start: usize,
        end: usize,
    },

    /// Editor configuration could not be parsed.
    #[error("invalid editor configuration: {0}")]
    Config(String),
}

impl Error {
    /// Create a run error.
    pub fn invalid_run(kind: AttributeKind, start: usize, end: usize) -> Self {
        Self::InvalidRun { kind, start, end }
    }

    /// Create a range error.
    pub fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::InvalidRange { start, end, len }
    }

    /// Check `start <= end <= len`, returning an [`Error::InvalidRange`] otherwise.
    pub fn check_range(start: usize, end: usize, len: usize) -> Result<()> {
        if start > end || end > len {
            Err(Self::invalid_range(start, end, len))
        } else {
            Ok(())
        }
    }
}
