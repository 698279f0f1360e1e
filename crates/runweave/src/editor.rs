//! The rich text editor facade.
//!
//! [`RichTextEditor`] owns the buffer, the run store and the toggle state and
//! drives the edit protocol for them:
//!
//! 1. [`on_before_edit`](RichTextEditor::on_before_edit) announces the edit
//!    and plants the delta markers.
//! 2. [`apply_mutation`](RichTextEditor::apply_mutation) changes the buffer
//!    and re-flows runs, markers and selection.
//! 3. [`on_after_edit`](RichTextEditor::on_after_edit) resolves the delta and
//!    reconciles the runs.
//!
//! The convenience methods ([`replace`](RichTextEditor::replace),
//! [`type_text`](RichTextEditor::type_text), ...) run all three steps.
//!
//! # Example
//!
//! ```
//! use runweave::{AttributeKind, RichTextEditor};
//!
//! let mut editor = RichTextEditor::new();
//! editor.type_text("Hello").unwrap();
//! editor.set_selection(0, 5).unwrap();
//! editor.toggle_style(AttributeKind::Bold).unwrap();
//!
//! editor.set_selection(5, 5).unwrap();
//! editor.type_text("!").unwrap();
//!
//! assert_eq!(editor.text(), "Hello!");
//! assert_eq!(editor.store().runs_of_kind(AttributeKind::Bold)[0].range(), 0..6);
//! ```

use std::ops::Range;

use runweave_core::logging::{span_names, targets};
use runweave_core::{PerfSpan, Property, ReadOnlyProperty, Signal};

use crate::attribute::{ActiveStates, AttributeKind, ToggleState};
use crate::buffer::TextBuffer;
use crate::config::EditorConfig;
use crate::delta::{EditDeltaTracker, Gravity, Marker};
use crate::error::{Error, Result};
use crate::reconciler::{ReconcileReport, Reconciler};
use crate::run::Run;
use crate::run_store::RunStore;
use crate::selection::active_states;
use crate::toggle::{self, ToggleOutcome};

/// An edit between `on_before_edit` and `on_after_edit`.
#[derive(Debug, Clone, Copy)]
struct PendingEdit {
    start: usize,
    removed: usize,
    inserted: usize,
    applied: bool,
    selection: (usize, usize),
}

/// A rich text editing core: text, formatting runs, selection and toggle
/// controls, kept consistent across edits.
#[derive(Debug)]
pub struct RichTextEditor {
    buffer: TextBuffer,
    store: RunStore,
    tracker: EditDeltaTracker,
    reconciler: Reconciler,
    toggles: Property<ToggleState>,
    pending: Option<PendingEdit>,

    /// Selection anchor. May be after `cursor`.
    anchor: usize,
    /// Cursor position, the moving end of the selection.
    cursor: usize,

    // Signals

    /// Signal emitted with the full text after every edit.
    pub text_changed: Signal<String>,

    /// Signal emitted when the selection changes, as a normalised
    /// `(start, end)` pair.
    pub selection_changed: Signal<(usize, usize)>,

    /// Signal emitted with the display state for the toggle controls.
    pub format_changed: Signal<ActiveStates>,
}

impl Default for RichTextEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl RichTextEditor {
    /// Create an empty editor with every control bound and switched off.
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    /// Create an empty editor from a configuration.
    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            buffer: TextBuffer::new(),
            store: RunStore::new(),
            tracker: EditDeltaTracker::new(),
            reconciler: config.reconciler(),
            toggles: Property::new(config.toggle_state()),
            pending: None,
            anchor: 0,
            cursor: 0,
            text_changed: Signal::new(),
            selection_changed: Signal::new(),
            format_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The text buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The run store.
    pub fn store(&self) -> &RunStore {
        &self.store
    }

    /// All runs in position order, for exporting markup.
    pub fn runs(&self) -> Vec<Run> {
        self.store.runs_in_order()
    }

    /// The full text.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Length of the text in chars.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the editor holds no text.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Selection as `(anchor, cursor)`, in the order it was set.
    pub fn selection(&self) -> (usize, usize) {
        (self.anchor, self.cursor)
    }

    /// Selection normalised to a range.
    pub fn selection_range(&self) -> Range<usize> {
        self.anchor.min(self.cursor)..self.anchor.max(self.cursor)
    }

    /// The cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the selection is non-empty.
    pub fn has_selection(&self) -> bool {
        self.anchor != self.cursor
    }

    /// Display state for the current selection.
    pub fn active_states(&self) -> ActiveStates {
        active_states(&self.store, self.anchor, self.cursor)
    }

    /// The toggle state.
    pub fn toggle_state(&self) -> ReadOnlyProperty<'_, ToggleState> {
        ReadOnlyProperty::new(&self.toggles)
    }

    /// The reconciler applied after each edit.
    pub fn reconciler(&self) -> Reconciler {
        self.reconciler
    }

    /// Whether an edit is pending.
    pub fn is_editing(&self) -> bool {
        self.pending.is_some()
    }

    // =========================================================================
    // Edit protocol
    // =========================================================================

    /// Announce that `removed` chars at `start` are about to be replaced by
    /// `inserted` chars.
    pub fn on_before_edit(&mut self, start: usize, removed: usize, inserted: usize) -> Result<()> {
        if self.pending.is_some() {
            tracing::warn!(target: targets::EDITOR, start, removed, inserted, "edit announced while another is pending");
            return Err(Error::EditInProgress);
        }
        let end = start.saturating_add(removed);
        if let Err(err) = Error::check_range(start, end, self.buffer.len()) {
            tracing::warn!(target: targets::EDITOR, start, end, len = self.buffer.len(), "rejected edit");
            return Err(err);
        }

        self.tracker.begin(start, removed)?;
        self.pending = Some(PendingEdit {
            start,
            removed,
            inserted,
            applied: false,
            selection: self.selection(),
        });
        tracing::trace!(target: targets::EDITOR, start, removed, inserted, "edit announced");
        Ok(())
    }

    /// Apply the announced edit, replacing the removed chars with `text`.
    ///
    /// Runs, delta markers and the selection all follow the buffer.
    pub fn apply_mutation(&mut self, text: &str) -> Result<()> {
        let pending = self.pending.as_mut().ok_or(Error::NoPendingEdit)?;
        if pending.applied {
            return Err(Error::MutationNotApplied);
        }
        let actual = text.chars().count();
        if actual != pending.inserted {
            return Err(Error::InsertedLengthMismatch {
                expected: pending.inserted,
                actual,
            });
        }
        pending.applied = true;
        let start = pending.start;
        let removed = start..start + pending.removed;

        if !removed.is_empty() {
            self.buffer.remove(removed.clone())?;
            self.store.adjust_for_delete(&removed);
            self.tracker.adjust_for_delete(&removed);
            self.reflow_selection(|marker| marker.adjust_for_delete(&removed));
        }
        if actual > 0 {
            self.buffer.insert(start, text)?;
            self.store.adjust_for_insert(start, actual);
            self.tracker.adjust_for_insert(start, actual);
            self.reflow_selection(|marker| marker.adjust_for_insert(start, actual));
        }
        Ok(())
    }

    /// Finish the pending edit and reconcile the runs over it.
    pub fn on_after_edit(&mut self) -> Result<ReconcileReport> {
        let pending = match self.pending {
            None => return Err(Error::NoPendingEdit),
            Some(pending) if !pending.applied => return Err(Error::MutationNotApplied),
            Some(pending) => pending,
        };
        self.pending = None;

        let delta = self.tracker.finish()?;
        let mut toggles = self.toggles.get();
        let report = self
            .reconciler
            .reconcile(&mut self.store, &self.buffer, delta, &mut toggles)?;
        self.toggles.set(toggles);

        self.text_changed.emit(self.buffer.to_string());
        if pending.selection != self.selection() {
            // Publishes the display state for the new position.
            self.sync_selection();
        } else if let Some(states) = report.synced {
            self.format_changed.emit(states);
        }
        Ok(report)
    }

    /// Drop a pending edit whose mutation has not been applied.
    fn abort_edit(&mut self) {
        if self.pending.is_some_and(|pending| !pending.applied) {
            self.pending = None;
            self.tracker.cancel();
        }
    }

    fn reflow_selection<F>(&mut self, mut adjust: F)
    where
        F: FnMut(&mut Marker),
    {
        let mut anchor = Marker::new(self.anchor, Gravity::After);
        let mut cursor = Marker::new(self.cursor, Gravity::After);
        adjust(&mut anchor);
        adjust(&mut cursor);
        self.anchor = anchor.pos();
        self.cursor = cursor.pos();
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Replace `removed` chars at `start` with `text`.
    pub fn replace(&mut self, start: usize, removed: usize, text: &str) -> Result<ReconcileReport> {
        let inserted = text.chars().count();
        let _span = tracing::debug_span!(target: targets::EDITOR, span_names::EDIT, start, removed, inserted).entered();

        self.on_before_edit(start, removed, inserted)?;
        if let Err(err) = self.apply_mutation(text) {
            self.abort_edit();
            return Err(err);
        }
        self.on_after_edit()
    }

    /// Insert `text` at `pos`.
    pub fn insert(&mut self, pos: usize, text: &str) -> Result<ReconcileReport> {
        self.replace(pos, 0, text)
    }

    /// Delete the chars in `range`.
    pub fn delete(&mut self, range: Range<usize>) -> Result<ReconcileReport> {
        Error::check_range(range.start, range.end, self.buffer.len())?;
        self.replace(range.start, range.len(), "")
    }

    /// Type `text` over the selection, as a keyboard would.
    pub fn type_text(&mut self, text: &str) -> Result<ReconcileReport> {
        let selection = self.selection_range();
        self.replace(selection.start, selection.len(), text)
    }

    /// Delete the selection, or the char before the cursor.
    ///
    /// Returns `None` when there was nothing to delete.
    pub fn backspace(&mut self) -> Result<Option<ReconcileReport>> {
        let selection = self.selection_range();
        if !selection.is_empty() {
            return self.delete(selection).map(Some);
        }
        if self.cursor == 0 {
            return Ok(None);
        }
        self.delete(self.cursor - 1..self.cursor).map(Some)
    }

    /// Replace the whole text as one edit, formatting it per the toggles.
    pub fn set_text(&mut self, text: &str) -> Result<ReconcileReport> {
        self.replace(0, self.buffer.len(), text)
    }

    // =========================================================================
    // Selection and toggles
    // =========================================================================

    /// Move the selection. `anchor` may be after `cursor`.
    ///
    /// The bound toggles follow the new position and
    /// [`format_changed`](Self::format_changed) is emitted.
    pub fn set_selection(&mut self, anchor: usize, cursor: usize) -> Result<()> {
        let len = self.buffer.len();
        if anchor > len || cursor > len {
            tracing::warn!(target: targets::SELECTION, anchor, cursor, len, "rejected selection");
            return Err(Error::invalid_range(anchor.min(cursor), anchor.max(cursor), len));
        }
        self.anchor = anchor;
        self.cursor = cursor;
        self.sync_selection();
        Ok(())
    }

    /// Collapse the selection to `pos`.
    pub fn set_cursor(&mut self, pos: usize) -> Result<()> {
        self.set_selection(pos, pos)
    }

    /// Push the display state of the current selection into the toggles.
    fn sync_selection(&mut self) -> ActiveStates {
        let states = self.active_states();
        self.toggles.update(|toggles| toggles.sync_from(&states));

        let range = self.selection_range();
        tracing::trace!(target: targets::SELECTION, start = range.start, end = range.end, ?states, "selection synced");
        self.selection_changed.emit((range.start, range.end));
        self.format_changed.emit(states);
        states
    }

    /// Press the toggle control for `kind`.
    ///
    /// With a selection, the style is applied to or removed from it and the
    /// selection is restored. With a collapsed cursor the bound toggle flips,
    /// deciding the style of the next typed text.
    pub fn toggle_style(&mut self, kind: AttributeKind) -> Result<ToggleOutcome> {
        let _span = tracing::debug_span!(target: targets::TOGGLE, span_names::TOGGLE, %kind).entered();
        if self.pending.is_some() {
            return Err(Error::EditInProgress);
        }

        let selection = self.selection_range();
        if selection.is_empty() {
            self.toggles.update(|toggles| toggles.flip(kind));
            let toggles = self.toggles.get();
            tracing::debug!(target: targets::TOGGLE, %kind, desired = ?toggles.get(kind), "toggle flipped");
            self.format_changed.emit(toggles.to_active_states());
            return Ok(ToggleOutcome::Ignored);
        }

        let outcome = toggle::apply_or_remove(&mut self.store, kind, selection.start, selection.end)?;
        self.sync_selection();
        Ok(outcome)
    }

    /// Bind (`Some`) or unbind (`None`) the control for `kind`.
    pub fn set_toggle(&mut self, kind: AttributeKind, desired: Option<bool>) {
        self.toggles.update(|toggles| toggles.set(kind, desired));
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Replace text and runs wholesale, as when loading a document.
    ///
    /// Every run must lie within `text` and runs of one kind must not
    /// overlap. Nothing changes on error.
    pub fn load<I>(&mut self, text: &str, runs: I) -> Result<()>
    where
        I: IntoIterator<Item = Run>,
    {
        if self.pending.is_some() {
            return Err(Error::EditInProgress);
        }
        let _perf = PerfSpan::new("load");

        let len = text.chars().count();
        let mut store = RunStore::new();
        for run in runs {
            Error::check_range(run.start(), run.end(), len)?;
            store.insert(run)?;
        }
        if let Some(run) = store.find_overlap() {
            tracing::warn!(target: targets::EDITOR, kind = %run.kind(), start = run.start(), end = run.end(), "overlapping runs in document");
            return Err(Error::OverlappingRun {
                kind: run.kind(),
                start: run.start(),
                end: run.end(),
            });
        }

        self.buffer.set_text(text);
        self.store = store;
        self.anchor = 0;
        self.cursor = 0;
        tracing::debug!(target: targets::EDITOR, len, runs = self.store.len(), "document loaded");

        self.text_changed.emit(self.buffer.to_string());
        self.sync_selection();
        Ok(())
    }

    /// Replace the text and drop every run.
    pub fn set_plain_text(&mut self, text: &str) -> Result<()> {
        self.load(text, std::iter::empty())
    }

    /// Remove all text and runs.
    pub fn clear(&mut self) -> Result<()> {
        self.load("", std::iter::empty())
    }
}
