//! Run reconciliation.
//!
//! After every edit the inserted text must carry exactly the attributes the
//! toggle controls ask for. The buffer re-flow already moved the runs around
//! the edit; [`Reconciler::reconcile`] then fixes up the edited region:
//!
//! 1. Runs that collapsed to zero length are dropped, and the run that already
//!    spans the edited region, if any, becomes that kind's *current run*.
//! 2. A pure deletion re-syncs the toggle state from the text before the
//!    cursor, like a toolbar following the caret.
//! 3. Text typed at the start of a line can be absorbed into the runs that
//!    follow it, so formatting a paragraph and then typing at its start keeps
//!    a single run. The new runs then reach the end of the longest absorbed
//!    run.
//! 4. For each bound kind the current run is split around the edit (toggle
//!    off) or a new run is created over it (toggle on).
//!
//! Steps 3 and 4 are skipped when the edit ends at position 0.

use runweave_core::logging::{span_names, targets};

use crate::attribute::{ActiveStates, AttributeKind, ToggleState};
use crate::buffer::TextBuffer;
use crate::delta::EditDelta;
use crate::error::{Error, Result};
use crate::run::Run;
use crate::run_store::RunStore;
use crate::selection::active_states;

/// Summary of what one reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Collapsed runs dropped in step 1.
    pub collapsed: usize,
    /// Display state recomputed after a pure deletion. The toggle state has
    /// already been synced to it.
    pub synced: Option<ActiveStates>,
    /// Kinds whose following run was absorbed by a line-start merge.
    pub merged: Vec<AttributeKind>,
    /// Runs created over the edited region.
    pub created: Vec<Run>,
    /// Runs split around the edited region. Their non-empty remainders were
    /// re-inserted.
    pub split: Vec<Run>,
}

impl ReconcileReport {
    /// Whether the run store was left as the buffer re-flow put it.
    pub fn is_noop(&self) -> bool {
        self.collapsed == 0 && self.merged.is_empty() && self.created.is_empty() && self.split.is_empty()
    }
}

/// Applies the toggle state to edited regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciler {
    merge_at_line_start: bool,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self {
            merge_at_line_start: true,
        }
    }
}

impl Reconciler {
    /// A reconciler with the line-start merge enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the line-start merge.
    pub fn with_line_start_merge(mut self, enabled: bool) -> Self {
        self.merge_at_line_start = enabled;
        self
    }

    /// Whether the line-start merge is enabled.
    pub fn merges_at_line_start(&self) -> bool {
        self.merge_at_line_start
    }

    /// Reconcile `store` after the edit that produced `delta`.
    ///
    /// `buffer` must already hold the edited text and `store` must already be
    /// re-flowed for it. On a pure deletion `toggles` is synced from the new
    /// cursor position before it is applied.
    ///
    /// Fails with [`Error::InvalidRange`] when `delta` is inverted or reaches
    /// past the buffer, before anything is mutated.
    pub fn reconcile(
        &self,
        store: &mut RunStore,
        buffer: &TextBuffer,
        delta: EditDelta,
        toggles: &mut ToggleState,
    ) -> Result<ReconcileReport> {
        if let Err(err) = Error::check_range(delta.begin, delta.end, buffer.len()) {
            tracing::warn!(target: targets::RECONCILE, %delta, len = buffer.len(), "rejected edit delta");
            return Err(err);
        }

        let _span = tracing::trace_span!(target: targets::RECONCILE, span_names::RECONCILE, %delta).entered();
        let mut report = ReconcileReport::default();

        let mut current = self.find_current_runs(store, delta, &mut report);

        if delta.is_deletion() {
            let states = active_states(store, delta.begin, delta.begin);
            toggles.sync_from(&states);
            report.synced = Some(states);
        }

        if delta.end == 0 {
            tracing::trace!(target: targets::RECONCILE, ?report, "edit at buffer start");
            return Ok(report);
        }

        let mut end_index = delta.end;
        if self.merge_at_line_start && !delta.is_deletion() && buffer.is_line_start(delta.begin) {
            end_index = merge_at_line_start(store, buffer, delta, toggles, &current, &mut report);
        }
        let edited = EditDelta::new(delta.begin, end_index);

        for kind in toggles.bound_kinds() {
            let wanted = toggles.is_on(kind);
            match current[kind.index()].take() {
                None if wanted => {
                    let end = absorb_overlapped(store, kind, delta.end, end_index);
                    if end > delta.begin {
                        let run = Run::new(kind, delta.begin, end)?;
                        store.insert(run)?;
                        tracing::debug!(target: targets::RECONCILE, %kind, start = run.start(), end = run.end(), "run created");
                        report.created.push(run);
                    }
                }
                Some(run) if !wanted => {
                    split_around(store, run, edited)?;
                    report.split.push(run);
                }
                _ => {}
            }
        }

        tracing::trace!(target: targets::RECONCILE, ?report, "reconciled");
        Ok(report)
    }

    /// Step 1: drop collapsed runs and pick the current run of every kind.
    fn find_current_runs(
        &self,
        store: &mut RunStore,
        delta: EditDelta,
        report: &mut ReconcileReport,
    ) -> [Option<Run>; 3] {
        let mut current = [None; 3];
        let range = delta.range();

        for kind in AttributeKind::ALL {
            let touching = store.runs_touching(kind, &range);
            for run in touching.iter().filter(|run| run.is_empty()) {
                if store.remove(run) {
                    tracing::debug!(target: targets::RECONCILE, %kind, pos = run.start(), "collapsed run removed");
                    report.collapsed += 1;
                }
            }

            let mut live = touching.into_iter().filter(|run| !run.is_empty());
            current[kind.index()] = if delta.is_deletion() {
                let at = delta.begin;
                let candidates: Vec<Run> = live.filter(|run| run.touches(at)).collect();
                candidates
                    .iter()
                    .find(|run| run.start() < at)
                    .or_else(|| candidates.first())
                    .copied()
            } else {
                live.find(|run| run.overlaps(&range))
            };
        }
        current
    }
}

/// Step 3: absorb the runs that follow text typed at the start of a line.
///
/// Only considered when every control is bound. The merge happens when the
/// toggles would otherwise start or cut a run for some kind, and they agree
/// with the formatting of `[begin, end + 1)` for every kind. The following
/// runs of the kinds switched on are then removed, and the returned end is the
/// end of the longest one. Step 4 creates every new run up to that end.
fn merge_at_line_start(
    store: &mut RunStore,
    buffer: &TextBuffer,
    delta: EditDelta,
    toggles: &ToggleState,
    current: &[Option<Run>; 3],
    report: &mut ReconcileReport,
) -> usize {
    if !AttributeKind::ALL.iter().all(|&kind| toggles.get(kind).is_some()) {
        return delta.end;
    }

    let creates_new = AttributeKind::ALL
        .iter()
        .any(|&kind| toggles.is_on(kind) != current[kind.index()].is_some());
    if !creates_new {
        return delta.end;
    }

    let probe = delta.begin..(delta.end + 1).min(buffer.len());
    let agrees = AttributeKind::ALL
        .iter()
        .all(|&kind| toggles.is_on(kind) == !store.runs_overlapping(kind, &probe).is_empty());
    if !agrees {
        return delta.end;
    }

    let mut end_index = delta.end;
    for kind in AttributeKind::ALL {
        if !toggles.is_on(kind) || current[kind.index()].is_some() {
            continue;
        }
        let following = store
            .runs_overlapping(kind, &probe)
            .into_iter()
            .find(|run| run.start() >= delta.end);
        if let Some(run) = following {
            store.remove(&run);
            end_index = end_index.max(run.end());
            report.merged.push(kind);
            tracing::debug!(target: targets::RECONCILE, %kind, start = delta.begin, end = run.end(), "merged into following run");
        }
    }
    end_index
}

/// Remove runs of `kind` inside `[from, to)` that a run created up to `to`
/// would overlap, and return the end the created run must reach to cover them.
fn absorb_overlapped(store: &mut RunStore, kind: AttributeKind, from: usize, to: usize) -> usize {
    let mut end = to;
    if to <= from {
        return end;
    }
    for run in store.runs_overlapping(kind, &(from..to)) {
        store.remove(&run);
        end = end.max(run.end());
        tracing::debug!(target: targets::RECONCILE, %kind, start = run.start(), end = run.end(), "absorbed by merged run");
    }
    end
}

/// Step 4, toggle off: cut `run` around the edited region.
fn split_around(store: &mut RunStore, run: Run, delta: EditDelta) -> Result<()> {
    store.remove(&run);
    if run.start() < delta.begin {
        store.insert(Run::with_growth(run.kind(), run.start(), delta.begin, run.growth())?)?;
    }
    if delta.end < run.end() {
        store.insert(Run::with_growth(run.kind(), delta.end, run.end(), run.growth())?)?;
    }
    tracing::debug!(
        target: targets::RECONCILE,
        kind = %run.kind(),
        start = run.start(),
        end = run.end(),
        cut = %delta,
        "run split"
    );
    Ok(())
}
