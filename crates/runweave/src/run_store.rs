//! Per-kind storage of formatting runs.
//!
//! The store is an ordered container with range queries. It does not enforce
//! the no-overlap invariant on its own; the reconciler and the toggle
//! controller only ever insert runs into gaps they have just cleared.

use std::ops::Range;

use runweave_core::logging::targets;

use crate::attribute::AttributeKind;
use crate::error::{Error, Result};
use crate::run::Run;

/// Runs of every attribute kind, each kind sorted by start position.
#[derive(Debug, Clone, Default)]
pub struct RunStore {
    runs: [Vec<Run>; 3],
}

impl RunStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs of `kind`, sorted by start.
    pub fn runs_of_kind(&self, kind: AttributeKind) -> &[Run] {
        &self.runs[kind.index()]
    }

    /// Runs of `kind` with a nonempty intersection with `range`.
    pub fn runs_overlapping(&self, kind: AttributeKind, range: &Range<usize>) -> Vec<Run> {
        self.runs_of_kind(kind)
            .iter()
            .take_while(|run| run.start() < range.end)
            .filter(|run| run.overlaps(range))
            .copied()
            .collect()
    }

    /// Runs of `kind` that start at or before `range.start` and end at or
    /// after `range.end`.
    pub fn runs_covering(&self, kind: AttributeKind, range: &Range<usize>) -> Vec<Run> {
        self.runs_of_kind(kind)
            .iter()
            .take_while(|run| run.start() <= range.start)
            .filter(|run| run.covers(range))
            .copied()
            .collect()
    }

    /// Runs of `kind` that intersect or merely touch `range`, including
    /// collapsed runs sitting on one of its endpoints.
    pub(crate) fn runs_touching(&self, kind: AttributeKind, range: &Range<usize>) -> Vec<Run> {
        self.runs_of_kind(kind)
            .iter()
            .take_while(|run| run.start() <= range.end)
            .filter(|run| run.end() >= range.start)
            .copied()
            .collect()
    }

    /// Insert a run in start order.
    ///
    /// Fails with [`Error::InvalidRun`] for a collapsed run.
    pub fn insert(&mut self, run: Run) -> Result<()> {
        if run.is_empty() {
            return Err(Error::invalid_run(run.kind(), run.start(), run.end()));
        }
        let runs = &mut self.runs[run.kind().index()];
        let at = runs.partition_point(|r| (r.start(), r.end()) <= (run.start(), run.end()));
        runs.insert(at, run);
        tracing::trace!(target: targets::STORE, kind = %run.kind(), start = run.start(), end = run.end(), "run inserted");
        Ok(())
    }

    /// Remove the run with the same kind and range as `run`.
    ///
    /// Returns `true` if a run was removed.
    pub fn remove(&mut self, run: &Run) -> bool {
        let runs = &mut self.runs[run.kind().index()];
        match runs.iter().position(|r| r.same_span(run)) {
            Some(i) => {
                runs.remove(i);
                tracing::trace!(target: targets::STORE, kind = %run.kind(), start = run.start(), end = run.end(), "run removed");
                true
            }
            None => false,
        }
    }

    /// Remove every run of `kind` matching `predicate`, returning them.
    pub fn remove_all<F>(&mut self, kind: AttributeKind, mut predicate: F) -> Vec<Run>
    where
        F: FnMut(&Run) -> bool,
    {
        let mut removed = Vec::new();
        self.runs[kind.index()].retain(|run| {
            if predicate(run) {
                removed.push(*run);
                false
            } else {
                true
            }
        });
        removed
    }

    /// All runs of all kinds in position order (start, then end, then kind).
    ///
    /// This is the enumeration a markup exporter walks.
    pub fn runs_in_order(&self) -> Vec<Run> {
        let mut all: Vec<Run> = self.runs.iter().flatten().copied().collect();
        all.sort_by_key(|run| (run.start(), run.end(), run.kind()));
        all
    }

    /// Iterate [`runs_in_order`](Self::runs_in_order).
    pub fn iter(&self) -> impl Iterator<Item = Run> {
        self.runs_in_order().into_iter()
    }

    /// Total number of runs.
    pub fn len(&self) -> usize {
        self.runs.iter().map(Vec::len).sum()
    }

    /// Whether the store holds no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(Vec::is_empty)
    }

    /// Drop every run.
    pub fn clear(&mut self) {
        for runs in &mut self.runs {
            runs.clear();
        }
    }

    /// Re-flow every run for `len` chars inserted at `pos`.
    ///
    /// Inserting at a run's start shifts it; inserting at its end grows it
    /// when the run absorbs text at its end.
    pub fn adjust_for_insert(&mut self, pos: usize, len: usize) {
        if len == 0 {
            return;
        }
        for runs in &mut self.runs {
            for run in runs.iter_mut() {
                run.shift_for_insert(pos, len);
            }
        }
    }

    /// Re-flow every run for the chars in `range` being removed.
    ///
    /// Runs entirely inside `range` collapse to zero length and stay in the
    /// store until the reconciler cleans them up.
    pub fn adjust_for_delete(&mut self, range: &Range<usize>) {
        if range.is_empty() {
            return;
        }
        for runs in &mut self.runs {
            for run in runs.iter_mut() {
                run.shift_for_delete(range);
            }
        }
    }

    /// The first run found to overlap its predecessor of the same kind.
    pub fn find_overlap(&self) -> Option<Run> {
        self.runs.iter().find_map(|runs| {
            runs.windows(2)
                .find(|pair| pair[0].end() > pair[1].start())
                .map(|pair| pair[1])
        })
    }

    /// Whether every run is non-empty and no two runs of a kind overlap.
    pub fn is_consistent(&self) -> bool {
        self.runs.iter().all(|runs| {
            runs.iter().all(|run| !run.is_empty())
                && runs.windows(2).all(|pair| pair[0].end() <= pair[1].start())
        })
    }
}
