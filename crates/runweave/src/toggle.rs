//! Toggle controller: enable or disable an attribute over an explicit
//! selection.

use runweave_core::logging::targets;

use crate::attribute::AttributeKind;
use crate::error::Result;
use crate::run::Run;
use crate::run_store::RunStore;

/// What [`apply_or_remove`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A new run now spans the selection.
    Applied,
    /// This many runs overlapping the selection were removed.
    Removed(usize),
    /// The selection was collapsed; nothing changed.
    Ignored,
}

/// Toggle `kind` over `[sel_start, sel_end)`.
///
/// If any run of `kind` overlaps the selection, every such run is removed,
/// including the parts of them outside the selection. Otherwise one run
/// spanning exactly the selection is inserted. Enabling therefore needs no
/// overlap at all, while one overlapping char is enough to disable.
///
/// A collapsed selection is a no-op; a reversed one is normalised.
pub fn apply_or_remove(
    store: &mut RunStore,
    kind: AttributeKind,
    sel_start: usize,
    sel_end: usize,
) -> Result<ToggleOutcome> {
    let (start, end) = if sel_start <= sel_end {
        (sel_start, sel_end)
    } else {
        (sel_end, sel_start)
    };
    if start == end {
        return Ok(ToggleOutcome::Ignored);
    }

    let selection = start..end;
    let removed = store.remove_all(kind, |run| run.overlaps(&selection));
    if !removed.is_empty() {
        tracing::debug!(target: targets::TOGGLE, %kind, start, end, removed = removed.len(), "style removed");
        return Ok(ToggleOutcome::Removed(removed.len()));
    }

    store.insert(Run::new(kind, start, end)?)?;
    tracing::debug!(target: targets::TOGGLE, %kind, start, end, "style applied");
    Ok(ToggleOutcome::Applied)
}
