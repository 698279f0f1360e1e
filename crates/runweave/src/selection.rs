//! Selection state sync: which attributes a toggle control should show as
//! checked for the current cursor or selection.

use runweave_core::logging::targets;

use crate::attribute::{ActiveStates, AttributeKind};
use crate::run_store::RunStore;

/// Compute the display state for the selection `[sel_start, sel_end)`.
///
/// - A collapsed selection at `p > 0` looks behind at `[p - 1, p)`: a kind is
///   active when a run of that kind covers the preceding char.
/// - A collapsed selection at `0` reports nothing active.
/// - A non-empty selection reports a kind active only when a single run fully
///   covers it. Partial overlap does not count.
///
/// A reversed selection is normalised first.
pub fn active_states(store: &RunStore, sel_start: usize, sel_end: usize) -> ActiveStates {
    let (start, end) = if sel_start <= sel_end {
        (sel_start, sel_end)
    } else {
        (sel_end, sel_start)
    };

    let probe = if start == end {
        if start == 0 {
            return ActiveStates::none();
        }
        start - 1..start
    } else {
        start..end
    };

    let mut states = ActiveStates::none();
    for kind in AttributeKind::ALL {
        states.set(kind, !store.runs_covering(kind, &probe).is_empty());
    }
    tracing::trace!(target: targets::SELECTION, start, end, ?states, "active states");
    states
}
