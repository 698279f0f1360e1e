//! Attribute kinds and the per-kind boolean maps built on them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A character-level formatting attribute.
///
/// Bold and italic may apply to the same text; they are stored as two
/// independent runs, never as a combined variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// Bold weight.
    Bold,
    /// Italic slant.
    Italic,
    /// Underline decoration.
    Underline,
}

impl AttributeKind {
    /// All kinds, in the order the engine evaluates them.
    pub const ALL: [AttributeKind; 3] = [Self::Bold, Self::Italic, Self::Underline];

    /// Dense index of this kind, usable for per-kind arrays.
    pub const fn index(self) -> usize {
        match self {
            Self::Bold => 0,
            Self::Italic => 1,
            Self::Underline => 2,
        }
    }

    /// Lowercase name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which attributes are active at a cursor position or over a selection.
///
/// Produced by [`active_states`](crate::selection::active_states) and pushed to
/// toggle controls for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveStates {
    flags: [bool; 3],
}

impl ActiveStates {
    /// No attribute active.
    pub const fn none() -> Self {
        Self { flags: [false; 3] }
    }

    /// Whether `kind` is active.
    pub fn get(&self, kind: AttributeKind) -> bool {
        self.flags[kind.index()]
    }

    /// Mark `kind` active or inactive.
    pub fn set(&mut self, kind: AttributeKind, active: bool) {
        self.flags[kind.index()] = active;
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, kind: AttributeKind, active: bool) -> Self {
        self.set(kind, active);
        self
    }

    /// Shorthand for the bold flag.
    pub fn bold(&self) -> bool {
        self.get(AttributeKind::Bold)
    }

    /// Shorthand for the italic flag.
    pub fn italic(&self) -> bool {
        self.get(AttributeKind::Italic)
    }

    /// Shorthand for the underline flag.
    pub fn underline(&self) -> bool {
        self.get(AttributeKind::Underline)
    }

    /// Iterate `(kind, active)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKind, bool)> + '_ {
        AttributeKind::ALL.iter().map(|&kind| (kind, self.get(kind)))
    }
}

/// The desired formatting for newly typed text, one optional flag per kind.
///
/// `None` means no control is bound for that attribute; the engine then
/// ignores the attribute entirely. This is passed explicitly into the
/// reconciler and the selection sync instead of reaching into UI widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleState {
    desired: [Option<bool>; 3],
}

impl ToggleState {
    /// No control bound for any attribute.
    pub const fn unbound() -> Self {
        Self { desired: [None; 3] }
    }

    /// Every attribute bound and switched off.
    pub const fn all_off() -> Self {
        Self {
            desired: [Some(false); 3],
        }
    }

    /// The desired flag for `kind`, or `None` when it is unmanaged.
    pub fn get(&self, kind: AttributeKind) -> Option<bool> {
        self.desired[kind.index()]
    }

    /// Bind (`Some`) or unbind (`None`) the control for `kind`.
    pub fn set(&mut self, kind: AttributeKind, desired: Option<bool>) {
        self.desired[kind.index()] = desired;
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, kind: AttributeKind, desired: Option<bool>) -> Self {
        self.set(kind, desired);
        self
    }

    /// Whether a control is bound for `kind`.
    pub fn is_bound(&self, kind: AttributeKind) -> bool {
        self.get(kind).is_some()
    }

    /// Whether `kind` is bound and switched on.
    pub fn is_on(&self, kind: AttributeKind) -> bool {
        self.get(kind) == Some(true)
    }

    /// Kinds that have a bound control, in evaluation order.
    pub fn bound_kinds(&self) -> impl Iterator<Item = AttributeKind> + '_ {
        AttributeKind::ALL
            .into_iter()
            .filter(move |&kind| self.is_bound(kind))
    }

    /// Flip the desired flag of a bound kind. Unbound kinds stay unbound.
    pub fn flip(&mut self, kind: AttributeKind) {
        if let Some(desired) = self.desired[kind.index()].as_mut() {
            *desired = !*desired;
        }
    }

    /// The checked state of the controls, unbound kinds reading as off.
    pub fn to_active_states(&self) -> ActiveStates {
        AttributeKind::ALL
            .into_iter()
            .fold(ActiveStates::none(), |states, kind| states.with(kind, self.is_on(kind)))
    }

    /// Copy display state into every bound control, as a checked toggle
    /// button would when the cursor moves.
    pub fn sync_from(&mut self, states: &ActiveStates) {
        for kind in AttributeKind::ALL {
            if let Some(desired) = self.desired[kind.index()].as_mut() {
                *desired = states.get(kind);
            }
        }
    }
}
