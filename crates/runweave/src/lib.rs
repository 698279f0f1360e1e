//! runweave - attribute runs for rich text editing.
//!
//! Keeps bold, italic and underline runs consistent with a text buffer as the
//! user types, deletes and toggles styles:
//!
//! - [`TextBuffer`]: rope-backed character storage
//! - [`RunStore`]: per-kind sorted runs with overlap and coverage queries
//! - [`EditDeltaTracker`]: resolves the region an edit occupies afterwards
//! - [`Reconciler`]: applies the toggle state to each edited region
//! - [`active_states`]: what the toggle controls should show
//! - [`apply_or_remove`]: explicit toggling over a selection
//! - [`RichTextEditor`]: ties them together behind one editing surface
//!
//! # Example
//!
//! ```
//! use runweave::{AttributeKind, RichTextEditor, Run};
//!
//! let mut editor = RichTextEditor::new();
//! editor.load("Hello world", [Run::new(AttributeKind::Bold, 0, 5)?])?;
//!
//! editor.set_cursor(5)?;
//! editor.type_text("!")?;
//!
//! assert_eq!(editor.text(), "Hello! world");
//! assert_eq!(editor.store().runs_of_kind(AttributeKind::Bold)[0].range(), 0..6);
//! # Ok::<(), runweave::Error>(())
//! ```

pub mod attribute;
pub mod buffer;
pub mod config;
pub mod debug;
pub mod delta;
pub mod editor;
pub mod error;
pub mod reconciler;
pub mod run;
pub mod run_store;
pub mod selection;
pub mod toggle;

pub use attribute::{ActiveStates, AttributeKind, ToggleState};
pub use buffer::TextBuffer;
pub use config::{EditorConfig, InitialToggles};
pub use debug::RunTableDebug;
pub use delta::{EditDelta, EditDeltaTracker, Gravity, Marker};
pub use editor::RichTextEditor;
pub use error::{Error, Result};
pub use reconciler::{ReconcileReport, Reconciler};
pub use run::{Growth, Run};
pub use run_store::RunStore;
pub use selection::active_states;
pub use toggle::{ToggleOutcome, apply_or_remove};

pub use runweave_core::{ConnectionId, Property, ReadOnlyProperty, Signal};
