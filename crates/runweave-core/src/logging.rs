//! Logging and debugging facilities for runweave.
//!
//! This module provides:
//! - Target and span names for filtering `tracing` output per subsystem
//! - Formatting options shared by the debug dumps of the editing core
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! runweave uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("runweave::reconcile=debug")
//!         .init();
//! }
//! ```

/// Span names used throughout runweave for tracing.
pub mod span_names {
    /// Reconciliation of one completed edit.
    pub const RECONCILE: &str = "runweave::reconcile";
    /// Explicit toggle over a selection.
    pub const TOGGLE: &str = "runweave::toggle";
    /// A full before/mutate/after edit cycle driven by the editor.
    pub const EDIT: &str = "runweave::edit";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core support target.
    pub const CORE: &str = "runweave_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "runweave_core::signal";
    /// Performance spans.
    pub const PERF: &str = "runweave::perf";
    /// Run store mutations.
    pub const STORE: &str = "runweave::store";
    /// Edit delta tracking.
    pub const DELTA: &str = "runweave::delta";
    /// Run reconciliation.
    pub const RECONCILE: &str = "runweave::reconcile";
    /// Toggle controller.
    pub const TOGGLE: &str = "runweave::toggle";
    /// Selection state sync.
    pub const SELECTION: &str = "runweave::selection";
    /// Editor facade.
    pub const EDITOR: &str = "runweave::editor";
}

/// Style options for table-shaped debug output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStyle {
    /// ASCII characters for rules and bars.
    Ascii,
    /// Unicode box-drawing and block characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for table-shaped debug output.
#[derive(Debug, Clone)]
pub struct TableFormatOptions {
    /// The style of the output.
    pub style: TableStyle,
    /// Whether to draw a bar under the text showing where each run lies.
    pub show_bars: bool,
    /// Whether to print the covered text next to each run.
    pub show_text: bool,
    /// Maximum number of characters of text to print (None for unlimited).
    pub max_width: Option<usize>,
}

impl Default for TableFormatOptions {
    fn default() -> Self {
        Self {
            style: TableStyle::default(),
            show_bars: true,
            show_text: true,
            max_width: None,
        }
    }
}

impl TableFormatOptions {
    /// Options for minimal output: ranges only.
    pub fn minimal() -> Self {
        Self {
            style: TableStyle::Compact,
            show_bars: false,
            show_text: false,
            max_width: None,
        }
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
