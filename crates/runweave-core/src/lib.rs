//! Core systems for runweave.
//!
//! This crate provides the support layer the rich-text editing core is built
//! on:
//!
//! - **Signal/Slot System**: Type-safe notifications from the editor to bound
//!   controls
//! - **Property System**: Change-detecting state cells
//! - **Logging**: `tracing` targets, span names and debug formatting options
//!
//! # Signal/Slot Example
//!
//! ```
//! use runweave_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::{PerfSpan, TableFormatOptions, TableStyle};
pub use property::{Property, ReadOnlyProperty};
pub use signal::{ConnectionId, Signal};
