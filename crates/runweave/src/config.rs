//! Editor configuration.
//!
//! Configuration is built in code or parsed from TOML:
//!
//! ```
//! use runweave::{AttributeKind, EditorConfig};
//!
//! # fn main() -> runweave::Result<()> {
//! let config = EditorConfig::from_toml_str(r#"
//! underline = false
//! merge_at_line_start = true
//!
//! [initial_toggles]
//! bold = true
//! "#)?;
//!
//! assert!(!config.is_bound(AttributeKind::Underline));
//! assert_eq!(config.toggle_state().get(AttributeKind::Bold), Some(true));
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeKind, ToggleState};
use crate::error::{Error, Result};
use crate::reconciler::Reconciler;

fn default_true() -> bool {
    true
}

/// Desired flags for each attribute when the editor starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialToggles {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl InitialToggles {
    /// The flag for `kind`.
    pub fn get(&self, kind: AttributeKind) -> bool {
        match kind {
            AttributeKind::Bold => self.bold,
            AttributeKind::Italic => self.italic,
            AttributeKind::Underline => self.underline,
        }
    }
}

/// Configuration for a [`RichTextEditor`](crate::editor::RichTextEditor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Whether a bold control is bound.
    #[serde(default = "default_true")]
    pub bold: bool,
    /// Whether an italic control is bound.
    #[serde(default = "default_true")]
    pub italic: bool,
    /// Whether an underline control is bound.
    #[serde(default = "default_true")]
    pub underline: bool,
    /// Whether text typed at a line start is merged into the following run.
    #[serde(default = "default_true")]
    pub merge_at_line_start: bool,
    /// Desired flags at start.
    #[serde(default)]
    pub initial_toggles: InitialToggles,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            bold: true,
            italic: true,
            underline: true,
            merge_at_line_start: true,
            initial_toggles: InitialToggles::default(),
        }
    }
}

impl EditorConfig {
    /// Create a configuration with every control bound and switched off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Bind or unbind the control for `kind`.
    pub fn bind(mut self, kind: AttributeKind, bound: bool) -> Self {
        match kind {
            AttributeKind::Bold => self.bold = bound,
            AttributeKind::Italic => self.italic = bound,
            AttributeKind::Underline => self.underline = bound,
        }
        self
    }

    /// Enable or disable the line-start merge.
    pub fn merge_at_line_start(mut self, enabled: bool) -> Self {
        self.merge_at_line_start = enabled;
        self
    }

    /// Set the starting flag for `kind`.
    pub fn initially(mut self, kind: AttributeKind, on: bool) -> Self {
        match kind {
            AttributeKind::Bold => self.initial_toggles.bold = on,
            AttributeKind::Italic => self.initial_toggles.italic = on,
            AttributeKind::Underline => self.initial_toggles.underline = on,
        }
        self
    }

    /// Whether a control is bound for `kind`.
    pub fn is_bound(&self, kind: AttributeKind) -> bool {
        match kind {
            AttributeKind::Bold => self.bold,
            AttributeKind::Italic => self.italic,
            AttributeKind::Underline => self.underline,
        }
    }

    /// The toggle state the editor starts with.
    pub fn toggle_state(&self) -> ToggleState {
        AttributeKind::ALL
            .into_iter()
            .fold(ToggleState::unbound(), |state, kind| {
                let desired = self
                    .is_bound(kind)
                    .then(|| self.initial_toggles.get(kind));
                state.with(kind, desired)
            })
    }

    /// The reconciler this configuration describes.
    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new().with_line_start_merge(self.merge_at_line_start)
    }
}
