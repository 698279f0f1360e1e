//! Debug dumps of the run store.
//!
//! ```ignore
//! use runweave::debug::RunTableDebug;
//!
//! println!("{}", RunTableDebug::new().format(editor.buffer(), editor.store()));
//! ```
//!
//! prints something like:
//!
//! ```text
//! Runs (2 total, 11 chars):
//!                    │ Hello world
//!   bold 0..5        │ █████
//!   italic 6..11     │       █████
//! ```

use std::fmt::{self, Write as FmtWrite};

use runweave_core::logging::{TableFormatOptions, TableStyle};

use crate::buffer::TextBuffer;
use crate::run::{Growth, Run};
use crate::run_store::RunStore;

const LABEL_WIDTH: usize = 16;

/// Renders every run against the text it covers.
#[derive(Debug, Clone, Default)]
pub struct RunTableDebug {
    options: TableFormatOptions,
}

impl RunTableDebug {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options.
    pub fn with_options(options: TableFormatOptions) -> Self {
        Self { options }
    }

    /// Format `store` against `buffer`.
    pub fn format(&self, buffer: &TextBuffer, store: &RunStore) -> String {
        let mut output = String::new();
        // Writing into a String never fails.
        let _ = self.write_table(buffer, store, &mut output);
        output
    }

    /// Write the table into `out`.
    pub fn write_table<W: FmtWrite>(&self, buffer: &TextBuffer, store: &RunStore, out: &mut W) -> fmt::Result {
        let runs = store.runs_in_order();

        if self.options.style == TableStyle::Compact {
            write!(out, "runs[{}]:", runs.len())?;
            for run in &runs {
                write!(out, " {}", label(run))?;
            }
            return writeln!(out);
        }

        let (sep, fill) = match self.options.style {
            TableStyle::Ascii => ('|', '#'),
            _ => ('│', '█'),
        };
        let width = self.options.max_width.unwrap_or(usize::MAX);

        writeln!(out, "Runs ({} total, {} chars):", runs.len(), buffer.len())?;
        if self.options.show_text {
            let text: String = buffer
                .to_string()
                .chars()
                .take(width)
                .map(|c| if c == '\n' { ' ' } else { c })
                .collect();
            writeln!(out, "  {:<LABEL_WIDTH$} {sep} {text}", "")?;
        }
        if runs.is_empty() {
            return writeln!(out, "  (empty)");
        }

        for run in &runs {
            write!(out, "  {:<LABEL_WIDTH$} {sep} ", label(run))?;
            if self.options.show_bars {
                let start = run.start().min(width);
                let end = run.end().min(width);
                let bar: String = std::iter::repeat_n(fill, end - start).collect();
                writeln!(out, "{}{bar}", " ".repeat(start))?;
            } else if self.options.show_text {
                let text = buffer.slice(run.range()).unwrap_or_default();
                writeln!(out, "{text:?}")?;
            } else {
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

fn label(run: &Run) -> String {
    match run.growth() {
        Growth::AbsorbEnd => format!("{} {}..{}", run.kind(), run.start(), run.end()),
        Growth::Fixed => format!("{} {}..{}!", run.kind(), run.start(), run.end()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeKind;

    fn sample() -> (TextBuffer, RunStore) {
        let buffer = TextBuffer::from_text("Hello world");
        let mut store = RunStore::new();
        store.insert(Run::new(AttributeKind::Bold, 0, 5).unwrap()).unwrap();
        store.insert(Run::new(AttributeKind::Italic, 6, 11).unwrap()).unwrap();
        (buffer, store)
    }

    #[test]
    fn test_ascii_table() {
        let (buffer, store) = sample();
        let options = TableFormatOptions {
            style: TableStyle::Ascii,
            ..TableFormatOptions::default()
        };
        let output = RunTableDebug::with_options(options).format(&buffer, &store);

        assert!(output.starts_with("Runs (2 total, 11 chars):\n"));
        assert!(output.contains("| Hello world\n"));
        assert!(output.contains("  bold 0..5        | #####\n"));
        assert!(output.contains("  italic 6..11     |       #####\n"));
    }

    #[test]
    fn test_compact() {
        let (buffer, mut store) = sample();
        store
            .insert(Run::with_growth(AttributeKind::Underline, 1, 2, Growth::Fixed).unwrap())
            .unwrap();
        let output = RunTableDebug::with_options(TableFormatOptions::minimal()).format(&buffer, &store);
        assert_eq!(output, "runs[3]: bold 0..5 underline 1..2! italic 6..11\n");
    }

    #[test]
    fn test_text_without_bars() {
        let (buffer, store) = sample();
        let options = TableFormatOptions {
            show_bars: false,
            ..TableFormatOptions::default()
        };
        let output = RunTableDebug::with_options(options).format(&buffer, &store);
        assert!(output.contains("\"Hello\""));
        assert!(output.contains("\"world\""));
    }

    #[test]
    fn test_empty_store() {
        let output = RunTableDebug::new().format(&TextBuffer::new(), &RunStore::new());
        assert!(output.contains("(empty)"));
    }

    #[test]
    fn test_max_width_clips_bars() {
        let (buffer, store) = sample();
        let options = TableFormatOptions {
            style: TableStyle::Ascii,
            max_width: Some(3),
            ..TableFormatOptions::default()
        };
        let output = RunTableDebug::with_options(options).format(&buffer, &store);
        assert!(output.contains("| Hel\n"));
        assert!(output.contains("  bold 0..5        | ###\n"));
        assert!(output.contains("  italic 6..11     |    \n"));
    }
}
