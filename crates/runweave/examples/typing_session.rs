//! A short typing session showing how runs follow edits and toggles.
//!
//! Run with: cargo run -p runweave --example typing_session
//!
//! Set `RUST_LOG=runweave=debug` to watch the reconciler.

use runweave::{AttributeKind, RichTextEditor, RunTableDebug};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), runweave::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("runweave=info")))
        .init();

    let mut editor = RichTextEditor::new();
    let table = RunTableDebug::new();

    editor.format_changed.connect(|states| {
        tracing::info!(bold = states.bold(), italic = states.italic(), underline = states.underline(), "toolbar");
    });

    editor.type_text("Dear ")?;
    editor.toggle_style(AttributeKind::Bold)?;
    editor.type_text("reader")?;
    editor.toggle_style(AttributeKind::Bold)?;
    editor.type_text(",\nthanks for ")?;
    editor.toggle_style(AttributeKind::Italic)?;
    editor.type_text("everything")?;
    editor.toggle_style(AttributeKind::Italic)?;
    editor.type_text(".")?;

    println!("After typing:\n{}", table.format(editor.buffer(), editor.store()));

    // Underline the greeting line, then un-bold it by toggling over a partial overlap.
    editor.set_selection(0, 11)?;
    editor.toggle_style(AttributeKind::Underline)?;
    editor.set_selection(3, 8)?;
    editor.toggle_style(AttributeKind::Bold)?;

    // Backspace through the end of "everything" and retype it.
    let end = editor.len();
    editor.set_cursor(end - 1)?;
    for _ in 0..3 {
        editor.backspace()?;
    }
    editor.type_text("ing")?;

    println!("After editing:\n{}", table.format(editor.buffer(), editor.store()));
    println!("Text: {:?}", editor.text());
    for run in editor.runs() {
        println!("  {} {:?}", run.kind(), run.range());
    }
    Ok(())
}
