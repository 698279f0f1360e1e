//! Tests for editing scenarios driven through the editor facade.

use std::ops::Range;
use std::sync::{Arc, Mutex};

use runweave::{
    ActiveStates, AttributeKind, EditDelta, EditorConfig, Error, Reconciler, RichTextEditor, Run,
    RunStore, TextBuffer, ToggleOutcome, ToggleState, active_states,
};

use AttributeKind::{Bold, Italic, Underline};

fn ranges(editor: &RichTextEditor, kind: AttributeKind) -> Vec<Range<usize>> {
    editor.store().runs_of_kind(kind).iter().map(Run::range).collect()
}

fn loaded(text: &str, runs: &[(AttributeKind, usize, usize)]) -> RichTextEditor {
    let mut editor = RichTextEditor::new();
    editor
        .load(text, runs.iter().map(|&(kind, start, end)| Run::new(kind, start, end).unwrap()))
        .unwrap();
    editor
}

#[test]
fn test_typing_at_run_end_grows_run() {
    let mut editor = loaded("abcdefghij", &[(Bold, 3, 6)]);
    editor.set_toggle(Bold, Some(true));

    editor.insert(6, "x").unwrap();

    assert_eq!(ranges(&editor, Bold), vec![3..7]);
    assert!(editor.store().is_consistent());
}

#[test]
fn test_typing_at_run_start_creates_adjacent_run() {
    let mut editor = loaded("abcdefghij", &[(Bold, 3, 6)]);
    editor.set_toggle(Bold, Some(true));

    editor.insert(3, "y").unwrap();

    assert_eq!(ranges(&editor, Bold), vec![3..4, 4..7]);
    assert!(editor.store().is_consistent());
}

#[test]
fn test_toggle_off_splits_run() {
    let buffer = TextBuffer::from_text("0123456789");
    let mut store = RunStore::new();
    store.insert(Run::new(Bold, 0, 10).unwrap()).unwrap();
    let mut toggles = ToggleState::all_off();

    Reconciler::new()
        .reconcile(&mut store, &buffer, EditDelta::new(4, 6), &mut toggles)
        .unwrap();

    let bold: Vec<_> = store.runs_of_kind(Bold).iter().map(Run::range).collect();
    assert_eq!(bold, vec![0..4, 6..10]);
}

#[test]
fn test_typing_inside_run_with_toggle_off() {
    let mut editor = loaded("0123456789", &[(Bold, 0, 10)]);
    editor.set_toggle(Bold, Some(false));

    editor.insert(4, "ab").unwrap();

    assert_eq!(editor.text(), "0123ab456789");
    assert_eq!(ranges(&editor, Bold), vec![0..4, 6..12]);
}

#[test]
fn test_deleting_single_char_run_removes_it() {
    let mut editor = loaded("abcdefgh", &[(Bold, 5, 6)]);

    let report = editor.delete(5..6).unwrap();

    assert_eq!(editor.text(), "abcdegh");
    assert!(editor.store().is_empty());
    assert_eq!(report.collapsed, 1);
}

#[test]
fn test_partial_overlap_is_inactive_but_toggles_off() {
    let mut editor = loaded("abcdefghij", &[(Bold, 0, 5)]);
    editor.set_selection(2, 8).unwrap();

    assert!(!editor.active_states().bold());
    let outcome = editor.toggle_style(Bold).unwrap();

    assert_eq!(outcome, ToggleOutcome::Removed(1));
    assert!(ranges(&editor, Bold).is_empty());
    assert_eq!(editor.selection(), (2, 8));
}

#[test]
fn test_hello_world_exclamation() {
    let mut editor = loaded("Hello world", &[(Bold, 0, 5)]);
    editor.set_cursor(5).unwrap();
    assert!(editor.toggle_state().get().is_on(Bold));

    editor.type_text("!").unwrap();

    assert_eq!(editor.text(), "Hello! world");
    assert_eq!(ranges(&editor, Bold), vec![0..6]);
    assert_eq!(editor.cursor(), 6);
}

#[test]
fn test_deleting_inside_underline() {
    let mut editor = loaded("ab", &[(Underline, 0, 2)]);

    editor.delete(1..2).unwrap();
    assert_eq!(ranges(&editor, Underline), vec![0..1]);

    let states = active_states(editor.store(), 1, 1);
    assert!(states.underline());
    assert!(!states.bold());
}

#[test]
fn test_typing_at_paragraph_start_joins_paragraph_run() {
    let mut editor = loaded("first\nsecond", &[(Bold, 6, 12)]);
    editor.set_cursor(6).unwrap();
    editor.set_toggle(Bold, Some(true));

    let report = editor.type_text("X").unwrap();

    assert_eq!(editor.text(), "first\nXsecond");
    assert_eq!(ranges(&editor, Bold), vec![6..13]);
    assert_eq!(report.merged, vec![Bold]);
}

#[test]
fn test_paragraph_merge_disabled_by_config() {
    let config = EditorConfig::from_toml_str("merge_at_line_start = false").unwrap();
    let mut editor = RichTextEditor::with_config(&config);
    editor
        .load("first\nsecond", [Run::new(Bold, 6, 12).unwrap()])
        .unwrap();
    editor.set_cursor(6).unwrap();
    editor.set_toggle(Bold, Some(true));

    editor.type_text("X").unwrap();

    assert_eq!(ranges(&editor, Bold), vec![6..7, 7..13]);
}

#[test]
fn test_paragraph_merge_skipped_with_unbound_control() {
    let config = EditorConfig::new().bind(Underline, false);
    let mut editor = RichTextEditor::with_config(&config);
    editor.load("x\ntwo", [Run::new(Bold, 2, 5).unwrap()]).unwrap();
    editor.set_cursor(2).unwrap();
    editor.set_toggle(Bold, Some(true));

    let report = editor.type_text("X").unwrap();

    assert!(report.merged.is_empty());
    assert_eq!(ranges(&editor, Bold), vec![2..3, 3..6]);
}

#[test]
fn test_bold_and_italic_are_independent() {
    let mut editor = RichTextEditor::new();
    editor.toggle_style(Bold).unwrap();
    editor.type_text("ab").unwrap();
    editor.toggle_style(Italic).unwrap();
    editor.type_text("cd").unwrap();
    editor.toggle_style(Bold).unwrap();
    editor.type_text("ef").unwrap();

    assert_eq!(editor.text(), "abcdef");
    assert_eq!(ranges(&editor, Bold), vec![0..4]);
    assert_eq!(ranges(&editor, Italic), vec![2..6]);
    assert!(ranges(&editor, Underline).is_empty());
}

#[test]
fn test_unbound_control_leaves_attribute_alone() {
    let config = EditorConfig::new().bind(Underline, false);
    let mut editor = RichTextEditor::with_config(&config);
    editor.load("ab", [Run::new(Underline, 0, 2).unwrap()]).unwrap();

    editor.insert(1, "x").unwrap();

    assert_eq!(ranges(&editor, Underline), vec![0..3]);
    assert_eq!(editor.toggle_state().get().get(Underline), None);
}

#[test]
fn test_typing_over_selection() {
    let mut editor = loaded("Hello world", &[(Italic, 6, 11)]);
    editor.set_selection(0, 5).unwrap();
    editor.set_toggle(Bold, Some(true));

    editor.type_text("Howdy").unwrap();

    assert_eq!(editor.text(), "Howdy world");
    assert_eq!(ranges(&editor, Bold), vec![0..5]);
    assert_eq!(ranges(&editor, Italic), vec![6..11]);
    assert_eq!(editor.selection(), (5, 5));
}

#[test]
fn test_signals_follow_edits() {
    let mut editor = loaded("ab", &[(Bold, 0, 2)]);
    let formats: Arc<Mutex<Vec<ActiveStates>>> = Arc::default();
    let selections: Arc<Mutex<Vec<(usize, usize)>>> = Arc::default();

    let sink = Arc::clone(&formats);
    editor.format_changed.connect(move |states| sink.lock().unwrap().push(*states));
    let sink = Arc::clone(&selections);
    editor.selection_changed.connect(move |range| sink.lock().unwrap().push(*range));

    editor.set_cursor(2).unwrap();
    editor.backspace().unwrap();

    assert_eq!(*selections.lock().unwrap(), vec![(2, 2), (1, 1)]);
    let formats = formats.lock().unwrap();
    assert!(formats.iter().all(ActiveStates::bold));
}

#[test]
fn test_disconnected_slot_stops_receiving_text() {
    let mut editor = RichTextEditor::new();
    let texts: Arc<Mutex<Vec<String>>> = Arc::default();

    let sink = Arc::clone(&texts);
    let id = editor.text_changed.connect(move |text| sink.lock().unwrap().push(text.clone()));
    editor.type_text("a").unwrap();
    assert!(editor.text_changed.disconnect(id));
    editor.type_text("b").unwrap();

    assert_eq!(*texts.lock().unwrap(), vec!["a".to_string()]);
}

#[test]
fn test_failed_edits_are_atomic() {
    let mut editor = loaded("abc", &[(Bold, 0, 3)]);

    assert_eq!(
        editor.insert(4, "x"),
        Err(Error::InvalidRange { start: 4, end: 4, len: 3 })
    );
    assert!(editor.delete(1..9).is_err());

    assert_eq!(editor.text(), "abc");
    assert_eq!(ranges(&editor, Bold), vec![0..3]);
    assert!(!editor.is_editing());
}

#[test]
fn test_edit_sequence_errors() {
    let mut editor = RichTextEditor::new();

    assert_eq!(editor.apply_mutation("x"), Err(Error::NoPendingEdit));
    assert_eq!(editor.on_after_edit(), Err(Error::NoPendingEdit));

    editor.on_before_edit(0, 0, 1).unwrap();
    assert_eq!(editor.toggle_style(Bold), Err(Error::EditInProgress));
    assert_eq!(editor.set_plain_text("x"), Err(Error::EditInProgress));
    editor.apply_mutation("x").unwrap();
    editor.on_after_edit().unwrap();

    assert_eq!(editor.text(), "x");
}

#[test]
fn test_export_order_after_editing() {
    let mut editor = RichTextEditor::new();
    editor.type_text("one two").unwrap();
    editor.set_selection(4, 7).unwrap();
    editor.toggle_style(Underline).unwrap();
    editor.set_selection(0, 3).unwrap();
    editor.toggle_style(Italic).unwrap();
    editor.toggle_style(Bold).unwrap();

    let exported: Vec<_> = editor.runs().iter().map(|r| (r.kind(), r.range())).collect();
    assert_eq!(
        exported,
        vec![(Bold, 0..3), (Italic, 0..3), (Underline, 4..7)]
    );
}
