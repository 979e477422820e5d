use pretty_assertions::assert_eq;
use richtext_core::{
    Block, BlockType, Document, EditorState, Formats, Line, Selection, Transaction, commands,
};

fn linked_doc() -> Document {
    Document::new(vec![Block::from_lines(
        BlockType::Paragraph,
        vec![
            Line::new()
                .with("see ", Formats::empty())
                .with_link("docs", "https://a.example", Formats::empty())
                .with(" now", Formats::empty()),
        ],
    )])
}

fn apply_and_check_undo(state: &mut EditorState, tr: Transaction) {
    let before = state.clone();
    let inverse = state.apply(&tr).unwrap();
    let mut undone = state.clone();
    undone.apply(&inverse).unwrap();
    assert_eq!(undone, before);
}

#[test]
fn test_apply_format_range() {
    let mut state = EditorState::new(
        Document::from_paragraphs(["Hello World"]),
        Selection::range(0, 0, 0, 5),
    );
    let tr = commands::apply_format(&state, Formats::BOLD).unwrap();
    apply_and_check_undo(&mut state, tr);

    let block = &state.doc().blocks()[0];
    assert!(block.has_format(0, 5, Formats::BOLD));
    assert!(!block.has_format(5, 6, Formats::BOLD));
    assert_eq!(state.selection(), Selection::range(0, 0, 0, 5));
}

#[test]
fn test_format_commands_need_chars() {
    let state = EditorState::new(
        Document::from_paragraphs(["Hello"]),
        Selection::cursor(0, 2),
    );
    assert!(commands::apply_format(&state, Formats::BOLD).is_none());
    assert!(commands::toggle_format(&state, Formats::BOLD).is_none());

    let state = EditorState::new(
        Document::from_paragraphs(["Hello", ""]),
        Selection::range(0, 5, 1, 0),
    );
    assert!(commands::apply_format(&state, Formats::ITALIC).is_none());
}

#[test]
fn test_format_across_blocks() {
    let mut state = EditorState::new(
        Document::from_paragraphs(["Hello", "World"]),
        Selection::range(1, 3, 0, 2),
    );
    let tr = commands::apply_format(&state, Formats::ITALIC).unwrap();
    assert_eq!(tr.steps().len(), 2);
    apply_and_check_undo(&mut state, tr);

    let blocks = state.doc().blocks();
    assert!(blocks[0].has_format(2, 3, Formats::ITALIC));
    assert!(!blocks[0].has_format(0, 2, Formats::ITALIC));
    assert!(blocks[1].has_format(0, 3, Formats::ITALIC));
    assert!(!blocks[1].has_format(3, 2, Formats::ITALIC));
}

#[test]
fn test_toggle_format() {
    let mut state = EditorState::new(
        Document::from_paragraphs(["Hello World"]),
        Selection::range(0, 0, 0, 11),
    );
    state
        .apply(&commands::apply_format(&state, Formats::BOLD).unwrap())
        .unwrap();
    state.set_selection(Selection::range(0, 3, 0, 8));

    let tr = commands::toggle_format(&state, Formats::BOLD).unwrap();
    state.apply(&tr).unwrap();
    let block = &state.doc().blocks()[0];
    assert!(block.has_format(0, 3, Formats::BOLD));
    assert!(!block.has_format(3, 1, Formats::BOLD));
    assert!(!block.has_format(7, 1, Formats::BOLD));
    assert!(block.has_format(8, 3, Formats::BOLD));

    state.set_selection(Selection::range(0, 0, 0, 11));
    let tr = commands::toggle_format(&state, Formats::BOLD).unwrap();
    state.apply(&tr).unwrap();
    assert!(state.doc().blocks()[0].has_format(0, 11, Formats::BOLD));
}

#[test]
fn test_remove_format_keeps_other_tags() {
    let mut block = Block::paragraph("abcdef");
    block.add_format(0, 6, Formats::BOLD | Formats::UNDERLINE);
    let mut state = EditorState::new(Document::new(vec![block]), Selection::range(0, 1, 0, 4));

    let tr = commands::remove_format(&state, Formats::BOLD).unwrap();
    apply_and_check_undo(&mut state, tr);
    let block = &state.doc().blocks()[0];
    assert!(block.has_format(0, 6, Formats::UNDERLINE));
    assert!(!block.has_format(1, 1, Formats::BOLD));
    assert!(block.has_format(4, 2, Formats::BOLD));
}

#[test]
fn test_apply_link() {
    let mut state = EditorState::new(
        Document::from_paragraphs(["see docs"]),
        Selection::range(0, 4, 0, 8),
    );
    assert!(commands::apply_link(&state, "").is_none());

    let tr = commands::apply_link(&state, "https://x.example").unwrap();
    apply_and_check_undo(&mut state, tr);
    let line = &state.doc().blocks()[0].lines()[0];
    assert_eq!(line.runs().len(), 1);
    assert_eq!(line.runs()[0].start, 4);
    assert_eq!(line.runs()[0].link(), Some("https://x.example"));
    assert!(line.formats_at(5).contains(Formats::LINK));
}

#[test]
fn test_update_link_under_cursor() {
    let mut state = EditorState::new(linked_doc(), Selection::cursor(0, 6));
    let tr = commands::update_link(&state, "https://b.example").unwrap();
    apply_and_check_undo(&mut state, tr);

    let runs = state.doc().blocks()[0].lines()[0].runs().to_vec();
    assert_eq!(runs.len(), 1);
    assert_eq!((runs[0].start, runs[0].len), (4, 4));
    assert_eq!(runs[0].link(), Some("https://b.example"));
}

#[test]
fn test_update_link_without_link_is_none() {
    let state = EditorState::new(linked_doc(), Selection::cursor(0, 1));
    assert!(commands::update_link(&state, "https://b.example").is_none());
}

#[test]
fn test_remove_link_under_cursor() {
    let mut state = EditorState::new(linked_doc(), Selection::cursor(0, 8));
    let tr = commands::remove_link(&state).unwrap();
    apply_and_check_undo(&mut state, tr);
    assert!(state.doc().blocks()[0].lines()[0].runs().is_empty());
    assert_eq!(state.doc().block_texts(), ["see docs now"]);
}

#[test]
fn test_remove_link_from_range() {
    let mut state = EditorState::new(linked_doc(), Selection::range(0, 0, 0, 6));
    let tr = commands::remove_link(&state).unwrap();
    state.apply(&tr).unwrap();
    let runs = state.doc().blocks()[0].lines()[0].runs().to_vec();
    assert_eq!(runs.len(), 1);
    assert_eq!((runs[0].start, runs[0].len), (6, 2));
    assert_eq!(runs[0].link(), Some("https://a.example"));
}

#[test]
fn test_clear_formatting() {
    let doc = Document::new(vec![Block::from_lines(
        BlockType::Paragraph,
        vec![
            Line::new()
                .with("bold", Formats::BOLD | Formats::ITALIC)
                .with_link("link", "https://a.example", Formats::CODE),
        ],
    )]);
    let mut state = EditorState::new(doc, Selection::range(0, 0, 0, 8));
    let tr = commands::clear_formatting(&state).unwrap();
    apply_and_check_undo(&mut state, tr);
    assert!(!state.doc().blocks()[0].lines()[0].is_formatted());

    assert!(commands::clear_formatting(&state).is_none());
    state.set_selection(Selection::cursor(0, 2));
    assert!(commands::clear_formatting(&state).is_none());
}
