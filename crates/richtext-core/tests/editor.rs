use pretty_assertions::assert_eq;
use richtext_core::{
    Block, BlockType, Document, EditCommand, Editor, EditorConfig, Formats, Selection,
};

fn insert(text: &str) -> EditCommand {
    EditCommand::InsertText {
        text: text.to_string(),
    }
}

#[test]
fn test_typing_session_undo_redo() {
    let mut editor = Editor::new(Document::default());

    editor.execute(insert("Hello")).unwrap();
    editor.execute(EditCommand::SplitBlock).unwrap();
    editor.execute(insert("World")).unwrap();
    assert_eq!(editor.doc().block_texts(), ["Hello", "World"]);
    assert_eq!(editor.selection(), Selection::cursor(1, 5));
    assert_eq!(editor.history().undo_depth(), 3);

    editor.execute(EditCommand::Undo).unwrap();
    assert_eq!(editor.doc().block_texts(), ["Hello", ""]);
    assert_eq!(editor.selection(), Selection::cursor(1, 0));

    editor.execute(EditCommand::Undo).unwrap();
    editor.execute(EditCommand::Undo).unwrap();
    assert_eq!(editor.doc().block_texts(), [""]);
    assert!(!editor.execute(EditCommand::Undo).unwrap());

    editor.execute(EditCommand::Redo).unwrap();
    editor.execute(EditCommand::Redo).unwrap();
    editor.execute(EditCommand::Redo).unwrap();
    assert_eq!(editor.doc().block_texts(), ["Hello", "World"]);
    assert_eq!(editor.selection(), Selection::cursor(1, 5));
    assert!(!editor.execute(EditCommand::Redo).unwrap());
}

#[test]
fn test_inapplicable_command_leaves_history_alone() {
    let mut editor = Editor::new(Document::from_paragraphs(["Hello"]));
    assert!(!editor.execute(EditCommand::DeleteBackward).unwrap());
    assert!(!editor.execute(EditCommand::ApplyFormat(Formats::BOLD)).unwrap());
    assert!(!editor.execute(EditCommand::MoveBlockUp { index: 0 }).unwrap());
    assert!(!editor.history().can_undo());
}

#[test]
fn test_select_all_is_not_recorded() {
    let mut editor = Editor::new(Document::from_paragraphs(["Hello", "World"]));
    assert!(editor.execute(EditCommand::SelectAll).unwrap());
    assert_eq!(editor.selection(), Selection::range(0, 0, 1, 5));
    assert!(!editor.history().can_undo());
}

#[test]
fn test_cut_and_paste() {
    let mut editor = Editor::new(Document::from_paragraphs(["Hello", "World"]));
    editor.set_selection(Selection::range(0, 3, 1, 2));

    let copied = editor.copy().unwrap();
    assert_eq!(copied.block_texts(), ["lo", "Wo"]);
    editor.execute(EditCommand::Cut).unwrap();
    assert_eq!(editor.doc().block_texts(), ["Helrld"]);

    editor.set_selection(Selection::cursor(0, 6));
    editor.execute(EditCommand::Paste(copied)).unwrap();
    assert_eq!(editor.doc().block_texts(), ["Helrldlo", "Wo"]);
    assert_eq!(editor.selection(), Selection::cursor(1, 2));

    editor.execute(EditCommand::Undo).unwrap();
    editor.execute(EditCommand::Undo).unwrap();
    assert_eq!(editor.doc().block_texts(), ["Hello", "World"]);
    assert_eq!(editor.selection(), Selection::range(0, 3, 1, 2));
}

#[test]
fn test_formatting_commands() {
    let mut editor = Editor::new(Document::from_paragraphs(["Hello World"]));
    editor.set_selection(Selection::range(0, 6, 0, 11));

    editor.execute(EditCommand::ToggleFormat(Formats::ITALIC)).unwrap();
    editor
        .execute(EditCommand::ApplyLink {
            url: "https://example.org".to_string(),
        })
        .unwrap();
    let block = &editor.doc().blocks()[0];
    assert!(block.has_format(6, 5, Formats::ITALIC | Formats::LINK));

    editor.set_selection(Selection::cursor(0, 8));
    editor.execute(EditCommand::RemoveLink).unwrap();
    assert!(!editor.doc().blocks()[0].has_format(6, 1, Formats::LINK));
    assert!(editor.doc().blocks()[0].has_format(6, 5, Formats::ITALIC));

    editor.set_selection(Selection::range(0, 0, 0, 11));
    editor.execute(EditCommand::ClearFormatting).unwrap();
    assert!(!editor.doc().blocks()[0].lines()[0].is_formatted());
    assert_eq!(editor.history().undo_depth(), 4);
}

#[test]
fn test_block_commands() {
    let mut editor = Editor::new(Document::from_paragraphs(["A", "B", "C"]));

    editor.execute(EditCommand::MoveBlockDown { index: 0 }).unwrap();
    assert_eq!(editor.doc().block_texts(), ["B", "A", "C"]);

    editor.set_selection(Selection::cursor(2, 0));
    editor.execute(EditCommand::Indent).unwrap();
    editor
        .execute(EditCommand::SetBlockType(BlockType::NumberedList))
        .unwrap();
    editor
        .execute(EditCommand::SetBlockMeta {
            key: "start".to_string(),
            value: Some("3".to_string()),
        })
        .unwrap();
    let block = &editor.doc().blocks()[2];
    assert_eq!(block.indent(), 1);
    assert_eq!(block.block_type(), &BlockType::NumberedList);
    assert_eq!(block.meta().get("start").map(String::as_str), Some("3"));

    editor
        .execute(EditCommand::InsertBlockAfter {
            index: 2,
            block_type: BlockType::Diagram,
        })
        .unwrap();
    editor.execute(EditCommand::DuplicateBlock { index: 0 }).unwrap();
    editor.execute(EditCommand::DeleteBlock { index: 1 }).unwrap();
    editor
        .execute(EditCommand::ReplaceBlock {
            index: 0,
            block: Block::with_text(BlockType::Heading1, "Top"),
        })
        .unwrap();
    assert_eq!(editor.doc().block_texts(), ["Top", "A", "C", ""]);

    while editor.history().can_undo() {
        editor.execute(EditCommand::Undo).unwrap();
    }
    assert_eq!(editor.doc(), &Document::from_paragraphs(["A", "B", "C"]));
}

#[test]
fn test_text_commands() {
    let mut editor = Editor::new(Document::from_paragraphs(["one two", "three"]));
    editor.set_selection(Selection::cursor(0, 7));

    editor.execute(EditCommand::DeleteWordBackward).unwrap();
    assert_eq!(editor.doc().block_texts(), ["one ", "three"]);
    editor.execute(EditCommand::DeleteForward).unwrap();
    assert_eq!(editor.doc().block_texts(), ["one three"]);
    editor.execute(EditCommand::DeleteWordForward).unwrap();
    assert_eq!(editor.doc().block_texts(), ["one "]);
    editor.execute(EditCommand::InsertLineBreak).unwrap();
    editor.execute(insert("x")).unwrap();
    assert_eq!(editor.doc().block_texts(), ["one \nx"]);

    editor.execute(EditCommand::SplitBlock).unwrap();
    assert!(editor.execute(EditCommand::JoinWithPrevious).unwrap());
    assert_eq!(editor.doc().block_texts(), ["one \nx"]);
    assert!(!editor.execute(EditCommand::JoinWithNext).unwrap());
}

#[test]
fn test_force_join_commands_and_undo() {
    let doc = Document::new(vec![
        Block::with_text(BlockType::Heading1, "Title"),
        Block::paragraph("Body"),
        Block::with_text(BlockType::Code, "x"),
    ]);
    let mut editor = Editor::new(doc.clone());

    editor.set_selection(Selection::cursor(1, 0));
    assert!(!editor.execute(EditCommand::JoinWithPrevious).unwrap());
    assert!(editor.execute(EditCommand::ForceJoinWithPrevious).unwrap());
    assert_eq!(editor.doc().block_texts(), ["TitleBody", "x"]);

    assert!(!editor.execute(EditCommand::ForceJoinWithPrevious).unwrap());
    editor.set_selection(Selection::cursor(0, 9));
    assert!(editor.execute(EditCommand::ForceJoinWithNext).unwrap());
    assert_eq!(editor.doc().block_texts(), ["TitleBodyx"]);
    assert_eq!(editor.doc().blocks()[0].block_type(), &BlockType::Heading1);

    editor.execute(EditCommand::Undo).unwrap();
    editor.execute(EditCommand::Undo).unwrap();
    assert_eq!(editor.doc(), &doc);
    assert_eq!(editor.selection(), Selection::cursor(1, 0));
}

#[test]
fn test_paste_text_command() {
    let mut editor = Editor::new(Document::from_paragraphs(["ab"]));
    editor.set_selection(Selection::cursor(0, 1));
    editor
        .execute(EditCommand::PasteText("x\r\ny".to_string()))
        .unwrap();
    assert_eq!(editor.doc().block_texts(), ["ax", "yb"]);
}

#[test]
fn test_history_limit_from_config() {
    let config = EditorConfig::default().with_history_limit(2);
    let mut editor = Editor::with_config(Document::default(), &config);
    for ch in ["a", "b", "c", "d"] {
        editor.execute(insert(ch)).unwrap();
    }
    assert_eq!(editor.history().undo_depth(), 2);
    while editor.history().can_undo() {
        editor.execute(EditCommand::Undo).unwrap();
    }
    assert_eq!(editor.doc().block_texts(), ["ab"]);
}

#[test]
fn test_clean_point() {
    let mut editor = Editor::new(Document::default());
    editor.execute(insert("draft")).unwrap();
    editor.history_mut().mark_clean();
    assert!(editor.history().is_clean());

    editor.execute(insert("!")).unwrap();
    assert!(!editor.history().is_clean());
    editor.execute(EditCommand::Undo).unwrap();
    assert!(editor.history().is_clean());
}

#[test]
fn test_toggle_block_type_and_outdent() {
    let doc = Document::new(vec![Block::with_text(BlockType::Quote, "q").indented(2)]);
    let mut editor = Editor::new(doc);
    editor
        .execute(EditCommand::ToggleBlockType(BlockType::Quote))
        .unwrap();
    editor.execute(EditCommand::Outdent).unwrap();
    let block = &editor.doc().blocks()[0];
    assert_eq!(block.block_type(), &BlockType::Paragraph);
    assert_eq!(block.indent(), 1);
}

#[test]
fn test_update_link_and_remove_format() {
    let mut editor = Editor::new(Document::from_paragraphs(["link"]));
    editor.set_selection(Selection::range(0, 0, 0, 4));
    editor
        .execute(EditCommand::UpdateLink {
            url: "https://a.example".to_string(),
        })
        .unwrap();
    editor.execute(EditCommand::ApplyFormat(Formats::BOLD)).unwrap();
    editor.execute(EditCommand::RemoveFormat(Formats::BOLD)).unwrap();
    let runs = editor.doc().blocks()[0].lines()[0].runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].formats, Formats::LINK);
    assert_eq!(runs[0].link(), Some("https://a.example"));
}

#[test]
fn test_delete_selection_command() {
    let mut editor = Editor::new(Document::from_paragraphs(["Hello"]));
    editor.set_selection(Selection::range(0, 1, 0, 3));
    editor.execute(EditCommand::DeleteSelection).unwrap();
    assert_eq!(editor.doc().block_texts(), ["Hlo"]);
    assert!(!editor.execute(EditCommand::DeleteSelection).unwrap());
}
