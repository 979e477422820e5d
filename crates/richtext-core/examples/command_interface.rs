//! Command interface example
//!
//! Demonstrates how to drive an `Editor` with `EditCommand`s.

use richtext_core::{BlockType, Document, EditCommand, Editor, Formats, Selection};

fn print_doc(editor: &Editor) {
    for (i, block) in editor.doc().blocks().iter().enumerate() {
        println!(
            "  [{i}] {:<10} indent={} {:?}",
            block.block_type().as_str(),
            block.indent(),
            block.text()
        );
    }
    println!("  selection: {:?}\n", editor.selection());
}

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Editor command interface ===\n");
    let mut editor = Editor::new(Document::default());

    println!("1. Typing and splitting blocks:");
    editor
        .execute(EditCommand::InsertText {
            text: "Shopping list".to_string(),
        })
        .unwrap();
    editor
        .execute(EditCommand::SetBlockType(BlockType::Heading1))
        .unwrap();
    editor.execute(EditCommand::SplitBlock).unwrap();
    editor
        .execute(EditCommand::SetBlockType(BlockType::BulletList))
        .unwrap();
    for item in ["eggs", "milk", "bread"] {
        editor
            .execute(EditCommand::InsertText {
                text: item.to_string(),
            })
            .unwrap();
        editor.execute(EditCommand::SplitBlock).unwrap();
    }
    editor.execute(EditCommand::DeleteBackward).unwrap();
    print_doc(&editor);

    println!("2. Nesting and moving:");
    editor.set_selection(Selection::cursor(3, 0));
    editor.execute(EditCommand::Indent).unwrap();
    editor.execute(EditCommand::MoveBlockUp { index: 2 }).unwrap();
    print_doc(&editor);

    println!("3. Formatting:");
    editor.set_selection(Selection::range(0, 0, 0, 8));
    editor
        .execute(EditCommand::ToggleFormat(Formats::ITALIC))
        .unwrap();
    println!(
        "  italic 0..8: {}\n",
        editor.doc().blocks()[0].has_format(0, 8, Formats::ITALIC)
    );

    println!("4. Copy and paste:");
    editor.set_selection(Selection::range(1, 0, 1, 4));
    if let Some(copied) = editor.copy() {
        editor.set_selection(Selection::cursor(3, 5));
        editor.execute(EditCommand::Paste(copied)).unwrap();
    }
    print_doc(&editor);

    println!("5. Undo everything:");
    let mut steps = 0;
    while editor.execute(EditCommand::Undo).unwrap() {
        steps += 1;
    }
    println!("  undid {steps} edits");
    print_doc(&editor);
}
