//! Drives `EditorState`, `History` and the command functions directly, without
//! the `Editor` wrapper, and shows how steps remap the selection.

use richtext_core::{
    Block, Document, EditorState, History, Selection, Step, Transaction, commands,
};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let doc = Document::from_paragraphs(["Hello World", "Second block"]);
    let mut state = EditorState::new(doc, Selection::cursor(1, 6));
    let mut history = History::with_limit(100);

    // A hand-built transaction: the cursor is carried through the mapping.
    let tr = Transaction::new().step(Step::InsertBlock {
        index: 1,
        block: Block::paragraph("Inserted"),
    });
    history.push(state.apply(&tr).unwrap());
    println!("after insert: {:?}", state.doc().block_texts());
    println!("cursor moved to {:?}", state.selection());

    // Commands build transactions from the current state.
    state.set_selection(Selection::range(0, 6, 0, 11));
    if let Some(tr) = commands::insert_text(&state, "Rust") {
        history.push(state.apply(&tr).unwrap());
    }
    println!("after replace: {:?}", state.doc().block_texts());

    history.mark_clean();
    if let Some(tr) = commands::delete_char_before(&state) {
        history.push(state.apply(&tr).unwrap());
    }
    println!(
        "after backspace: {:?} (clean: {})",
        state.doc().block_texts(),
        history.is_clean()
    );

    while history.undo(&mut state).unwrap() {}
    println!("undone: {:?}", state.doc().block_texts());
    println!("selection restored to {:?}", state.selection());
}
