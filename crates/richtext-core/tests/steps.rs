use pretty_assertions::assert_eq;
use richtext_core::{
    Bias, Block, BlockType, Document, Formats, Line, Step, StepError, StepMap, Transaction,
};

fn para(text: &str) -> Block {
    Block::paragraph(text)
}

fn bold_doc(text: &str) -> Document {
    Document::new(vec![Block::from_lines(
        BlockType::Paragraph,
        vec![Line::new().with(text, Formats::BOLD)],
    )])
}

/// Apply `step`, check the map, then apply the inverse and check the document
/// is back to where it started.
fn assert_invertible(doc: &Document, step: Step) -> StepMap {
    let mut working = doc.clone();
    let outcome = step.apply(&mut working).unwrap();
    assert_ne!(&working, doc, "step should change the document: {step:?}");
    outcome.inverse.apply(&mut working).unwrap();
    assert_eq!(&working, doc);
    outcome.map
}

#[test]
fn test_insert_block() {
    let mut doc = Document::from_paragraphs(["A", "B"]);
    let outcome = Step::InsertBlock {
        index: 1,
        block: para("X"),
    }
    .apply(&mut doc)
    .unwrap();
    assert_eq!(doc.block_texts(), ["A", "X", "B"]);
    assert_eq!(outcome.map, StepMap::new(3, 0, 3));

    outcome.inverse.apply(&mut doc).unwrap();
    assert_eq!(doc.block_texts(), ["A", "B"]);
}

#[test]
fn test_insert_block_at_end() {
    let doc = Document::from_paragraphs(["A"]);
    let map = assert_invertible(
        &doc,
        Step::InsertBlock {
            index: 1,
            block: para("Z"),
        },
    );
    assert_eq!(map, StepMap::new(3, 0, 3));
}

#[test]
fn test_delete_block_restores_metadata() {
    let doc = Document::new(vec![
        para("A"),
        Block::with_text(BlockType::Heading2, "B")
            .indented(2)
            .with_meta("id", "b-1"),
        para("C"),
    ]);
    let map = assert_invertible(&doc, Step::DeleteBlock { index: 1 });
    assert_eq!(map, StepMap::new(3, 3, 0));
}

#[test]
fn test_delete_last_block_fails() {
    let mut doc = Document::from_paragraphs(["only"]);
    let err = Step::DeleteBlock { index: 0 }.apply(&mut doc).unwrap_err();
    assert_eq!(err, StepError::LastBlock);
    assert_eq!(doc.block_texts(), ["only"]);
}

#[test]
fn test_replace_block() {
    let doc = Document::from_paragraphs(["X", "ABCD"]);
    let map = assert_invertible(
        &doc,
        Step::ReplaceBlock {
            index: 1,
            block: para("AB"),
        },
    );
    assert_eq!(map, StepMap::new(3, 6, 4));
}

#[test]
fn test_block_attribute_steps() {
    let doc = Document::new(vec![para("A").with_meta("k", "v")]);
    let map = assert_invertible(
        &doc,
        Step::SetBlockType {
            index: 0,
            block_type: BlockType::Heading1,
        },
    );
    assert!(map.is_empty());
    assert_invertible(&doc, Step::SetBlockIndent { index: 0, indent: 3 });
    assert_invertible(
        &doc,
        Step::SetBlockMeta {
            index: 0,
            key: "k".into(),
            value: None,
        },
    );
    assert_invertible(
        &doc,
        Step::SetBlockMeta {
            index: 0,
            key: "other".into(),
            value: Some("1".into()),
        },
    );
}

#[test]
fn test_set_indent_clamps() {
    let mut doc = Document::from_paragraphs(["A"]);
    Step::SetBlockIndent {
        index: 0,
        indent: 40,
    }
    .apply(&mut doc)
    .unwrap();
    assert_eq!(doc.blocks()[0].indent(), 5);
}

#[test]
fn test_move_blocks() {
    let doc = Document::from_paragraphs(["A", "B", "C", "D", "E"]);

    let mut moved = doc.clone();
    let outcome = Step::MoveBlocks {
        from: 1,
        to: 3,
        count: 2,
    }
    .apply(&mut moved)
    .unwrap();
    assert_eq!(moved.block_texts(), ["A", "D", "E", "B", "C"]);
    assert!(outcome.map.is_empty());
    outcome.inverse.apply(&mut moved).unwrap();
    assert_eq!(moved, doc);

    let mut moved = doc.clone();
    Step::MoveBlocks {
        from: 3,
        to: 1,
        count: 2,
    }
    .apply(&mut moved)
    .unwrap();
    assert_eq!(moved.block_texts(), ["A", "D", "E", "B", "C"]);

    let mut small = Document::from_paragraphs(["A", "B", "C"]);
    Step::MoveBlocks {
        from: 2,
        to: 0,
        count: 1,
    }
    .apply(&mut small)
    .unwrap();
    assert_eq!(small.block_texts(), ["C", "A", "B"]);
}

#[test]
fn test_move_blocks_out_of_range() {
    let mut doc = Document::from_paragraphs(["A", "B"]);
    let err = Step::MoveBlocks {
        from: 1,
        to: 0,
        count: 2,
    }
    .apply(&mut doc)
    .unwrap_err();
    assert!(matches!(err, StepError::InvalidMove { .. }));
}

#[test]
fn test_insert_text() {
    let mut doc = Document::from_paragraphs(["Hello"]);
    let outcome = Step::insert_text(0, 3, "XY").apply(&mut doc).unwrap();
    assert_eq!(doc.block_texts(), ["HelXYlo"]);
    assert_eq!(outcome.map, StepMap::new(4, 0, 2));
    assert_eq!(outcome.map.map(1, Bias::Right), 1);
    assert_eq!(outcome.map.map(3, Bias::Right), 3);
    assert_eq!(outcome.map.map(5, Bias::Right), 7);

    outcome.inverse.apply(&mut doc).unwrap();
    assert_eq!(doc.block_texts(), ["Hello"]);
}

#[test]
fn test_insert_text_preserves_formatting_on_undo() {
    let doc = bold_doc("Hello");
    assert_invertible(&doc, Step::insert_text(0, 3, "XY"));
    assert_invertible(&doc, Step::insert_text(0, 5, "!"));
    assert_invertible(&doc, Step::insert_text(0, 0, "_"));
    assert_invertible(&doc, Step::insert_text(0, 2, "a\nb"));
}

#[test]
fn test_insert_text_out_of_bounds() {
    let mut doc = Document::from_paragraphs(["Hi"]);
    let err = Step::insert_text(0, 3, "x").apply(&mut doc).unwrap_err();
    assert_eq!(
        err,
        StepError::OffsetOutOfBounds {
            block: 0,
            start: 3,
            end: 3,
            size: 2
        }
    );
}

#[test]
fn test_delete_text() {
    let mut doc = Document::from_paragraphs(["Hello World"]);
    let outcome = Step::delete_text(0, 5, 3).apply(&mut doc).unwrap();
    assert_eq!(doc.block_texts(), ["Hellorld"]);
    assert_eq!(outcome.map, StepMap::new(6, 3, 0));
    assert_eq!(outcome.map.map(5, Bias::Right), 5);
    assert_eq!(outcome.map.map(9, Bias::Right), 6);

    outcome.inverse.apply(&mut doc).unwrap();
    assert_eq!(doc.block_texts(), ["Hello World"]);
}

#[test]
fn test_delete_text_restores_formatting() {
    let mut doc = bold_doc("Hello");
    let before = doc.clone();
    let outcome = Step::delete_text(0, 2, 2).apply(&mut doc).unwrap();
    assert_eq!(doc.block_texts(), ["Heo"]);
    outcome.inverse.apply(&mut doc).unwrap();
    assert_eq!(doc, before);
    assert_eq!(doc.blocks()[0].lines()[0].runs().len(), 1);
}

#[test]
fn test_delete_text_across_lines() {
    let mut block = Block::paragraph("Hello\nWorld");
    block.add_format(3, 5, Formats::ITALIC);
    let doc = Document::new(vec![block]);
    assert_invertible(&doc, Step::delete_text(0, 5, 1));
    assert_invertible(&doc, Step::delete_text(0, 2, 7));

    let mut merged = doc.clone();
    Step::delete_text(0, 5, 1).apply(&mut merged).unwrap();
    assert_eq!(merged.block_texts(), ["HelloWorld"]);
    assert_eq!(merged.blocks()[0].lines().len(), 1);
}

#[test]
fn test_split_block() {
    let mut doc = Document::from_paragraphs(["Hello World"]);
    let outcome = Step::SplitBlock {
        index: 0,
        offset: 5,
    }
    .apply(&mut doc)
    .unwrap();
    assert_eq!(doc.block_texts(), ["Hello", " World"]);
    assert_eq!(outcome.map, StepMap::new(6, 0, 2));

    outcome.inverse.apply(&mut doc).unwrap();
    assert_eq!(doc.block_texts(), ["Hello World"]);
}

#[test]
fn test_split_block_keeps_type_and_indent() {
    let doc = Document::new(vec![
        Block::with_text(BlockType::Heading1, "Title text")
            .indented(1)
            .with_meta("id", "t"),
    ]);
    let mut split = doc.clone();
    Step::SplitBlock {
        index: 0,
        offset: 5,
    }
    .apply(&mut split)
    .unwrap();
    assert_eq!(split.blocks()[1].block_type(), &BlockType::Heading1);
    assert_eq!(split.blocks()[1].indent(), 1);
    assert!(split.blocks()[1].meta().is_empty());

    assert_invertible(&doc, Step::SplitBlock { index: 0, offset: 0 });
    assert_invertible(&doc, Step::SplitBlock { index: 0, offset: 10 });
}

#[test]
fn test_join_blocks_inverse_restores_both_blocks() {
    let mut second = Block::with_text(BlockType::Heading2, "World").with_meta("id", "w");
    second.add_format(0, 3, Formats::UNDERLINE);
    let doc = Document::new(vec![
        Block::from_lines(
            BlockType::Paragraph,
            vec![Line::new().with("Hello", Formats::BOLD)],
        ),
        second,
        para("after"),
    ]);

    let mut joined = doc.clone();
    let outcome = Step::JoinBlocks { index: 0 }.apply(&mut joined).unwrap();
    assert_eq!(joined.block_texts(), ["HelloWorld", "after"]);
    assert_eq!(joined.blocks()[0].block_type(), &BlockType::Paragraph);
    assert_eq!(outcome.map, StepMap::new(6, 2, 0));

    outcome.inverse.apply(&mut joined).unwrap();
    assert_eq!(joined, doc);
}

#[test]
fn test_join_last_block_fails() {
    let mut doc = Document::from_paragraphs(["A", "B"]);
    assert_eq!(
        Step::JoinBlocks { index: 1 }.apply(&mut doc).unwrap_err(),
        StepError::NothingToJoin(1)
    );
}

#[test]
fn test_change_format() {
    let mut doc = Document::from_paragraphs(["Hello World"]);
    let before = doc.clone();
    let outcome = Step::ChangeFormat {
        index: 0,
        offset: 0,
        len: 5,
        format: Formats::BOLD,
        add: true,
    }
    .apply(&mut doc)
    .unwrap();
    assert!(outcome.map.is_empty());
    assert!(doc.blocks()[0].has_format(0, 5, Formats::BOLD));
    assert!(!doc.blocks()[0].has_format(0, 6, Formats::BOLD));

    outcome.inverse.apply(&mut doc).unwrap();
    assert_eq!(doc, before);
}

#[test]
fn test_change_format_remove_partially_present() {
    let mut block = Block::paragraph("abcdef");
    block.add_format(0, 3, Formats::BOLD);
    let doc = Document::new(vec![block]);
    assert_invertible(
        &doc,
        Step::ChangeFormat {
            index: 0,
            offset: 2,
            len: 4,
            format: Formats::BOLD,
            add: false,
        },
    );
    assert_invertible(
        &doc,
        Step::ChangeFormat {
            index: 0,
            offset: 2,
            len: 4,
            format: Formats::BOLD,
            add: true,
        },
    );
}

#[test]
fn test_transaction_mapping_after_block_insert() {
    let mut doc = Document::from_paragraphs(["AB", "CD"]);
    let result = Transaction::new()
        .step(Step::InsertBlock {
            index: 1,
            block: para("XY"),
        })
        .apply(&mut doc)
        .unwrap();
    assert_eq!(result.mapping().map(1, Bias::Right), 1);
    assert_eq!(result.mapping().map(5, Bias::Right), 9);
}
