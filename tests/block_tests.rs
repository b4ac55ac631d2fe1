use dokutree::{parse, Document, Inline, NodeId, NodeKind};
use pretty_assertions::assert_eq;

fn doc(input: &str) -> Document {
    parse(input.as_bytes(), "test").unwrap()
}

fn header(doc: &Document, id: NodeId) -> (u32, &str) {
    match doc.node(id).kind() {
        NodeKind::SectionHeader { level, text } => (*level, text.as_str()),
        other => panic!("expected header, got {other:?}"),
    }
}

fn paragraph_text(doc: &Document, id: NodeId) -> String {
    doc.inlines(id)
        .map(|inline| match inline {
            Inline::StyledText { text, .. } => text.clone(),
            other => panic!("expected text, got {other:?}"),
        })
        .collect()
}

#[test]
fn test_header_levels() {
    let doc = doc("====== Top ======\n== Minor ==\n= One =");
    let top = doc.top_level();
    assert_eq!(header(&doc, top[0]), (6, "Top"));
    assert_eq!(header(&doc, top[1]), (2, "Minor"));
    assert_eq!(header(&doc, top[2]), (1, "One"));
}

#[test]
fn test_header_trailing_whitespace() {
    let doc = doc("=== Spaced ===  \t");
    assert_eq!(header(&doc, doc.top_level()[0]), (3, "Spaced"));
}

#[test]
fn test_mismatched_header_is_paragraph() {
    let doc = doc("=== Uneven ==");
    let id = doc.top_level()[0];
    assert!(matches!(doc.node(id).kind(), NodeKind::Paragraph { .. }));
    assert_eq!(paragraph_text(&doc, id), "=== Uneven ==");
}

#[test]
fn test_header_with_inner_equals_is_paragraph() {
    let doc = doc("== a = b ==");
    assert!(matches!(
        doc.node(doc.top_level()[0]).kind(),
        NodeKind::Paragraph { .. }
    ));
}

#[test]
fn test_paragraph_lines_join_with_space() {
    let doc = doc("one\n  two  \nthree");
    let top = doc.top_level();
    assert_eq!(top.len(), 1);
    assert_eq!(paragraph_text(&doc, top[0]), "one two three");
}

#[test]
fn test_blank_lines_split_paragraphs() {
    let doc = doc("first\n\n\nsecond\n   \nthird");
    let texts: Vec<_> = doc
        .top_level()
        .iter()
        .map(|&id| paragraph_text(&doc, id))
        .collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[test]
fn test_header_ends_paragraph() {
    let doc = doc("before\n== H ==\nafter");
    let top = doc.top_level();
    assert_eq!(top.len(), 3);
    assert_eq!(paragraph_text(&doc, top[0]), "before");
    assert_eq!(header(&doc, top[1]), (2, "H"));
    assert_eq!(paragraph_text(&doc, top[2]), "after");
}

#[test]
fn test_unhandled_syntax_falls_through() {
    let doc = doc("^ table ^ head ^\n> quoted");
    let top = doc.top_level();
    assert_eq!(top.len(), 1);
    assert_eq!(paragraph_text(&doc, top[0]), "^ table ^ head ^ > quoted");
}

#[test]
fn test_crlf_input() {
    let doc = doc("== A ==\r\ntext\r\n");
    let top = doc.top_level();
    assert_eq!(header(&doc, top[0]), (2, "A"));
    assert_eq!(paragraph_text(&doc, top[1]), "text");
}

#[test]
fn test_empty_input() {
    let doc = doc("");
    assert!(doc.is_empty());
    assert_eq!(doc.title(), "test");
}

#[test]
fn test_parents_point_up() {
    let doc = doc("== H ==\ntext");
    for &id in doc.top_level() {
        assert_eq!(doc.parent(id), Some(doc.root()));
    }
    let para = doc.top_level()[1];
    for &child in doc.children(para) {
        assert_eq!(doc.parent(child), Some(para));
    }
}
