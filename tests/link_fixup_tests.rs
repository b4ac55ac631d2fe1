use dokutree::inline::{find_url, fixup_links};
use dokutree::{parse, parse_with_options, Effects, Inline, Options};
use pretty_assertions::assert_eq;

fn inlines(input: &str) -> Vec<Inline> {
    let doc = parse(input.as_bytes(), "fixup").unwrap();
    doc.inlines(doc.top_level()[0]).cloned().collect()
}

#[test]
fn test_url_split_from_text() {
    assert_eq!(
        inlines("Visit https://example.com/docs today"),
        vec![
            Inline::text("Visit "),
            Inline::url("https://example.com/docs"),
            Inline::text(" today"),
        ]
    );
}

#[test]
fn test_several_urls_in_one_run() {
    assert_eq!(
        inlines("http://a.example and ftp://b.example"),
        vec![
            Inline::url("http://a.example"),
            Inline::text(" and "),
            Inline::url("ftp://b.example"),
        ]
    );
}

#[test]
fn test_url_keeps_surrounding_effects() {
    assert_eq!(
        inlines("**see http://x.org now**"),
        vec![
            Inline::styled(Effects::BOLD, "see "),
            Inline::url("http://x.org"),
            Inline::styled(Effects::BOLD, " now"),
        ]
    );
}

#[test]
fn test_sentence_punctuation_excluded() {
    assert_eq!(
        inlines("Done at http://x.org/page."),
        vec![Inline::text("Done at "), Inline::url("http://x.org/page"), Inline::text(".")]
    );
}

#[test]
fn test_parenthesized_url() {
    assert_eq!(
        inlines("(see http://x.org/a_(b))"),
        vec![
            Inline::text("(see "),
            Inline::url("http://x.org/a_(b)"),
            Inline::text(")"),
        ]
    );
}

#[test]
fn test_url_inside_link_untouched() {
    assert_eq!(
        inlines("[[http://x.org|label]]"),
        vec![Inline::Link {
            target: "http://x.org".into(),
            text: "label".into(),
            internal: false,
        }]
    );
}

#[test]
fn test_url_inside_literal_untouched() {
    let nodes = inlines("<nowiki>http://x.org</nowiki>");
    assert_eq!(nodes.len(), 1);
    assert!(matches!(nodes[0], Inline::Literal { .. }));
}

#[test]
fn test_scheme_needs_word_boundary() {
    assert_eq!(find_url(b"nothttp://x.org"), None);
    assert_eq!(find_url(b"mailto:someone@x.org"), None);
    assert_eq!(find_url(b"(http://x.org)"), Some((1, 13)));
}

#[test]
fn test_fixup_is_idempotent() {
    let mut nodes = inlines("a http://one.org b https://two.org c");
    let before = nodes.clone();
    assert_eq!(fixup_links(&mut nodes), 0);
    assert_eq!(nodes, before);
}

#[test]
fn test_fixup_can_be_disabled() {
    let options = Options {
        fixup_links: false,
        ..Options::default()
    };
    let doc = parse_with_options(b"go to http://x.org", "t", &options).unwrap();
    let nodes: Vec<_> = doc.inlines(doc.top_level()[0]).cloned().collect();
    assert_eq!(nodes, vec![Inline::text("go to http://x.org")]);
}
