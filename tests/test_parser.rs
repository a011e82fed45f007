use rstest::rstest;
use xtree::{parse, parse_str, Error, Node, ParseError, Parser};

#[test]
fn test_parse_nested() {
    let root = parse(b"<level1><level2><text>text</text></level2></level1>").unwrap();

    let mut text = Node::new("text");
    text.add_text("text");
    let mut level2 = Node::new("level2");
    level2.add_child(text);
    let mut expected = Node::new("level1");
    expected.add_child(level2);

    assert_eq!(root, expected);
    assert_eq!(root.children().len(), 1);
    let level2 = root.children_named("level2");
    assert_eq!(level2.len(), 1);
    let text = level2[0].children_named("text");
    assert_eq!(text.len(), 1);
    assert_eq!(text[0].texts(), ["text"]);
}

#[test]
fn test_parse_comment() {
    let root = parse_str("<a><!--note--></a>").unwrap();
    assert_eq!(root.comments(), ["note"]);
    assert!(root.texts().is_empty());
}

#[test]
fn test_parse_comment_not_trimmed() {
    let root = parse_str("<a><!-- note --><!-- note --></a>").unwrap();
    assert_eq!(root.comments(), [" note ", " note "]);
}

#[test]
fn test_parse_self_closing_is_empty() {
    let root = parse_str("<doc><empty/></doc>").unwrap();
    let empty = root.child("empty").unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty, &Node::new("empty"));
}

#[test]
fn test_parse_name_keeps_case() {
    let root = parse_str("<Doc><SubItem/></Doc>").unwrap();
    assert_eq!(root.name(), "Doc");
    assert!(root.children().contains_key("subitem"));
    assert_eq!(root.child("SUBITEM").unwrap().name(), "SubItem");
}

#[test]
fn test_parse_attributes_lowercased() {
    let root = parse_str(r#"<doc ID="1" Class="x"/>"#).unwrap();
    assert_eq!(root.attributes().get("id").map(String::as_str), Some("1"));
    assert_eq!(root.attributes().get("class").map(String::as_str), Some("x"));
    assert!(root.attributes().get("ID").is_none());
}

#[test]
fn test_parse_duplicate_attribute_first_wins() {
    let root = parse_str(r#"<doc A="1" a="2"/>"#).unwrap();
    assert_eq!(root.attributes().len(), 1);
    assert_eq!(root.attribute("a"), Some("1"));
}

#[test]
fn test_parse_children_grouped() {
    let root = parse_str("<doc><b>1</b><a/><B>2</B><b>3</b></doc>").unwrap();
    assert_eq!(root.children().len(), 2);
    let texts: Vec<_> = root
        .children_named("b")
        .iter()
        .filter_map(|n| n.text())
        .collect();
    assert_eq!(texts, ["1", "2", "3"]);
    assert_eq!(root.children_named("a").len(), 1);
}

#[test]
fn test_parse_sibling_order_across_names_is_lost() {
    let a = parse_str("<doc><b/><a/><b/></doc>").unwrap();
    let b = parse_str("<doc><a/><b/><b/></doc>").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_parse_text_fragments_around_elements() {
    let root = parse_str("<p>\n  Hello <em>world</em> again  \n</p>").unwrap();
    assert_eq!(root.texts(), ["Hello", "again"]);
    assert_eq!(root.child("em").unwrap().texts(), ["world"]);
}

#[test]
fn test_parse_whitespace_only_text_dropped() {
    let root = parse_str("<doc>\n  <a/>\n  <a/>\n</doc>").unwrap();
    assert!(root.texts().is_empty());
}

#[test]
fn test_parse_cdata_is_text() {
    let root = parse_str("<doc><![CDATA[  <b>bold</b>  ]]></doc>").unwrap();
    assert_eq!(root.texts(), ["<b>bold</b>"]);
    assert!(root.children().is_empty());
}

#[test]
fn test_parse_entities() {
    let root = parse_str(r#"<doc title="a &amp; b">&lt;tag&gt; &#169;</doc>"#).unwrap();
    assert_eq!(root.attribute("title"), Some("a & b"));
    assert_eq!(root.texts(), ["<tag> \u{a9}"]);
}

#[test]
fn test_parse_prefixed_names_unresolved() {
    let root = parse_str(r#"<x:Doc xmlns:x="urn:x" x:Lang="en"><x:item/></x:Doc>"#).unwrap();
    assert_eq!(root.name(), "x:Doc");
    assert_eq!(root.attribute("xmlns:x"), Some("urn:x"));
    assert_eq!(root.attribute("x:lang"), Some("en"));
    assert_eq!(root.children_named("x:item").len(), 1);
}

#[test]
fn test_parse_ignores_content_outside_root() {
    let root = parse_str("<?xml version=\"1.0\"?>\n<!-- before --><doc/><!-- after -->").unwrap();
    assert!(root.comments().is_empty());
    assert!(root.is_empty());
}

#[test]
fn test_parse_twice_is_equal() {
    let xml = r#"<doc a="1"><b>x</b><!--c--><b><c/></b>tail</doc>"#;
    let a = parse_str(xml).unwrap();
    let b = parse_str(xml).unwrap();
    assert_eq!(a, b);
}

fn nested(depth: usize) -> String {
    format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth))
}

#[test]
fn test_parse_deeply_nested() {
    let root = parse_str(&nested(100_000)).unwrap();
    assert_eq!(root.descendants().count(), 100_000);
}

#[test]
fn test_parse_deeply_nested_spawned() {
    let root = Parser::new(nested(100_000).into_bytes())
        .spawn()
        .join()
        .unwrap()
        .unwrap();
    assert_eq!(root.descendants().count(), 100_000);
}

#[test]
fn test_parse_encoding_hint() {
    let root = Parser::new(b"<a>caf\xe9</a>")
        .encoding_hint("iso-8859-1")
        .parse()
        .unwrap();
    assert_eq!(root.texts(), ["caf\u{e9}"]);
}

#[test]
fn test_parse_without_encoding_hint() {
    let err = Parser::new(b"<a>caf\xe9</a>").parse().unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::MalformedEncoding { .. })
    ));
}

#[rstest]
fn test_parse_text(
    #[values(
        ("<a>hi</a>", vec!["hi"]),
        ("<a>  hi  </a>", vec!["hi"]),
        ("<a>   </a>", vec![]),
        ("<a></a>", vec![]),
        ("<a>x<b/>y</a>", vec!["x", "y"]),
        ("<a>x<!--c-->y</a>", vec!["x", "y"]),
        ("<a>multi word text</a>", vec!["multi word text"]),
        ("<a>\u{e9}t\u{e9}</a>", vec!["\u{e9}t\u{e9}"])
    )]
    value: (&str, Vec<&str>),
) {
    let (xml, texts) = value;
    let root = parse_str(xml).unwrap();
    assert_eq!(root.texts(), texts.as_slice());
}
