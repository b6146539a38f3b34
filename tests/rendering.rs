use xmlnav::{
    build, document, parse, parse_bytes, path, Accessor, Converter, Element, ParseEvent,
    ParseOptions, XmlError,
};

fn render(accessor: &Accessor) -> String {
    document(accessor, false).expect("render")
}

/// Compare names, attributes, text and child order of two subtrees
fn assert_same_tree(left: &Element, right: &Element) {
    assert_eq!(left.name(), right.name());
    assert_eq!(left.attributes(), right.attributes());
    assert_eq!(left.text(), right.text());
    let (lc, rc) = (left.children(), right.children());
    assert_eq!(lc.len(), rc.len(), "child count of {}", left.name());
    for (l, r) in lc.iter().zip(rc.iter()) {
        assert_same_tree(l, r);
    }
}

#[test]
fn test_render_with_declaration() {
    let xml = parse("<n k=\"v\">t</n>");
    assert_eq!(
        document(&xml, true).unwrap(),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><n k=\"v\">t</n>"
    );
}

#[test]
fn test_render_sub_path() {
    let xml = parse("<?xml version=\"1.0\" encoding=\"UTF-8\"?><doc><name key=\"value\">text</name></doc>");
    let converter_output = Converter::new(&xml.key("doc")).make_document(true).unwrap();
    assert_eq!(
        converter_output,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><doc><name key=\"value\">text</name></doc>"
    );
    assert_eq!(
        render(&xml.path(path!["doc", "name"])),
        "<name key=\"value\">text</name>"
    );
}

#[test]
fn test_render_many() {
    let xml = parse("<Root><A>1</A><B/><A>2</A></Root>");
    assert_eq!(render(&xml.path(path!["Root", "A"])), "<A>1</A><A>2</A>");
}

#[test]
fn test_render_error_fails() {
    let xml = parse("<Root/>");
    let missing = xml.key("Missing");
    assert_eq!(
        document(&missing, true),
        Err(XmlError::access("Missing not found."))
    );

    let broken = parse("<Root>");
    assert!(matches!(document(&broken, false), Err(XmlError::Parse(_))));
}

#[test]
fn test_round_trip_of_built_element() {
    let original = Element::new("library")
        .with_attribute("city", "Tokyo")
        .with_child(
            Element::new("book")
                .with_attribute("id", "1")
                .with_attribute("lang", "en")
                .with_child(Element::new("title").with_text("Rust"))
                .with_child(Element::new("year").with_text("2015")),
        )
        .with_child(Element::new("book").with_attribute("id", "2"))
        .with_child(Element::new("note").with_text("end"));

    let rendered = render(&Accessor::Single(original.clone()));
    let reparsed = parse(&rendered);
    let library = reparsed.key("library").element().expect("library");
    assert_same_tree(&original, &library);
}

#[test]
fn test_escaping_round_trip() {
    let text = "1 < 2 && 3 > 2 &lt;kept&gt;";
    let element = Element::new("expr").with_text(text);
    let rendered = render(&Accessor::Single(element));
    assert_eq!(
        rendered,
        "<expr>1 &lt; 2 &amp;&amp; 3 &gt; 2 &amp;lt;kept&amp;gt;</expr>"
    );
    assert_eq!(parse(&rendered).key("expr").text().as_deref(), Some(text));
}

#[test]
fn test_whole_document_round_trip() {
    let source = "<catalog><book id=\"bk1\"><title>A &amp; B</title></book><book id=\"bk2\"></book></catalog>";
    let xml = parse(source);
    assert_eq!(render(&xml), source);
}

#[test]
fn test_build_from_custom_events() {
    let xml = build(
        vec![
            ParseEvent::start("doc", [("v", "1")]),
            ParseEvent::open("item"),
            ParseEvent::text("x"),
            ParseEvent::end("item"),
            ParseEvent::end("doc"),
        ],
        &ParseOptions::default(),
    );
    assert_eq!(render(&xml), "<doc v=\"1\"><item>x</item></doc>");

    let failed = build(
        vec![ParseEvent::open("doc"), ParseEvent::error("stream reset")],
        &ParseOptions::default(),
    );
    match failed.error() {
        Some(XmlError::Parse(e)) => assert_eq!(e.message, "stream reset"),
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_parse_bytes_with_bom() {
    let mut utf8 = vec![0xEF, 0xBB, 0xBF];
    utf8.extend_from_slice(b"<a>1</a>");
    assert_eq!(parse_bytes(&utf8, &ParseOptions::default()).key("a").int(), Some(1));

    let mut utf16be = vec![0xFE, 0xFF];
    for unit in "<a>2</a>".encode_utf16() {
        utf16be.extend_from_slice(&unit.to_be_bytes());
    }
    assert_eq!(parse_bytes(&utf16be, &ParseOptions::default()).key("a").int(), Some(2));

    let odd = [0xFF, 0xFE, b'<'];
    assert!(matches!(
        parse_bytes(&odd, &ParseOptions::default()).error(),
        Some(XmlError::Encoding(_))
    ));
}

#[test]
fn test_deeply_nested_document() {
    let depth = 100_000;
    let source = "<a>".repeat(depth) + "x" + &"</a>".repeat(depth);
    let xml = parse(&source);
    assert!(!xml.is_error());
    assert_eq!(render(&xml), source);
    drop(xml);
}
