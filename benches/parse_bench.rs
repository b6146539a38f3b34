use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xmlnav::{document, parse, path};

fn catalog(items: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<catalog>\n");
    for i in 0..items {
        xml.push_str(&format!(
            "  <book id=\"bk{i}\">\n    <title>Title {i} &amp; more</title>\n    <price>{i}.95</price>\n  </book>\n"
        ));
    }
    xml.push_str("</catalog>\n");
    xml
}

fn parse_small_document(c: &mut Criterion) {
    let source = "<ResultSet><Result><Hit index=\"1\"><Name>Item1</Name></Hit><Hit index=\"2\"><Name>Item2</Name></Hit></Result></ResultSet>";

    c.bench_function("parse_small_document", |b| {
        b.iter(|| parse(black_box(source)))
    });
}

fn parse_large_document(c: &mut Criterion) {
    let source = catalog(1_000);

    c.bench_function("parse_large_document", |b| {
        b.iter(|| parse(black_box(&source)))
    });
}

fn query_paths(c: &mut Criterion) {
    let xml = parse(&catalog(1_000));

    c.bench_function("query_paths", |b| {
        b.iter(|| {
            let books = xml.path(path!["catalog", "book"]);
            books.filter_map(|book| book.key("price").double()).len()
        })
    });
}

fn render_document(c: &mut Criterion) {
    let xml = parse(&catalog(1_000));

    c.bench_function("render_document", |b| {
        b.iter(|| document(black_box(&xml), true))
    });
}

criterion_group!(
    benches,
    parse_small_document,
    parse_large_document,
    query_paths,
    render_document
);
criterion_main!(benches);
