use bodyfmt::{Document, json::try_prettify_json, prettify_xml};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const SRC: &str = include_str!("../tests/good.xml");
const JSON: &str = concat!(
    r#"{"order":{"id":17,"items":[{"sku":"A-1","name":"Widget"},{"sku":"B-2"}],"#,
    r#""note":"Ships & bills separately","price":1250}}"#,
);

fn parse_xml(src: &str) {
    let _ = Document::parse(src).unwrap();
}

fn format_xml(src: &str) {
    let _ = prettify_xml(src);
}

fn format_json(src: &str) {
    let _ = try_prettify_json(src).unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("parse_xml", |b| b.iter(|| parse_xml(black_box(SRC))));

    c.bench_function("prettify_xml", |b| b.iter(|| format_xml(black_box(SRC))));

    c.bench_function("prettify_json", |b| b.iter(|| format_json(black_box(JSON))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
