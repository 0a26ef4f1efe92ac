//! Benchmarks for deck parsing.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use deck::diff::find_first_modified;
use deck::document::Document;

const TUTORIAL: &str = include_str!("../src/tutorial.md");

fn bench_parse_simple(c: &mut Criterion) {
    let md = "# Hello\n\nWorld\n---\n# Two\n<!-- pause -->\nmore";
    c.bench_function("parse_simple", |b| b.iter(|| Document::parse(black_box(md))));
}

fn bench_parse_tutorial(c: &mut Criterion) {
    c.bench_function("parse_tutorial", |b| {
        b.iter(|| Document::parse(black_box(TUTORIAL)))
    });
}

fn bench_reload_diff(c: &mut Criterion) {
    let old = Document::parse(TUTORIAL);
    let new = Document::parse(&TUTORIAL.replace("That's it", "That is all"));
    c.bench_function("reload_diff", |b| {
        b.iter(|| find_first_modified(Some(black_box(&old)), black_box(&new)))
    });
}

criterion_group!(benches, bench_parse_simple, bench_parse_tutorial, bench_reload_diff);
criterion_main!(benches);
