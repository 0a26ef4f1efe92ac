//! Benchmarks for slide rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use deck::document::Document;
use deck::render::{Theme, render_slide};

fn bench_render_slides(c: &mut Criterion) {
    let doc = Document::parse(include_str!("../src/tutorial.md"));

    c.bench_function("render_tutorial", |b| {
        b.iter(|| {
            for slide in doc.slides() {
                let _ = render_slide(black_box(slide), usize::MAX, black_box(76), Theme::Dark);
            }
        })
    });
}

criterion_group!(benches, bench_render_slides);
criterion_main!(benches);
