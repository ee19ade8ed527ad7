//! Benchmarks for link classification.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use markflow::links::classify;

fn classify_benchmark(c: &mut Criterion) {
    let urls = [
        "https://github.com/rust-lang/rust",
        "https://x.com/i/article/2012310917812502528",
        "https://x.com/user/status/123/photo/1",
        "https://x.com/alice/status/555",
        "https://youtu.be/abc",
        "https://cdn.example.com/pic.webp",
        "https://blog.example.com/post/1",
    ];

    c.bench_function("classify", |b| {
        b.iter(|| {
            for url in &urls {
                black_box(classify(black_box(url)));
            }
        })
    });
}

criterion_group!(benches, classify_benchmark);
criterion_main!(benches);
