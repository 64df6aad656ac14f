//! Normalization Benchmarks
//!
//! Benchmarks for HTML-entity decoding, whitespace folding, and the
//! normalized comparisons every verification goes through.
//!
//! Run with: `cargo bench --bench normalize_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cotejar::{contains_normalized, eq_normalized, normalize};

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let inputs = vec![
        ("clean_ascii", "Send reset link"),
        ("nbsp_and_dashes", "Check\u{00A0}your inbox \u{2014} now"),
        ("entities", "Tom &amp; Jerry &ndash; &laquo;best&raquo;"),
        ("nested_entities", "&amp;amp;&amp;nbsp;"),
        ("cyrillic_fold", "Путёвка в ёлочный лес"),
        ("cjk", "我们已发送密码重置链接！"),
    ];

    for (name, input) in inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |bench, s| {
            bench.iter(|| normalize(black_box(s)));
        });
    }

    let long: String = "Überprüfe dein Postfach &ndash; folge\u{00A0}den Anweisungen. ".repeat(40);
    group.bench_function("long_mixed", |bench| {
        bench.iter(|| normalize(black_box(&long)));
    });

    group.finish();
}

fn bench_comparisons(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparisons");

    group.bench_function("eq_normalized", |bench| {
        bench.iter(|| {
            eq_normalized(
                black_box("Сбросить  пароль "),
                black_box("Сбросить пароль"),
            )
        });
    });

    group.bench_function("contains_normalized", |bench| {
        bench.iter(|| {
            contains_normalized(
                black_box("please SIGN UP now to get started"),
                black_box("Sign Up"),
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_comparisons);
criterion_main!(benches);
