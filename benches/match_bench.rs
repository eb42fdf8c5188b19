use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use cssmatch::{MatchConfig, match_stylesheets};

fn synthetic_sheet(salt: char, n: usize) -> String {
    let class = |i: usize| format!("{salt}{i:019}");
    let mut css = String::new();
    for i in 0..n {
        css.push_str(&format!(
            ".{}{{color:#{:06x};margin:{}px;display:flex;padding:{}px}}",
            class(i),
            (i * 131) % 0xffffff,
            i % 7,
            i % 3,
        ));
        if i % 4 == 0 {
            css.push_str(&format!(
                ".{} .{}{{gap:{}px}}",
                class(i),
                class((i + 1) % n),
                i % 5,
            ));
        }
    }
    css
}

fn bench_match(c: &mut Criterion) {
    let cfg = MatchConfig::default();
    let mut group = c.benchmark_group("match_stylesheets");

    for size in [8usize, 32, 64] {
        let a = synthetic_sheet('a', size);
        let b = synthetic_sheet('b', size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("classes_{size}"), |bench| {
            bench.iter(|| {
                match_stylesheets(black_box(&a), black_box(&b), black_box(&cfg)).expect("match")
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_match);
criterion_main!(benches);
