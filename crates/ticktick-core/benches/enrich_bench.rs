use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ticktick_core::{enrich, lttb, PriceSeries};

fn gen_series(n: usize) -> PriceSeries {
    let closes: Vec<f64> = (0..n)
        .map(|i| 100.0 + (i as f64 * 0.01).sin() * 10.0 + (i as f64 * 0.0001))
        .collect();
    PriceSeries::from_closes(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(), &closes)
}

fn bench_enrich(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrich");
    for &n in &[2_500usize, 10_000usize] {
        let series = gen_series(n);
        for &window in &[20usize, 100usize, 200usize] {
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_w{window}")), &window, |b, &w| {
                b.iter(|| black_box(enrich(&series, w).unwrap()));
            });
        }
    }
    group.finish();
}

fn bench_lttb(c: &mut Criterion) {
    let mut group = c.benchmark_group("lttb");
    let data: Vec<(f64, f64)> = gen_series(10_000)
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.close))
        .collect();
    for &target in &[500usize, 1_500usize] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("t{target}")), &target, |b, &t| {
            b.iter_batched(
                || data.clone(),
                |d| { let _ = black_box(lttb(&d, t)); },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_enrich, bench_lttb);
criterion_main!(benches);
