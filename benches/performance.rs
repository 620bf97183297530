use criterion::{criterion_group, criterion_main, Criterion};
use rowcross::{cartesian, filter, group, join, steps, ColumnBlock, Step};
use serde_json::{json, Value};

fn range(n: i64) -> Value {
    Value::Array((0..n).map(Value::from).collect())
}

fn make_dataset(rows: i64, keys: i64) -> Vec<Value> {
    (0..rows)
        .map(|i| json!({"key": i % keys, "payload": format!("row-{}", i)}))
        .collect()
}

fn bench_wide_product(c: &mut Criterion) {
    c.bench_function("product_32x32x32", |b| {
        b.iter(|| {
            let rows = cartesian(steps![
                json!({"a": range(32)}),
                json!({"b": range(32)}),
                ColumnBlock::new().col_fn("c", |s| range(s.get_i64("a").unwrap_or(0) % 32 + 1)),
            ])
            .unwrap();
            assert!(!rows.is_empty());
        })
    });
}

fn bench_join(c: &mut Criterion) {
    let right = make_dataset(256, 16);
    c.bench_function("join_256x256", |b| {
        b.iter(|| {
            let left: Vec<Step> = steps![Value::Array(make_dataset(256, 16))];
            let mut all = left;
            all.push(join(right.clone(), "key"));
            let _ = cartesian(all).unwrap();
        })
    });
}

fn bench_grouped(c: &mut Criterion) {
    c.bench_function("filter_then_group", |b| {
        b.iter(|| {
            let _ = cartesian(steps![
                json!({"a": range(64), "b": range(64)}),
                filter(|row| (row.get_i64("a").unwrap_or(0) + row.get_i64("b").unwrap_or(0)) % 7 == 0),
                group("g", steps![json!({"d": range(16)})]),
            ])
            .unwrap();
        })
    });
}

criterion_group!(generation, bench_wide_product, bench_join, bench_grouped);
criterion_main!(generation);
