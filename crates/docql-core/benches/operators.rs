use criterion::{criterion_group, criterion_main, Criterion};
use docql_core::{
    filter, group_aggregate, group_by, join, parse, Aggregate, Collection, CompareOp, Value,
};
use std::hint::black_box;

/// A `{"businesses": [...]}` dataset with `n` records.
fn dataset(n: usize) -> String {
    let records: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"id": {i}, "name": "Place {i}", "rating": {}.{}, "price": "{}", "review_count": {}, "location": {{"city": "City {}", "zip": "0{}"}}}}"#,
                i % 5,
                i % 10,
                "$".repeat(i % 4 + 1),
                i * 7 % 500,
                i % 13,
                2100 + i % 50
            )
        })
        .collect();
    format!(r#"{{"total": {n}, "businesses": [{}]}}"#, records.join(",\n"))
}

fn collection(n: usize) -> Collection {
    parse(&dataset(n))
        .unwrap()
        .into_collection(Some("businesses"))
        .unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let text = dataset(1_000);
    c.bench_function("parse_1000_records", |b| b.iter(|| parse(black_box(&text))));

    let members: Vec<String> = (0..10_000).map(|i| format!(r#""k{i}": {i}"#)).collect();
    let wide = format!("{{{}}}", members.join(","));
    c.bench_function("parse_wide_object_10000", |b| b.iter(|| parse(black_box(&wide))));
}

fn bench_operators(c: &mut Criterion) {
    let data = collection(1_000);
    let bound = Value::from(3.0);

    c.bench_function("filter_1000", |b| {
        b.iter(|| filter(black_box(&data), "rating", CompareOp::Ge, &bound))
    });
    c.bench_function("group_avg_1000", |b| {
        b.iter(|| group_aggregate(black_box(&data), "price", Aggregate::Avg, "rating"))
    });

    c.bench_function("group_by_unique_1000", |b| {
        b.iter(|| group_by(black_box(&data), "id"))
    });

    let small = collection(200);
    c.bench_function("join_200x200", |b| {
        b.iter(|| join(black_box(&small), "id", black_box(&small), "id"))
    });
}

criterion_group!(benches, bench_parse, bench_operators);
criterion_main!(benches);
