use criterion::{criterion_group, criterion_main, Criterion};
use relalg_core::prelude::*;
use relalg_operators::Algebra;

fn make_relation(name: &str, rows: usize, extra: &str) -> RelationRef {
    let schema = Schema::shared(
        name,
        vec![
            Column::new("key", DataType::Int64),
            Column::new(extra, DataType::Utf8),
        ],
    )
    .unwrap();
    let rows = (0..rows)
        .map(|i| {
            Row::new(
                schema.clone(),
                vec![Value::I64((i % 512) as i64), Value::from(format!("{}-{}", extra, i % 97))],
            )
            .unwrap()
        })
        .collect();
    MaterializedRelation::from_rows(schema, rows, Mode::Set)
        .unwrap()
        .into_ref()
}

fn bench_distinct(c: &mut Criterion) {
    let rel = make_relation("left", 8192, "a");
    c.bench_function("distinct_8k", |b| {
        b.iter(|| {
            let _ = rel.distinct().cardinality().unwrap();
        })
    });
    c.bench_function("project_dedup_8k", |b| {
        b.iter(|| {
            let _ = rel.project(&["key"]).unwrap().cardinality().unwrap();
        })
    });
}

fn bench_join(c: &mut Criterion) {
    let left = make_relation("left", 4096, "a");
    let right = make_relation("right", 1024, "b");
    c.bench_function("natural_join_4k_x_1k", |b| {
        b.iter(|| {
            let _ = left.join(&right).unwrap().cardinality().unwrap();
        })
    });
    c.bench_function("semi_join_4k_x_1k", |b| {
        b.iter(|| {
            let _ = left.semi_join(&right).unwrap().cardinality().unwrap();
        })
    });
}

criterion_group!(relations, bench_distinct, bench_join);
criterion_main!(relations);
