//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use relalg_core::prelude::*;
use relalg_io::CsvReader;

pub fn schema(name: &str, columns: &[(&str, DataType)]) -> SchemaRef {
    Schema::shared(
        name,
        columns
            .iter()
            .map(|(n, t)| Column::new(*n, t.clone()))
            .collect(),
    )
    .expect("valid schema")
}

pub fn relation(schema: SchemaRef, rows: Vec<Vec<Value>>, mode: Mode) -> RelationRef {
    let rows = rows
        .into_iter()
        .map(|values| Row::new(schema.clone(), values).expect("row matches schema"))
        .collect();
    MaterializedRelation::from_rows(schema, rows, mode)
        .expect("rows carry the schema")
        .into_ref()
}

/// `{id: Int64, name: Utf8}` rows.
pub fn people(rows: &[(i64, &str)]) -> RelationRef {
    people_with_mode(rows, Mode::Set)
}

pub fn people_with_mode(rows: &[(i64, &str)], mode: Mode) -> RelationRef {
    let s = schema("people", &[("id", DataType::Int64), ("name", DataType::Utf8)]);
    relation(
        s,
        rows.iter()
            .map(|(id, name)| vec![Value::I64(*id), Value::from(*name)])
            .collect(),
        mode,
    )
}

/// `{id: Int64, item: Utf8}` rows.
pub fn orders(rows: &[(i64, &str)]) -> RelationRef {
    let s = schema("orders", &[("id", DataType::Int64), ("item", DataType::Utf8)]);
    relation(
        s,
        rows.iter()
            .map(|(id, item)| vec![Value::I64(*id), Value::from(*item)])
            .collect(),
        Mode::Set,
    )
}

/// `n` people with ids `0..n`, names cycling through a small set.
pub fn generate_people(n: usize) -> RelationRef {
    let s = schema("people", &[("id", DataType::Int64), ("name", DataType::Utf8)]);
    relation(
        s,
        (0..n)
            .map(|i| vec![Value::I64(i as i64), Value::from(format!("person-{}", i % 7))])
            .collect(),
        Mode::Set,
    )
}

/// Parse CSV text and materialize it so tests can enumerate it repeatedly.
pub fn csv(name: &str, text: &'static str) -> RelationRef {
    let rel = CsvReader::new(name)
        .from_reader(text.as_bytes())
        .expect("csv header parses");
    Arc::new(MaterializedRelation::new(&*rel).expect("csv rows parse"))
}

pub fn ids(rel: &RelationRef) -> Vec<i64> {
    let mut ids: Vec<i64> = rel
        .to_vec()
        .expect("enumerates")
        .iter()
        .map(|r| r.get_i64("id").expect("id column"))
        .collect();
    ids.sort_unstable();
    ids
}

pub fn create_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("relalg-tests-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}
