//! CSV source.
//!
//! The first line is the header; every column is typed `Utf8`. Short lines are
//! padded with empty strings, long lines fail with `MalformedInput`. Quoted
//! fields follow RFC 4180 via the `csv` crate.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use relalg_core::prelude::*;

use crate::error::{csv_to_core, Result};

#[derive(Debug, Clone)]
pub struct CsvReader {
    name: String,
    delimiter: u8,
}

impl CsvReader {
    /// A reader producing relations called `name`, comma-delimited.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delimiter: b',',
        }
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<RelationRef> {
        let f = File::open(path)?;
        self.from_reader(f)
    }

    /// Parse the header now; data lines are parsed as the relation is enumerated.
    pub fn from_reader<R: Read + Send + 'static>(&self, reader: R) -> Result<RelationRef> {
        let mut csv = ::csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut header = ::csv::StringRecord::new();
        if !csv.read_record(&mut header)? {
            return Err(Error::MalformedInput("header line is missing".into()).into());
        }
        let columns = parse_columns(&header)?;
        let schema: SchemaRef = Arc::new(Schema::new(self.name.as_str(), columns)?);

        #[cfg(feature = "tracing")]
        tracing::trace!(relation = %schema, columns = schema.len(), "opened csv source");

        let out = schema.clone();
        let rows = csv
            .into_records()
            .map(move |rec| parse_line(&out, rec.map_err(csv_to_core)?));
        Ok(Arc::new(SinglePassRelation::new(schema, Box::new(rows))))
    }
}

fn parse_columns(header: &::csv::StringRecord) -> relalg_core::Result<Vec<Column>> {
    let line = header.iter().collect::<Vec<_>>().join(",");
    header
        .iter()
        .map(|h| {
            if h.trim().is_empty() {
                Err(Error::MalformedInput(format!(
                    "column name is missing from header line: {}",
                    line
                )))
            } else {
                Ok(Column::new(h, DataType::Utf8))
            }
        })
        .collect()
}

fn parse_line(schema: &SchemaRef, record: ::csv::StringRecord) -> relalg_core::Result<Row> {
    if record.len() > schema.len() {
        let line = record
            .position()
            .map(|p| p.line().to_string())
            .unwrap_or_else(|| "?".into());
        return Err(Error::MalformedInput(format!(
            "line {} has {} fields but the header has {}",
            line,
            record.len(),
            schema.len()
        )));
    }
    let mut values: Vec<Value> = record.iter().map(Value::from).collect();
    values.resize(schema.len(), Value::from(""));
    Row::new(schema.clone(), values)
}
