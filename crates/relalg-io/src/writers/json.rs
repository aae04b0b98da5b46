//! JSON sink: an array of objects, one per row, keys in schema column order.
//!
//! Relation-valued cells nest as arrays of objects. Non-finite floats become
//! `null`; binary cells become arrays of byte values.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use relalg_core::prelude::{Relation, Row, Schema, Value};

use crate::error::Result;

pub struct JsonWriter<W: Write> {
    writer: BufWriter<W>,
}

impl JsonWriter<File> {
    pub fn to_path(path: impl AsRef<Path>) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self::to_writer(f))
    }
}

impl<W: Write> JsonWriter<W> {
    pub fn to_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Write `rel` as `[\n{..},\n{..}\n]`, one object per line.
    pub fn write_relation(&mut self, rel: &dyn Relation) -> Result<usize> {
        let schema = rel.schema();
        writeln!(self.writer, "[")?;
        let mut n = 0usize;
        for row in rel.rows()? {
            let row = row?;
            if n > 0 {
                writeln!(self.writer, ",")?;
            }
            serde_json::to_writer(&mut self.writer, &JsonRow { schema, row: &row })?;
            n += 1;
        }
        if n > 0 {
            writeln!(self.writer)?;
        }
        writeln!(self.writer, "]")?;
        self.writer.flush()?;
        Ok(n)
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error().into())
    }
}

/// Render one row as a `serde_json::Value` object.
pub fn row_to_json(schema: &Schema, row: &Row) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(JsonRow { schema, row })?)
}

struct JsonRow<'a> {
    schema: &'a Schema,
    row: &'a Row,
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.schema.len()))?;
        for col in self.schema.iter() {
            let value = self.row.get(&col.name).map_err(S::Error::custom)?;
            map.serialize_entry(&col.name, &JsonValue(value))?;
        }
        map.end()
    }
}

struct JsonValue<'a>(&'a Value);

impl Serialize for JsonValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::I32(i) => serializer.serialize_i32(*i),
            Value::I64(i) => serializer.serialize_i64(*i),
            Value::F32(f) if f.is_finite() => serializer.serialize_f32(*f),
            Value::F64(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::F32(_) | Value::F64(_) => serializer.serialize_none(),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Bin(b) => serializer.collect_seq(b.iter()),
            Value::Rel(rel) => {
                let schema = rel.schema();
                let mut seq = serializer.serialize_seq(Some(rel.len()))?;
                for row in rel.iter() {
                    seq.serialize_element(&JsonRow { schema, row })?;
                }
                seq.end()
            }
        }
    }
}
