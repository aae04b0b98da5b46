//! CSV sink: header line, then one line per row in schema column order.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use relalg_core::prelude::{Relation, Row, Schema};

use crate::error::Result;

pub struct CsvWriter<W: Write> {
    writer: ::csv::Writer<W>,
}

impl CsvWriter<File> {
    pub fn to_path(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self::to_writer(f, delimiter))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn to_writer(writer: W, delimiter: u8) -> Self {
        Self {
            writer: ::csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(writer),
        }
    }

    /// Write `rel`'s header and rows. Returns the number of rows written.
    pub fn write_relation(&mut self, rel: &dyn Relation) -> Result<usize> {
        let schema = rel.schema();
        self.writer.write_record(schema.iter().map(|c| c.name.as_str()))?;
        let mut n = 0usize;
        for row in rel.rows()? {
            self.write_row(schema, &row?)?;
            n += 1;
        }
        self.writer.flush()?;
        #[cfg(feature = "tracing")]
        tracing::trace!(relation = %schema, rows = n, "wrote csv");
        Ok(n)
    }

    fn write_row(&mut self, schema: &Schema, row: &Row) -> Result<()> {
        let cells = schema
            .iter()
            .map(|c| row.get(&c.name).map(|v| v.to_string()))
            .collect::<relalg_core::Result<Vec<_>>>()?;
        self.writer.write_record(&cells)?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::csv::CsvReader;

    #[test]
    fn quotes_fields_that_need_it() {
        let rel = CsvReader::new("t")
            .from_reader("a,b\n\"x,y\",\"q\"\"uote\"\n".as_bytes())
            .unwrap();
        let mut w = CsvWriter::to_writer(Vec::new(), b',');
        assert_eq!(w.write_relation(&*rel).unwrap(), 1);
        let out = String::from_utf8(w.into_inner().unwrap()).unwrap();
        assert_eq!(out, "a,b\n\"x,y\",\"q\"\"uote\"\n");
    }
}
