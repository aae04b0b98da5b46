//! Aligned text table: `|`-separated, left-aligned columns as wide as their
//! widest cell, header first. Needs every row up front to size the columns.

use std::io::{BufWriter, Write};

use relalg_core::prelude::Relation;

use crate::error::Result;

pub struct PrettyWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> PrettyWriter<W> {
    pub fn to_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    pub fn write_relation(&mut self, rel: &dyn Relation) -> Result<usize> {
        let schema = rel.schema();
        let header: Vec<String> = schema.iter().map(|c| c.name.clone()).collect();
        let mut lines = Vec::new();
        for row in rel.rows()? {
            let row = row?;
            let cells = schema
                .iter()
                .map(|c| row.get(&c.name).map(|v| v.to_string()))
                .collect::<relalg_core::Result<Vec<_>>>()?;
            lines.push(cells);
        }

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for cells in &lines {
            for (w, cell) in widths.iter_mut().zip(cells) {
                *w = (*w).max(cell.chars().count());
            }
        }

        self.write_line(&header, &widths)?;
        for cells in &lines {
            self.write_line(cells, &widths)?;
        }
        self.writer.flush()?;
        Ok(lines.len())
    }

    fn write_line(&mut self, cells: &[String], widths: &[usize]) -> Result<()> {
        for (cell, width) in cells.iter().zip(widths) {
            write!(self.writer, "|{:<width$}", cell, width = *width)?;
        }
        writeln!(self.writer, "|")?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error().into())
    }
}
