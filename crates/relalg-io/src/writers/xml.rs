//! XML sink: `<relation name="..">` holding one empty `<row/>` element per
//! row, with a `column="value"` attribute per column.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use relalg_core::prelude::Relation;

use crate::error::Result;

pub struct XmlWriter<W: Write> {
    writer: BufWriter<W>,
}

impl XmlWriter<File> {
    pub fn to_path(path: impl AsRef<Path>) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self::to_writer(f))
    }
}

impl<W: Write> XmlWriter<W> {
    pub fn to_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    pub fn write_relation(&mut self, rel: &dyn Relation) -> Result<usize> {
        let schema = rel.schema();
        writeln!(self.writer, "<relation name=\"{}\">", escape(schema.name()))?;
        let mut n = 0usize;
        for row in rel.rows()? {
            let row = row?;
            write!(self.writer, "  <row")?;
            for col in schema.iter() {
                let value = row.get(&col.name)?.to_string();
                write!(self.writer, " {}=\"{}\"", col.name, escape(&value))?;
            }
            writeln!(self.writer, "/>")?;
            n += 1;
        }
        writeln!(self.writer, "</relation>")?;
        self.writer.flush()?;
        Ok(n)
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error().into())
    }
}

/// Escape text for use inside a double-quoted attribute.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::csv::CsvReader;

    #[test]
    fn rows_become_attributes() {
        let rel = CsvReader::new("people")
            .from_reader("id,name\n1,\"Tom & \"\"Jerry\"\"\"\n".as_bytes())
            .unwrap();
        let mut w = XmlWriter::to_writer(Vec::new());
        w.write_relation(&*rel).unwrap();
        let out = String::from_utf8(w.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "<relation name=\"people\">\n  <row id=\"1\" name=\"Tom &amp; &quot;Jerry&quot;\"/>\n</relation>\n"
        );
    }
}
