// src/output.rs
use anyhow::{Context, Result};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::process::{Cell, Table};

/// Fixed output artifact, replaced wholesale on every run.
pub static OUTPUT_PATH: &str = "finess_base.json";

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Number(v) => serializer.serialize_f64(*v),
            Cell::Null => serializer.serialize_none(),
        }
    }
}

/// Column-major view of a table: one JSON key per column, in table column
/// order, each holding that column's values in row order.
pub struct ColumnMajor<'a>(pub &'a Table);

struct Column<'a> {
    table: &'a Table,
    index: usize,
}

impl Serialize for Column<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.table.rows.len()))?;
        for row in &self.table.rows {
            seq.serialize_element(&row[self.index])?;
        }
        seq.end()
    }
}

impl Serialize for ColumnMajor<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.headers.len()))?;
        for (index, name) in self.0.headers.iter().enumerate() {
            map.serialize_entry(
                name,
                &Column {
                    table: self.0,
                    index,
                },
            )?;
        }
        map.end()
    }
}

/// Transpose `table` and write it as JSON at `path`, truncating whatever
/// was there. serde_json always emits UTF-8.
pub fn write_column_major(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &ColumnMajor(table))
        .with_context(|| format!("writing {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    info!(
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.headers.len(),
        "wrote column-major JSON"
    );
    Ok(())
}
