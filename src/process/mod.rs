// src/process/mod.rs
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::io::Cursor;
use tracing::debug;

use crate::schema::RAW_HEADERS;

pub mod filter;
pub mod merge;
pub mod reproject;
pub mod split;

/// A single table cell. Everything starts out as text; `Null` covers empty
/// fields and unmatched join columns; `Number` appears once coordinates
/// have been reprojected.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Null,
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Column names plus rows of cells, the shape every pipeline stage passes
/// along.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Positional index of the column named `name`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("table has no column named {}", name))
    }
}

/// Parse the decoded extract into a table carrying the establishment
/// headers. The opening label line is skipped and the leading section
/// marker column dropped. Records wider than the schema are fatal; shorter
/// records are right-padded with nulls, since the geolocation half of the
/// file only carries its meaningful prefix.
pub fn parse_extract(text: &str) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(text.as_bytes()));

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        if idx == 0 {
            // label line, not data
            continue;
        }
        if record.len() > RAW_HEADERS.len() {
            bail!(
                "record {} has {} fields, schema has {}",
                idx,
                record.len(),
                RAW_HEADERS.len()
            );
        }

        // skip(1) drops the section marker
        let mut row: Vec<Cell> = record
            .iter()
            .skip(1)
            .map(|field| {
                if field.is_empty() {
                    Cell::Null
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        row.resize(RAW_HEADERS.len() - 1, Cell::Null);
        rows.push(row);
    }

    debug!(rows = rows.len(), "parsed extract");
    Ok(Table {
        headers: RAW_HEADERS[1..].iter().map(|s| s.to_string()).collect(),
        rows,
    })
}
