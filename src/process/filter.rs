// src/process/filter.rs
use anyhow::Result;
use tracing::info;

use crate::process::{Cell, Table};
use crate::schema::{CATEGORY_COLUMN, PHARMACY_CATEGORY};

/// Keep only rows whose establishment category parses to the pharmacy
/// code. The comparison is numeric, so a zero-padded code still matches;
/// rows with a missing or non-numeric category are dropped.
pub fn filter_pharmacies(table: &Table) -> Result<Table> {
    let cat_idx = table.column_index(CATEGORY_COLUMN)?;
    let rows: Vec<Vec<Cell>> = table
        .rows
        .iter()
        .filter(|row| {
            row[cat_idx]
                .as_text()
                .and_then(|s| s.trim().parse::<i64>().ok())
                == Some(PHARMACY_CATEGORY)
        })
        .cloned()
        .collect();

    info!(
        kept = rows.len(),
        scanned = table.rows.len(),
        "filtered to pharmacies"
    );
    Ok(Table {
        headers: table.headers.clone(),
        rows,
    })
}

/// Restrict `table` to `columns`, in that order. A name the table does not
/// carry is fatal.
pub fn project_columns(table: &Table, columns: &[&str]) -> Result<Table> {
    let indices = columns
        .iter()
        .map(|name| table.column_index(name))
        .collect::<Result<Vec<_>>>()?;

    let rows = table
        .rows
        .iter()
        .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
        .collect();

    Ok(Table {
        headers: columns.iter().map(|s| s.to_string()).collect(),
        rows,
    })
}
