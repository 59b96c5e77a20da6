// src/process/split.rs
use anyhow::{bail, Result};
use tracing::info;

use crate::process::{Cell, Table};
use crate::schema::{GEOLOC_HEADERS, ID_COLUMN};

/// Cut the stacked extract into its two halves: establishment rows on top,
/// geolocation rows below, written into the same column slots. The
/// geolocation half keeps only its first five columns, relabeled to what
/// they really hold.
///
/// The pairing is purely positional in the source file, so both structural
/// assumptions are checked here: the row count must be even, and the
/// identifier columns of the two halves must agree offset-for-offset.
pub fn split_halves(table: Table) -> Result<(Table, Table)> {
    let id_idx = table.column_index(ID_COLUMN)?;
    let total = table.rows.len();
    if total % 2 != 0 {
        bail!(
            "expected an even row count (two stacked halves), got {}",
            total
        );
    }

    let Table { headers, mut rows } = table;
    let geoloc_rows: Vec<Vec<Cell>> = rows
        .split_off(total / 2)
        .into_iter()
        .map(|mut row| {
            row.truncate(GEOLOC_HEADERS.len());
            row
        })
        .collect();

    let info = Table { headers, rows };
    let geoloc = Table {
        headers: GEOLOC_HEADERS.iter().map(|s| s.to_string()).collect(),
        rows: geoloc_rows,
    };
    let geo_id_idx = geoloc.column_index(ID_COLUMN)?;

    for (offset, (info_row, geo_row)) in info.rows.iter().zip(&geoloc.rows).enumerate() {
        match (info_row[id_idx].as_text(), geo_row[geo_id_idx].as_text()) {
            (Some(a), Some(b)) if a.trim() == b.trim() => {}
            (a, b) => bail!(
                "halves are misaligned at offset {}: establishment identifier {:?}, geolocation identifier {:?}",
                offset,
                a,
                b
            ),
        }
    }

    info!(
        establishments = info.rows.len(),
        geolocations = geoloc.rows.len(),
        "split stacked halves"
    );
    Ok((info, geoloc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::parse_extract;

    fn stacked_extract(ids_top: &[&str], ids_bottom: &[&str]) -> String {
        let mut text = String::from("label\n");
        for id in ids_top {
            text.push_str(&format!("structureet;{};;ETABLISSEMENT {}\n", id, id));
        }
        for id in ids_bottom {
            text.push_str(&format!(
                "geolocalisation;{};700000.0;6600000.0;1,IGN;2020-03-02\n",
                id
            ));
        }
        text
    }

    #[test]
    fn splits_at_midpoint_and_relabels_geolocation() -> Result<()> {
        let text = stacked_extract(&["010000001", "020000002"], &["010000001", "020000002"]);
        let (info, geoloc) = split_halves(parse_extract(&text)?)?;

        assert_eq!(info.rows.len(), 2);
        assert_eq!(geoloc.rows.len(), 2);
        assert_eq!(geoloc.headers, GEOLOC_HEADERS.to_vec());
        assert_eq!(geoloc.rows[0].len(), GEOLOC_HEADERS.len());
        // relabeled identifier column lines up with the establishment one
        for (info_row, geo_row) in info.rows.iter().zip(&geoloc.rows) {
            assert_eq!(info_row[0], geo_row[0]);
        }
        Ok(())
    }

    #[test]
    fn rejects_odd_row_counts() -> Result<()> {
        let mut text = stacked_extract(&["010000001"], &["010000001"]);
        text.push_str("structureet;030000003;;ETABLISSEMENT\n");
        let err = split_halves(parse_extract(&text)?).unwrap_err();
        assert!(err.to_string().contains("even row count"));
        Ok(())
    }

    #[test]
    fn rejects_misaligned_halves() -> Result<()> {
        let text = stacked_extract(&["010000001", "020000002"], &["020000002", "010000001"]);
        let err = split_halves(parse_extract(&text)?).unwrap_err();
        assert!(err.to_string().contains("misaligned at offset 0"));
        Ok(())
    }
}
