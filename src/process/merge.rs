// src/process/merge.rs
use anyhow::Result;
use std::collections::HashMap;
use tracing::info;

use crate::process::{Cell, Table};
use crate::schema::ID_COLUMN;

/// Left-join the geolocation columns onto the establishment rows.
/// Identifiers are compared as trimmed text on both sides. Every
/// establishment row survives; rows without a geolocation match keep
/// nulls in the appended columns.
pub fn merge_geolocation(info: Table, geoloc: Table) -> Result<Table> {
    let info_id_idx = info.column_index(ID_COLUMN)?;
    let geo_id_idx = geoloc.column_index(ID_COLUMN)?;

    let mut by_id: HashMap<String, &Vec<Cell>> = HashMap::with_capacity(geoloc.rows.len());
    for row in &geoloc.rows {
        if let Some(id) = row[geo_id_idx].as_text() {
            by_id.entry(id.trim().to_string()).or_insert(row);
        }
    }

    let mut headers = info.headers.clone();
    headers.extend(
        geoloc
            .headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != geo_id_idx)
            .map(|(_, h)| h.clone()),
    );

    let appended = geoloc.headers.len() - 1;
    let mut matched = 0usize;
    let mut rows = Vec::with_capacity(info.rows.len());
    for mut row in info.rows {
        let key = row[info_id_idx].as_text().map(|s| s.trim().to_string());
        match key.as_deref().and_then(|k| by_id.get(k)) {
            Some(geo_row) => {
                matched += 1;
                for (i, cell) in geo_row.iter().enumerate() {
                    if i != geo_id_idx {
                        row.push(cell.clone());
                    }
                }
            }
            None => row.extend(std::iter::repeat(Cell::Null).take(appended)),
        }
        rows.push(row);
    }

    info!(rows = rows.len(), matched, "merged geolocation onto establishments");
    Ok(Table { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::parse_extract;
    use crate::process::split::split_halves;

    #[test]
    fn left_join_keeps_unmatched_establishments() -> Result<()> {
        let info = Table {
            headers: vec!["nofinesset".into(), "rs".into()],
            rows: vec![
                vec![Cell::Text("010000001".into()), Cell::Text("A".into())],
                vec![Cell::Text("020000002".into()), Cell::Text("B".into())],
            ],
        };
        let geoloc = Table {
            headers: vec!["nofinesset".into(), "coordxet".into(), "coordyet".into()],
            rows: vec![vec![
                Cell::Text("010000001".into()),
                Cell::Text("700000.0".into()),
                Cell::Text("6600000.0".into()),
            ]],
        };

        let merged = merge_geolocation(info, geoloc)?;
        assert_eq!(merged.rows.len(), 2);
        assert_eq!(
            merged.headers,
            vec!["nofinesset", "rs", "coordxet", "coordyet"]
        );
        assert_eq!(merged.rows[0][2], Cell::Text("700000.0".into()));
        assert_eq!(merged.rows[1][2], Cell::Null);
        assert_eq!(merged.rows[1][3], Cell::Null);
        Ok(())
    }

    #[test]
    fn join_keys_are_compared_as_trimmed_text() -> Result<()> {
        let info = Table {
            headers: vec!["nofinesset".into()],
            rows: vec![vec![Cell::Text(" 010000001 ".into())]],
        };
        let geoloc = Table {
            headers: vec!["nofinesset".into(), "coordxet".into()],
            rows: vec![vec![
                Cell::Text("010000001".into()),
                Cell::Text("700000.0".into()),
            ]],
        };

        let merged = merge_geolocation(info, geoloc)?;
        assert_eq!(merged.rows[0][1], Cell::Text("700000.0".into()));
        Ok(())
    }

    #[test]
    fn merge_after_split_preserves_establishment_cardinality() -> Result<()> {
        let text = "\
label\n\
structureet;010000001;;PHARMACIE A\n\
structureet;020000002;;PHARMACIE B\n\
geolocalisation;010000001;700000.0;6600000.0;1,IGN;2020-03-02\n\
geolocalisation;020000002;650000.0;6860000.0;1,IGN;2020-03-02\n";
        let (info, geoloc) = split_halves(parse_extract(text)?)?;
        let establishments = info.rows.len();

        let merged = merge_geolocation(info, geoloc)?;
        assert_eq!(merged.rows.len(), establishments);
        let x_idx = merged.column_index("coordxet")?;
        assert_eq!(merged.rows[0][x_idx], Cell::Text("700000.0".into()));
        assert_eq!(merged.rows[1][x_idx], Cell::Text("650000.0".into()));
        Ok(())
    }
}
