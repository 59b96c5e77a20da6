// src/process/reproject.rs
use anyhow::{anyhow, Context, Result};
use proj4rs::proj::Proj;
use tracing::info;

use crate::process::{Cell, Table};

/// Lambert-93 (EPSG:2154), the planar system the registry publishes.
static LAMBERT_93: &str = "+proj=lcc +lat_0=46.5 +lon_0=3 +lat_1=49 +lat_2=44 +x_0=700000 +y_0=6600000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs";

/// WGS84 geographic coordinates (EPSG:4326).
static WGS_84: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Lambert-93 → WGS84 projection service. Both projection contexts are
/// built once; the conversion itself carries no cross-row state.
pub struct Reprojector {
    source: Proj,
    target: Proj,
}

impl Reprojector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            source: Proj::from_proj_string(LAMBERT_93)
                .context("building Lambert-93 projection")?,
            target: Proj::from_proj_string(WGS_84).context("building WGS84 projection")?,
        })
    }

    /// Convert one planar (x, y) pair in meters to (longitude, latitude)
    /// in degrees.
    pub fn to_wgs84(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let mut point = (x, y, 0.0);
        proj4rs::transform::transform(&self.source, &self.target, &mut point)
            .with_context(|| format!("projecting ({}, {})", x, y))?;
        Ok((point.0.to_degrees(), point.1.to_degrees()))
    }

    /// Overwrite `coordxet`/`coordyet` across the whole table with WGS84
    /// degrees, keeping row order. A missing or unparseable pair is fatal:
    /// the pipeline has no per-row skip policy.
    pub fn reproject_table(&self, table: &mut Table) -> Result<()> {
        let x_idx = table.column_index("coordxet")?;
        let y_idx = table.column_index("coordyet")?;

        for (offset, row) in table.rows.iter_mut().enumerate() {
            let x = coordinate(&row[x_idx]).ok_or_else(|| {
                anyhow!("row {}: unusable x coordinate {:?}", offset, row[x_idx])
            })?;
            let y = coordinate(&row[y_idx]).ok_or_else(|| {
                anyhow!("row {}: unusable y coordinate {:?}", offset, row[y_idx])
            })?;
            let (lon, lat) = self.to_wgs84(x, y)?;
            row[x_idx] = Cell::Number(lon);
            row[y_idx] = Cell::Number(lat);
        }

        info!(rows = table.rows.len(), "reprojected coordinates to WGS84");
        Ok(())
    }
}

fn coordinate(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Cell::Number(v) => Some(*v),
        Cell::Null => None,
    }
}
