//! Example: build a printable solid from a synthetic hill
//!
//! Usage: RUST_LOG=debug cargo run --example synthetic_relief
//!
//! Mesh settings come from RELIEF_* environment variables (see `MeshConfig::from_env`).

use relief_core::{build_solid_geometry, is_watertight, ElevationGrid, MeshConfig};
use tracing_subscriber::{fmt, EnvFilter};

const ROWS: usize = 1500;
const COLS: usize = 2000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = MeshConfig::from_env().clamped();
    config.validate()?;

    // Gaussian hill rising out of a shallow sea, north-up like most rasters
    let latitudes: Vec<f64> = (0..ROWS).map(|r| 46.5 - r as f64 * 0.0005).collect();
    let longitudes: Vec<f64> = (0..COLS).map(|c| 8.0 + c as f64 * 0.0005).collect();
    let mut elevations = Vec::with_capacity(ROWS * COLS);
    for r in 0..ROWS {
        for c in 0..COLS {
            let dy = (r as f64 - ROWS as f64 / 2.0) / (ROWS as f64 / 5.0);
            let dx = (c as f64 - COLS as f64 / 2.0) / (COLS as f64 / 5.0);
            let height = 2400.0 * (-(dx * dx + dy * dy)).exp() - 150.0;
            elevations.push(height as f32);
        }
    }

    let grid = ElevationGrid::new(ROWS, COLS, &elevations, &latitudes, &longitudes)?.ascending();
    let mesh = build_solid_geometry(&grid, &config);
    let export = mesh.for_export(config.unit);
    let size = export.size();

    tracing::info!(
        rows = mesh.rows,
        cols = mesh.cols,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        watertight = is_watertight(&mesh.indices),
        "Solid ready for export"
    );
    tracing::info!(
        unit = %config.unit,
        x = size.x,
        y = size.y,
        z = size.z,
        bottom_z = export.stats.bottom_z,
        "Bounding box"
    );

    Ok(())
}
