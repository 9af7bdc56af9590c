//! Solid mesh builder.
//!
//! Turns an [`ElevationGrid`] into a closed triangle mesh: a colored top
//! surface, a flat gray base below the lowest sample, and four side walls
//! joining them. Top vertices occupy `[0, n)` in decimated row-major order,
//! bottom vertices `[n, 2n)` in the same order.

use nalgebra::{Point3, Vector3};

use crate::colormap::{colormap, BASE_COLOR};
use crate::config::{ExportUnit, MeshConfig};
use crate::decimate::{self, DecimationPlan};
use crate::geometry::{face_normal, BoundingBox, Mesh, Triangle};
use crate::grid::ElevationGrid;
use crate::projection::LocalProjection;
use crate::transform::scale_positions_in_place;

/// Floor for the color normalization range
const RANGE_EPSILON: f64 = 1e-9;

/// Elevation summary of the meshed surface (after exaggeration).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStats {
    pub min_elevation: f64,
    pub max_elevation: f64,
    /// Height of the flat base plane
    pub bottom_z: f64,
}

/// Indexed solid mesh with flat interleaved buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffer {
    /// `[x0, y0, z0, x1, ...]` in metres (unless rescaled for export)
    pub positions: Vec<f32>,
    /// `[r0, g0, b0, r1, ...]`, one triple per position, each in `[0, 1]`
    pub colors: Vec<f32>,
    /// Triangle list, three indices per face, outward winding
    pub indices: Vec<u32>,
    /// Decimated row count
    pub rows: usize,
    /// Decimated column count
    pub cols: usize,
    pub bounds: BoundingBox,
    pub stats: SurfaceStats,
    pub plan: DecimationPlan,
}

impl MeshBuffer {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, index: usize) -> Point3<f32> {
        let i = index * 3;
        Point3::new(self.positions[i], self.positions[i + 1], self.positions[i + 2])
    }

    pub fn triangle(&self, index: usize) -> [u32; 3] {
        let i = index * 3;
        [self.indices[i], self.indices[i + 1], self.indices[i + 2]]
    }

    /// Bounding-box extent along x, y and z
    pub fn size(&self) -> Vector3<f32> {
        self.bounds.size()
    }

    pub fn face_normals(&self) -> Vec<Vector3<f32>> {
        self.indices
            .chunks_exact(3)
            .map(|t| {
                face_normal(
                    &self.position(t[0] as usize),
                    &self.position(t[1] as usize),
                    &self.position(t[2] as usize),
                )
            })
            .collect()
    }

    /// Area-weighted unit normals, one per vertex
    pub fn vertex_normals(&self) -> Vec<Vector3<f32>> {
        let mut normals = vec![Vector3::zeros(); self.vertex_count()];
        for t in self.indices.chunks_exact(3) {
            let a = self.position(t[0] as usize);
            let b = self.position(t[1] as usize);
            let c = self.position(t[2] as usize);
            // Cross product length is twice the area
            let weighted = (b - a).cross(&(c - a));
            for &i in t {
                normals[i as usize] += weighted;
            }
        }
        normals
            .into_iter()
            .map(|n| n.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros))
            .collect()
    }

    /// Triangle soup with face normals, as handed to an STL writer
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::with_capacity(self.triangle_count());
        for t in self.indices.chunks_exact(3) {
            mesh.add_triangle(Triangle::from_points(
                self.position(t[0] as usize),
                self.position(t[1] as usize),
                self.position(t[2] as usize),
            ));
        }
        mesh
    }

    /// Copy with positions, bounds and elevation summary multiplied by
    /// `factor`. Colors and indices are shared unchanged.
    pub fn scaled(&self, factor: f32) -> Self {
        let mut positions = self.positions.clone();
        scale_positions_in_place(&mut positions, factor);
        let f = factor as f64;

        Self {
            bounds: BoundingBox {
                min: self.bounds.min * factor,
                max: self.bounds.max * factor,
            },
            positions,
            colors: self.colors.clone(),
            indices: self.indices.clone(),
            rows: self.rows,
            cols: self.cols,
            stats: SurfaceStats {
                min_elevation: self.stats.min_elevation * f,
                max_elevation: self.stats.max_elevation * f,
                bottom_z: self.stats.bottom_z * f,
            },
            plan: self.plan,
        }
    }

    /// Copy expressed in `unit` instead of metres
    pub fn for_export(&self, unit: ExportUnit) -> Self {
        self.scaled(unit.scale_factor())
    }
}

/// Build a closed solid from `grid` using `config`.
pub fn build_solid_geometry(grid: &ElevationGrid, config: &MeshConfig) -> MeshBuffer {
    build_with_cap(
        grid,
        config.exaggeration,
        config.base_thickness,
        config.max_dim,
        config.vertex_cap,
    )
}

/// Build a closed solid with the default vertex cap.
pub fn build_solid(
    grid: &ElevationGrid,
    exaggeration: f64,
    base_thickness: f64,
    max_dim: usize,
) -> MeshBuffer {
    build_with_cap(
        grid,
        exaggeration,
        base_thickness,
        max_dim,
        decimate::DEFAULT_VERTEX_CAP,
    )
}

fn build_with_cap(
    grid: &ElevationGrid,
    exaggeration: f64,
    base_thickness: f64,
    max_dim: usize,
    vertex_cap: usize,
) -> MeshBuffer {
    let plan = decimate::plan(grid.rows(), grid.cols(), max_dim, vertex_cap);
    let row_idx = plan.row_indices(grid.rows());
    let col_idx = plan.col_indices(grid.cols());
    let (rows, cols) = (plan.rows, plan.cols);

    let lats: Vec<f64> = row_idx.iter().map(|&r| grid.latitudes()[r]).collect();
    let lons: Vec<f64> = col_idx.iter().map(|&c| grid.longitudes()[c]).collect();
    let projection = LocalProjection::for_axes(&lats, &lons);
    let xs: Vec<f64> = lons.iter().map(|&lon| projection.x(lon)).collect();
    let ys: Vec<f64> = lats.iter().map(|&lat| projection.y(lat)).collect();

    // Working Z over the sampled points only
    let mut zs = Vec::with_capacity(rows * cols);
    for &r in &row_idx {
        let row = &grid.elevations()[r * grid.cols()..(r + 1) * grid.cols()];
        zs.extend(col_idx.iter().map(|&c| row[c] * exaggeration));
    }

    let (min_z, max_z) = finite_range(&zs);
    for z in zs.iter_mut().filter(|z| !z.is_finite()) {
        *z = min_z;
    }
    let bottom_z = min_z - base_thickness.abs();
    let range = (max_z - min_z).max(RANGE_EPSILON);

    let n = rows * cols;
    let mut positions = Vec::with_capacity(n * 2 * 3);
    let mut colors = Vec::with_capacity(n * 2 * 3);

    for (r, y) in ys.iter().enumerate() {
        for (c, x) in xs.iter().enumerate() {
            let z = zs[r * cols + c];
            positions.extend_from_slice(&[*x as f32, *y as f32, z as f32]);
            let t = ((z - min_z) / range).clamp(0.0, 1.0);
            colors.extend_from_slice(&colormap(t as f32));
        }
    }
    for y in &ys {
        for x in &xs {
            positions.extend_from_slice(&[*x as f32, *y as f32, bottom_z as f32]);
            colors.extend_from_slice(&BASE_COLOR);
        }
    }

    // Patterns below assume x east and y north; one reversed axis mirrors the
    // footprint and every face must be flipped to stay outward.
    let flip = is_reversed(&xs) != is_reversed(&ys);
    let indices = triangulate(rows, cols, flip);

    let bounds = BoundingBox::from_positions(&positions);

    tracing::debug!(
        source_rows = grid.rows(),
        source_cols = grid.cols(),
        rows,
        cols,
        row_stride = plan.row_stride,
        col_stride = plan.col_stride,
        vertices = positions.len() / 3,
        triangles = indices.len() / 3,
        "Built solid mesh"
    );

    MeshBuffer {
        positions,
        colors,
        indices,
        rows,
        cols,
        bounds,
        stats: SurfaceStats {
            min_elevation: min_z,
            max_elevation: max_z,
            bottom_z,
        },
        plan,
    }
}

/// Triangle indices for the top, bottom and four walls of a `rows x cols` solid.
fn triangulate(rows: usize, cols: usize, flip: bool) -> Vec<u32> {
    let n = rows * cols;
    let top = |r: usize, c: usize| (r * cols + c) as u32;
    let bot = |r: usize, c: usize| (n + r * cols + c) as u32;

    let cells = rows.saturating_sub(1) * cols.saturating_sub(1);
    let wall_segments = if rows > 1 && cols > 1 {
        2 * (rows - 1) + 2 * (cols - 1)
    } else {
        0
    };
    let mut indices = Vec::with_capacity((cells * 4 + wall_segments * 2) * 3);

    let mut push = |a: u32, b: u32, c: u32| {
        if flip {
            indices.extend_from_slice(&[a, c, b]);
        } else {
            indices.extend_from_slice(&[a, b, c]);
        }
    };

    for r in 0..rows.saturating_sub(1) {
        for c in 0..cols.saturating_sub(1) {
            push(top(r, c), top(r, c + 1), top(r + 1, c + 1));
            push(top(r, c), top(r + 1, c + 1), top(r + 1, c));

            push(bot(r, c), bot(r + 1, c + 1), bot(r, c + 1));
            push(bot(r, c), bot(r + 1, c), bot(r + 1, c + 1));
        }
    }

    if wall_segments > 0 {
        let (last_r, last_c) = (rows - 1, cols - 1);

        // South (first row) and north (last row)
        for c in 0..last_c {
            push(top(0, c), bot(0, c), bot(0, c + 1));
            push(top(0, c), bot(0, c + 1), top(0, c + 1));

            push(top(last_r, c), bot(last_r, c + 1), bot(last_r, c));
            push(top(last_r, c), top(last_r, c + 1), bot(last_r, c + 1));
        }

        // West (first column) and east (last column)
        for r in 0..last_r {
            push(top(r, 0), bot(r + 1, 0), bot(r, 0));
            push(top(r, 0), top(r + 1, 0), bot(r + 1, 0));

            push(top(r, last_c), bot(r, last_c), bot(r + 1, last_c));
            push(top(r, last_c), bot(r + 1, last_c), top(r + 1, last_c));
        }
    }

    indices
}

/// Min and max over finite values, `(0, 0)` when there are none.
fn finite_range(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

fn is_reversed(axis: &[f64]) -> bool {
    match (axis.first(), axis.last()) {
        (Some(first), Some(last)) => last < first,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::is_watertight;

    fn grid_3x3() -> ElevationGrid {
        let elevations: Vec<f64> = (0..9).map(f64::from).collect();
        ElevationGrid::new(3, 3, &elevations, &[0.0, 0.001, 0.002], &[0.0, 0.001, 0.002]).unwrap()
    }

    #[test]
    fn test_triangulate_counts() {
        // 8 top + 8 bottom + 4 walls * 2 segments * 2
        assert_eq!(triangulate(3, 3, false).len(), 96);
        assert_eq!(triangulate(1, 1, false).len(), 0);
        assert!(triangulate(1, 5, false).is_empty());
    }

    #[test]
    fn test_triangulate_closed() {
        assert!(is_watertight(&triangulate(3, 3, false)));
        assert!(is_watertight(&triangulate(2, 7, true)));
    }

    #[test]
    fn test_layout_of_top_and_bottom() {
        let mesh = build_solid(&grid_3x3(), 1.0, 10.0, 600);
        assert_eq!(mesh.vertex_count(), 18);
        assert_eq!(mesh.position(0), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(mesh.position(8).z, 8.0);
        assert_eq!(mesh.position(9).z, -10.0);
        assert_eq!(mesh.position(9).x, mesh.position(0).x);
        assert_eq!(&mesh.colors[27..30], &BASE_COLOR);
    }

    #[test]
    fn test_top_faces_point_up() {
        let mesh = build_solid(&grid_3x3(), 1.0, 10.0, 600);
        let normals = mesh.face_normals();
        // First eight faces interleave top/bottom pairs per cell
        assert!(normals[0].z > 0.0);
        assert!(normals[1].z > 0.0);
        assert!(normals[2].z < 0.0);
        assert!(normals[3].z < 0.0);
    }

    #[test]
    fn test_descending_latitudes_keep_outward_winding() {
        let elevations: Vec<f64> = (0..9).map(f64::from).collect();
        let grid =
            ElevationGrid::new(3, 3, &elevations, &[0.002, 0.001, 0.0], &[0.0, 0.001, 0.002])
                .unwrap();
        let mesh = build_solid(&grid, 1.0, 10.0, 600);
        assert!(mesh.face_normals()[0].z > 0.0);
        assert!(is_watertight(&mesh.indices));
    }

    #[test]
    fn test_missing_samples_sit_at_surface_minimum() {
        let grid = ElevationGrid::new(
            2,
            2,
            &[5.0, f64::NAN, 7.0, 9.0],
            &[0.0, 0.001],
            &[0.0, 0.001],
        )
        .unwrap();
        let mesh = build_solid(&grid, 1.0, 1.0, 600);
        assert_eq!(mesh.stats.min_elevation, 5.0);
        assert_eq!(mesh.position(1).z, 5.0);
        assert!(mesh.positions.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_flat_grid_colors_are_finite() {
        let grid = ElevationGrid::new(2, 2, &[3.0; 4], &[0.0, 0.001], &[0.0, 0.001]).unwrap();
        let mesh = build_solid(&grid, 1.0, 1.0, 600);
        assert_eq!(&mesh.colors[0..3], &colormap(0.0));
        assert!(mesh.colors.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_finite_range() {
        assert_eq!(finite_range(&[2.0, f64::NAN, -1.0]), (-1.0, 2.0));
        assert_eq!(finite_range(&[f64::NAN]), (0.0, 0.0));
    }
}
