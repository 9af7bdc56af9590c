//! Decimation planning for dense elevation grids.
//!
//! A plan picks row/column strides so that neither decimated axis exceeds
//! `max_dim` and, where possible, the solid (top + bottom vertices) fits in
//! the vertex budget.

/// Smallest accepted `max_dim`.
pub const MIN_MAX_DIM: usize = 100;
/// Largest accepted `max_dim`.
pub const MAX_MAX_DIM: usize = 1200;
/// Default ceiling on total emitted vertices (top + bottom).
pub const DEFAULT_VERTEX_CAP: usize = 1_500_000;
/// Upper bound on the stride multiplier tried when fitting the vertex budget.
pub const MAX_STRIDE_MULTIPLIER: usize = 64;

/// Row/column strides and the decimated grid shape they produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimationPlan {
    pub row_stride: usize,
    pub col_stride: usize,
    /// Decimated row count, always >= 1.
    pub rows: usize,
    /// Decimated column count, always >= 1.
    pub cols: usize,
}

impl DecimationPlan {
    /// Vertices emitted by a solid built from this plan (top + bottom).
    pub fn vertex_count(&self) -> usize {
        self.rows * self.cols * 2
    }

    pub fn row_indices(&self, source_rows: usize) -> Vec<usize> {
        sample_indices(source_rows, self.row_stride, self.rows)
    }

    pub fn col_indices(&self, source_cols: usize) -> Vec<usize> {
        sample_indices(source_cols, self.col_stride, self.cols)
    }
}

/// Plan strides for a `rows x cols` grid.
///
/// `max_dim` is clamped to [`MIN_MAX_DIM`, `MAX_MAX_DIM`]. When the vertex cap
/// cannot be met within [`MAX_STRIDE_MULTIPLIER`] attempts the last plan is
/// returned anyway.
pub fn plan(rows: usize, cols: usize, max_dim: usize, vertex_cap: usize) -> DecimationPlan {
    let rows = rows.max(1);
    let cols = cols.max(1);
    let max_dim = max_dim.clamp(MIN_MAX_DIM, MAX_MAX_DIM);

    let base_row = rows.div_ceil(max_dim).max(1);
    let base_col = cols.div_ceil(max_dim).max(1);

    let mut current = with_strides(rows, cols, base_row, base_col);
    for multiplier in 2..=MAX_STRIDE_MULTIPLIER {
        if current.vertex_count() <= vertex_cap {
            break;
        }
        current = with_strides(rows, cols, base_row * multiplier, base_col * multiplier);
    }

    if current.vertex_count() > vertex_cap {
        tracing::warn!(
            rows,
            cols,
            vertex_cap,
            vertices = current.vertex_count(),
            "Decimation plan still exceeds vertex cap"
        );
    }

    current
}

fn with_strides(rows: usize, cols: usize, row_stride: usize, col_stride: usize) -> DecimationPlan {
    DecimationPlan {
        row_stride,
        col_stride,
        rows: rows.div_ceil(row_stride).max(1),
        cols: cols.div_ceil(col_stride).max(1),
    }
}

/// Source indices visited by a stride walk of `count` steps over `len` samples.
///
/// Indices are clamped to `len - 1` and the final entry is always `len - 1`,
/// so the far edge of the grid is kept even when `stride` does not divide `len`.
pub fn sample_indices(len: usize, stride: usize, count: usize) -> Vec<usize> {
    let last = len.saturating_sub(1);
    let count = count.max(1);
    let mut indices: Vec<usize> = (0..count).map(|i| (i * stride).min(last)).collect();
    if count > 1 {
        indices[count - 1] = last;
    }
    indices
}
