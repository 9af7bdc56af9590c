//! Elevation grid input type.
use num_traits::ToPrimitive;

use crate::error::{GridError, GridResult};

/// A rectangular grid of elevation samples with latitude/longitude axes.
///
/// Samples are stored row-major: `elevations[row * cols + col]` sits at
/// `(latitudes[row], longitudes[col])`. Negative values (bathymetry) are fine.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    rows: usize,
    cols: usize,
    elevations: Vec<f64>,
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
}

impl ElevationGrid {
    /// Build a grid from any primitive numeric sample type.
    ///
    /// Samples that cannot be represented as `f64` become NaN and are treated
    /// as missing by the mesh builder.
    pub fn new<T: ToPrimitive>(
        rows: usize,
        cols: usize,
        elevations: &[T],
        latitudes: &[f64],
        longitudes: &[f64],
    ) -> GridResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }

        let expected = rows * cols;
        if elevations.len() != expected {
            return Err(GridError::ElevationLength {
                rows,
                cols,
                expected,
                actual: elevations.len(),
            });
        }

        check_axis("latitude", latitudes, rows)?;
        check_axis("longitude", longitudes, cols)?;

        let elevations = elevations
            .iter()
            .map(|v| v.to_f64().unwrap_or(f64::NAN))
            .collect();

        Ok(Self {
            rows,
            cols,
            elevations,
            latitudes: latitudes.to_vec(),
            longitudes: longitudes.to_vec(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn elevations(&self) -> &[f64] {
        &self.elevations
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    /// Elevation at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.elevations[row * self.cols + col])
    }

    /// Copy of this grid with both axes running in ascending order.
    ///
    /// Rows are reversed when latitudes descend (north-up rasters), columns
    /// when longitudes descend. Samples move with their coordinates.
    pub fn ascending(&self) -> Self {
        let flip_rows = is_descending(&self.latitudes);
        let flip_cols = is_descending(&self.longitudes);

        let mut latitudes = self.latitudes.clone();
        let mut longitudes = self.longitudes.clone();
        if flip_rows {
            latitudes.reverse();
        }
        if flip_cols {
            longitudes.reverse();
        }

        let mut elevations = Vec::with_capacity(self.elevations.len());
        for r in 0..self.rows {
            let src_r = if flip_rows { self.rows - 1 - r } else { r };
            let row = &self.elevations[src_r * self.cols..(src_r + 1) * self.cols];
            if flip_cols {
                elevations.extend(row.iter().rev());
            } else {
                elevations.extend_from_slice(row);
            }
        }

        Self {
            rows: self.rows,
            cols: self.cols,
            elevations,
            latitudes,
            longitudes,
        }
    }
}

fn check_axis(axis: &'static str, values: &[f64], expected: usize) -> GridResult<()> {
    if values.len() != expected {
        return Err(GridError::AxisLength {
            axis,
            expected,
            actual: values.len(),
        });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(GridError::NonFiniteCoordinate { axis, index });
    }
    Ok(())
}

fn is_descending(values: &[f64]) -> bool {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) => last < first,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_integer_samples() {
        let grid = ElevationGrid::new(2, 2, &[1i16, -2, 3, 4], &[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert_eq!(grid.get(0, 1), Some(-2.0));
        assert_eq!(grid.get(1, 1), Some(4.0));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_new_rejects_bad_shapes() {
        let err = ElevationGrid::new(0, 3, &[0.0f32; 0], &[], &[0.0, 1.0, 2.0]).unwrap_err();
        assert_eq!(err, GridError::EmptyGrid { rows: 0, cols: 3 });

        let err = ElevationGrid::new(2, 2, &[0.0f32; 3], &[0.0, 1.0], &[0.0, 1.0]).unwrap_err();
        assert!(matches!(err, GridError::ElevationLength { expected: 4, actual: 3, .. }));

        let err = ElevationGrid::new(2, 2, &[0.0f32; 4], &[0.0], &[0.0, 1.0]).unwrap_err();
        assert!(matches!(err, GridError::AxisLength { axis: "latitude", .. }));

        let err =
            ElevationGrid::new(1, 2, &[0.0f32; 2], &[0.0], &[0.0, f64::NAN]).unwrap_err();
        assert_eq!(err, GridError::NonFiniteCoordinate { axis: "longitude", index: 1 });
    }

    #[test]
    fn test_ascending_flips_descending_axes() {
        // Row-major, latitudes north to south, longitudes east to west
        let grid = ElevationGrid::new(
            2,
            3,
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            &[10.0, 9.0],
            &[2.0, 1.0, 0.0],
        )
        .unwrap();

        let asc = grid.ascending();
        assert_eq!(asc.latitudes(), &[9.0, 10.0]);
        assert_eq!(asc.longitudes(), &[0.0, 1.0, 2.0]);
        assert_eq!(asc.elevations(), &[6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_ascending_is_identity_for_ascending_grid() {
        let grid = ElevationGrid::new(2, 2, &[1.0, 2.0, 3.0, 4.0], &[0.0, 1.0], &[5.0, 6.0]).unwrap();
        assert_eq!(grid.ascending(), grid);
    }
}
