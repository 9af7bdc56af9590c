//! Export-time coordinate scaling
use nalgebra::{Matrix4, Vector3};

/// Multiply every component of a flat position buffer by `factor`.
///
/// Used to turn a metre-denominated mesh into millimetres (`factor = 1000`)
/// just before export. Indices, colors and normals are unaffected by a
/// uniform scale and are left to the caller.
pub fn scale_positions(positions: &[f32], factor: f32) -> Vec<f32> {
    positions.iter().map(|v| v * factor).collect()
}

/// In-place variant of [`scale_positions`]
pub fn scale_positions_in_place(positions: &mut [f32], factor: f32) {
    for v in positions.iter_mut() {
        *v *= factor;
    }
}

/// Transform builder for renderer collaborators
pub struct Transform;

impl Transform {
    /// Uniform scale matching [`scale_positions`] for use as a model matrix
    pub fn scale_matrix(factor: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(factor, factor, factor))
    }
}
