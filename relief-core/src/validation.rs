//! Topology checks for closed triangle meshes.
use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

/// Directed edges of an indexed triangle list that have no opposite twin.
///
/// A closed, consistently wound mesh uses every edge `a -> b` exactly once
/// and its reverse `b -> a` exactly once, so the result is empty. Edges that
/// appear more often than their reverse are reported once per surplus use.
pub fn boundary_edges(indices: &[u32]) -> Vec<(u32, u32)> {
    let mut balance: HashMap<(u32, u32), i64> = HashMap::new();
    for tri in indices.chunks_exact(3) {
        for k in 0..3 {
            let a = tri[k];
            let b = tri[(k + 1) % 3];
            if a < b {
                *balance.entry((a, b)).or_insert(0) += 1;
            } else {
                *balance.entry((b, a)).or_insert(0) -= 1;
            }
        }
    }

    let mut open = Vec::new();
    for ((a, b), count) in balance {
        let (edge, n) = if count >= 0 { ((a, b), count) } else { ((b, a), -count) };
        for _ in 0..n {
            open.push(edge);
        }
    }
    open.sort_unstable();
    open
}

/// True when every edge is matched by an oppositely wound twin.
pub fn is_watertight(indices: &[u32]) -> bool {
    !indices.is_empty() && boundary_edges(indices).is_empty()
}

/// Number of triangles with (near) zero area.
pub fn degenerate_triangles(positions: &[f32], indices: &[u32]) -> usize {
    let point = |i: u32| {
        let i = i as usize * 3;
        Point3::new(positions[i], positions[i + 1], positions[i + 2])
    };

    indices
        .chunks_exact(3)
        .filter(|tri| {
            let (a, b, c) = (point(tri[0]), point(tri[1]), point(tri[2]));
            let n: Vector3<f32> = (b - a).cross(&(c - a));
            n.norm() <= f32::EPSILON
        })
        .count()
}
