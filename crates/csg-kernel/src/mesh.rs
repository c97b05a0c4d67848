//! Watertightness check on tessellated output.

use std::collections::HashMap;

use crate::types::{KernelError, RenderMesh};

/// Positions closer than this are treated as the same vertex.
const WELD_GRID: f64 = 1e-4;

fn weld_key(p: [f32; 3]) -> [i64; 3] {
    [
        (p[0] as f64 / WELD_GRID).round() as i64,
        (p[1] as f64 / WELD_GRID).round() as i64,
        (p[2] as f64 / WELD_GRID).round() as i64,
    ]
}

/// Verify that a mesh bounds a closed 2-manifold volume.
///
/// Faces are tessellated independently, so vertices are welded by position
/// before edges are counted. Every edge must be shared by exactly two
/// triangles.
pub fn check_closed(mesh: &RenderMesh) -> Result<(), KernelError> {
    if mesh.indices.is_empty() {
        return Err(KernelError::NonManifold {
            open_edges: 0,
            overloaded_edges: 0,
        });
    }

    let mut welded: HashMap<[i64; 3], u32> = HashMap::new();
    let mut remap = Vec::with_capacity(mesh.vertices.len() / 3);
    for i in 0..(mesh.vertices.len() / 3) as u32 {
        let next = welded.len() as u32;
        remap.push(*welded.entry(weld_key(mesh.vertex(i))).or_insert(next));
    }

    let mut edges: HashMap<(u32, u32), usize> = HashMap::new();
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [
            remap[tri[0] as usize],
            remap[tri[1] as usize],
            remap[tri[2] as usize],
        ];
        if a == b || b == c || a == c {
            continue;
        }
        for (u, v) in [(a, b), (b, c), (c, a)] {
            *edges.entry((u.min(v), u.max(v))).or_default() += 1;
        }
    }

    let open_edges = edges.values().filter(|&&n| n < 2).count();
    let overloaded_edges = edges.values().filter(|&&n| n > 2).count();
    if open_edges == 0 && overloaded_edges == 0 {
        Ok(())
    } else {
        Err(KernelError::NonManifold {
            open_edges,
            overloaded_edges,
        })
    }
}
