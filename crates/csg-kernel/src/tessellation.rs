//! Tessellation wrapper over truck-meshalgo.

use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::{MeshableShape, MeshedShape};

use crate::types::*;

type TruckSolid = truck_modeling::Solid;

/// Tessellate a truck Solid into a RenderMesh, face by face.
///
/// Inverted faces get their triangles flipped so every normal points out
/// of the material.
pub fn tessellate_solid(solid: &TruckSolid, tolerance: f64) -> Result<RenderMesh, KernelError> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(KernelError::TessellationFailed {
            reason: format!("tolerance must be positive, got {tolerance}"),
        });
    }
    let meshed_solid = solid.triangulation(tolerance);

    let mut mesh = RenderMesh::empty();
    for shell in meshed_solid.boundaries().iter() {
        for face in shell.face_iter() {
            let maybe_mesh: Option<PolygonMesh> = face.surface();
            let Some(face_mesh) = maybe_mesh else {
                return Err(KernelError::TessellationFailed {
                    reason: "a face could not be triangulated".to_string(),
                });
            };
            let face_mesh = if !face.orientation() {
                let mut m = face_mesh;
                m.invert();
                m
            } else {
                face_mesh
            };
            append(&mut mesh, &face_mesh);
        }
    }

    if mesh.vertices.is_empty() {
        return tessellate_solid_merged(solid, tolerance);
    }
    Ok(mesh)
}

/// Positions of a coarse tessellation, used for bounding boxes.
pub fn sample_points(solid: &TruckSolid, tolerance: f64) -> Vec<[f64; 3]> {
    let meshed = solid.triangulation(tolerance);
    meshed
        .to_polygon()
        .positions()
        .iter()
        .map(|p| [p[0], p[1], p[2]])
        .collect()
}

fn append(mesh: &mut RenderMesh, face_mesh: &PolygonMesh) {
    let base_vertex = (mesh.vertices.len() / 3) as u32;
    let positions = face_mesh.positions();
    let normals = face_mesh.normals();

    for pos in positions {
        mesh.vertices.extend([pos[0] as f32, pos[1] as f32, pos[2] as f32]);
    }
    if normals.len() == positions.len() {
        for norm in normals {
            mesh.normals.extend([norm[0] as f32, norm[1] as f32, norm[2] as f32]);
        }
    } else {
        for _ in 0..positions.len() {
            mesh.normals.extend([0.0, 0.0, 1.0]);
        }
    }
    for tri in face_mesh.tri_faces() {
        for v in tri.iter() {
            mesh.indices.push(v.pos as u32 + base_vertex);
        }
    }
}

/// Fallback tessellation: merge everything into a single PolygonMesh.
fn tessellate_solid_merged(solid: &TruckSolid, tolerance: f64) -> Result<RenderMesh, KernelError> {
    let meshed = solid.triangulation(tolerance);
    let polygon = meshed.to_polygon();
    if polygon.positions().is_empty() {
        return Err(KernelError::TessellationFailed {
            reason: "solid produced no triangles".to_string(),
        });
    }
    let mut mesh = RenderMesh::empty();
    append(&mut mesh, &polygon);
    Ok(mesh)
}
