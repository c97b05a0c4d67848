//! STL serialization of a `RenderMesh`, binary and ASCII.
//!
//! Facet normals are recomputed from the winding; the per-vertex normals a
//! kernel supplies are ignored.

use csg_kernel::RenderMesh;
use serde::{Deserialize, Serialize};

use crate::errors::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

/// Encode in the requested format.
pub fn encode_stl(
    mesh: &RenderMesh,
    name: &str,
    format: StlFormat,
) -> Result<Vec<u8>, ExportError> {
    match format {
        StlFormat::Binary => write_binary_stl(mesh, name),
        StlFormat::Ascii => write_ascii_stl(mesh, name).map(String::into_bytes),
    }
}

/// Binary STL:
/// - 80-byte header
/// - u32 LE triangle count
/// - per triangle: normal, three vertices (all 3 × f32 LE), u16 attribute = 50 bytes
pub fn write_binary_stl(mesh: &RenderMesh, name: &str) -> Result<Vec<u8>, ExportError> {
    let tri_count = validate(mesh, name)?;
    let mut buf = Vec::with_capacity(84 + tri_count * 50);

    let header = format!("binary STL: {name}");
    let header = header.as_bytes();
    buf.extend_from_slice(&header[..header.len().min(80)]);
    buf.resize(80, 0u8);
    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for tri in mesh.indices.chunks_exact(3) {
        let corners = [mesh.vertex(tri[0]), mesh.vertex(tri[1]), mesh.vertex(tri[2])];
        for c in facet_normal(&corners) {
            buf.extend_from_slice(&c.to_le_bytes());
        }
        for v in &corners {
            for c in v {
                buf.extend_from_slice(&c.to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }
    Ok(buf)
}

pub fn write_ascii_stl(mesh: &RenderMesh, name: &str) -> Result<String, ExportError> {
    let tri_count = validate(mesh, name)?;
    let mut out = String::with_capacity(tri_count * 300);
    out.push_str(&format!("solid {name}\n"));

    for tri in mesh.indices.chunks_exact(3) {
        let corners = [mesh.vertex(tri[0]), mesh.vertex(tri[1]), mesh.vertex(tri[2])];
        let [nx, ny, nz] = facet_normal(&corners);
        out.push_str(&format!("  facet normal {nx} {ny} {nz}\n"));
        out.push_str("    outer loop\n");
        for [x, y, z] in corners {
            out.push_str(&format!("      vertex {x} {y} {z}\n"));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {name}\n"));
    Ok(out)
}

/// Triangle count, after checking every index is in range.
fn validate(mesh: &RenderMesh, name: &str) -> Result<usize, ExportError> {
    let tri_count = mesh.indices.len() / 3;
    if tri_count == 0 {
        return Err(ExportError::EmptyMesh {
            name: name.to_string(),
        });
    }
    let vertex_count = mesh.vertices.len() / 3;
    if let Some(&index) = mesh.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(ExportError::IndexOutOfRange {
            name: name.to_string(),
            index,
            vertex_count,
        });
    }
    Ok(tri_count)
}

fn facet_normal([v0, v1, v2]: &[[f32; 3]; 3]) -> [f32; 3] {
    let a = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let b = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
    let n = [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 1e-12 {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}
