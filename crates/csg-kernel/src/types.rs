use enclosure_types::Aabb;
use serde::{Deserialize, Serialize};

/// Opaque handle to a solid in the geometry kernel.
/// Valid only for the kernel session that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernelSolidHandle(pub(crate) u64);

impl KernelSolidHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Transient kernel-internal identifier for sketches awaiting extrusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KernelId(pub u64);

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("fillet failed: {reason}")]
    FilletFailed { reason: String },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("entity not found: {id:?}")]
    EntityNotFound { id: KernelId },

    #[error("degenerate input to {operation}: {reason}")]
    Degenerate {
        operation: &'static str,
        reason: String,
    },

    #[error("mesh is not a closed manifold: {open_edges} open edges, {overloaded_edges} edges shared by more than two triangles")]
    NonManifold {
        open_edges: usize,
        overloaded_edges: usize,
    },

    #[error("kernel error: {message}")]
    Other { message: String },
}

/// One frustum of a coaxial stack. Radii are measured at the tier's own
/// bottom and top faces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub bottom_radius: f64,
    pub top_radius: f64,
    pub height: f64,
}

impl Tier {
    pub fn cylinder(radius: f64, height: f64) -> Self {
        Self {
            bottom_radius: radius,
            top_radius: radius,
            height,
        }
    }

    pub fn max_radius(&self) -> f64 {
        self.bottom_radius.max(self.top_radius)
    }
}

/// Triangulated mesh of a solid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderMesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Flat array of vertex normals, same layout as `vertices`.
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex array.
    pub indices: Vec<u32>,
}

impl RenderMesh {
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex(&self, index: u32) -> [f32; 3] {
        let i = index as usize * 3;
        [self.vertices[i], self.vertices[i + 1], self.vertices[i + 2]]
    }

    /// Bounds of all vertex positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        let points: Vec<[f64; 3]> = self
            .vertices
            .chunks_exact(3)
            .map(|c| [c[0] as f64, c[1] as f64, c[2] as f64])
            .collect();
        Aabb::from_points(&points)
    }
}
