/// Errors while serializing or writing output artifacts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("mesh {name} has no triangles")]
    EmptyMesh { name: String },

    #[error("mesh {name}: index {index} out of range (vertex count = {vertex_count})")]
    IndexOutOfRange {
        name: String,
        index: u32,
        vertex_count: usize,
    },

    #[error("failed to write {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to serialize preview scene: {0}")]
    Serialize(String),
}
