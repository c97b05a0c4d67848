use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use csg_kernel::RenderMesh;
use tracing::info;

use crate::errors::ExportError;
use crate::stl::{encode_stl, StlFormat};

/// Destination for finished meshes.
pub trait ExportSink {
    fn export_mesh(&mut self, mesh: &RenderMesh, name: &str) -> Result<(), ExportError>;
}

/// Writes `<dir>/<name>.stl`, creating the directory on first use.
#[derive(Debug, Clone)]
pub struct StlFileSink {
    dir: PathBuf,
    format: StlFormat,
    written: Vec<PathBuf>,
}

impl StlFileSink {
    pub fn new(dir: impl Into<PathBuf>, format: StlFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
            written: Vec::new(),
        }
    }

    /// Files written so far, in export order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ExportSink for StlFileSink {
    fn export_mesh(&mut self, mesh: &RenderMesh, name: &str) -> Result<(), ExportError> {
        let bytes = encode_stl(mesh, name, self.format)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        let path = self.dir.join(format!("{name}.stl"));
        fs::write(&path, &bytes).map_err(|e| io_error(&path, e))?;
        info!(
            path = %path.display(),
            triangles = mesh.triangle_count(),
            bytes = bytes.len(),
            "exported"
        );
        self.written.push(path);
        Ok(())
    }
}

pub(crate) fn io_error(path: &Path, err: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Keeps encoded STL bytes in memory, keyed by mesh name.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    format: StlFormat,
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn new(format: StlFormat) -> Self {
        Self {
            format,
            files: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ExportSink for MemorySink {
    fn export_mesh(&mut self, mesh: &RenderMesh, name: &str) -> Result<(), ExportError> {
        let bytes = encode_stl(mesh, name, self.format)?;
        self.files.insert(name.to_string(), bytes);
        Ok(())
    }
}
