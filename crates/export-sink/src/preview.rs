//! A renderer-agnostic description of what to show, and where it goes.

use std::fs;
use std::path::PathBuf;

use csg_kernel::RenderMesh;
use enclosure_types::Aabb;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ExportError;
use crate::sink::io_error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviewRole {
    Body,
    Lid,
    Ghost,
}

impl PreviewRole {
    pub fn color(self) -> &'static str {
        match self {
            PreviewRole::Body => "#CCCCCC",
            PreviewRole::Lid => "#333333",
            PreviewRole::Ghost => "red",
        }
    }

    pub fn alpha(self) -> f64 {
        match self {
            PreviewRole::Body | PreviewRole::Lid => 1.0,
            PreviewRole::Ghost => 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewItem {
    pub name: String,
    pub role: PreviewRole,
    pub color: String,
    pub alpha: f64,
    /// Display-only translation; the mesh itself stays in its build frame.
    pub offset: [f64; 3],
    pub bounds: Option<Aabb>,
    pub mesh: RenderMesh,
}

impl PreviewItem {
    pub fn new(name: impl Into<String>, role: PreviewRole, mesh: RenderMesh) -> Self {
        Self {
            name: name.into(),
            role,
            color: role.color().to_string(),
            alpha: role.alpha(),
            offset: [0.0; 3],
            bounds: mesh.bounds(),
            mesh,
        }
    }

    pub fn raised(mut self, z: f64) -> Self {
        self.offset[2] += z;
        self
    }

    /// Bounds as displayed, offset included.
    pub fn display_bounds(&self) -> Option<Aabb> {
        self.bounds.map(|b| b.translated(self.offset))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewScene {
    pub items: Vec<PreviewItem>,
}

impl PreviewScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: PreviewItem) {
        self.items.push(item);
    }

    pub fn item(&self, name: &str) -> Option<&PreviewItem> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string(self).map_err(|e| ExportError::Serialize(e.to_string()))
    }
}

pub trait PreviewSink {
    fn preview(&mut self, scene: &PreviewScene) -> Result<(), ExportError>;
}

/// Writes the scene as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonSceneSink {
    path: PathBuf,
}

impl JsonSceneSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreviewSink for JsonSceneSink {
    fn preview(&mut self, scene: &PreviewScene) -> Result<(), ExportError> {
        let json = scene.to_json()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        fs::write(&self.path, json).map_err(|e| io_error(&self.path, e))?;
        info!(path = %self.path.display(), items = scene.items.len(), "preview written");
        Ok(())
    }
}
