//! Parametric enclosure generation: dimensions in, case body and fascia lid
//! meshes out.

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::{EnclosureConfig, ExportSettings, CONFIG_FILE_NAME};
pub use error::EnclosureError;
pub use pipeline::{
    build_preview_scene, export, generate, preview, run, GeneratedEnclosure, RunSummary,
    PREVIEW_FILE_NAME,
};
