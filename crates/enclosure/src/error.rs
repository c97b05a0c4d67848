use export_sink::ExportError;
use feature_synth::SynthError;
use footprint_registry::ConfigError;

/// Top-level failure of a generation run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnclosureError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("geometry error: {0}")]
    Geometry(#[from] SynthError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),
}
