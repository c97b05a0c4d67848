//! Registry → layout → ghosts → synthesis → tessellation → sinks.

use std::path::PathBuf;

use csg_kernel::{Kernel, RenderMesh};
use export_sink::{
    ExportSink, JsonSceneSink, PreviewItem, PreviewRole, PreviewScene, PreviewSink, StlFileSink,
};
use feature_synth::body::BODY_NAME;
use feature_synth::lid::LID_NAME;
use feature_synth::{synthesize, tessellate_closed, Enclosure, SynthError};
use footprint_registry::{DimensionSet, FootprintRegistry};
use layout_engine::{build_ghosts, resolve_layout, GhostAssembly, Layout};
use tracing::{info, warn};

use crate::config::EnclosureConfig;
use crate::error::EnclosureError;

pub const PREVIEW_FILE_NAME: &str = "preview.json";

/// Everything one generation run produced, still in memory.
#[derive(Debug, Clone)]
pub struct GeneratedEnclosure {
    pub layout: Layout,
    pub ghosts: GhostAssembly,
    pub solids: Enclosure,
    pub body: RenderMesh,
    pub lid: RenderMesh,
}

/// Validate, lay out and build both solids. No kernel call is made until the
/// dimension set and layout have been accepted.
pub fn generate(
    dims: &DimensionSet,
    kernel: &mut dyn Kernel,
    tolerance: f64,
) -> Result<GeneratedEnclosure, EnclosureError> {
    let registry = FootprintRegistry::new(dims.clone())?;
    let layout = resolve_layout(&registry)?;

    let ghosts = build_ghosts(&layout, kernel).map_err(|source| SynthError::Geometry {
        feature: "ghosts".to_string(),
        source,
    })?;
    let solids = synthesize(&layout, kernel)?;
    let body = tessellate_closed(kernel, &solids.body, BODY_NAME, tolerance)?;
    let lid = tessellate_closed(kernel, &solids.lid, LID_NAME, tolerance)?;

    info!(
        body_triangles = body.triangle_count(),
        lid_triangles = lid.triangle_count(),
        "enclosure generated"
    );
    Ok(GeneratedEnclosure {
        layout,
        ghosts,
        solids,
        body,
        lid,
    })
}

/// Hand both meshes to `sink`. A failure leaves `generated` untouched so the
/// caller can retry with another sink.
pub fn export(
    generated: &GeneratedEnclosure,
    sink: &mut dyn ExportSink,
) -> Result<(), EnclosureError> {
    sink.export_mesh(&generated.body, BODY_NAME)?;
    sink.export_mesh(&generated.lid, LID_NAME)?;
    Ok(())
}

/// Body, lid raised onto the rim, and every ghost.
pub fn build_preview_scene(
    generated: &GeneratedEnclosure,
    kernel: &mut dyn Kernel,
    tolerance: f64,
) -> Result<PreviewScene, EnclosureError> {
    let mut scene = PreviewScene::new();
    scene.push(PreviewItem::new(
        BODY_NAME,
        PreviewRole::Body,
        generated.body.clone(),
    ));
    scene.push(
        PreviewItem::new(LID_NAME, PreviewRole::Lid, generated.lid.clone())
            .raised(generated.layout.envelope.depth),
    );
    for (name, solid) in &generated.ghosts.volumes {
        let mesh = kernel
            .tessellate(solid, tolerance)
            .map_err(|source| SynthError::Geometry {
                feature: name.clone(),
                source,
            })?;
        scene.push(PreviewItem::new(name.clone(), PreviewRole::Ghost, mesh));
    }
    Ok(scene)
}

/// Build and deliver the preview. Failures are logged and reported as
/// `false`; they never touch exported artifacts.
pub fn preview(
    generated: &GeneratedEnclosure,
    kernel: &mut dyn Kernel,
    sink: &mut dyn PreviewSink,
    tolerance: f64,
) -> bool {
    let delivered = build_preview_scene(generated, kernel, tolerance)
        .and_then(|scene| sink.preview(&scene).map_err(EnclosureError::from));
    match delivered {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "preview failed");
            false
        }
    }
}

/// What a full run left on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub stl_files: Vec<PathBuf>,
    pub preview: Option<PathBuf>,
}

/// Generate, write both STL files and, when enabled, the preview scene.
pub fn run(
    config: &EnclosureConfig,
    kernel: &mut dyn Kernel,
) -> Result<RunSummary, EnclosureError> {
    let settings = &config.export;
    let generated = generate(&config.dimensions, kernel, settings.tessellation_tolerance)?;

    let mut sink = StlFileSink::new(&settings.output_dir, settings.stl_format);
    export(&generated, &mut sink)?;

    let preview_path = settings.output_dir.join(PREVIEW_FILE_NAME);
    let previewed = settings.preview
        && preview(
            &generated,
            kernel,
            &mut JsonSceneSink::new(&preview_path),
            settings.tessellation_tolerance,
        );

    Ok(RunSummary {
        stl_files: sink.written().to_vec(),
        preview: previewed.then_some(preview_path),
    })
}
