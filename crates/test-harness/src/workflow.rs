//! EnclosureRun: fluent API for driving the generation pipeline in tests.
//!
//! Wraps `enclosure::generate` so tests exercise the real pipeline, not a
//! simulation. The kernel stays owned by the result for follow-up queries.

use csg_kernel::{Kernel, MockFailure, MockKernel, MockOp, TruckKernel};
use enclosure_types::Aabb;
use enclosure::{build_preview_scene, export, generate, EnclosureError, GeneratedEnclosure};
use export_sink::{MemorySink, PreviewScene, StlFormat};
use feature_synth::{build_body, build_lid};
use footprint_registry::DimensionSet;
use layout_engine::Layout;

use crate::assertions::assert_verdicts;
use crate::helpers::HarnessError;
use crate::oracle::{self, OracleVerdict};

/// Bounds agreement between a mesh and the analytic plan.
pub const MESH_BOUNDS_TOL: f64 = 0.05;

/// A fluent builder for one generation run.
pub struct EnclosureRun<K: Kernel> {
    dims: DimensionSet,
    kernel: K,
    tolerance: f64,
}

impl EnclosureRun<MockKernel> {
    /// Deterministic and fast; records every kernel operation.
    pub fn mock() -> Self {
        Self::with_kernel(MockKernel::new())
    }

    /// MockKernel that fails the given boolean.
    pub fn failing(failure: MockFailure) -> Self {
        Self::with_kernel(MockKernel::failing(failure))
    }
}

impl EnclosureRun<TruckKernel> {
    /// Real B-rep geometry.
    pub fn truck() -> Self {
        Self::with_kernel(TruckKernel::new())
    }
}

impl<K: Kernel> EnclosureRun<K> {
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            dims: DimensionSet::default(),
            kernel,
            tolerance: 0.05,
        }
    }

    pub fn dims(mut self, dims: DimensionSet) -> Self {
        self.dims = dims;
        self
    }

    /// Adjust the current dimension set in place.
    pub fn tweak(mut self, f: impl FnOnce(&mut DimensionSet)) -> Self {
        f(&mut self.dims);
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Run the pipeline. On failure the raw pipeline error is returned so
    /// tests can match on it.
    pub fn generate(mut self) -> Result<Generated<K>, EnclosureError> {
        let enclosure = generate(&self.dims, &mut self.kernel, self.tolerance)?;
        Ok(Generated {
            kernel: self.kernel,
            enclosure,
            tolerance: self.tolerance,
        })
    }
}

/// A successful run plus the kernel session that produced it.
pub struct Generated<K: Kernel> {
    pub kernel: K,
    pub enclosure: GeneratedEnclosure,
    tolerance: f64,
}

impl<K: Kernel> Generated<K> {
    pub fn layout(&self) -> &Layout {
        &self.enclosure.layout
    }

    /// Analytic bounds of the body and lid plans.
    pub fn planned_bounds(&self) -> Result<(Aabb, Aabb), HarnessError> {
        let body = build_body(self.layout()).bounds();
        let lid = build_lid(self.layout()).bounds();
        body.zip(lid).ok_or_else(|| HarnessError::NotFound {
            name: "planned bounds".to_string(),
        })
    }

    /// Every mesh and layout oracle.
    pub fn oracles(&self) -> Result<Vec<OracleVerdict>, HarnessError> {
        let (body, lid) = self.planned_bounds()?;
        let mut verdicts = oracle::layout_oracles(self.layout());
        verdicts.extend(oracle::mesh_oracles(&self.enclosure.body, &body, MESH_BOUNDS_TOL));
        verdicts.extend(oracle::mesh_oracles(&self.enclosure.lid, &lid, MESH_BOUNDS_TOL));
        Ok(verdicts)
    }

    pub fn assert_oracles(&self) -> Result<(), HarnessError> {
        assert_verdicts(&self.oracles()?, "enclosure")
    }

    /// Encode both meshes in memory.
    pub fn stl(&self, format: StlFormat) -> Result<MemorySink, HarnessError> {
        let mut sink = MemorySink::new(format);
        export(&self.enclosure, &mut sink)?;
        Ok(sink)
    }

    pub fn preview_scene(&mut self) -> Result<PreviewScene, HarnessError> {
        Ok(build_preview_scene(
            &self.enclosure,
            &mut self.kernel,
            self.tolerance,
        )?)
    }
}

impl Generated<MockKernel> {
    pub fn history(&self) -> &[MockOp] {
        self.kernel.history()
    }
}
