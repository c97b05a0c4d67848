use csg_kernel::{check_closed, Kernel, KernelSolidHandle, RenderMesh};
use enclosure_types::Aabb;
use tracing::debug;

use crate::errors::SynthError;
use crate::feature::{Cutter, Feature};

/// Features and cutters of one fabricable solid.
///
/// Realization is always: every feature built on its own, all features
/// unioned, then every cutter subtracted. Insertion order never changes
/// which material a void removes.
#[derive(Debug, Clone, PartialEq)]
pub struct SubAssembly {
    pub name: String,
    pub features: Vec<Feature>,
    pub cutters: Vec<Cutter>,
}

impl SubAssembly {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: Vec::new(),
            cutters: Vec::new(),
        }
    }

    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn add_cutter(&mut self, cutter: Cutter) {
        self.cutters.push(cutter);
    }

    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }

    pub fn cutter(&self, name: &str) -> Option<&Cutter> {
        self.cutters.iter().find(|c| c.name == name)
    }

    /// Bounds of all additive material.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::union_all(self.features.iter().filter_map(Feature::bounds))
    }

    /// Check every void's registration without touching the kernel.
    pub fn validate(&self) -> Result<(), SynthError> {
        let host = self.bounds().ok_or_else(|| SynthError::EmptyAssembly {
            name: self.name.clone(),
        })?;
        for feature in &self.features {
            feature.check_voids()?;
        }
        for cutter in &self.cutters {
            cutter
                .registration
                .check(&cutter.part.bounds(), &host)
                .map_err(|reason| SynthError::Misregistered {
                    feature: self.name.clone(),
                    cutter: cutter.name.clone(),
                    reason,
                })?;
        }
        Ok(())
    }

    pub fn realize(&self, kernel: &mut dyn Kernel) -> Result<KernelSolidHandle, SynthError> {
        self.validate()?;

        let mut built = Vec::with_capacity(self.features.len());
        for feature in &self.features {
            built.push((feature.name.as_str(), feature.realize(kernel)?));
        }

        let mut built = built.into_iter();
        let Some((_, mut solid)) = built.next() else {
            return Err(SynthError::EmptyAssembly {
                name: self.name.clone(),
            });
        };
        for (name, next) in built {
            solid = kernel
                .union(&solid, &next)
                .map_err(SynthError::geometry(name))?;
        }

        for cutter in &self.cutters {
            let void = cutter
                .part
                .realize(kernel)
                .map_err(SynthError::geometry(&cutter.name))?;
            solid = kernel
                .subtract(&solid, &void)
                .map_err(SynthError::geometry(&cutter.name))?;
            debug!(assembly = %self.name, cutter = %cutter.name, "cutter subtracted");
        }

        debug!(
            assembly = %self.name,
            features = self.features.len(),
            cutters = self.cutters.len(),
            "sub-assembly realized"
        );
        Ok(solid)
    }
}

/// Tessellate a final solid and insist that it is watertight.
pub fn tessellate_closed(
    kernel: &mut dyn Kernel,
    solid: &KernelSolidHandle,
    name: &str,
    tolerance: f64,
) -> Result<RenderMesh, SynthError> {
    let mesh = kernel
        .tessellate(solid, tolerance)
        .map_err(SynthError::geometry(name))?;
    check_closed(&mesh).map_err(|source| SynthError::NotClosed {
        solid: name.to_string(),
        source,
    })?;
    Ok(mesh)
}
