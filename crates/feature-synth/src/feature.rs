use csg_kernel::{Kernel, KernelError, KernelSolidHandle, Part};
use enclosure_types::Aabb;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::SynthError;
use crate::registration::Registration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Shell,
    Post,
    Standoff,
    Fence,
    Pad,
    Plate,
}

/// A void with the rule it must satisfy against its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cutter {
    pub name: String,
    pub part: Part,
    pub registration: Registration,
}

impl Cutter {
    pub fn new(name: impl Into<String>, part: Part, registration: Registration) -> Self {
        Self {
            name: name.into(),
            part,
            registration,
        }
    }
}

/// One fabrication-relevant structure: additive parts, then local voids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub kind: FeatureKind,
    pub additive: Vec<Part>,
    pub voids: Vec<Cutter>,
}

impl Feature {
    pub fn new(name: impl Into<String>, kind: FeatureKind) -> Self {
        Self {
            name: name.into(),
            kind,
            additive: Vec::new(),
            voids: Vec::new(),
        }
    }

    pub fn with_part(mut self, part: Part) -> Self {
        self.additive.push(part);
        self
    }

    pub fn with_void(mut self, cutter: Cutter) -> Self {
        self.voids.push(cutter);
        self
    }

    /// Bounds of the additive material.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::union_all(self.additive.iter().map(Part::bounds))
    }

    /// Every local void must register against this feature's own material.
    pub fn check_voids(&self) -> Result<(), SynthError> {
        let Some(host) = self.bounds() else {
            return Err(SynthError::EmptyAssembly {
                name: self.name.clone(),
            });
        };
        for void in &self.voids {
            void.registration
                .check(&void.part.bounds(), &host)
                .map_err(|reason| SynthError::Misregistered {
                    feature: self.name.clone(),
                    cutter: void.name.clone(),
                    reason,
                })?;
        }
        Ok(())
    }

    /// Union the additive parts, then subtract every local void.
    pub fn realize(&self, kernel: &mut dyn Kernel) -> Result<KernelSolidHandle, SynthError> {
        let solid = self
            .build(kernel)
            .map_err(SynthError::geometry(&self.name))?;
        debug!(feature = %self.name, kind = ?self.kind, "feature realized");
        Ok(solid)
    }

    fn build(&self, kernel: &mut dyn Kernel) -> Result<KernelSolidHandle, KernelError> {
        let mut parts = self.additive.iter();
        let first = parts.next().ok_or_else(|| KernelError::Degenerate {
            operation: "feature",
            reason: "no additive parts".to_string(),
        })?;
        let mut solid = first.realize(kernel)?;
        for part in parts {
            let next = part.realize(kernel)?;
            solid = kernel.union(&solid, &next)?;
        }
        for void in &self.voids {
            let cutter = void.part.realize(kernel)?;
            solid = kernel.subtract(&solid, &cutter)?;
            debug!(feature = %self.name, void = %void.name, "void cut");
        }
        Ok(solid)
    }
}
