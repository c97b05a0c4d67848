//! Ghost volumes: non-fabricated stand-ins for each component.

use csg_kernel::{Kernel, KernelError, KernelSolidHandle, Part};
use enclosure_types::Aabb;
use footprint_registry::ComponentKind;
use tracing::debug;

use crate::layout::Layout;

/// Kernel bounds may differ from the analytic ones by the tessellation sag.
const BOUNDS_AGREEMENT: f64 = 0.05;

/// One component's ghost, possibly several sub-volumes.
#[derive(Debug, Clone, PartialEq)]
pub struct GhostVolume {
    pub component: ComponentKind,
    pub name: String,
    pub parts: Vec<Part>,
}

impl GhostVolume {
    pub fn new(component: ComponentKind, name: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            component,
            name: name.into(),
            parts,
        }
    }

    /// Analytic bounds over all sub-volumes.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::union_all(self.parts.iter().map(Part::bounds))
    }
}

/// Ghosts realized in a kernel session.
#[derive(Debug, Clone)]
pub struct GhostAssembly {
    /// Compound of every ghost, for preview.
    pub union: KernelSolidHandle,
    /// `(ghost name, solid)` in layout order.
    pub volumes: Vec<(String, KernelSolidHandle)>,
    pub bounds: Aabb,
}

/// Build every ghost and cross-check the kernel's bounds against the layout's.
pub fn build_ghosts(layout: &Layout, kernel: &mut dyn Kernel) -> Result<GhostAssembly, KernelError> {
    let mut volumes = Vec::with_capacity(layout.ghosts.len());
    for ghost in &layout.ghosts {
        let solids = ghost
            .parts
            .iter()
            .map(|p| p.realize(kernel))
            .collect::<Result<Vec<_>, _>>()?;
        let solid = match solids.as_slice() {
            [single] => single.clone(),
            _ => kernel.compound(&solids)?,
        };
        debug!(ghost = %ghost.name, "ghost realized");
        volumes.push((ghost.name.clone(), solid));
    }

    let handles: Vec<KernelSolidHandle> = volumes.iter().map(|(_, h)| h.clone()).collect();
    let union = kernel.compound(&handles)?;
    let bounds = kernel.bounding_box(&union)?;

    let expected = layout.envelope.ghost_bounds;
    let drift = (0..3)
        .map(|i| {
            (bounds.min[i] - expected.min[i])
                .abs()
                .max((bounds.max[i] - expected.max[i]).abs())
        })
        .fold(0.0, f64::max);
    if drift > BOUNDS_AGREEMENT {
        return Err(KernelError::Other {
            message: format!("ghost bounds disagree with the layout by {drift} mm"),
        });
    }

    Ok(GhostAssembly {
        union,
        volumes,
        bounds,
    })
}
