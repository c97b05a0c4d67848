//! Declarative solids: a primitive plus the anchor that places it.

use enclosure_types::{Aabb, Anchor, PlaneKind, SketchPlane, SketchProfile};
use serde::{Deserialize, Serialize};

use crate::traits::Kernel;
use crate::types::{KernelError, KernelSolidHandle, Tier};

/// A solid in its natural frame, before placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Primitive {
    Box {
        size: [f64; 3],
    },
    Cylinder {
        radius: f64,
        height: f64,
    },
    /// Coaxial frusta, bottom tier first.
    Stack {
        tiers: Vec<Tier>,
    },
    /// Profile sketched on a plane through the origin and swept along its normal.
    Extrusion {
        profile: SketchProfile,
        plane: PlaneKind,
        fillet: f64,
        distance: f64,
        symmetric: bool,
    },
}

impl Primitive {
    pub fn block(size: [f64; 3]) -> Self {
        Primitive::Box { size }
    }

    pub fn cylinder(radius: f64, height: f64) -> Self {
        Primitive::Cylinder { radius, height }
    }

    /// Bounds in the primitive's own frame.
    pub fn local_bounds(&self) -> Aabb {
        match self {
            Primitive::Box { size } => Aabb::from_size(*size),
            Primitive::Cylinder { radius, height } => round_bounds(*radius, *height),
            Primitive::Stack { tiers } => round_bounds(
                tiers.iter().map(Tier::max_radius).fold(0.0, f64::max),
                tiers.iter().map(|t| t.height).sum(),
            ),
            Primitive::Extrusion {
                profile,
                plane,
                distance,
                symmetric,
                ..
            } => extrusion_bounds(
                profile,
                &SketchPlane::new(*plane, [0.0; 3]),
                *distance,
                *symmetric,
            ),
        }
    }

    /// Create the primitive in the kernel, unplaced.
    pub fn build(&self, kernel: &mut dyn Kernel) -> Result<KernelSolidHandle, KernelError> {
        match self {
            Primitive::Box { size } => kernel.make_box(*size),
            Primitive::Cylinder { radius, height } => kernel.make_cylinder(*radius, *height),
            Primitive::Stack { tiers } => kernel.make_stack(tiers),
            Primitive::Extrusion {
                profile,
                plane,
                fillet,
                distance,
                symmetric,
            } => {
                let mut sketch = kernel.make_sketch(profile, SketchPlane::new(*plane, [0.0; 3]))?;
                if *fillet > 0.0 {
                    sketch = kernel.fillet_sketch(sketch, *fillet)?;
                }
                kernel.extrude(sketch, *distance, *symmetric)
            }
        }
    }
}

fn round_bounds(radius: f64, height: f64) -> Aabb {
    Aabb::new([-radius, -radius, 0.0], [radius, radius, height])
}

/// World bounds of a profile on `plane` swept `distance` along the normal,
/// or `distance` each way when `both`.
pub fn extrusion_bounds(
    profile: &SketchProfile,
    plane: &SketchPlane,
    distance: f64,
    both: bool,
) -> Aabb {
    let (min, max) = profile.bounds();
    let w_range = if both {
        [-distance, distance]
    } else {
        [0.0, distance]
    };
    let mut corners = Vec::with_capacity(8);
    for u in [min[0], max[0]] {
        for v in [min[1], max[1]] {
            for w in w_range {
                corners.push(plane.to_world([u, v], w));
            }
        }
    }
    Aabb::from_points(&corners).unwrap_or_else(|| Aabb::new(plane.origin, plane.origin))
}

/// A primitive bound to its anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub primitive: Primitive,
    pub anchor: Anchor,
}

impl Part {
    pub fn new(primitive: Primitive, anchor: Anchor) -> Self {
        Self { primitive, anchor }
    }

    /// World-space bounds once placed.
    pub fn bounds(&self) -> Aabb {
        let local = self.primitive.local_bounds();
        local.translated(self.anchor.translation_for(&local))
    }

    /// Build the primitive and move it onto its anchor.
    pub fn realize(&self, kernel: &mut dyn Kernel) -> Result<KernelSolidHandle, KernelError> {
        let local = self.primitive.local_bounds();
        let solid = self.primitive.build(kernel)?;
        kernel.place(&solid, self.anchor.translation_for(&local))
    }
}
