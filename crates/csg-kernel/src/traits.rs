use enclosure_types::{Aabb, SketchPlane, SketchProfile};

use crate::types::*;

/// Solid-modeling kernel used by layout and synthesis.
/// Implemented by TruckKernel (real B-rep) and MockKernel (deterministic test double).
///
/// Primitives are created in their natural frame and moved with [`Kernel::place`]:
/// boxes span `[0, size]`, cylinders and cones stand on the XY plane centered on Z.
pub trait Kernel {
    /// Axis-aligned box with its minimum corner at the origin.
    fn make_box(&mut self, size: [f64; 3]) -> Result<KernelSolidHandle, KernelError>;

    /// Cylinder with its base centered at the origin, extending along +Z.
    fn make_cylinder(&mut self, radius: f64, height: f64)
        -> Result<KernelSolidHandle, KernelError>;

    /// Truncated cone with its base centered at the origin, extending along +Z.
    fn make_cone(
        &mut self,
        bottom_radius: f64,
        top_radius: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Coaxial frusta stacked bottom-up from the origin along +Z, built as
    /// one solid of revolution. Only the top radius of the last tier may be zero.
    fn make_stack(&mut self, tiers: &[Tier]) -> Result<KernelSolidHandle, KernelError>;

    /// Register a closed planar profile for later extrusion.
    fn make_sketch(
        &mut self,
        profile: &SketchProfile,
        plane: SketchPlane,
    ) -> Result<KernelId, KernelError>;

    /// Round every corner of a sketch. Consumes the input sketch.
    fn fillet_sketch(&mut self, sketch: KernelId, radius: f64) -> Result<KernelId, KernelError>;

    /// Extrude a sketch along its plane normal. With `both`, the solid spans
    /// `distance` on each side of the plane. Consumes the sketch.
    fn extrude(
        &mut self,
        sketch: KernelId,
        distance: f64,
        both: bool,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean union of two solids.
    fn union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean subtraction: a minus b.
    fn subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Group solids without boolean evaluation. Only for non-fabricated geometry.
    fn compound(&mut self, parts: &[KernelSolidHandle]) -> Result<KernelSolidHandle, KernelError>;

    /// Copy of `solid` translated by `offset`.
    fn place(
        &mut self,
        solid: &KernelSolidHandle,
        offset: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Axis-aligned bounds of a solid.
    fn bounding_box(&self, solid: &KernelSolidHandle) -> Result<Aabb, KernelError>;

    /// Tessellate a solid to a triangle mesh.
    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError>;
}
