//! TruckKernel: real geometry kernel wrapping truck's API.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use enclosure_types::{Aabb, SketchPlane, SketchProfile};
use truck_modeling::builder;
use truck_modeling::topology::Solid;
use truck_modeling::Vector3;
use tracing::warn;

use crate::checks;
use crate::primitives;
use crate::tessellation;
use crate::traits::Kernel;
use crate::types::*;

/// Tolerance handed to truck-shapeops for boolean evaluation.
const BOOLEAN_TOLERANCE: f64 = 0.05;
/// Chord tolerance for the tessellation behind `bounding_box`.
const BOUNDS_TOLERANCE: f64 = 0.01;

/// A profile waiting to be extruded.
#[derive(Debug, Clone)]
struct PendingSketch {
    outline: Vec<[f64; 2]>,
    profile: SketchProfile,
    plane: SketchPlane,
    fillet: f64,
}

/// Real geometry kernel backed by the truck BREP library.
pub struct TruckKernel {
    next_handle: u64,
    next_id: u64,
    solids: HashMap<u64, Solid>,
    sketches: HashMap<u64, PendingSketch>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            next_id: 1,
            solids: HashMap::new(),
            sketches: HashMap::new(),
        }
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    fn alloc_id(&mut self) -> KernelId {
        let id = KernelId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn store_solid(&mut self, solid: Solid) -> KernelSolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        handle
    }

    fn solid(&self, handle: &KernelSolidHandle) -> Result<&Solid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or(KernelError::EntityNotFound {
                id: KernelId(handle.id()),
            })
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for TruckKernel {
    fn make_box(&mut self, size: [f64; 3]) -> Result<KernelSolidHandle, KernelError> {
        checks::box_size(size)?;
        Ok(self.store_solid(primitives::make_box(size[0], size[1], size[2])))
    }

    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        checks::positive("make_cylinder", "radius", radius)?;
        checks::positive("make_cylinder", "height", height)?;
        let solid = primitives::make_cylinder(radius, height)?;
        Ok(self.store_solid(solid))
    }

    fn make_cone(
        &mut self,
        bottom_radius: f64,
        top_radius: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        checks::cone(bottom_radius, top_radius, height)?;
        let solid = primitives::make_cone(bottom_radius, top_radius, height)?;
        Ok(self.store_solid(solid))
    }

    fn make_stack(&mut self, tiers: &[Tier]) -> Result<KernelSolidHandle, KernelError> {
        checks::stack(tiers)?;
        let solid = primitives::make_stack(tiers)?;
        Ok(self.store_solid(solid))
    }

    fn make_sketch(
        &mut self,
        profile: &SketchProfile,
        plane: SketchPlane,
    ) -> Result<KernelId, KernelError> {
        checks::profile(profile)?;
        let id = self.alloc_id();
        self.sketches.insert(
            id.0,
            PendingSketch {
                outline: profile.outline(),
                profile: profile.clone(),
                plane,
                fillet: 0.0,
            },
        );
        Ok(id)
    }

    fn fillet_sketch(&mut self, sketch: KernelId, radius: f64) -> Result<KernelId, KernelError> {
        let mut pending = self
            .sketches
            .remove(&sketch.0)
            .ok_or(KernelError::EntityNotFound { id: sketch })?;
        checks::fillet(&pending.profile, radius)?;
        pending.fillet = radius;
        let id = self.alloc_id();
        self.sketches.insert(id.0, pending);
        Ok(id)
    }

    fn extrude(
        &mut self,
        sketch: KernelId,
        distance: f64,
        both: bool,
    ) -> Result<KernelSolidHandle, KernelError> {
        checks::positive("extrude", "distance", distance)?;
        let pending = self
            .sketches
            .remove(&sketch.0)
            .ok_or(KernelError::EntityNotFound { id: sketch })?;

        let (lift, span) = if both {
            (-distance, 2.0 * distance)
        } else {
            (0.0, distance)
        };
        let face =
            primitives::make_profile_face(&pending.outline, pending.fillet, &pending.plane, lift)?;
        let n = pending.plane.kind.normal();
        let sweep = Vector3::new(n[0], n[1], n[2]) * span;

        let solid = builder::tsweep(&face, sweep);
        Ok(self.store_solid(solid))
    }

    fn union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.solid(a)?;
        let solid_b = self.solid(b)?;
        let result = guarded("or", solid_a, solid_b, |x, y| {
            truck_shapeops::or(x, y, BOOLEAN_TOLERANCE)
        })?;
        Ok(self.store_solid(result))
    }

    fn subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.solid(a)?;
        let mut solid_b = self.solid(b)?.clone();

        // Subtraction = A ∩ ¬B. not() mutates in place.
        solid_b.not();
        let result = guarded("and", solid_a, &solid_b, |x, y| {
            truck_shapeops::and(x, y, BOOLEAN_TOLERANCE)
        })?;
        Ok(self.store_solid(result))
    }

    fn compound(&mut self, parts: &[KernelSolidHandle]) -> Result<KernelSolidHandle, KernelError> {
        if parts.is_empty() {
            return Err(KernelError::Degenerate {
                operation: "compound",
                reason: "no solids to group".to_string(),
            });
        }
        let mut shells = Vec::new();
        for part in parts {
            shells.extend(self.solid(part)?.boundaries().iter().cloned());
        }
        // Shells may overlap; the result is never fed to a boolean.
        let grouped: Solid = truck_topology::Solid::new_unchecked(shells);
        Ok(self.store_solid(grouped))
    }

    fn place(
        &mut self,
        solid: &KernelSolidHandle,
        offset: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        let moved = builder::translated(
            self.solid(solid)?,
            Vector3::new(offset[0], offset[1], offset[2]),
        );
        Ok(self.store_solid(moved))
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Result<Aabb, KernelError> {
        let points = tessellation::sample_points(self.solid(solid)?, BOUNDS_TOLERANCE);
        Aabb::from_points(&points).ok_or_else(|| KernelError::TessellationFailed {
            reason: "solid has no sample points".to_string(),
        })
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        tessellation::tessellate_solid(self.solid(solid)?, tolerance)
    }
}

/// Run a truck boolean, turning every way it can give up into `BooleanFailed`.
///
/// truck-shapeops unwraps internally on degenerate input, so a panic inside
/// the call is caught here instead of taking the whole build down.
fn guarded<F>(name: &str, a: &Solid, b: &Solid, op: F) -> Result<Solid, KernelError>
where
    F: FnOnce(&Solid, &Solid) -> Option<Solid>,
{
    if a.boundaries().is_empty() || b.boundaries().is_empty() {
        return Err(KernelError::BooleanFailed {
            reason: format!("truck {name}() given a solid without shells"),
        });
    }
    match panic::catch_unwind(AssertUnwindSafe(|| op(a, b))) {
        Ok(Some(solid)) if !solid.boundaries().is_empty() => Ok(solid),
        Ok(Some(_)) => Err(KernelError::BooleanFailed {
            reason: format!("truck {name}() produced no shells"),
        }),
        Ok(None) => Err(KernelError::BooleanFailed {
            reason: format!("truck {name}() returned None"),
        }),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            warn!(operation = name, %message, "truck boolean panicked");
            Err(KernelError::BooleanFailed {
                reason: format!("truck {name}() panicked: {message}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::check_closed;
    use approx::assert_relative_eq;
    use enclosure_types::PlaneKind;

    #[test]
    fn test_extruded_rectangle_has_six_faces() {
        let mut kernel = TruckKernel::new();
        let sketch = kernel
            .make_sketch(&SketchProfile::rectangle(2.0, 1.0), SketchPlane::xy())
            .unwrap();
        let handle = kernel.extrude(sketch, 2.0, false).unwrap();

        let solid = kernel.solid(&handle).unwrap();
        let boundaries = solid.boundaries();
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].face_iter().count(), 6);
    }

    #[test]
    fn test_extrude_consumes_sketch() {
        let mut kernel = TruckKernel::new();
        let sketch = kernel
            .make_sketch(&SketchProfile::rectangle(2.0, 1.0), SketchPlane::xy())
            .unwrap();
        kernel.extrude(sketch, 1.0, false).unwrap();
        assert!(matches!(
            kernel.extrude(sketch, 1.0, false),
            Err(KernelError::EntityNotFound { .. })
        ));
    }

    #[test]
    fn test_symmetric_extrusion_bounds() {
        let mut kernel = TruckKernel::new();
        let plane = SketchPlane::new(PlaneKind::YZ, [10.0, 0.0, 5.0]);
        let sketch = kernel
            .make_sketch(&SketchProfile::rectangle(4.0, 2.0), plane)
            .unwrap();
        let handle = kernel.extrude(sketch, 3.0, true).unwrap();
        let bounds = kernel.bounding_box(&handle).unwrap();
        assert_relative_eq!(bounds.min[0], 7.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max[0], 13.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.min[1], -2.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max[2], 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_place_moves_bounds() {
        let mut kernel = TruckKernel::new();
        let b = kernel.make_box([1.0, 2.0, 3.0]).unwrap();
        let moved = kernel.place(&b, [10.0, 0.0, -1.0]).unwrap();
        let bounds = kernel.bounding_box(&moved).unwrap();
        assert_relative_eq!(bounds.min[0], 10.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max[2], 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_box_tessellation_is_closed() {
        let mut kernel = TruckKernel::new();
        let b = kernel.make_box([1.0, 1.0, 1.0]).unwrap();
        let mesh = kernel.tessellate(&b, 0.1).unwrap();
        assert!(!mesh.indices.is_empty());
        assert_eq!(mesh.normals.len(), mesh.vertices.len());
        check_closed(&mesh).unwrap();
    }

    #[test]
    fn test_box_minus_through_hole() {
        let mut kernel = TruckKernel::new();
        let block = kernel.make_box([10.0, 10.0, 4.0]).unwrap();
        let pin = kernel.make_box([2.0, 2.0, 6.0]).unwrap();
        let pin = kernel.place(&pin, [4.0, 4.0, -1.0]).unwrap();
        let result = kernel.subtract(&block, &pin).unwrap();
        let bounds = kernel.bounding_box(&result).unwrap();
        assert_relative_eq!(bounds.max[0], 10.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max[2], 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_stepped_stack_unions_with_floor_plate() {
        // Shoulder plus pin sunk into a plate, as the display standoffs are.
        let mut kernel = TruckKernel::new();
        let plate = kernel.make_box([20.0, 20.0, 2.0]).unwrap();
        let stack = kernel
            .make_stack(&[
                Tier {
                    bottom_radius: 6.0,
                    top_radius: 3.0,
                    height: 10.5,
                },
                Tier::cylinder(1.0, 2.0),
            ])
            .unwrap();
        let stack = kernel.place(&stack, [10.0, 10.0, 1.5]).unwrap();
        let joined = kernel.union(&plate, &stack).unwrap();
        let bounds = kernel.bounding_box(&joined).unwrap();
        assert_relative_eq!(bounds.max[2], 14.0, epsilon = 1e-6);
        let mesh = kernel.tessellate(&joined, 0.05).unwrap();
        check_closed(&mesh).unwrap();
    }

    #[test]
    fn test_stepped_bore_through_plate() {
        // Counterbore over a clearance shaft, cut as one solid.
        let mut kernel = TruckKernel::new();
        let plate = kernel.make_box([12.0, 12.0, 4.0]).unwrap();
        let bore = kernel
            .make_stack(&[Tier::cylinder(1.5, 3.0), Tier::cylinder(2.7, 2.0)])
            .unwrap();
        let bore = kernel.place(&bore, [6.0, 6.0, -0.5]).unwrap();
        let drilled = kernel.subtract(&plate, &bore).unwrap();
        let mesh = kernel.tessellate(&drilled, 0.05).unwrap();
        check_closed(&mesh).unwrap();
        assert_relative_eq!(mesh.bounds().unwrap().max[0], 12.0, epsilon = 1e-4);
    }

    #[test]
    fn test_boolean_on_shell_less_solid_is_an_error() {
        let mut kernel = TruckKernel::new();
        let b = kernel.make_box([1.0, 1.0, 1.0]).unwrap();
        let empty = kernel.store_solid(Solid::new_unchecked(Vec::new()));
        assert!(matches!(
            kernel.union(&b, &empty),
            Err(KernelError::BooleanFailed { .. })
        ));
        assert!(matches!(
            kernel.subtract(&empty, &b),
            Err(KernelError::BooleanFailed { .. })
        ));
    }

    #[test]
    fn test_panicking_boolean_becomes_an_error() {
        let mut kernel = TruckKernel::new();
        let a = kernel.make_box([1.0, 1.0, 1.0]).unwrap();
        let solid = kernel.solid(&a).unwrap();
        let result = guarded("or", solid, solid, |_, _| panic!("unwrap on None"));
        match result {
            Err(KernelError::BooleanFailed { reason }) => assert!(reason.contains("unwrap on None")),
            other => panic!("expected BooleanFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_box_rejected() {
        let mut kernel = TruckKernel::new();
        assert!(matches!(
            kernel.make_box([1.0, 0.0, 1.0]),
            Err(KernelError::Degenerate { .. })
        ));
    }

    #[test]
    fn test_compound_keeps_every_shell() {
        let mut kernel = TruckKernel::new();
        let a = kernel.make_box([1.0, 1.0, 1.0]).unwrap();
        let b = kernel.make_box([1.0, 1.0, 1.0]).unwrap();
        let b = kernel.place(&b, [0.5, 0.0, 0.0]).unwrap();
        let grouped = kernel.compound(&[a, b]).unwrap();
        assert_eq!(kernel.solid(&grouped).unwrap().boundaries().len(), 2);
        let bounds = kernel.bounding_box(&grouped).unwrap();
        assert_relative_eq!(bounds.max[0], 1.5, epsilon = 1e-6);
    }
}
