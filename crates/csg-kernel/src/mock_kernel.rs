//! MockKernel: deterministic test double implementing Kernel.
//!
//! Tracks analytic bounding boxes instead of B-rep topology and records every
//! call, so layout and synthesis can be tested without truck.

use std::collections::HashMap;

use enclosure_types::{Aabb, SketchPlane, SketchProfile};

use crate::checks;
use crate::part::extrusion_bounds;
use crate::traits::Kernel;
use crate::types::*;

/// One recorded kernel call. Handle and sketch numbers are the raw ids.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOp {
    MakeBox { out: u64 },
    MakeCylinder { out: u64 },
    MakeCone { out: u64 },
    MakeStack { tiers: usize, out: u64 },
    MakeSketch { sketch: u64 },
    FilletSketch { sketch: u64, radius: f64 },
    Extrude { sketch: u64, out: u64 },
    Union { a: u64, b: u64, out: u64 },
    Subtract { a: u64, b: u64, out: u64 },
    Compound { parts: Vec<u64>, out: u64 },
    Place { input: u64, out: u64 },
}

/// Injected failure for error-path tests. `nth` counts from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Union { nth: usize },
    Subtract { nth: usize },
}

#[derive(Debug, Clone)]
struct MockSketch {
    profile: SketchProfile,
    plane: SketchPlane,
}

/// Deterministic test double for the geometry kernel.
pub struct MockKernel {
    next_id: u64,
    next_handle: u64,
    solids: HashMap<u64, Aabb>,
    sketches: HashMap<u64, MockSketch>,
    history: Vec<MockOp>,
    failure: Option<MockFailure>,
    unions: usize,
    subtracts: usize,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            next_handle: 1,
            solids: HashMap::new(),
            sketches: HashMap::new(),
            history: Vec::new(),
            failure: None,
            unions: 0,
            subtracts: 0,
        }
    }

    /// A kernel that fails the given boolean.
    pub fn failing(failure: MockFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new()
        }
    }

    /// Every call made so far, in order.
    pub fn history(&self) -> &[MockOp] {
        &self.history
    }

    pub fn union_count(&self) -> usize {
        self.unions
    }

    pub fn subtract_count(&self) -> usize {
        self.subtracts
    }

    fn store(&mut self, bounds: Aabb) -> KernelSolidHandle {
        let handle = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        self.solids.insert(handle.id(), bounds);
        handle
    }

    fn lookup(&self, handle: &KernelSolidHandle) -> Result<Aabb, KernelError> {
        self.solids
            .get(&handle.id())
            .copied()
            .ok_or(KernelError::EntityNotFound {
                id: KernelId(handle.id()),
            })
    }

    fn alloc_sketch(&mut self, sketch: MockSketch) -> KernelId {
        let id = KernelId(self.next_id);
        self.next_id += 1;
        self.sketches.insert(id.0, sketch);
        id
    }

    fn take_sketch(&mut self, id: KernelId) -> Result<MockSketch, KernelError> {
        self.sketches
            .remove(&id.0)
            .ok_or(KernelError::EntityNotFound { id })
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for MockKernel {
    fn make_box(&mut self, size: [f64; 3]) -> Result<KernelSolidHandle, KernelError> {
        checks::box_size(size)?;
        let h = self.store(Aabb::from_size(size));
        self.history.push(MockOp::MakeBox { out: h.id() });
        Ok(h)
    }

    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        checks::positive("make_cylinder", "radius", radius)?;
        checks::positive("make_cylinder", "height", height)?;
        let h = self.store(Aabb::new(
            [-radius, -radius, 0.0],
            [radius, radius, height],
        ));
        self.history.push(MockOp::MakeCylinder { out: h.id() });
        Ok(h)
    }

    fn make_cone(
        &mut self,
        bottom_radius: f64,
        top_radius: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        checks::cone(bottom_radius, top_radius, height)?;
        let r = bottom_radius.max(top_radius);
        let h = self.store(Aabb::new([-r, -r, 0.0], [r, r, height]));
        self.history.push(MockOp::MakeCone { out: h.id() });
        Ok(h)
    }

    fn make_stack(&mut self, tiers: &[Tier]) -> Result<KernelSolidHandle, KernelError> {
        checks::stack(tiers)?;
        let r = tiers.iter().map(Tier::max_radius).fold(0.0, f64::max);
        let height: f64 = tiers.iter().map(|t| t.height).sum();
        let h = self.store(Aabb::new([-r, -r, 0.0], [r, r, height]));
        self.history.push(MockOp::MakeStack {
            tiers: tiers.len(),
            out: h.id(),
        });
        Ok(h)
    }

    fn make_sketch(
        &mut self,
        profile: &SketchProfile,
        plane: SketchPlane,
    ) -> Result<KernelId, KernelError> {
        checks::profile(profile)?;
        let id = self.alloc_sketch(MockSketch {
            profile: profile.clone(),
            plane,
        });
        self.history.push(MockOp::MakeSketch { sketch: id.0 });
        Ok(id)
    }

    fn fillet_sketch(&mut self, sketch: KernelId, radius: f64) -> Result<KernelId, KernelError> {
        let pending = self.take_sketch(sketch)?;
        checks::fillet(&pending.profile, radius)?;
        let id = self.alloc_sketch(pending);
        self.history.push(MockOp::FilletSketch {
            sketch: id.0,
            radius,
        });
        Ok(id)
    }

    fn extrude(
        &mut self,
        sketch: KernelId,
        distance: f64,
        both: bool,
    ) -> Result<KernelSolidHandle, KernelError> {
        checks::positive("extrude", "distance", distance)?;
        let pending = self.take_sketch(sketch)?;
        let bounds = extrusion_bounds(&pending.profile, &pending.plane, distance, both);
        let h = self.store(bounds);
        self.history.push(MockOp::Extrude {
            sketch: sketch.0,
            out: h.id(),
        });
        Ok(h)
    }

    fn union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let (ba, bb) = (self.lookup(a)?, self.lookup(b)?);
        self.unions += 1;
        if self.failure == Some(MockFailure::Union { nth: self.unions }) {
            return Err(KernelError::BooleanFailed {
                reason: format!("injected failure on union #{}", self.unions),
            });
        }
        let h = self.store(ba.merge(&bb));
        self.history.push(MockOp::Union {
            a: a.id(),
            b: b.id(),
            out: h.id(),
        });
        Ok(h)
    }

    fn subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let (ba, _) = (self.lookup(a)?, self.lookup(b)?);
        self.subtracts += 1;
        if self.failure == Some(MockFailure::Subtract { nth: self.subtracts }) {
            return Err(KernelError::BooleanFailed {
                reason: format!("injected failure on subtract #{}", self.subtracts),
            });
        }
        // Material removal never grows the bounds; the mock keeps them unchanged.
        let h = self.store(ba);
        self.history.push(MockOp::Subtract {
            a: a.id(),
            b: b.id(),
            out: h.id(),
        });
        Ok(h)
    }

    fn compound(&mut self, parts: &[KernelSolidHandle]) -> Result<KernelSolidHandle, KernelError> {
        let boxes = parts
            .iter()
            .map(|p| self.lookup(p))
            .collect::<Result<Vec<_>, _>>()?;
        let bounds = Aabb::union_all(boxes).ok_or_else(|| KernelError::Degenerate {
            operation: "compound",
            reason: "no solids to group".to_string(),
        })?;
        let h = self.store(bounds);
        self.history.push(MockOp::Compound {
            parts: parts.iter().map(|p| p.id()).collect(),
            out: h.id(),
        });
        Ok(h)
    }

    fn place(
        &mut self,
        solid: &KernelSolidHandle,
        offset: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        let moved = self.lookup(solid)?.translated(offset);
        let h = self.store(moved);
        self.history.push(MockOp::Place {
            input: solid.id(),
            out: h.id(),
        });
        Ok(h)
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Result<Aabb, KernelError> {
        self.lookup(solid)
    }

    /// A closed 12-triangle box over the tracked bounds.
    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        _tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        let b = self.lookup(solid)?;
        let c = b.center();
        let mut vertices = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        for z in [b.min[2], b.max[2]] {
            for (x, y) in [
                (b.min[0], b.min[1]),
                (b.max[0], b.min[1]),
                (b.max[0], b.max[1]),
                (b.min[0], b.max[1]),
            ] {
                vertices.extend([x as f32, y as f32, z as f32]);
                let d = [x - c[0], y - c[1], z - c[2]];
                let len = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt().max(1e-12);
                normals.extend([(d[0] / len) as f32, (d[1] / len) as f32, (d[2] / len) as f32]);
            }
        }
        let indices = vec![
            0, 2, 1, 0, 3, 2, // bottom
            4, 5, 6, 4, 6, 7, // top
            0, 1, 5, 0, 5, 4, // front
            3, 7, 6, 3, 6, 2, // back
            0, 4, 7, 0, 7, 3, // left
            1, 2, 6, 1, 6, 5, // right
        ];
        Ok(RenderMesh {
            vertices,
            normals,
            indices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::check_closed;
    use enclosure_types::PlaneKind;

    #[test]
    fn test_mock_box_and_place() {
        let mut k = MockKernel::new();
        let b = k.make_box([2.0, 3.0, 4.0]).unwrap();
        let moved = k.place(&b, [1.0, 1.0, 1.0]).unwrap();
        let bounds = k.bounding_box(&moved).unwrap();
        assert_eq!(bounds.min, [1.0, 1.0, 1.0]);
        assert_eq!(bounds.max, [3.0, 4.0, 5.0]);
        assert_eq!(
            k.history(),
            &[
                MockOp::MakeBox { out: 1 },
                MockOp::Place { input: 1, out: 2 }
            ]
        );
    }

    #[test]
    fn test_mock_union_merges_bounds() {
        let mut k = MockKernel::new();
        let a = k.make_box([1.0, 1.0, 1.0]).unwrap();
        let b = k.make_cylinder(1.0, 5.0).unwrap();
        let u = k.union(&a, &b).unwrap();
        let bounds = k.bounding_box(&u).unwrap();
        assert_eq!(bounds.min, [-1.0, -1.0, 0.0]);
        assert_eq!(bounds.max, [1.0, 1.0, 5.0]);
        assert_eq!(k.union_count(), 1);
    }

    #[test]
    fn test_mock_stack_spans_every_tier() {
        let mut k = MockKernel::new();
        let s = k
            .make_stack(&[
                Tier {
                    bottom_radius: 6.0,
                    top_radius: 3.0,
                    height: 43.8,
                },
                Tier::cylinder(1.0, 2.0),
            ])
            .unwrap();
        let bounds = k.bounding_box(&s).unwrap();
        assert_eq!(bounds.min, [-6.0, -6.0, 0.0]);
        assert!((bounds.max[2] - 45.8).abs() < 1e-12);
        assert_eq!(k.history(), &[MockOp::MakeStack { tiers: 2, out: 1 }]);
        assert!(matches!(
            k.make_stack(&[Tier::cylinder(1.0, 1.0), Tier::cylinder(0.0, 1.0)]),
            Err(KernelError::Degenerate { .. })
        ));
    }

    #[test]
    fn test_mock_subtract_keeps_minuend_bounds() {
        let mut k = MockKernel::new();
        let a = k.make_box([4.0, 4.0, 4.0]).unwrap();
        let b = k.make_box([10.0, 1.0, 1.0]).unwrap();
        let d = k.subtract(&a, &b).unwrap();
        assert_eq!(k.bounding_box(&d).unwrap(), Aabb::from_size([4.0, 4.0, 4.0]));
    }

    #[test]
    fn test_mock_injected_subtract_failure() {
        let mut k = MockKernel::failing(MockFailure::Subtract { nth: 2 });
        let a = k.make_box([4.0, 4.0, 4.0]).unwrap();
        let b = k.make_box([1.0, 1.0, 1.0]).unwrap();
        assert!(k.subtract(&a, &b).is_ok());
        assert!(matches!(
            k.subtract(&a, &b),
            Err(KernelError::BooleanFailed { .. })
        ));
    }

    #[test]
    fn test_mock_fillet_then_extrude() {
        let mut k = MockKernel::new();
        let plane = SketchPlane::new(PlaneKind::YZ, [71.0, 0.0, 7.65]);
        let s = k
            .make_sketch(&SketchProfile::rectangle(10.0, 4.5), plane)
            .unwrap();
        let s = k.fillet_sketch(s, 2.25).unwrap();
        let h = k.extrude(s, 20.0, true).unwrap();
        let b = k.bounding_box(&h).unwrap();
        assert_eq!(b.min[0], 51.0);
        assert_eq!(b.max[0], 91.0);
        assert_eq!(b.min[1], -5.0);
    }

    #[test]
    fn test_mock_rejects_oversized_fillet() {
        let mut k = MockKernel::new();
        let s = k
            .make_sketch(&SketchProfile::rectangle(10.0, 4.5), SketchPlane::xy())
            .unwrap();
        assert!(matches!(
            k.fillet_sketch(s, 3.0),
            Err(KernelError::FilletFailed { .. })
        ));
    }

    #[test]
    fn test_mock_tessellation_is_closed() {
        let mut k = MockKernel::new();
        let b = k.make_box([2.0, 3.0, 4.0]).unwrap();
        let mesh = k.tessellate(&b, 0.1).unwrap();
        assert_eq!(mesh.triangle_count(), 12);
        check_closed(&mesh).unwrap();
    }
}
