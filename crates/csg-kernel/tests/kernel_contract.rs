//! Behaviour every Kernel implementation must share.

use approx::assert_relative_eq;
use csg_kernel::{check_closed, Kernel, KernelError, MockKernel, Tier, TruckKernel};
use enclosure_types::{Aabb, PlaneKind, SketchPlane, SketchProfile};

/// Curved solids are measured from their tessellation, so extremes can sag
/// inward by up to the chord tolerance.
const BOUNDS_EPS: f64 = 0.02;

fn assert_bounds(actual: Aabb, min: [f64; 3], max: [f64; 3]) {
    for i in 0..3 {
        assert_relative_eq!(actual.min[i], min[i], epsilon = BOUNDS_EPS);
        assert_relative_eq!(actual.max[i], max[i], epsilon = BOUNDS_EPS);
    }
}

fn cylinder_stands_on_origin(kernel: &mut dyn Kernel) {
    let c = kernel.make_cylinder(3.5, 45.0).unwrap();
    assert_bounds(
        kernel.bounding_box(&c).unwrap(),
        [-3.5, -3.5, 0.0],
        [3.5, 3.5, 45.0],
    );
}

fn cone_uses_bottom_radius(kernel: &mut dyn Kernel) {
    let c = kernel.make_cone(6.0, 3.0, 10.0).unwrap();
    assert_bounds(
        kernel.bounding_box(&c).unwrap(),
        [-6.0, -6.0, 0.0],
        [6.0, 6.0, 10.0],
    );
}

fn stack_stands_on_origin(kernel: &mut dyn Kernel) {
    let s = kernel
        .make_stack(&[
            Tier {
                bottom_radius: 6.0,
                top_radius: 3.0,
                height: 8.0,
            },
            Tier::cylinder(1.0, 2.0),
        ])
        .unwrap();
    assert_bounds(
        kernel.bounding_box(&s).unwrap(),
        [-6.0, -6.0, 0.0],
        [6.0, 6.0, 10.0],
    );
    assert!(matches!(
        kernel.make_stack(&[]),
        Err(KernelError::Degenerate { .. })
    ));
}

fn xz_extrusion_runs_toward_negative_y(kernel: &mut dyn Kernel) {
    let plane = SketchPlane::new(PlaneKind::XZ, [0.0, 10.0, 0.0]);
    let s = kernel
        .make_sketch(&SketchProfile::rectangle(4.0, 2.0), plane)
        .unwrap();
    let solid = kernel.extrude(s, 5.0, false).unwrap();
    assert_bounds(
        kernel.bounding_box(&solid).unwrap(),
        [-2.0, 5.0, -1.0],
        [2.0, 10.0, 1.0],
    );
}

fn degenerate_inputs_rejected(kernel: &mut dyn Kernel) {
    assert!(matches!(
        kernel.make_cylinder(0.0, 1.0),
        Err(KernelError::Degenerate { .. })
    ));
    assert!(matches!(
        kernel.make_cone(2.0, -1.0, 1.0),
        Err(KernelError::Degenerate { .. })
    ));
    let s = kernel
        .make_sketch(&SketchProfile::rectangle(1.0, 1.0), SketchPlane::xy())
        .unwrap();
    assert!(matches!(
        kernel.extrude(s, -1.0, false),
        Err(KernelError::Degenerate { .. })
    ));
}

fn box_tessellates_closed(kernel: &mut dyn Kernel) {
    let b = kernel.make_box([3.0, 2.0, 1.0]).unwrap();
    let mesh = kernel.tessellate(&b, 0.05).unwrap();
    check_closed(&mesh).unwrap();
    assert_bounds(mesh.bounds().unwrap(), [0.0; 3], [3.0, 2.0, 1.0]);
}

fn unknown_handle_is_reported(kernel: &mut dyn Kernel, other: &mut dyn Kernel) {
    let foreign = other.make_box([1.0, 1.0, 1.0]).unwrap();
    assert!(matches!(
        kernel.bounding_box(&foreign),
        Err(KernelError::EntityNotFound { .. })
    ));
}

#[test]
fn mock_kernel_contract() {
    let mut k = MockKernel::new();
    cylinder_stands_on_origin(&mut k);
    cone_uses_bottom_radius(&mut k);
    stack_stands_on_origin(&mut k);
    xz_extrusion_runs_toward_negative_y(&mut k);
    degenerate_inputs_rejected(&mut k);
    box_tessellates_closed(&mut k);
    unknown_handle_is_reported(&mut MockKernel::new(), &mut k);
}

#[test]
fn truck_kernel_contract() {
    let mut k = TruckKernel::new();
    cylinder_stands_on_origin(&mut k);
    cone_uses_bottom_radius(&mut k);
    stack_stands_on_origin(&mut k);
    xz_extrusion_runs_toward_negative_y(&mut k);
    degenerate_inputs_rejected(&mut k);
    box_tessellates_closed(&mut k);
    unknown_handle_is_reported(&mut TruckKernel::new(), &mut k);
}
