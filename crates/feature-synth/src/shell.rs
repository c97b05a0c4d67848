use csg_kernel::{Part, Primitive};
use enclosure_types::{Anchor, PlaneKind, SketchProfile, ALIGN_FLOOR};
use layout_engine::Layout;

use crate::feature::{Cutter, Feature, FeatureKind};
use crate::registration::{FacePlane, Registration};
use crate::CUT_OVERSHOOT;

/// Rounded rectangle plate swept up from `z`.
pub(crate) fn rounded_slab(width: f64, length: f64, radius: f64, height: f64, z: f64) -> Part {
    Part::new(
        Primitive::Extrusion {
            profile: SketchProfile::rectangle(width, length),
            plane: PlaneKind::XY,
            fillet: radius,
            distance: height,
            symmetric: false,
        },
        Anchor::fixed([0.0, 0.0, z], ALIGN_FLOOR),
    )
}

/// Outer walls and floor: a rounded block with the cavity carved from the floor top up.
pub fn shell_feature(layout: &Layout) -> Feature {
    let shell = &layout.dims.shell;
    let env = &layout.envelope;
    let wall = shell.wall_th;

    let cavity = rounded_slab(
        env.width - 2.0 * wall,
        env.length - 2.0 * wall,
        shell.inner_corner_radius,
        shell.internal_height + CUT_OVERSHOOT,
        shell.floor_th,
    );

    Feature::new("shell", FeatureKind::Shell)
        .with_part(rounded_slab(
            env.width,
            env.length,
            shell.outer_corner_radius,
            env.depth,
            0.0,
        ))
        .with_void(Cutter::new(
            "cavity",
            cavity,
            Registration::Blind {
                opens: FacePlane::top(env.depth),
                stops_before: FacePlane::underside(0.0),
            },
        ))
}
