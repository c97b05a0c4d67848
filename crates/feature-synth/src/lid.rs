//! The fascia lid, modelled in its own frame with the underside at z = 0.

use csg_kernel::{Part, Primitive, Tier};
use enclosure_types::{Anchor, Axis, ALIGN_FLOOR};
use layout_engine::Layout;
use tracing::debug;

use crate::assembly::SubAssembly;
use crate::feature::{Cutter, Feature, FeatureKind};
use crate::registration::{FacePlane, Registration};
use crate::shell::rounded_slab;
use crate::CUT_OVERSHOOT;

pub const LID_NAME: &str = "fascia_lid";

pub fn build_lid(layout: &Layout) -> SubAssembly {
    let dims = &layout.dims;
    let lid_th = dims.shell.lid_th;
    let through = Registration::Through { axis: Axis::Z };
    let from_underside = Registration::Blind {
        opens: FacePlane::underside(0.0),
        stops_before: FacePlane::top(lid_th),
    };

    let mut lid = SubAssembly::new(LID_NAME);
    lid.add_feature(
        Feature::new("lid_plate", FeatureKind::Plate).with_part(rounded_slab(
            layout.envelope.width,
            layout.envelope.length,
            dims.shell.outer_corner_radius,
            lid_th,
            0.0,
        )),
    );

    let screws = &dims.screws;
    let shaft_h = lid_th - screws.counterbore_depth + CUT_OVERSHOOT;
    let screw_hole = Primitive::Stack {
        tiers: vec![
            Tier::cylinder(screws.shaft_clearance_radius(), shaft_h),
            Tier::cylinder(
                screws.counterbore_radius(),
                screws.counterbore_depth + CUT_OVERSHOOT,
            ),
        ],
    };
    for post in &layout.posts {
        let [x, y] = post.xy();
        lid.add_cutter(Cutter::new(
            format!("{}_screw_hole", post.name),
            Part::new(
                screw_hole.clone(),
                Anchor::derived([x, y, -CUT_OVERSHOOT], ALIGN_FLOOR),
            ),
            through,
        ));
    }

    if let (Some(d), Some(stack)) = (&dims.display, &layout.display) {
        let [w, l] = d.window_size();
        lid.add_cutter(Cutter::new(
            "display_window",
            Part::new(
                Primitive::block([w, l, lid_th + 2.0 * CUT_OVERSHOOT]),
                Anchor::derived(
                    [stack.center[0], stack.center[1], -CUT_OVERSHOOT],
                    ALIGN_FLOOR,
                ),
            ),
            through,
        ));
    }

    if let Some(b) = &dims.buttons {
        for button in &layout.buttons {
            lid.add_cutter(Cutter::new(
                format!("{}_hole", button.name),
                through_bore(b.hole_radius(), button.xy(), lid_th),
                through,
            ));
        }
    }

    let s = &dims.standoffs;
    for standoff in &layout.standoffs {
        let [x, y] = standoff.xy();
        lid.add_cutter(Cutter::new(
            format!("{}_trap", standoff.name),
            Part::new(
                Primitive::cylinder(s.trap_radius(), s.trap_depth + CUT_OVERSHOOT),
                Anchor::derived([x, y, -CUT_OVERSHOOT], ALIGN_FLOOR),
            ),
            from_underside,
        ));
    }

    debug!(cutters = lid.cutters.len(), "fascia lid planned");
    lid
}

fn through_bore(radius: f64, at: [f64; 2], lid_th: f64) -> Part {
    Part::new(
        Primitive::cylinder(radius, lid_th + 2.0 * CUT_OVERSHOOT),
        Anchor::derived([at[0], at[1], -CUT_OVERSHOOT], ALIGN_FLOOR),
    )
}
