//! Retention rings around floor-mounted boards, with their relief cuts.

use csg_kernel::{Part, Primitive};
use enclosure_types::{Anchor, Axis, ALIGN_FLOOR};
use footprint_registry::{ComponentKind, DimensionSet};
use layout_engine::{FenceSite, Layout};

use crate::feature::{Cutter, Feature, FeatureKind};
use crate::registration::Registration;
use crate::{CUT_OVERSHOOT, EMBED_DEPTH};

/// One fence per floor-mounted board.
pub fn fence_features(layout: &Layout) -> Vec<Feature> {
    layout
        .fences
        .iter()
        .map(|site| fence_feature(site, &layout.dims))
        .collect()
}

fn fence_feature(site: &FenceSite, dims: &DimensionSet) -> Feature {
    let floor = dims.shell.floor_th;
    let height = dims.fit.fence_height;
    let [cx, cy] = site.center;

    let block = Part::new(
        Primitive::block([site.outer[0], site.outer[1], height + EMBED_DEPTH]),
        Anchor::fixed([cx, cy, floor - EMBED_DEPTH], ALIGN_FLOOR),
    );
    let mut feature = Feature::new(site.name.clone(), FeatureKind::Fence)
        .with_part(block)
        .with_void(relief(
            format!("{}_pocket", site.name),
            site.inner,
            [cx, cy],
            floor,
            height,
        ));

    match site.component {
        ComponentKind::Microcontroller => {
            if let Some(m) = &dims.mcu {
                let bar = m.bracket_len;
                feature = feature
                    .with_void(relief(
                        format!("{}_relief_x", site.name),
                        [site.outer[0] + 2.0 * CUT_OVERSHOOT, m.length - 2.0 * bar],
                        [cx, cy],
                        floor,
                        height,
                    ))
                    .with_void(relief(
                        format!("{}_relief_y", site.name),
                        [m.width - 2.0 * bar, site.outer[1] + 2.0 * CUT_OVERSHOOT],
                        [cx, cy],
                        floor,
                        height,
                    ));
                if m.antenna_slot_w > 0.0 && m.antenna_slot_len > 0.0 {
                    feature = feature.with_void(relief(
                        format!("{}_antenna_slot", site.name),
                        [m.antenna_slot_w, m.antenna_slot_len],
                        [cx + m.width / 2.0, cy],
                        floor,
                        height,
                    ));
                }
            }
        }
        ComponentKind::Connector => {
            if let Some(c) = &dims.connector {
                if c.access_slot_len > 0.0 {
                    feature = feature.with_void(relief(
                        format!("{}_access_slot", site.name),
                        [c.access_slot_len, c.width],
                        [cx + c.length / 2.0, cy],
                        floor,
                        height,
                    ));
                }
            }
        }
        _ => {}
    }
    feature
}

/// A vertical cut that passes through the fence from below the floor top to
/// above its rim.
fn relief(name: String, size: [f64; 2], center: [f64; 2], floor: f64, height: f64) -> Cutter {
    Cutter::new(
        name,
        Part::new(
            Primitive::block([
                size[0],
                size[1],
                height + CUT_OVERSHOOT + 2.0 * EMBED_DEPTH,
            ]),
            Anchor::derived(
                [center[0], center[1], floor - 2.0 * EMBED_DEPTH],
                ALIGN_FLOOR,
            ),
        ),
        Registration::Through { axis: Axis::Z },
    )
}
