use csg_kernel::{Part, Primitive, Tier};
use enclosure_types::{Anchor, ALIGN_FLOOR};
use footprint_registry::Shoulder;
use layout_engine::Layout;

use crate::feature::{Feature, FeatureKind};
use crate::EMBED_DEPTH;

/// Display standoffs: a shoulder of the derived height topped by a locating
/// pin, revolved as one stepped solid.
pub fn standoff_features(layout: &Layout) -> Vec<Feature> {
    let Some(stack) = &layout.display else {
        return Vec::new();
    };
    let dims = &layout.dims;
    let s = &dims.standoffs;
    let floor = dims.shell.floor_th;
    let shoulder_h = stack.shoulder_height + EMBED_DEPTH;

    let shoulder = match &s.shoulder {
        Shoulder::Cone {
            bottom_radius,
            top_radius,
        } => Tier {
            bottom_radius: *bottom_radius,
            top_radius: *top_radius,
            height: shoulder_h,
        },
        Shoulder::Cylinder { radius } => Tier::cylinder(*radius, shoulder_h),
    };
    let standoff = Primitive::Stack {
        tiers: vec![shoulder, Tier::cylinder(s.pin_radius(), s.pin_height)],
    };

    layout
        .standoffs
        .iter()
        .map(|site| {
            let [x, y] = site.xy();
            Feature::new(site.name.clone(), FeatureKind::Standoff).with_part(Part::new(
                standoff.clone(),
                Anchor::fixed([x, y, floor - EMBED_DEPTH], ALIGN_FLOOR),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_registry::{DimensionSet, FootprintRegistry};
    use layout_engine::resolve_layout;

    #[test]
    fn pin_tip_sits_above_the_shoulder() {
        let layout =
            resolve_layout(&FootprintRegistry::new(DimensionSet::default()).unwrap()).unwrap();
        let standoffs = standoff_features(&layout);
        assert_eq!(standoffs.len(), 4);
        let b = standoffs[0].bounds().unwrap();
        // floor 2 + shoulder 43.3 + pin 2
        assert!((b.max[2] - 47.3).abs() < 1e-9);
        assert!((b.min[2] - 1.5).abs() < 1e-9);
        assert!((b.max[0] - (-45.0)).abs() < 1e-9);
        assert_eq!(standoffs[0].additive.len(), 1);
    }

    #[test]
    fn cylinder_shoulder_is_one_stepped_part() {
        let mut dims = DimensionSet::default();
        dims.standoffs.shoulder = Shoulder::Cylinder { radius: 3.0 };
        let layout = resolve_layout(&FootprintRegistry::new(dims).unwrap()).unwrap();
        let standoffs = standoff_features(&layout);
        let Primitive::Stack { tiers } = &standoffs[0].additive[0].primitive else {
            panic!("standoff should be a stack");
        };
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].bottom_radius, 3.0);
        assert_eq!(tiers[1].top_radius, 1.0);
        let b = standoffs[0].bounds().unwrap();
        assert!((b.max[2] - 47.3).abs() < 1e-9);
    }

    #[test]
    fn no_display_no_standoffs() {
        let dims = DimensionSet {
            display: None,
            ..DimensionSet::default()
        };
        let layout = resolve_layout(&FootprintRegistry::new(dims).unwrap()).unwrap();
        assert!(standoff_features(&layout).is_empty());
    }
}
