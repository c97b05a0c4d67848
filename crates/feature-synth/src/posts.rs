use csg_kernel::{Part, Primitive};
use enclosure_types::{Anchor, ALIGN_FLOOR};
use layout_engine::Layout;

use crate::feature::{Cutter, Feature, FeatureKind};
use crate::registration::{FacePlane, Registration};
use crate::{CUT_OVERSHOOT, EMBED_DEPTH};

/// Corner mounting posts from the floor to just under the rim, each with a
/// pilot bore that starts above the floor.
pub fn post_features(layout: &Layout) -> Vec<Feature> {
    let dims = &layout.dims;
    let floor = dims.shell.floor_th;
    let post_top = layout.envelope.depth - dims.posts.rim_gap;
    let bore_start = floor + dims.posts.pilot_start;

    layout
        .posts
        .iter()
        .map(|site| {
            let [x, y] = site.xy();
            Feature::new(site.name.clone(), FeatureKind::Post)
                .with_part(Part::new(
                    Primitive::cylinder(dims.posts.radius, post_top - floor + EMBED_DEPTH),
                    Anchor::fixed([x, y, floor - EMBED_DEPTH], ALIGN_FLOOR),
                ))
                .with_void(Cutter::new(
                    format!("{}_pilot", site.name),
                    Part::new(
                        Primitive::cylinder(
                            dims.posts.pilot_radius,
                            post_top - bore_start + CUT_OVERSHOOT,
                        ),
                        Anchor::derived([x, y, bore_start], ALIGN_FLOOR),
                    ),
                    Registration::Blind {
                        opens: FacePlane::top(post_top),
                        stops_before: FacePlane::underside(floor),
                    },
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
    fn pilot_bore_never_reaches_the_floor() {
        let layout =
            resolve_layout(&FootprintRegistry::new(DimensionSet::default()).unwrap()).unwrap();
        let posts = post_features(&layout);
        assert_eq!(posts.len(), 4);
        for post in &posts {
            post.check_voids().unwrap();
            let bore = post.voids[0].part.bounds();
            assert_eq!(bore.min[2], 7.0);
        }
    }

    #[test]
    fn post_top_stops_under_the_rim() {
        let layout =
            resolve_layout(&FootprintRegistry::new(DimensionSet::default()).unwrap()).unwrap();
        let posts = post_features(&layout);
        for post in &posts {
            let b = post.bounds().unwrap();
            assert!((b.max[2] - 46.5).abs() < 1e-9);
            assert!((b.min[2] - 1.5).abs() < 1e-9);
        }
        assert_eq!(posts[0].name, "post_sw");
    }
}
