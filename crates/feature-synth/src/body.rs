use layout_engine::Layout;
use tracing::debug;

use crate::assembly::SubAssembly;
use crate::cutouts::connector_slot;
use crate::fences::fence_features;
use crate::pads::pad_features;
use crate::posts::post_features;
use crate::shell::shell_feature;
use crate::standoffs::standoff_features;

pub const BODY_NAME: &str = "case_body";

/// Shell, posts, standoffs, fences and pads, with the connector slot cut
/// through the finished walls.
pub fn build_body(layout: &Layout) -> SubAssembly {
    let mut body = SubAssembly::new(BODY_NAME);
    body.add_feature(shell_feature(layout));
    for feature in post_features(layout)
        .into_iter()
        .chain(standoff_features(layout))
        .chain(fence_features(layout))
        .chain(pad_features(layout))
    {
        body.add_feature(feature);
    }
    if let Some(slot) = connector_slot(layout) {
        body.add_cutter(slot);
    }
    debug!(
        features = body.features.len(),
        cutters = body.cutters.len(),
        "case body planned"
    );
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_registry::{DimensionSet, FootprintRegistry};
    use layout_engine::resolve_layout;

    #[test]
    fn reference_body_plan() {
        let layout =
            resolve_layout(&FootprintRegistry::new(DimensionSet::default()).unwrap()).unwrap();
        let body = build_body(&layout);
        // shell + 4 posts + 4 standoffs + 3 fences
        assert_eq!(body.features.len(), 12);
        assert_eq!(body.cutters.len(), 1);
        assert!(body.feature("post_ne").is_some());
        assert!(body.cutter("connector_slot").is_some());
        body.validate().unwrap();
    }

    #[test]
    fn body_never_grows_past_the_shell() {
        let layout =
            resolve_layout(&FootprintRegistry::new(DimensionSet::default()).unwrap()).unwrap();
        let body = build_body(&layout).bounds().unwrap();
        let shell = layout.envelope.outer();
        assert!(body.min[0] >= shell.min[0] && body.max[0] <= shell.max[0]);
        assert!(body.min[1] >= shell.min[1] && body.max[1] <= shell.max[1]);
    }
}
