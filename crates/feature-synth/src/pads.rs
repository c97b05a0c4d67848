use csg_kernel::{Part, Primitive};
use enclosure_types::{Anchor, ALIGN_FLOOR};
use layout_engine::{Layout, Site};

use crate::feature::{Feature, FeatureKind};
use crate::EMBED_DEPTH;

/// Solid pads under raised boards. Each pad is its own feature so the fence
/// pocket around the same board cannot remove it.
pub fn pad_features(layout: &Layout) -> Vec<Feature> {
    let dims = &layout.dims;
    let floor = dims.shell.floor_th;
    let mut pads = Vec::new();

    if let (Some(c), Some(site)) = (&dims.connector, &layout.connector) {
        if c.pad_height > 0.0 {
            pads.push(pad("connector_pad", site, [c.length, c.width], c.pad_height, floor));
        }
    }
    if let (Some(d), Some(site)) = (&dims.driver, &layout.driver) {
        if d.pad_height > 0.0 {
            pads.push(pad("driver_pad", site, [d.width, d.length], d.pad_height, floor));
        }
    }
    pads
}

fn pad(name: &str, site: &Site, footprint: [f64; 2], height: f64, floor: f64) -> Feature {
    let [x, y] = site.xy();
    Feature::new(name, FeatureKind::Pad).with_part(Part::new(
        Primitive::block([footprint[0], footprint[1], height + EMBED_DEPTH]),
        Anchor::fixed([x, y, floor - EMBED_DEPTH], ALIGN_FLOOR),
    ))
}
