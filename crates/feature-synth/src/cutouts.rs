//! Assembly-level voids through the case body.

use csg_kernel::{Part, Primitive};
use enclosure_types::{Align, Anchor, Axis, PlaneKind, SketchProfile};
use footprint_registry::DimensionSet;
use layout_engine::Layout;

use crate::feature::Cutter;
use crate::registration::{FacePlane, Registration, Side};

/// Z of the connector slot's lower edge. Depends only on the floor and the
/// connector's bottom clearance, never on how the board is seated or padded.
pub fn connector_slot_bottom(dims: &DimensionSet) -> Option<f64> {
    let c = dims.connector.as_ref()?;
    Some(dims.shell.floor_th + c.conn_bottom_h - c.slot_drop)
}

/// Stadium slot through the right wall in front of the connector.
pub fn connector_slot(layout: &Layout) -> Option<Cutter> {
    let dims = &layout.dims;
    let c = dims.connector.as_ref()?;
    let site = layout.connector.as_ref()?;
    let bottom = connector_slot_bottom(dims)?;
    let wall_x = layout.envelope.width / 2.0;

    Some(Cutter::new(
        "connector_slot",
        Part::new(
            Primitive::Extrusion {
                profile: SketchProfile::rectangle(c.slot_w, c.slot_h),
                plane: PlaneKind::YZ,
                fillet: c.slot_corner_radius(),
                distance: c.slot_depth,
                symmetric: true,
            },
            Anchor::derived(
                [wall_x, site.position[1], bottom],
                [Align::Center, Align::Center, Align::Min],
            ),
        ),
        Registration::Blind {
            opens: FacePlane {
                axis: Axis::X,
                at: wall_x,
                side: Side::Max,
            },
            stops_before: FacePlane::underside(dims.shell.floor_th),
        },
    ))
}
