//! Anchors for every configured component and the ghosts they imply.

use csg_kernel::{Part, Primitive};
use enclosure_types::{Aabb, Anchor, ALIGN_CEILING, ALIGN_FLOOR};
use footprint_registry::{ComponentKind, DimensionSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ghosts::GhostVolume;

/// Corners of a rectangle centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    SouthWest,
    SouthEast,
    NorthWest,
    NorthEast,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::SouthWest,
        Corner::SouthEast,
        Corner::NorthWest,
        Corner::NorthEast,
    ];

    /// Sign of X and Y for this corner.
    pub fn signs(self) -> [f64; 2] {
        match self {
            Corner::SouthWest => [-1.0, -1.0],
            Corner::SouthEast => [1.0, -1.0],
            Corner::NorthWest => [-1.0, 1.0],
            Corner::NorthEast => [1.0, 1.0],
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Corner::SouthWest => "sw",
            Corner::SouthEast => "se",
            Corner::NorthWest => "nw",
            Corner::NorthEast => "ne",
        }
    }
}

/// A named world-frame point: XY centre plus the Z the part stands on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    pub position: [f64; 3],
}

impl Site {
    pub fn new(name: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    pub fn xy(&self) -> [f64; 2] {
        [self.position[0], self.position[1]]
    }
}

/// Vertical stack of the display: shoulder, PCB, then screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayStack {
    pub center: [f64; 2],
    pub shoulder_height: f64,
    /// PCB underside.
    pub pcb_z: f64,
    /// Screen underside.
    pub screen_z: f64,
    /// Screen thickness below the rim.
    pub recess: f64,
}

/// Retention ring around a floor-mounted board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenceSite {
    pub component: ComponentKind,
    pub name: String,
    pub center: [f64; 2],
    /// Footprint plus fit tolerance.
    pub inner: [f64; 2],
    /// Inner size plus a fence wall on each side.
    pub outer: [f64; 2],
}

impl FenceSite {
    pub(crate) fn new(
        component: ComponentKind,
        center: [f64; 2],
        footprint: [f64; 2],
        dims: &DimensionSet,
    ) -> Self {
        let tol = dims.fit.fit_tolerance;
        let wall = dims.fit.fence_wall;
        let inner = [footprint[0] + tol, footprint[1] + tol];
        Self {
            component,
            name: format!("{}_fence", component.name()),
            center,
            inner,
            outer: [inner[0] + 2.0 * wall, inner[1] + 2.0 * wall],
        }
    }

    /// Outer block bounds between `z0` and `z1`.
    pub fn outer_bounds(&self, z0: f64, z1: f64) -> Aabb {
        Aabb::new(
            [
                self.center[0] - self.outer[0] / 2.0,
                self.center[1] - self.outer[1] / 2.0,
                z0,
            ],
            [
                self.center[0] + self.outer[0] / 2.0,
                self.center[1] + self.outer[1] / 2.0,
                z1,
            ],
        )
    }
}

/// Everything placed before the shell envelope is known.
#[derive(Debug, Clone, Default)]
pub(crate) struct Placements {
    pub ghosts: Vec<GhostVolume>,
    pub display: Option<DisplayStack>,
    pub buttons: Vec<Site>,
    pub mcu: Option<Site>,
    pub connector: Option<Site>,
    pub driver: Option<Site>,
}

/// Anchor every configured component except the connector, which waits for
/// the final shell width.
pub(crate) fn place_components(dims: &DimensionSet) -> Placements {
    let floor = dims.shell.floor_th;
    let depth = dims.case_depth();
    let mut out = Placements::default();

    if let Some(d) = &dims.display {
        let shoulder_height = d.shoulder_height(&dims.shell);
        let stack = DisplayStack {
            center: [0.0, d.offset_y],
            shoulder_height,
            pcb_z: floor + shoulder_height,
            screen_z: floor + shoulder_height + d.pcb_th,
            recess: d.recess(&dims.shell),
        };
        debug!(y = d.offset_y, pcb_z = stack.pcb_z, "display anchored");
        out.ghosts.push(GhostVolume::new(
            ComponentKind::Display,
            "display",
            vec![
                Part::new(
                    Primitive::block([d.pcb_w, d.pcb_h, d.pcb_th]),
                    Anchor::fixed([0.0, d.offset_y, stack.pcb_z], ALIGN_FLOOR),
                ),
                Part::new(
                    Primitive::block([d.screen_w, d.screen_h, d.screen_th]),
                    Anchor::derived([0.0, d.offset_y, stack.screen_z], ALIGN_FLOOR),
                ),
            ],
        ));
        out.display = Some(stack);
    }

    if let (Some(b), Some(row_y)) = (&dims.buttons, dims.button_row_y()) {
        for (i, x) in b.positions_x().into_iter().enumerate() {
            let name = format!("button_{i}");
            debug!(button = %name, x, y = row_y, "button anchored");
            out.ghosts.push(GhostVolume::new(
                ComponentKind::Button,
                name.clone(),
                vec![
                    Part::new(
                        Primitive::cylinder(b.hole_dia / 2.0, b.cap_height),
                        Anchor::derived([x, row_y, depth], ALIGN_FLOOR),
                    ),
                    Part::new(
                        Primitive::cylinder(b.body_dia / 2.0, b.body_depth),
                        Anchor::derived([x, row_y, depth], ALIGN_CEILING),
                    ),
                ],
            ));
            out.buttons.push(Site::new(name, [x, row_y, depth]));
        }
    }

    if let Some(m) = &dims.mcu {
        let mut parts = vec![Part::new(
            Primitive::block([m.width, m.length, m.height]),
            Anchor::fixed([0.0, m.anchor_y, floor], ALIGN_FLOOR),
        )];
        if m.antenna_ext > 0.0 && m.antenna_width > 0.0 {
            parts.push(Part::new(
                Primitive::block([m.antenna_ext, m.antenna_width, m.height]),
                Anchor::derived(
                    [m.width / 2.0 + m.antenna_ext / 2.0, m.anchor_y, floor],
                    ALIGN_FLOOR,
                ),
            ));
        }
        debug!(y = m.anchor_y, "mcu anchored");
        out.ghosts
            .push(GhostVolume::new(ComponentKind::Microcontroller, "mcu", parts));
        out.mcu = Some(Site::new("mcu", [0.0, m.anchor_y, floor]));
    }

    if let Some(d) = &dims.driver {
        let x = dims.layout.right_col_x;
        let z = floor + d.pad_height;
        debug!(x, y = d.anchor_y, "driver anchored");
        out.ghosts.push(GhostVolume::new(
            ComponentKind::MotorDriver,
            "driver",
            vec![Part::new(
                Primitive::block([d.width, d.length, d.height]),
                Anchor::fixed([x, d.anchor_y, z], ALIGN_FLOOR),
            )],
        ));
        out.driver = Some(Site::new("driver", [x, d.anchor_y, z]));
    }

    out
}

/// Hang the connector off the right wall of a shell `width` wide. Any
/// previous connector anchor is replaced.
pub(crate) fn anchor_connector(dims: &DimensionSet, placed: &mut Placements, width: f64) {
    placed
        .ghosts
        .retain(|g| g.component != ComponentKind::Connector);
    placed.connector = None;
    let Some(c) = &dims.connector else {
        return;
    };
    let x = width / 2.0 - c.recess - c.length / 2.0;
    let z = dims.shell.floor_th + c.seat_height();
    debug!(x, z, width, "connector anchored against the right wall");
    placed.ghosts.push(GhostVolume::new(
        ComponentKind::Connector,
        "connector",
        vec![Part::new(
            Primitive::block([c.length, c.width, c.height]),
            Anchor::derived([x, 0.0, z], ALIGN_FLOOR),
        )],
    ));
    placed.connector = Some(Site::new("connector", [x, 0.0, z]));
}

/// Fence rings for every floor-mounted board that has a site.
pub(crate) fn fence_sites(dims: &DimensionSet, placed: &Placements) -> Vec<FenceSite> {
    let mut fences = Vec::new();
    if let (Some(m), Some(site)) = (&dims.mcu, &placed.mcu) {
        fences.push(FenceSite::new(
            ComponentKind::Microcontroller,
            site.xy(),
            [m.width, m.length],
            dims,
        ));
    }
    if let (Some(d), Some(site)) = (&dims.driver, &placed.driver) {
        fences.push(FenceSite::new(
            ComponentKind::MotorDriver,
            site.xy(),
            [d.width, d.length],
            dims,
        ));
    }
    if let (Some(c), Some(site)) = (&dims.connector, &placed.connector) {
        fences.push(FenceSite::new(
            ComponentKind::Connector,
            site.xy(),
            [c.length, c.width],
            dims,
        ));
    }
    fences
}

/// Display standoff positions at the PCB corners.
pub(crate) fn standoff_sites(dims: &DimensionSet) -> Vec<Site> {
    let Some(d) = &dims.display else {
        return Vec::new();
    };
    let s = &dims.standoffs;
    let half = [d.pcb_w / 2.0 - s.inset_long, d.pcb_h / 2.0 - s.inset_short];
    Corner::ALL
        .iter()
        .map(|corner| {
            let [sx, sy] = corner.signs();
            Site::new(
                format!("standoff_{}", corner.suffix()),
                [sx * half[0], d.offset_y + sy * half[1], dims.shell.floor_th],
            )
        })
        .collect()
}

/// Mounting post positions, inset from the outer shell corners.
pub(crate) fn post_sites(dims: &DimensionSet, width: f64, length: f64) -> Vec<Site> {
    let inset = dims.posts.inset;
    let half = [width / 2.0 - inset, length / 2.0 - inset];
    Corner::ALL
        .iter()
        .map(|corner| {
            let [sx, sy] = corner.signs();
            Site::new(
                format!("post_{}", corner.suffix()),
                [sx * half[0], sy * half[1], dims.shell.floor_th],
            )
        })
        .collect()
}
