//! The immutable dimension set every layout and synthesis step reads from.
//!
//! All lengths are millimetres. `Default` reproduces the reference enclosure:
//! a 108×62 display board over an ESP32 module, a USB-C trigger board on the
//! right wall and a DRV8833 motor driver in the right column.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionSet {
    pub shell: ShellDims,
    pub fit: FitDims,
    pub screws: ScrewDims,
    pub posts: PostDims,
    pub standoffs: StandoffDims,
    pub layout: LayoutDims,
    pub display: Option<DisplayDims>,
    pub buttons: Option<ButtonDims>,
    pub mcu: Option<McuDims>,
    pub connector: Option<ConnectorDims>,
    pub driver: Option<DriverDims>,
}

impl Default for DimensionSet {
    fn default() -> Self {
        Self {
            shell: ShellDims::default(),
            fit: FitDims::default(),
            screws: ScrewDims::default(),
            posts: PostDims::default(),
            standoffs: StandoffDims::default(),
            layout: LayoutDims::default(),
            display: Some(DisplayDims::default()),
            buttons: Some(ButtonDims::default()),
            mcu: Some(McuDims::default()),
            connector: Some(ConnectorDims::default()),
            driver: Some(DriverDims::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellDims {
    pub wall_th: f64,
    pub floor_th: f64,
    /// Fascia lid plate thickness.
    pub lid_th: f64,
    /// Cavity height from the floor top to the rim.
    pub internal_height: f64,
    /// Free space between the ghost bounds and the inner wall, per side.
    pub padding: f64,
    pub outer_corner_radius: f64,
    pub inner_corner_radius: f64,
}

impl Default for ShellDims {
    fn default() -> Self {
        Self {
            wall_th: 2.0,
            floor_th: 2.0,
            lid_th: 4.0,
            internal_height: 45.0,
            padding: 6.0,
            outer_corner_radius: 6.0,
            inner_corner_radius: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitDims {
    /// Added to every component footprint before a fence void is cut.
    pub fit_tolerance: f64,
    pub fence_wall: f64,
    pub fence_height: f64,
    /// Minimum gap between floor-mounted features and between ghosts.
    pub min_feature_clearance: f64,
}

impl Default for FitDims {
    fn default() -> Self {
        Self {
            fit_tolerance: 0.6,
            fence_wall: 1.5,
            fence_height: 6.0,
            min_feature_clearance: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrewDims {
    pub shaft_dia: f64,
    pub head_dia: f64,
    pub clearance: f64,
    pub counterbore_depth: f64,
}

impl Default for ScrewDims {
    fn default() -> Self {
        Self {
            shaft_dia: 3.0,
            head_dia: 5.0,
            clearance: 0.4,
            counterbore_depth: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDims {
    pub radius: f64,
    /// Distance from the outer shell edge to the post axis, on both X and Y.
    pub inset: f64,
    pub pilot_radius: f64,
    /// Height above the floor top where the pilot bore begins.
    pub pilot_start: f64,
    /// Drop of the post top below the rim. The lid bears on the walls.
    pub rim_gap: f64,
}

impl Default for PostDims {
    fn default() -> Self {
        Self {
            radius: 3.5,
            inset: 5.0,
            pilot_radius: 1.4,
            pilot_start: 5.0,
            rim_gap: 0.5,
        }
    }
}

/// Shape of the boss under each display standoff pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style")]
pub enum Shoulder {
    Cone { bottom_radius: f64, top_radius: f64 },
    Cylinder { radius: f64 },
}

impl Shoulder {
    /// Radius of the footprint on the floor.
    pub fn base_radius(&self) -> f64 {
        match self {
            Shoulder::Cone { bottom_radius, .. } => *bottom_radius,
            Shoulder::Cylinder { radius } => *radius,
        }
    }

    /// Radius of the face the pin stands on.
    pub fn top_radius(&self) -> f64 {
        match self {
            Shoulder::Cone { top_radius, .. } => *top_radius,
            Shoulder::Cylinder { radius } => *radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandoffDims {
    /// Inset from the PCB edge along its long (X) side.
    pub inset_long: f64,
    /// Inset from the PCB edge along its short (Y) side.
    pub inset_short: f64,
    pub shoulder: Shoulder,
    pub pin_dia: f64,
    pub pin_height: f64,
    pub pcb_hole_dia: f64,
    pub trap_dia: f64,
    pub trap_depth: f64,
}

impl Default for StandoffDims {
    fn default() -> Self {
        Self {
            inset_long: 3.0,
            inset_short: 3.5,
            shoulder: Shoulder::Cone {
                bottom_radius: 6.0,
                top_radius: 3.0,
            },
            pin_dia: 2.0,
            pin_height: 2.0,
            pcb_hole_dia: 3.0,
            trap_dia: 3.0,
            trap_depth: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutDims {
    pub right_col_x: f64,
    pub right_col_margin: f64,
}

impl Default for LayoutDims {
    fn default() -> Self {
        Self {
            right_col_x: 48.0,
            right_col_margin: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayDims {
    pub pcb_w: f64,
    pub pcb_h: f64,
    pub pcb_th: f64,
    pub screen_w: f64,
    pub screen_h: f64,
    pub screen_th: f64,
    pub offset_y: f64,
    /// Added to the screen outline when cutting the lid window.
    pub window_clearance: f64,
}

impl Default for DisplayDims {
    fn default() -> Self {
        Self {
            pcb_w: 108.0,
            pcb_h: 62.0,
            pcb_th: 1.7,
            screen_w: 95.0,
            screen_h: 62.0,
            screen_th: 4.0,
            offset_y: 10.0,
            window_clearance: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonDims {
    pub count: u32,
    pub hole_dia: f64,
    pub body_dia: f64,
    pub body_depth: f64,
    pub spacing: f64,
    /// Height of the cap ghost above the rim.
    pub cap_height: f64,
    /// Gap between the display's lower edge and the button row.
    pub row_margin: f64,
    pub hole_clearance: f64,
}

impl Default for ButtonDims {
    fn default() -> Self {
        Self {
            count: 3,
            hole_dia: 7.0,
            body_dia: 12.0,
            body_depth: 20.0,
            spacing: 18.0,
            cap_height: 10.0,
            row_margin: 15.0,
            hole_clearance: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McuDims {
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub antenna_ext: f64,
    pub antenna_width: f64,
    pub anchor_y: f64,
    /// Length of fence left standing at each corner after the relief cuts.
    pub bracket_len: f64,
    pub antenna_slot_w: f64,
    pub antenna_slot_len: f64,
}

impl Default for McuDims {
    fn default() -> Self {
        Self {
            width: 51.0,
            length: 28.0,
            height: 4.0,
            antenna_ext: 7.0,
            antenna_width: 18.0,
            anchor_y: -35.0,
            bracket_len: 5.0,
            antenna_slot_w: 10.0,
            antenna_slot_len: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorDims {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    /// Distance from the outer right wall to the board's outer end.
    pub recess: f64,
    /// Height of the receptacle's lower edge above the floor top.
    pub conn_bottom_h: f64,
    pub slot_w: f64,
    pub slot_h: f64,
    /// Slot corner rounding; `None` gives a stadium (half the slot height).
    pub slot_corner_radius: Option<f64>,
    pub slot_drop: f64,
    /// Half-length of the symmetric slot extrusion through the wall.
    pub slot_depth: f64,
    pub access_slot_len: f64,
    /// Board underside above the floor top; `None` means `conn_bottom_h / 2`.
    pub seat_height: Option<f64>,
    pub pad_height: f64,
}

impl Default for ConnectorDims {
    fn default() -> Self {
        Self {
            length: 28.0,
            width: 11.0,
            height: 4.5,
            recess: 3.0,
            conn_bottom_h: 3.6,
            slot_w: 10.0,
            slot_h: 4.5,
            slot_corner_radius: None,
            slot_drop: 0.2,
            slot_depth: 20.0,
            access_slot_len: 5.0,
            seat_height: None,
            pad_height: 0.0,
        }
    }
}

impl ConnectorDims {
    pub fn seat_height(&self) -> f64 {
        self.seat_height.unwrap_or(self.conn_bottom_h / 2.0)
    }

    pub fn slot_corner_radius(&self) -> f64 {
        self.slot_corner_radius.unwrap_or(self.slot_h / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverDims {
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub anchor_y: f64,
    pub pad_height: f64,
}

impl Default for DriverDims {
    fn default() -> Self {
        Self {
            width: 18.5,
            length: 21.0,
            height: 5.0,
            anchor_y: -39.0,
            pad_height: 0.0,
        }
    }
}
