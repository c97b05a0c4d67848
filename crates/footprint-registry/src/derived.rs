//! Quantities computed from the dimension set. Each is evaluated in exactly
//! one place so every consumer sees the same value.

use crate::dimensions::*;

impl DimensionSet {
    /// Exterior height of the case body.
    pub fn case_depth(&self) -> f64 {
        self.shell.internal_height + self.shell.floor_th
    }

    /// Shell width implied by the fixed layout constants alone.
    pub fn provisional_width(&self) -> f64 {
        let display_w = self.display.as_ref().map_or(0.0, |d| d.pcb_w);
        let column_w = 2.0 * (self.layout.right_col_x + self.layout.right_col_margin);
        display_w.max(column_w) + 2.0 * self.shell.padding + 2.0 * self.shell.wall_th
    }

    /// Y of the button row centreline.
    pub fn button_row_y(&self) -> Option<f64> {
        let buttons = self.buttons.as_ref()?;
        Some(match &self.display {
            Some(d) => d.offset_y - d.pcb_h / 2.0 - buttons.row_margin,
            None => -buttons.row_margin,
        })
    }
}

impl DisplayDims {
    /// Height of the standoff shoulder above the floor top.
    pub fn shoulder_height(&self, shell: &ShellDims) -> f64 {
        shell.internal_height - self.recess(shell) - self.pcb_th
    }

    /// `screen_th − lid_th`: how much of the screen sits below the rim.
    /// With the PCB at the shoulder, the screen face ends flush with the lid top.
    pub fn recess(&self, shell: &ShellDims) -> f64 {
        self.screen_th - shell.lid_th
    }

    pub fn window_size(&self) -> [f64; 2] {
        [
            self.screen_w + self.window_clearance,
            self.screen_h + self.window_clearance,
        ]
    }
}

impl ScrewDims {
    pub fn counterbore_radius(&self) -> f64 {
        (self.head_dia + self.clearance) / 2.0
    }

    pub fn shaft_clearance_radius(&self) -> f64 {
        self.shaft_dia / 2.0
    }
}

impl ButtonDims {
    pub fn hole_radius(&self) -> f64 {
        (self.hole_dia + self.hole_clearance) / 2.0
    }

    /// X of every button, centred on zero at `spacing` pitch.
    pub fn positions_x(&self) -> Vec<f64> {
        let mid = (self.count as f64 - 1.0) / 2.0;
        (0..self.count)
            .map(|i| (i as f64 - mid) * self.spacing)
            .collect()
    }
}

impl StandoffDims {
    pub fn pin_radius(&self) -> f64 {
        self.pin_dia / 2.0
    }

    pub fn trap_radius(&self) -> f64 {
        self.trap_dia / 2.0
    }
}
