//! Dimension checks run before any layout or geometry work.

use std::f64::consts::SQRT_2;

use crate::dimensions::*;
use crate::errors::ConfigError;

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite {
            field: field.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite {
            field: field.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite {
            field: field.to_string(),
        })
    }
}

fn require(ok: bool, message: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidConstraint(message()))
    }
}

/// Validate every field and cross-field constraint of a dimension set.
pub fn validate(dims: &DimensionSet) -> Result<(), ConfigError> {
    shell(&dims.shell)?;
    fit(&dims.fit)?;
    screws(&dims.screws, &dims.shell)?;
    posts(dims)?;
    layout(&dims.layout)?;
    if let Some(display) = &dims.display {
        self::display(display, &dims.shell)?;
        standoffs(&dims.standoffs, display)?;
    }
    if let Some(buttons) = &dims.buttons {
        self::buttons(buttons, &dims.shell)?;
    }
    if let Some(mcu) = &dims.mcu {
        self::mcu(mcu)?;
    }
    if let Some(connector) = &dims.connector {
        self::connector(connector, &dims.shell)?;
    }
    if let Some(driver) = &dims.driver {
        self::driver(driver)?;
    }
    Ok(())
}

fn shell(s: &ShellDims) -> Result<(), ConfigError> {
    positive("shell.wall_th", s.wall_th)?;
    positive("shell.floor_th", s.floor_th)?;
    positive("shell.lid_th", s.lid_th)?;
    positive("shell.internal_height", s.internal_height)?;
    non_negative("shell.padding", s.padding)?;
    positive("shell.outer_corner_radius", s.outer_corner_radius)?;
    positive("shell.inner_corner_radius", s.inner_corner_radius)
}

fn fit(f: &FitDims) -> Result<(), ConfigError> {
    non_negative("fit.fit_tolerance", f.fit_tolerance)?;
    positive("fit.fence_wall", f.fence_wall)?;
    positive("fit.fence_height", f.fence_height)?;
    non_negative("fit.min_feature_clearance", f.min_feature_clearance)
}

fn screws(s: &ScrewDims, shell: &ShellDims) -> Result<(), ConfigError> {
    positive("screws.shaft_dia", s.shaft_dia)?;
    positive("screws.head_dia", s.head_dia)?;
    non_negative("screws.clearance", s.clearance)?;
    positive("screws.counterbore_depth", s.counterbore_depth)?;
    require(s.counterbore_depth < shell.lid_th, || {
        format!(
            "counterbore depth {} must be less than lid thickness {}",
            s.counterbore_depth, shell.lid_th
        )
    })?;
    require(s.counterbore_radius() > s.shaft_clearance_radius(), || {
        format!(
            "counterbore radius {} must exceed shaft radius {}",
            s.counterbore_radius(),
            s.shaft_clearance_radius()
        )
    })
}

/// Whether a circle of `radius` centred `inset` from both outer edges stays
/// inside a rounded corner of radius `corner`.
fn fits_corner(radius: f64, inset: f64, corner: f64) -> bool {
    if inset >= corner {
        radius <= inset
    } else {
        SQRT_2 * (corner - inset) + radius <= corner
    }
}

fn posts(dims: &DimensionSet) -> Result<(), ConfigError> {
    let p = &dims.posts;
    positive("posts.radius", p.radius)?;
    positive("posts.inset", p.inset)?;
    positive("posts.pilot_radius", p.pilot_radius)?;
    non_negative("posts.pilot_start", p.pilot_start)?;
    positive("posts.rim_gap", p.rim_gap)?;
    require(p.pilot_radius < p.radius, || {
        format!(
            "pilot radius {} must be less than post radius {}",
            p.pilot_radius, p.radius
        )
    })?;
    let post_height = dims.shell.internal_height - p.rim_gap;
    require(p.pilot_start < post_height, || {
        format!(
            "pilot bore start {} is above the post top at {}",
            p.pilot_start, post_height
        )
    })?;
    let corner = dims.shell.outer_corner_radius;
    require(fits_corner(p.radius, p.inset, corner), || {
        format!(
            "post of radius {} at inset {} breaks out of the {} corner",
            p.radius, p.inset, corner
        )
    })?;
    let cb = dims.screws.counterbore_radius();
    require(cb < p.inset && fits_corner(cb, p.inset, corner), || {
        format!(
            "counterbore radius {} at inset {} breaks out of the lid",
            cb, p.inset
        )
    })
}

fn layout(l: &LayoutDims) -> Result<(), ConfigError> {
    finite("layout.right_col_x", l.right_col_x)?;
    finite("layout.right_col_margin", l.right_col_margin)?;
    let sum = l.right_col_x + l.right_col_margin;
    if sum <= 0.0 {
        return Err(ConfigError::ImpossibleRightColumn { sum });
    }
    Ok(())
}

fn display(d: &DisplayDims, shell: &ShellDims) -> Result<(), ConfigError> {
    positive("display.pcb_w", d.pcb_w)?;
    positive("display.pcb_h", d.pcb_h)?;
    positive("display.pcb_th", d.pcb_th)?;
    positive("display.screen_w", d.screen_w)?;
    positive("display.screen_h", d.screen_h)?;
    positive("display.screen_th", d.screen_th)?;
    finite("display.offset_y", d.offset_y)?;
    non_negative("display.window_clearance", d.window_clearance)?;
    if d.screen_th < shell.lid_th {
        return Err(ConfigError::InvertedDisplayRecess {
            screen_th: d.screen_th,
            lid_th: shell.lid_th,
        });
    }
    let shoulder = d.shoulder_height(shell);
    require(shoulder > 0.0, || {
        format!("display stack leaves no room for a standoff shoulder ({shoulder})")
    })
}

fn standoffs(s: &StandoffDims, d: &DisplayDims) -> Result<(), ConfigError> {
    non_negative("standoffs.inset_long", s.inset_long)?;
    non_negative("standoffs.inset_short", s.inset_short)?;
    positive("standoffs.pin_dia", s.pin_dia)?;
    positive("standoffs.pin_height", s.pin_height)?;
    positive("standoffs.pcb_hole_dia", s.pcb_hole_dia)?;
    positive("standoffs.trap_dia", s.trap_dia)?;
    positive("standoffs.trap_depth", s.trap_depth)?;
    match &s.shoulder {
        Shoulder::Cone {
            bottom_radius,
            top_radius,
        } => {
            positive("standoffs.shoulder.bottom_radius", *bottom_radius)?;
            positive("standoffs.shoulder.top_radius", *top_radius)?;
            require(bottom_radius > top_radius, || {
                format!(
                    "cone shoulder must narrow upward ({bottom_radius} <= {top_radius})"
                )
            })?;
        }
        Shoulder::Cylinder { radius } => positive("standoffs.shoulder.radius", *radius)?,
    }
    require(s.shoulder.top_radius() >= s.pin_radius(), || {
        format!(
            "pin radius {} overhangs the shoulder top radius {}",
            s.pin_radius(),
            s.shoulder.top_radius()
        )
    })?;
    require(s.pin_dia <= s.pcb_hole_dia, || {
        format!(
            "pin diameter {} does not enter the PCB hole {}",
            s.pin_dia, s.pcb_hole_dia
        )
    })?;
    require(s.trap_dia >= s.pin_dia, || {
        format!(
            "alignment trap {} is narrower than the pin {}",
            s.trap_dia, s.pin_dia
        )
    })?;
    require(s.inset_long < d.pcb_w / 2.0 && s.inset_short < d.pcb_h / 2.0, || {
        "standoff insets place the pins outside the display PCB".to_string()
    })
}

fn buttons(b: &ButtonDims, shell: &ShellDims) -> Result<(), ConfigError> {
    if b.count == 0 {
        return Ok(());
    }
    positive("buttons.hole_dia", b.hole_dia)?;
    positive("buttons.body_dia", b.body_dia)?;
    positive("buttons.body_depth", b.body_depth)?;
    positive("buttons.spacing", b.spacing)?;
    positive("buttons.cap_height", b.cap_height)?;
    finite("buttons.row_margin", b.row_margin)?;
    non_negative("buttons.hole_clearance", b.hole_clearance)?;
    require(b.body_depth < shell.internal_height, || {
        format!(
            "button body depth {} reaches the floor of a {} cavity",
            b.body_depth, shell.internal_height
        )
    })
}

fn mcu(m: &McuDims) -> Result<(), ConfigError> {
    positive("mcu.width", m.width)?;
    positive("mcu.length", m.length)?;
    positive("mcu.height", m.height)?;
    non_negative("mcu.antenna_ext", m.antenna_ext)?;
    non_negative("mcu.antenna_width", m.antenna_width)?;
    finite("mcu.anchor_y", m.anchor_y)?;
    positive("mcu.bracket_len", m.bracket_len)?;
    positive("mcu.antenna_slot_w", m.antenna_slot_w)?;
    positive("mcu.antenna_slot_len", m.antenna_slot_len)?;
    require(
        2.0 * m.bracket_len < m.width && 2.0 * m.bracket_len < m.length,
        || format!("corner brackets of {} leave no relief on the module", m.bracket_len),
    )
}

fn connector(c: &ConnectorDims, shell: &ShellDims) -> Result<(), ConfigError> {
    positive("connector.length", c.length)?;
    positive("connector.width", c.width)?;
    positive("connector.height", c.height)?;
    non_negative("connector.recess", c.recess)?;
    positive("connector.conn_bottom_h", c.conn_bottom_h)?;
    positive("connector.slot_w", c.slot_w)?;
    positive("connector.slot_h", c.slot_h)?;
    non_negative("connector.slot_corner_radius", c.slot_corner_radius())?;
    non_negative("connector.slot_drop", c.slot_drop)?;
    positive("connector.slot_depth", c.slot_depth)?;
    positive("connector.access_slot_len", c.access_slot_len)?;
    non_negative("connector.seat_height", c.seat_height())?;
    non_negative("connector.pad_height", c.pad_height)?;
    require(c.slot_corner_radius() <= c.slot_w.min(c.slot_h) / 2.0, || {
        format!(
            "slot corner radius {} exceeds half the slot's short side",
            c.slot_corner_radius()
        )
    })?;
    require(c.slot_depth > shell.wall_th, || {
        format!(
            "slot depth {} does not cross the {} wall",
            c.slot_depth, shell.wall_th
        )
    })?;
    require(c.conn_bottom_h > c.slot_drop, || {
        "connector slot would cut into the floor".to_string()
    })?;
    require(
        c.conn_bottom_h - c.slot_drop + c.slot_h < shell.internal_height,
        || "connector slot reaches the rim".to_string(),
    )?;
    require(c.pad_height <= c.seat_height(), || {
        format!(
            "connector pad {} is taller than the board seat {}",
            c.pad_height,
            c.seat_height()
        )
    })
}

fn driver(d: &DriverDims) -> Result<(), ConfigError> {
    positive("driver.width", d.width)?;
    positive("driver.length", d.length)?;
    positive("driver.height", d.height)?;
    finite("driver.anchor_y", d.anchor_y)?;
    non_negative("driver.pad_height", d.pad_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_dimensions_are_valid() {
        validate(&DimensionSet::default()).unwrap();
    }

    #[test]
    fn zero_wall_rejected() {
        let mut dims = DimensionSet::default();
        dims.shell.wall_th = 0.0;
        assert!(matches!(
            validate(&dims),
            Err(ConfigError::NonPositive { ref field, .. }) if field == "shell.wall_th"
        ));
    }

    #[test]
    fn nan_rejected() {
        let mut dims = DimensionSet::default();
        dims.screws.head_dia = f64::NAN;
        assert!(matches!(validate(&dims), Err(ConfigError::NotFinite { .. })));
    }

    #[test]
    fn counterbore_must_be_shallower_than_lid() {
        let mut dims = DimensionSet::default();
        dims.screws.counterbore_depth = 4.0;
        assert!(matches!(
            validate(&dims),
            Err(ConfigError::InvalidConstraint(_))
        ));
    }

    #[test]
    fn thin_screen_rejected() {
        let mut dims = DimensionSet::default();
        if let Some(d) = dims.display.as_mut() {
            d.screen_th = 3.0;
        }
        assert_eq!(
            validate(&dims),
            Err(ConfigError::InvertedDisplayRecess {
                screen_th: 3.0,
                lid_th: 4.0
            })
        );
    }

    #[test]
    fn impossible_right_column() {
        let mut dims = DimensionSet::default();
        dims.layout.right_col_x = -20.0;
        assert_eq!(
            validate(&dims),
            Err(ConfigError::ImpossibleRightColumn { sum: -5.0 })
        );
    }

    #[test]
    fn widening_cone_rejected() {
        let mut dims = DimensionSet::default();
        dims.standoffs.shoulder = Shoulder::Cone {
            bottom_radius: 3.0,
            top_radius: 4.0,
        };
        assert!(validate(&dims).is_err());
    }

    #[test]
    fn zero_buttons_skip_button_checks() {
        let mut dims = DimensionSet::default();
        if let Some(b) = dims.buttons.as_mut() {
            b.count = 0;
            b.hole_dia = 0.0;
        }
        validate(&dims).unwrap();
    }

    #[test]
    fn oversized_post_breaks_out_of_corner() {
        let mut dims = DimensionSet::default();
        dims.posts.radius = 5.0;
        assert!(matches!(
            validate(&dims),
            Err(ConfigError::InvalidConstraint(_))
        ));
    }

    #[test]
    fn flush_post_top_rejected() {
        let mut dims = DimensionSet::default();
        dims.posts.rim_gap = 0.0;
        assert!(matches!(
            validate(&dims),
            Err(ConfigError::NonPositive { ref field, .. }) if field == "posts.rim_gap"
        ));
    }

    #[test]
    fn pilot_above_post_top_rejected() {
        let mut dims = DimensionSet::default();
        dims.posts.pilot_start = 44.6;
        assert!(matches!(
            validate(&dims),
            Err(ConfigError::InvalidConstraint(ref m)) if m.contains("post top")
        ));
    }

    #[test]
    fn pad_taller_than_seat_rejected() {
        let mut dims = DimensionSet::default();
        if let Some(c) = dims.connector.as_mut() {
            c.pad_height = 2.0;
        }
        assert!(validate(&dims).is_err());
    }
}
