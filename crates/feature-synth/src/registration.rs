//! How a void must sit relative to the solid it is cut from.

use enclosure_types::{Aabb, Axis, LINEAR_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Which way a face looks along its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Faces toward the negative axis (e.g. an underside).
    Min,
    /// Faces toward the positive axis (e.g. a top).
    Max,
}

/// An axis-aligned face of the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacePlane {
    pub axis: Axis,
    pub at: f64,
    pub side: Side,
}

impl FacePlane {
    pub fn top(z: f64) -> Self {
        Self {
            axis: Axis::Z,
            at: z,
            side: Side::Max,
        }
    }

    pub fn underside(z: f64) -> Self {
        Self {
            axis: Axis::Z,
            at: z,
            side: Side::Min,
        }
    }

    fn crossed_by(&self, b: &Aabb) -> bool {
        let i = self.axis.index();
        b.min[i] < self.at - LINEAR_TOLERANCE && b.max[i] > self.at + LINEAR_TOLERANCE
    }

    /// True when `b` stays strictly on the material side of this face.
    fn clears(&self, b: &Aabb) -> bool {
        let i = self.axis.index();
        match self.side {
            Side::Min => b.min[i] > self.at + LINEAR_TOLERANCE,
            Side::Max => b.max[i] < self.at - LINEAR_TOLERANCE,
        }
    }
}

/// Placement rule a void must satisfy before it is subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Registration {
    /// Crosses both host faces along `axis`.
    Through { axis: Axis },
    /// Crosses `face` and nothing is said about the far side.
    Opens { face: FacePlane },
    /// Crosses `opens` but stops before reaching `stops_before`.
    Blind {
        opens: FacePlane,
        stops_before: FacePlane,
    },
}

impl Registration {
    /// Check `cutter` against the host bounds. The error is a reason string.
    pub fn check(&self, cutter: &Aabb, host: &Aabb) -> Result<(), String> {
        if !cutter.overlaps(host, 0.0) {
            return Err("does not intersect its host".to_string());
        }
        match self {
            Registration::Through { axis } => {
                let i = axis.index();
                if cutter.min[i] < host.min[i] - LINEAR_TOLERANCE
                    && cutter.max[i] > host.max[i] + LINEAR_TOLERANCE
                {
                    Ok(())
                } else {
                    Err(format!("does not pass through the host along {axis:?}"))
                }
            }
            Registration::Opens { face } => opens(face, cutter),
            Registration::Blind {
                opens: face,
                stops_before,
            } => {
                opens(face, cutter)?;
                if stops_before.clears(cutter) {
                    Ok(())
                } else {
                    Err(format!(
                        "breaks through the {:?} face at {:?} = {}",
                        stops_before.side, stops_before.axis, stops_before.at
                    ))
                }
            }
        }
    }
}

fn opens(face: &FacePlane, cutter: &Aabb) -> Result<(), String> {
    if face.crossed_by(cutter) {
        Ok(())
    } else {
        Err(format!(
            "does not open on the {:?} face at {:?} = {}",
            face.side, face.axis, face.at
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lid() -> Aabb {
        Aabb::new([-10.0, -10.0, 0.0], [10.0, 10.0, 4.0])
    }

    #[test]
    fn counterbore_from_top_registers() {
        let cb = Aabb::new([-2.7, -2.7, 2.5], [2.7, 2.7, 4.01]);
        let rule = Registration::Blind {
            opens: FacePlane::top(4.0),
            stops_before: FacePlane::underside(0.0),
        };
        assert!(rule.check(&cb, &lid()).is_ok());
    }

    #[test]
    fn counterbore_from_bottom_is_rejected() {
        let cb = Aabb::new([-2.7, -2.7, -0.01], [2.7, 2.7, 1.5]);
        let rule = Registration::Blind {
            opens: FacePlane::top(4.0),
            stops_before: FacePlane::underside(0.0),
        };
        let reason = rule.check(&cb, &lid()).unwrap_err();
        assert!(reason.contains("does not open"));
    }

    #[test]
    fn blind_bore_breaking_through_is_rejected() {
        let bore = Aabb::new([-1.0, -1.0, -0.01], [1.0, 1.0, 4.01]);
        let rule = Registration::Blind {
            opens: FacePlane::underside(0.0),
            stops_before: FacePlane::top(4.0),
        };
        assert!(rule.check(&bore, &lid()).unwrap_err().contains("breaks through"));
    }

    #[test]
    fn through_hole_must_exit_both_faces() {
        let rule = Registration::Through { axis: Axis::Z };
        let hole = Aabb::new([-1.0, -1.0, -0.01], [1.0, 1.0, 4.01]);
        assert!(rule.check(&hole, &lid()).is_ok());
        let short = Aabb::new([-1.0, -1.0, -0.01], [1.0, 1.0, 3.0]);
        assert!(rule.check(&short, &lid()).is_err());
    }

    #[test]
    fn detached_void_is_rejected() {
        let rule = Registration::Through { axis: Axis::Z };
        let far = Aabb::new([20.0, 20.0, -1.0], [21.0, 21.0, 5.0]);
        assert_eq!(
            rule.check(&far, &lid()).unwrap_err(),
            "does not intersect its host"
        );
    }
}
