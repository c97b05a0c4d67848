//! Explicit clearance checks between derived volumes.

use enclosure_types::Aabb;
use footprint_registry::{ComponentKind, ConfigError, DimensionSet};

use crate::envelope::ShellEnvelope;
use crate::ghosts::GhostVolume;

/// A named XY footprint on the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorFootprint {
    pub name: String,
    pub bounds: Aabb,
}

impl FloorFootprint {
    /// Square footprint of a round boss.
    pub fn round(name: impl Into<String>, center: [f64; 2], radius: f64) -> Self {
        Self {
            name: name.into(),
            bounds: Aabb::new(
                [center[0] - radius, center[1] - radius, 0.0],
                [center[0] + radius, center[1] + radius, 0.0],
            ),
        }
    }
}

/// Every pair of floor-mounted features must keep `clearance` apart in XY.
pub fn check_floor_clearance(
    footprints: &[FloorFootprint],
    clearance: f64,
) -> Result<(), ConfigError> {
    for (i, a) in footprints.iter().enumerate() {
        for b in &footprints[i + 1..] {
            if a.bounds.overlaps_xy(&b.bounds, clearance) {
                return Err(ConfigError::Collision {
                    a: a.name.clone(),
                    b: b.name.clone(),
                    clearance,
                });
            }
        }
    }
    Ok(())
}

/// Ghosts of different components must not come within `clearance` in 3D.
/// Sub-volumes of one ghost may touch.
pub fn check_ghost_clearance(ghosts: &[GhostVolume], clearance: f64) -> Result<(), ConfigError> {
    for (i, a) in ghosts.iter().enumerate() {
        for b in &ghosts[i + 1..] {
            let hit = a.parts.iter().any(|pa| {
                b.parts
                    .iter()
                    .any(|pb| pa.bounds().overlaps(&pb.bounds(), clearance))
            });
            if hit {
                return Err(ConfigError::Collision {
                    a: a.name.clone(),
                    b: b.name.clone(),
                    clearance,
                });
            }
        }
    }
    Ok(())
}

/// Every ghost must lie inside the cavity in XY.
pub fn check_containment(
    ghosts: &[GhostVolume],
    envelope: &ShellEnvelope,
    dims: &DimensionSet,
) -> Result<(), ConfigError> {
    let cavity = envelope.cavity(dims);
    for ghost in ghosts {
        let Some(bounds) = ghost.bounds() else {
            continue;
        };
        if !cavity.contains_xy(&bounds) {
            return Err(ConfigError::GhostOutsideShell {
                component: ghost.name.clone(),
            });
        }
    }
    Ok(())
}
