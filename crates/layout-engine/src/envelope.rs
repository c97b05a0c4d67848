use enclosure_types::{Aabb, Axis, LINEAR_TOLERANCE};
use footprint_registry::{ComponentKind, ConfigError, DimensionSet};
use serde::{Deserialize, Serialize};

use crate::ghosts::GhostVolume;

/// Which term set the final shell width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeDriver {
    /// Size of the ghost bounding box.
    GhostBounds,
    /// Farthest free ghost from the centre, mirrored.
    SymmetricReach,
    /// The fixed right-column minimum.
    RightColumn,
}

/// Exterior dimensions of the case body, centred on the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellEnvelope {
    pub width: f64,
    pub length: f64,
    pub depth: f64,
    pub provisional_width: f64,
    pub driver: EnvelopeDriver,
    pub ghost_bounds: Aabb,
}

impl ShellEnvelope {
    /// Outer footprint of the shell.
    pub fn outer(&self) -> Aabb {
        Aabb::new(
            [-self.width / 2.0, -self.length / 2.0, 0.0],
            [self.width / 2.0, self.length / 2.0, self.depth],
        )
    }

    /// The cavity above the floor, inside the walls.
    pub fn cavity(&self, dims: &DimensionSet) -> Aabb {
        let w = dims.shell.wall_th;
        Aabb::new(
            [
                -self.width / 2.0 + w,
                -self.length / 2.0 + w,
                dims.shell.floor_th,
            ],
            [self.width / 2.0 - w, self.length / 2.0 - w, self.depth],
        )
    }
}

/// Size the shell from the ghost bounds, padding and the provisional width.
///
/// The connector hangs off the right wall wherever that wall ends up, so it
/// never widens the shell. Length follows the mirrored Y reach rather than
/// the bounding box, which keeps the display centred on the origin: the
/// reference layout comes out 115 mm long where the box alone would give
/// 106.5 mm.
pub(crate) fn derive_envelope(
    dims: &DimensionSet,
    ghosts: &[GhostVolume],
    provisional_width: f64,
) -> Result<ShellEnvelope, ConfigError> {
    let ghost_bounds = Aabb::union_all(ghosts.iter().filter_map(GhostVolume::bounds))
        .ok_or(ConfigError::EmptyGhostUnion)?;
    let size = ghost_bounds.size();
    if size[0] <= LINEAR_TOLERANCE || size[1] <= LINEAR_TOLERANCE {
        return Err(ConfigError::DegenerateBounds(format!(
            "{:.3} x {:.3} footprint",
            size[0], size[1]
        )));
    }

    let margin = 2.0 * dims.shell.padding + 2.0 * dims.shell.wall_th;
    let free: Vec<Aabb> = ghosts
        .iter()
        .filter(|g| g.component != ComponentKind::Connector)
        .filter_map(GhostVolume::bounds)
        .collect();
    let free_span_x = Aabb::union_all(free.iter().copied()).map_or(0.0, |b| b.size()[0]);
    let free_reach_x = free.iter().map(|b| b.reach(Axis::X)).fold(0.0, f64::max);
    let reach_y = ghost_bounds.reach(Axis::Y);

    let candidates = [
        (free_span_x + margin, EnvelopeDriver::GhostBounds),
        (2.0 * free_reach_x + margin, EnvelopeDriver::SymmetricReach),
        (provisional_width, EnvelopeDriver::RightColumn),
    ];
    let (mut width, mut driver) = candidates[0];
    for (w, d) in &candidates[1..] {
        if *w > width + LINEAR_TOLERANCE {
            width = *w;
            driver = *d;
        }
    }
    let length = (size[1] + margin).max(2.0 * reach_y + margin);

    let shell = &dims.shell;
    let short_side = width.min(length);
    if shell.outer_corner_radius * 2.0 >= short_side
        || shell.inner_corner_radius * 2.0 >= short_side - 2.0 * shell.wall_th
    {
        return Err(ConfigError::InvalidConstraint(format!(
            "corner radii {}/{} do not fit a {width} x {length} shell",
            shell.outer_corner_radius, shell.inner_corner_radius
        )));
    }

    Ok(ShellEnvelope {
        width,
        length,
        depth: dims.case_depth(),
        provisional_width,
        driver,
        ghost_bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{anchor_connector, place_components};

    fn placed_at_provisional(dims: &DimensionSet) -> Vec<GhostVolume> {
        let mut placed = place_components(dims);
        anchor_connector(dims, &mut placed, dims.provisional_width());
        placed.ghosts
    }

    #[test]
    fn reference_envelope() {
        let dims = DimensionSet::default();
        let provisional = dims.provisional_width();
        let ghosts = placed_at_provisional(&dims);
        let env = derive_envelope(&dims, &ghosts, provisional).unwrap();
        assert_eq!(env.width, 142.0);
        assert_eq!(env.driver, EnvelopeDriver::RightColumn);
        // Driver ghost reaches y = -49.5.
        assert_eq!(env.length, 115.0);
        assert_eq!(env.depth, 47.0);
    }

    #[test]
    fn no_ghosts_is_empty_union() {
        let dims = DimensionSet::default();
        assert_eq!(
            derive_envelope(&dims, &[], 142.0),
            Err(ConfigError::EmptyGhostUnion)
        );
    }

    #[test]
    fn wide_display_drives_width() {
        let mut dims = DimensionSet::default();
        if let Some(d) = dims.display.as_mut() {
            d.pcb_w = 150.0;
        }
        dims.connector = None;
        let provisional = dims.provisional_width();
        let ghosts = placed_at_provisional(&dims);
        let env = derive_envelope(&dims, &ghosts, provisional).unwrap();
        // max(150, 126) + 16: the display sets the provisional width too.
        assert_eq!(env.width, 166.0);
    }

    #[test]
    fn connector_never_widens_the_shell() {
        let dims = DimensionSet::default();
        let provisional = dims.provisional_width();
        let mut ghosts = placed_at_provisional(&dims);
        let with = derive_envelope(&dims, &ghosts, provisional).unwrap();
        ghosts.retain(|g| g.component != ComponentKind::Connector);
        let without = derive_envelope(&dims, &ghosts, provisional).unwrap();
        assert_eq!(with.width, without.width);
        assert_eq!(with.length, without.length);
    }
}
