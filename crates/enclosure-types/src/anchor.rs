use serde::{Deserialize, Serialize};

use crate::bounds::Aabb;

/// Which side of a primitive's local bounds lands on the anchor coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Align {
    Min,
    Center,
    Max,
}

impl Align {
    fn pick(self, min: f64, max: f64) -> f64 {
        match self {
            Align::Min => min,
            Align::Center => (min + max) / 2.0,
            Align::Max => max,
        }
    }
}

/// Centered in X and Y, bottom face on the anchor.
pub const ALIGN_FLOOR: [Align; 3] = [Align::Center, Align::Center, Align::Min];
/// Centered in X and Y, top face on the anchor.
pub const ALIGN_CEILING: [Align; 3] = [Align::Center, Align::Center, Align::Max];
/// Centered on every axis.
pub const ALIGN_CENTER: [Align; 3] = [Align::Center, Align::Center, Align::Center];

/// Where an anchor coordinate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorSource {
    /// A declared layout constant.
    Fixed,
    /// Computed from another entity's extent.
    Derived,
}

/// A world-frame coordinate plus the alignment rule used to place a primitive on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub position: [f64; 3],
    pub align: [Align; 3],
    pub source: AnchorSource,
}

impl Anchor {
    pub fn fixed(position: [f64; 3], align: [Align; 3]) -> Self {
        Self {
            position,
            align,
            source: AnchorSource::Fixed,
        }
    }

    pub fn derived(position: [f64; 3], align: [Align; 3]) -> Self {
        Self {
            position,
            align,
            source: AnchorSource::Derived,
        }
    }

    /// Translation that moves a primitive with bounds `local` onto this anchor.
    pub fn translation_for(&self, local: &Aabb) -> [f64; 3] {
        let mut t = [0.0; 3];
        for (i, out) in t.iter_mut().enumerate() {
            *out = self.position[i] - self.align[i].pick(local.min[i], local.max[i]);
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_alignment_puts_bottom_on_anchor() {
        let local = Aabb::from_size([10.0, 4.0, 6.0]);
        let anchor = Anchor::fixed([0.0, -35.0, 2.0], ALIGN_FLOOR);
        let placed = local.translated(anchor.translation_for(&local));
        assert_eq!(placed.min, [-5.0, -37.0, 2.0]);
        assert_eq!(placed.max, [5.0, -33.0, 8.0]);
    }

    #[test]
    fn ceiling_alignment_hangs_below_anchor() {
        let local = Aabb::new([-6.0, -6.0, 0.0], [6.0, 6.0, 20.0]);
        let anchor = Anchor::fixed([18.0, -36.0, 47.0], ALIGN_CEILING);
        let placed = local.translated(anchor.translation_for(&local));
        assert_eq!(placed.min, [12.0, -42.0, 27.0]);
        assert_eq!(placed.max, [24.0, -30.0, 47.0]);
    }
}
