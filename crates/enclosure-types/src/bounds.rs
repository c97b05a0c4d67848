use serde::{Deserialize, Serialize};

/// Tolerance used when comparing coordinates in the world frame (mm).
pub const LINEAR_TOLERANCE: f64 = 1e-9;

/// A world-frame coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Axis-aligned bounding box in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Box spanning `[0, size]` on every axis.
    pub fn from_size(size: [f64; 3]) -> Self {
        Self {
            min: [0.0; 3],
            max: size,
        }
    }

    /// Smallest box containing every point. `None` for an empty slice.
    pub fn from_points(points: &[[f64; 3]]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::new(*first, *first);
        for p in rest {
            for i in 0..3 {
                bounds.min[i] = bounds.min[i].min(p[i]);
                bounds.max[i] = bounds.max[i].max(p[i]);
            }
        }
        Some(bounds)
    }

    /// Merge an iterator of boxes. `None` when the iterator is empty.
    pub fn union_all<I: IntoIterator<Item = Aabb>>(boxes: I) -> Option<Self> {
        boxes.into_iter().reduce(|a, b| a.merge(&b))
    }

    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    pub fn merge(&self, other: &Aabb) -> Aabb {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] = out.min[i].min(other.min[i]);
            out.max[i] = out.max[i].max(other.max[i]);
        }
        out
    }

    pub fn translated(&self, offset: [f64; 3]) -> Aabb {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] += offset[i];
            out.max[i] += offset[i];
        }
        out
    }

    /// True when any extent is zero, negative or not finite.
    pub fn is_degenerate(&self) -> bool {
        self.size()
            .iter()
            .any(|s| !s.is_finite() || *s <= LINEAR_TOLERANCE)
    }

    /// Largest absolute coordinate reached on `axis`, measured from the origin.
    pub fn reach(&self, axis: Axis) -> f64 {
        let i = axis.index();
        self.min[i].abs().max(self.max[i].abs())
    }

    /// Overlap with positive volume, after growing both boxes by `clearance / 2`.
    pub fn overlaps(&self, other: &Aabb, clearance: f64) -> bool {
        (0..3).all(|i| self.axis_overlaps(other, i, clearance))
    }

    /// Overlap of the XY projections, after growing both by `clearance / 2`.
    pub fn overlaps_xy(&self, other: &Aabb, clearance: f64) -> bool {
        (0..2).all(|i| self.axis_overlaps(other, i, clearance))
    }

    fn axis_overlaps(&self, other: &Aabb, i: usize, clearance: f64) -> bool {
        self.min[i] < other.max[i] + clearance - LINEAR_TOLERANCE
            && other.min[i] < self.max[i] + clearance - LINEAR_TOLERANCE
    }

    /// True when the XY projection of `other` lies inside this box's projection.
    pub fn contains_xy(&self, other: &Aabb) -> bool {
        (0..2).all(|i| {
            other.min[i] >= self.min[i] - LINEAR_TOLERANCE
                && other.max[i] <= self.max[i] + LINEAR_TOLERANCE
        })
    }

    /// Per-axis gap to `other`; negative values are penetration depths.
    pub fn gap(&self, other: &Aabb) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (i, g) in out.iter_mut().enumerate() {
            *g = (other.min[i] - self.max[i]).max(self.min[i] - other.max[i]);
        }
        out
    }
}
