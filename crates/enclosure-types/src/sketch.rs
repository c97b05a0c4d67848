use serde::{Deserialize, Serialize};

/// A closed 2D outline in sketch-plane coordinates `(u, v)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SketchProfile {
    /// Rectangle centered on the sketch origin.
    Rectangle { width: f64, height: f64 },
}

impl SketchProfile {
    pub fn rectangle(width: f64, height: f64) -> Self {
        SketchProfile::Rectangle { width, height }
    }

    /// Corner points in counter-clockwise order.
    pub fn outline(&self) -> Vec<[f64; 2]> {
        match self {
            SketchProfile::Rectangle { width, height } => {
                let (hw, hh) = (width / 2.0, height / 2.0);
                vec![[-hw, -hh], [hw, -hh], [hw, hh], [-hw, hh]]
            }
        }
    }

    /// `(min, max)` of the outline in `(u, v)`.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let pts = self.outline();
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for p in &pts {
            for i in 0..2 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        (min, max)
    }

    /// Largest fillet radius that still leaves every edge non-negative.
    pub fn max_fillet_radius(&self) -> f64 {
        match self {
            SketchProfile::Rectangle { width, height } => width.min(*height) / 2.0,
        }
    }
}

/// Orientation of a sketch plane. The normal is always `u × v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneKind {
    /// u = +X, v = +Y, normal +Z.
    XY,
    /// u = +Y, v = +Z, normal +X.
    YZ,
    /// u = +X, v = +Z, normal −Y.
    XZ,
}

impl PlaneKind {
    pub fn u_axis(self) -> [f64; 3] {
        match self {
            PlaneKind::XY | PlaneKind::XZ => [1.0, 0.0, 0.0],
            PlaneKind::YZ => [0.0, 1.0, 0.0],
        }
    }

    pub fn v_axis(self) -> [f64; 3] {
        match self {
            PlaneKind::XY => [0.0, 1.0, 0.0],
            PlaneKind::YZ | PlaneKind::XZ => [0.0, 0.0, 1.0],
        }
    }

    pub fn normal(self) -> [f64; 3] {
        match self {
            PlaneKind::XY => [0.0, 0.0, 1.0],
            PlaneKind::YZ => [1.0, 0.0, 0.0],
            PlaneKind::XZ => [0.0, -1.0, 0.0],
        }
    }
}

/// A sketch plane placed in the world frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchPlane {
    pub kind: PlaneKind,
    pub origin: [f64; 3],
}

impl SketchPlane {
    pub fn new(kind: PlaneKind, origin: [f64; 3]) -> Self {
        Self { kind, origin }
    }

    pub fn xy() -> Self {
        Self::new(PlaneKind::XY, [0.0; 3])
    }

    /// Map a sketch coordinate to the world frame, lifted `w` along the normal.
    pub fn to_world(&self, uv: [f64; 2], w: f64) -> [f64; 3] {
        let u = self.kind.u_axis();
        let v = self.kind.v_axis();
        let n = self.kind.normal();
        let mut out = self.origin;
        for i in 0..3 {
            out[i] += u[i] * uv[0] + v[i] * uv[1] + n[i] * w;
        }
        out
    }
}
