//! Primitive builders on top of truck's sweep API.
//!
//! truck has no built-in box/cylinder/cone; everything is successive sweeps.

use std::f64::consts::PI;

use enclosure_types::SketchPlane;
use truck_modeling::builder;
use truck_modeling::topology::{Edge, Face, Solid, Vertex, Wire};
use truck_modeling::{EuclideanSpace, MetricSpace, Point3, Rad, Vector3};

use crate::types::{KernelError, Tier};

const COINCIDENT: f64 = 1e-9;

/// Create a box solid via successive translational sweeps.
/// Origin at (0,0,0), extends to (w,h,d).
pub fn make_box(w: f64, h: f64, d: f64) -> Solid {
    let v = builder::vertex(Point3::new(0.0, 0.0, 0.0));
    let edge = builder::tsweep(&v, Vector3::new(w, 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, h, 0.0));
    builder::tsweep(&face, Vector3::new(0.0, 0.0, d))
}

/// Angle of the half-plane that revolved solids are swept from. Keeping the
/// seam edges off the coordinate axes keeps them clear of axis-aligned walls.
const SEAM_ANGLE: f64 = PI / 4.0;

fn on_seam(radius: f64, z: f64) -> Point3 {
    Point3::new(radius * SEAM_ANGLE.cos(), radius * SEAM_ANGLE.sin(), z)
}

/// Create a cylinder solid: circle wire, face, translational sweep.
/// Base centered at origin in XY plane, extending along +Z.
pub fn make_cylinder(radius: f64, height: f64) -> Result<Solid, KernelError> {
    let v = builder::vertex(on_seam(radius, 0.0));
    let wire = builder::rsweep(&v, Point3::origin(), Vector3::unit_z(), Rad(2.0 * PI));
    let face = builder::try_attach_plane(&[wire]).map_err(|e| KernelError::Other {
        message: format!("failed to create circular face: {e}"),
    })?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// Truncated cone; a zero top radius yields a pointed cone.
pub fn make_cone(bottom_radius: f64, top_radius: f64, height: f64) -> Result<Solid, KernelError> {
    make_stack(&[Tier {
        bottom_radius,
        top_radius,
        height,
    }])
}

/// Coaxial frusta stacked bottom-up from the origin, revolved as one solid.
///
/// The half cross-section runs from the top of the axis out and down to the
/// base of the axis. Steps between tiers become annular faces, so a stack
/// never needs a boolean between coaxial pieces.
pub fn make_stack(tiers: &[Tier]) -> Result<Solid, KernelError> {
    let mut bases = Vec::with_capacity(tiers.len());
    let mut z = 0.0;
    for tier in tiers {
        bases.push(z);
        z += tier.height;
    }

    let mut section = vec![on_seam(0.0, z)];
    for (tier, &base) in tiers.iter().zip(&bases).rev() {
        push_distinct(&mut section, on_seam(tier.top_radius, base + tier.height));
        push_distinct(&mut section, on_seam(tier.bottom_radius, base));
    }
    push_distinct(&mut section, on_seam(0.0, 0.0));

    let shell = builder::cone(&open_wire(&section), Vector3::unit_z(), Rad(2.0 * PI));
    Solid::try_new(vec![shell]).map_err(|e| KernelError::Other {
        message: format!("revolved stack is not a closed solid: {e}"),
    })
}

fn push_distinct(points: &mut Vec<Point3>, p: Point3) {
    if points.last().map_or(true, |&q| q.distance(p) > COINCIDENT) {
        points.push(p);
    }
}

fn open_wire(points: &[Point3]) -> Wire {
    let vertices: Vec<Vertex> = points.iter().map(|&p| builder::vertex(p)).collect();
    vertices
        .windows(2)
        .map(|pair| builder::line(&pair[0], &pair[1]))
        .collect()
}

/// Planar face for a counter-clockwise outline on `plane`, lifted `lift`
/// along the plane normal. Every corner is rounded with `fillet` when positive.
pub fn make_profile_face(
    outline: &[[f64; 2]],
    fillet: f64,
    plane: &SketchPlane,
    lift: f64,
) -> Result<Face, KernelError> {
    let to_point = |uv: [f64; 2]| {
        let p = plane.to_world(uv, lift);
        Point3::new(p[0], p[1], p[2])
    };

    let wire = if fillet > COINCIDENT {
        rounded_wire(outline, fillet, &to_point)?
    } else {
        let points: Vec<Point3> = outline.iter().map(|&uv| to_point(uv)).collect();
        polygon_wire(&points)
    };

    builder::try_attach_plane(&[wire]).map_err(|e| KernelError::Other {
        message: format!("failed to create planar face: {e}"),
    })
}

fn polygon_wire(points: &[Point3]) -> Wire {
    let n = points.len();
    let vertices: Vec<Vertex> = points.iter().map(|&p| builder::vertex(p)).collect();
    let edges: Vec<Edge> = (0..n)
        .map(|i| builder::line(&vertices[i], &vertices[(i + 1) % n]))
        .collect();
    Wire::from_iter(edges)
}

/// Tangent points and arc midpoint of one rounded corner, in sketch coordinates.
#[derive(Debug, Clone, Copy)]
struct CornerArc {
    start: [f64; 2],
    end: [f64; 2],
    transit: [f64; 2],
}

fn sub(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

fn length(a: [f64; 2]) -> f64 {
    a[0].hypot(a[1])
}

fn scaled(a: [f64; 2], s: f64) -> [f64; 2] {
    [a[0] * s, a[1] * s]
}

fn along(p: [f64; 2], dir: [f64; 2], t: f64) -> [f64; 2] {
    [p[0] + dir[0] * t, p[1] + dir[1] * t]
}

fn same_point(a: [f64; 2], b: [f64; 2]) -> bool {
    length(sub(a, b)) < COINCIDENT
}

fn corner_arcs(outline: &[[f64; 2]], radius: f64) -> Result<Vec<CornerArc>, KernelError> {
    let n = outline.len();
    let mut arcs = Vec::with_capacity(n);
    for i in 0..n {
        let p = outline[i];
        let to_prev = sub(outline[(i + n - 1) % n], p);
        let to_next = sub(outline[(i + 1) % n], p);
        let (len_prev, len_next) = (length(to_prev), length(to_next));
        if len_prev < COINCIDENT || len_next < COINCIDENT {
            return Err(KernelError::FilletFailed {
                reason: format!("outline has a zero-length edge at corner {i}"),
            });
        }
        let d_prev = scaled(to_prev, 1.0 / len_prev);
        let d_next = scaled(to_next, 1.0 / len_next);

        let cos = (d_prev[0] * d_next[0] + d_prev[1] * d_next[1]).clamp(-1.0, 1.0);
        let half = cos.acos() / 2.0;
        if half < COINCIDENT || (PI / 2.0 - half) < COINCIDENT {
            return Err(KernelError::FilletFailed {
                reason: format!("corner {i} is degenerate"),
            });
        }

        let setback = radius / half.tan();
        if setback > len_prev / 2.0 + COINCIDENT || setback > len_next / 2.0 + COINCIDENT {
            return Err(KernelError::FilletFailed {
                reason: format!("radius {radius} does not fit corner {i}"),
            });
        }

        let bisector = [d_prev[0] + d_next[0], d_prev[1] + d_next[1]];
        let bisector = scaled(bisector, 1.0 / length(bisector));
        let apex_to_arc = radius / half.sin() - radius;

        arcs.push(CornerArc {
            start: along(p, d_prev, setback),
            end: along(p, d_next, setback),
            transit: along(p, bisector, apex_to_arc),
        });
    }
    Ok(arcs)
}

fn rounded_wire(
    outline: &[[f64; 2]],
    radius: f64,
    to_point: &dyn Fn([f64; 2]) -> Point3,
) -> Result<Wire, KernelError> {
    let arcs = corner_arcs(outline, radius)?;
    let n = arcs.len();

    // Tangent points shared by neighbouring corners collapse into one vertex
    // so a stadium keeps a single closed loop.
    let mut starts: Vec<Vertex> = Vec::with_capacity(n);
    let mut ends: Vec<Vertex> = Vec::with_capacity(n);
    for i in 0..n {
        let start = if i > 0 && same_point(arcs[i - 1].end, arcs[i].start) {
            ends[i - 1].clone()
        } else {
            builder::vertex(to_point(arcs[i].start))
        };
        let end = if i == n - 1 && same_point(arcs[i].end, arcs[0].start) {
            starts[0].clone()
        } else {
            builder::vertex(to_point(arcs[i].end))
        };
        starts.push(start);
        ends.push(end);
    }

    let mut edges: Vec<Edge> = Vec::with_capacity(2 * n);
    for i in 0..n {
        edges.push(builder::circle_arc(
            &starts[i],
            &ends[i],
            to_point(arcs[i].transit),
        ));
        let j = (i + 1) % n;
        if !same_point(arcs[i].end, arcs[j].start) {
            edges.push(builder::line(&ends[i], &starts[j]));
        }
    }
    Ok(Wire::from_iter(edges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use enclosure_types::{PlaneKind, SketchProfile};

    #[test]
    fn test_make_box_topology() {
        let solid = make_box(1.0, 2.0, 3.0);

        let boundaries = solid.boundaries();
        assert_eq!(boundaries.len(), 1, "Box should have 1 shell");

        let shell = &boundaries[0];
        let faces: Vec<_> = shell.face_iter().collect();

        let mut edge_ids = std::collections::HashSet::new();
        for edge in shell.edge_iter() {
            edge_ids.insert(edge.id());
        }
        let mut vert_ids = std::collections::HashSet::new();
        for v in shell.vertex_iter() {
            vert_ids.insert(v.id());
        }

        assert_eq!(faces.len(), 6, "Box should have 6 faces");
        assert_eq!(edge_ids.len(), 12, "Box should have 12 edges");
        assert_eq!(vert_ids.len(), 8, "Box should have 8 vertices");
    }

    #[test]
    fn test_make_cylinder_has_caps_and_side() {
        let solid = make_cylinder(1.0, 2.0).unwrap();
        let boundaries = solid.boundaries();
        assert_eq!(boundaries.len(), 1);
        assert!(boundaries[0].face_iter().count() >= 3);
    }

    #[test]
    fn test_make_cone_single_shell() {
        let solid = make_cone(6.0, 3.0, 10.0).unwrap();
        assert_eq!(solid.boundaries().len(), 1);
        // Top disk, lateral cone and bottom disk, each split at the three seams.
        assert_eq!(solid.boundaries()[0].len(), 9);
    }

    #[test]
    fn test_pointed_cone_closes() {
        let solid = make_cone(2.0, 0.0, 3.0).unwrap();
        assert_eq!(solid.boundaries()[0].len(), 6);
    }

    #[test]
    fn test_stepped_stack_is_one_shell() {
        // Shoulder, then a narrower pin on top.
        let solid = make_stack(&[
            Tier {
                bottom_radius: 6.0,
                top_radius: 3.0,
                height: 43.8,
            },
            Tier::cylinder(1.0, 2.0),
        ])
        .unwrap();
        assert_eq!(solid.boundaries().len(), 1);
        // Pin top, pin side, step annulus, cone, base: five bands of three.
        assert_eq!(solid.boundaries()[0].len(), 15);
    }

    #[test]
    fn test_cylinder_seam_is_off_axis() {
        let solid = make_cylinder(3.5, 1.0).unwrap();
        for v in solid.boundaries()[0].vertex_iter() {
            let p = v.point();
            assert!(p.x.abs() > 0.1 && p.y.abs() > 0.1, "seam vertex on an axis: {p:?}");
        }
    }

    #[test]
    fn test_corner_arcs_rectangle() {
        let outline = SketchProfile::rectangle(10.0, 4.0).outline();
        let arcs = corner_arcs(&outline, 1.0).unwrap();
        assert_eq!(arcs.len(), 4);
        // First corner is (-5, -2); previous vertex is (-5, 2), next is (5, -2).
        assert_relative_eq!(arcs[0].start[0], -5.0);
        assert_relative_eq!(arcs[0].start[1], -1.0, epsilon = 1e-12);
        assert_relative_eq!(arcs[0].end[0], -4.0, epsilon = 1e-12);
        assert_relative_eq!(arcs[0].end[1], -2.0);
        let inset = 1.0 / 2f64.sqrt();
        assert_relative_eq!(arcs[0].transit[0], -4.0 - inset, epsilon = 1e-12);
        assert_relative_eq!(arcs[0].transit[1], -1.0 - inset, epsilon = 1e-12);
    }

    #[test]
    fn test_stadium_shares_tangent_points() {
        let outline = SketchProfile::rectangle(10.0, 4.5).outline();
        let arcs = corner_arcs(&outline, 2.25).unwrap();
        // Left side collapses: corner 3 ends where corner 0 starts.
        assert!(same_point(arcs[3].end, arcs[0].start));
        assert!(same_point(arcs[1].end, arcs[2].start));
        assert!(!same_point(arcs[0].end, arcs[1].start));
    }

    #[test]
    fn test_oversized_fillet_rejected() {
        let outline = SketchProfile::rectangle(10.0, 4.0).outline();
        assert!(matches!(
            corner_arcs(&outline, 2.5),
            Err(KernelError::FilletFailed { .. })
        ));
    }

    #[test]
    fn test_stadium_face_builds() {
        let plane = SketchPlane::new(PlaneKind::YZ, [0.0, 0.0, 5.0]);
        let outline = SketchProfile::rectangle(10.0, 4.5).outline();
        let face = make_profile_face(&outline, 2.25, &plane, 0.0).unwrap();
        // Four quarter arcs plus the two straight sides.
        assert_eq!(face.boundaries()[0].len(), 6);
    }
}
