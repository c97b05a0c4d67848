//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a test collect all failures in one pass.

use csg_kernel::{check_closed, KernelError, RenderMesh};
use enclosure_types::Aabb;
use footprint_registry::DimensionSet;
use layout_engine::Layout;
use serde::Serialize;

/// The result of a single oracle check.
#[derive(Debug, Clone, Serialize)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }
}

// ── Mesh Oracles ────────────────────────────────────────────────────────────

/// Check that the mesh is watertight, using the same edge pairing as
/// [`csg_kernel::check_closed`].
pub fn check_watertight_mesh(mesh: &RenderMesh) -> OracleVerdict {
    if mesh.triangle_count() == 0 {
        return OracleVerdict::fail("watertight_mesh", "mesh has no triangles".to_string());
    }
    match check_closed(mesh) {
        Ok(()) => OracleVerdict::pass(
            "watertight_mesh",
            format!("all edges of {} triangles paired", mesh.triangle_count()),
        ),
        Err(KernelError::NonManifold {
            open_edges,
            overloaded_edges,
        }) => OracleVerdict::fail_val(
            "watertight_mesh",
            format!(
                "{} open and {} overloaded edges",
                open_edges, overloaded_edges
            ),
            (open_edges + overloaded_edges) as f64,
        ),
        Err(other) => OracleVerdict::fail("watertight_mesh", other.to_string()),
    }
}

/// Check that no triangles have zero area.
pub fn check_no_degenerate_triangles(mesh: &RenderMesh) -> OracleVerdict {
    let total = mesh.triangle_count();
    let degenerate = mesh
        .indices
        .chunks_exact(3)
        .filter(|tri| {
            let [v0, v1, v2] = [mesh.vertex(tri[0]), mesh.vertex(tri[1]), mesh.vertex(tri[2])];
            let a = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let b = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
            let c = [
                a[1] * b[2] - a[2] * b[1],
                a[2] * b[0] - a[0] * b[2],
                a[0] * b[1] - a[1] * b[0],
            ];
            (c[0] * c[0] + c[1] * c[1] + c[2] * c[2]).sqrt() / 2.0 < 1e-10
        })
        .count();

    if degenerate == 0 {
        OracleVerdict::pass(
            "no_degenerate_triangles",
            format!("all {} triangles have non-zero area", total),
        )
    } else {
        OracleVerdict::fail_val(
            "no_degenerate_triangles",
            format!("{} of {} triangles are degenerate", degenerate, total),
            degenerate as f64,
        )
    }
}

/// Check that the mesh bounds match `expected` on every axis within `tol`.
pub fn check_mesh_bounds(mesh: &RenderMesh, expected: &Aabb, tol: f64) -> OracleVerdict {
    let Some(actual) = mesh.bounds() else {
        return OracleVerdict::fail("mesh_bounds", "mesh has no vertices".to_string());
    };
    let drift = (0..3)
        .map(|i| {
            (actual.min[i] - expected.min[i])
                .abs()
                .max((actual.max[i] - expected.max[i]).abs())
        })
        .fold(0.0, f64::max);

    if drift <= tol {
        OracleVerdict::pass_val(
            "mesh_bounds",
            format!("bounds within {:.4} of expected", drift),
            drift,
        )
    } else {
        OracleVerdict::fail_val(
            "mesh_bounds",
            format!(
                "expected {:?}..{:?}, got {:?}..{:?} (drift {:.4} > tol {})",
                expected.min, expected.max, actual.min, actual.max, drift, tol
            ),
            drift,
        )
    }
}

// ── Layout Oracles ──────────────────────────────────────────────────────────

/// Check that the cavity sits strictly inside the outer shell, one wall
/// thickness in from every side and the floor thickness up from the bottom.
pub fn check_cavity_inside_shell(layout: &Layout) -> OracleVerdict {
    let outer = layout.envelope.outer();
    let cavity = layout.envelope.cavity(&layout.dims);
    let wall = layout.dims.shell.wall_th;
    let floor = layout.dims.shell.floor_th;

    let walls = [
        cavity.min[0] - outer.min[0],
        outer.max[0] - cavity.max[0],
        cavity.min[1] - outer.min[1],
        outer.max[1] - cavity.max[1],
    ];
    let wrong_wall = walls.iter().find(|&&w| (w - wall).abs() > 1e-9);
    let floor_ok = (cavity.min[2] - outer.min[2] - floor).abs() <= 1e-9;

    match (wrong_wall, floor_ok) {
        (None, true) => OracleVerdict::pass_val(
            "cavity_inside_shell",
            format!("walls {} mm, floor {} mm", wall, floor),
            wall,
        ),
        (Some(w), _) => OracleVerdict::fail_val(
            "cavity_inside_shell",
            format!("wall is {} mm, expected {}", w, wall),
            *w,
        ),
        (None, false) => OracleVerdict::fail(
            "cavity_inside_shell",
            format!(
                "cavity starts at z = {}, expected floor {}",
                cavity.min[2], floor
            ),
        ),
    }
}

/// Check `shoulder + pcb_th + (screen_th − lid_th) == internal_height`.
pub fn check_flush_fit(dims: &DimensionSet) -> OracleVerdict {
    let Some(display) = &dims.display else {
        return OracleVerdict::pass("flush_fit", "no display configured".to_string());
    };
    let stack = display.shoulder_height(&dims.shell)
        + display.pcb_th
        + display.recess(&dims.shell);
    let error = stack - dims.shell.internal_height;

    if error.abs() <= 1e-9 && display.recess(&dims.shell) >= 0.0 {
        OracleVerdict::pass_val(
            "flush_fit",
            format!("display stack {} mm fills the cavity", stack),
            stack,
        )
    } else {
        OracleVerdict::fail_val(
            "flush_fit",
            format!(
                "display stack {} mm vs cavity {} mm, recess {}",
                stack,
                dims.shell.internal_height,
                display.recess(&dims.shell)
            ),
            stack,
        )
    }
}

/// Check that counterbore and shaft radii both stay inside the post inset.
pub fn check_screw_breakout(dims: &DimensionSet) -> OracleVerdict {
    let cb = dims.screws.counterbore_radius();
    let shaft = dims.screws.shaft_clearance_radius();
    let inset = dims.posts.inset;

    if cb < inset && shaft < inset && shaft < cb {
        OracleVerdict::pass_val(
            "screw_breakout",
            format!("counterbore {} / shaft {} inside inset {}", cb, shaft, inset),
            cb,
        )
    } else {
        OracleVerdict::fail_val(
            "screw_breakout",
            format!(
                "counterbore {} / shaft {} vs post inset {}",
                cb, shaft, inset
            ),
            cb,
        )
    }
}

/// Every oracle that applies to a finished mesh.
pub fn mesh_oracles(mesh: &RenderMesh, expected: &Aabb, tol: f64) -> Vec<OracleVerdict> {
    vec![
        check_watertight_mesh(mesh),
        check_mesh_bounds(mesh, expected, tol),
    ]
}

/// Every oracle that applies to a resolved layout.
pub fn layout_oracles(layout: &Layout) -> Vec<OracleVerdict> {
    vec![
        check_cavity_inside_shell(layout),
        check_flush_fit(&layout.dims),
        check_screw_breakout(&layout.dims),
    ]
}
