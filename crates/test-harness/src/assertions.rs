//! Assertion helpers with diagnostic output.
//!
//! Each returns a `HarnessError` carrying expected vs actual instead of
//! panicking, so a test can report several problems at once.

use csg_kernel::RenderMesh;
use enclosure::EnclosureError;
use enclosure_types::Aabb;
use footprint_registry::ConfigError;

use crate::helpers::HarnessError;
use crate::oracle::OracleVerdict;

/// Fail with every failing verdict, serialized for the log.
pub fn assert_verdicts(verdicts: &[OracleVerdict], ctx: &str) -> Result<(), HarnessError> {
    let failed: Vec<&OracleVerdict> = verdicts.iter().filter(|v| !v.passed).collect();
    match failed.first() {
        None => Ok(()),
        Some(first) => Err(HarnessError::OracleFailure {
            oracle: first.oracle_name.clone(),
            detail: format!(
                "[{}] {}",
                ctx,
                serde_json::to_string(&failed).unwrap_or_else(|_| first.detail.clone())
            ),
        }),
    }
}

/// Assert the mesh bounding box matches within tolerance on every axis.
pub fn assert_bounding_box(
    mesh: &RenderMesh,
    expected: &Aabb,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = mesh.bounds().ok_or_else(|| HarnessError::AssertionFailed {
        detail: format!("[{}] mesh has no vertices", ctx),
    })?;

    for i in 0..3 {
        if (actual.min[i] - expected.min[i]).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] bounding box min[{}]: expected {:.3}, got {:.3} (tol={})",
                    ctx, i, expected.min[i], actual.min[i], tol,
                ),
            });
        }
        if (actual.max[i] - expected.max[i]).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] bounding box max[{}]: expected {:.3}, got {:.3} (tol={})",
                    ctx, i, expected.max[i], actual.max[i], tol,
                ),
            });
        }
    }
    Ok(())
}

/// Assert a geometry error pointing at `culprit`.
pub fn assert_geometry_culprit(err: &EnclosureError, culprit: &str) -> Result<(), HarnessError> {
    match err {
        EnclosureError::Geometry(e) if e.culprit() == culprit => Ok(()),
        other => Err(HarnessError::AssertionFailed {
            detail: format!("expected a geometry error naming {}, got: {}", culprit, other),
        }),
    }
}

/// Assert a collision naming both parties, in either order.
pub fn assert_collision(err: &EnclosureError, a: &str, b: &str) -> Result<(), HarnessError> {
    match err {
        EnclosureError::Configuration(ConfigError::Collision { a: x, b: y, .. })
            if (x == a && y == b) || (x == b && y == a) =>
        {
            Ok(())
        }
        other => Err(HarnessError::AssertionFailed {
            detail: format!("expected a collision between {} and {}, got: {}", a, b, other),
        }),
    }
}
