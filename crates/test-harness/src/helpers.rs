//! Helper functions: error type, dimension-set builders, kernel history queries.

use csg_kernel::MockOp;
use enclosure::EnclosureError;
use footprint_registry::{ComponentKind, DimensionSet};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    Enclosure(#[from] EnclosureError),

    #[error("not found: {name}")]
    NotFound { name: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },
}

// ── Dimension Sets ──────────────────────────────────────────────────────────

/// The reference enclosure.
pub fn reference_dims() -> DimensionSet {
    DimensionSet::default()
}

/// The reference enclosure with one component removed.
pub fn dims_without(component: ComponentKind) -> DimensionSet {
    let mut dims = reference_dims();
    match component {
        ComponentKind::Display => dims.display = None,
        ComponentKind::Button => dims.buttons = None,
        ComponentKind::Microcontroller => dims.mcu = None,
        ComponentKind::Connector => dims.connector = None,
        ComponentKind::MotorDriver => dims.driver = None,
    }
    dims
}

// ── Kernel History ──────────────────────────────────────────────────────────

pub fn is_union(op: &MockOp) -> bool {
    matches!(op, MockOp::Union { .. })
}

pub fn is_subtract(op: &MockOp) -> bool {
    matches!(op, MockOp::Subtract { .. })
}

pub fn is_compound(op: &MockOp) -> bool {
    matches!(op, MockOp::Compound { .. })
}

/// Index of the first op matching `pred`.
pub fn first_op(history: &[MockOp], pred: impl Fn(&MockOp) -> bool) -> Option<usize> {
    history.iter().position(pred)
}

/// Index of the last op matching `pred`.
pub fn last_op(history: &[MockOp], pred: impl Fn(&MockOp) -> bool) -> Option<usize> {
    history.iter().rposition(pred)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dims_without_clears_only_that_component() {
        let dims = dims_without(ComponentKind::Connector);
        assert!(dims.connector.is_none());
        assert!(dims.driver.is_some());
    }

    #[test]
    fn history_queries() {
        let history = [
            MockOp::MakeBox { out: 1 },
            MockOp::Union { a: 1, b: 1, out: 2 },
            MockOp::Subtract { a: 2, b: 1, out: 3 },
            MockOp::Union { a: 3, b: 1, out: 4 },
        ];
        assert_eq!(first_op(&history, is_union), Some(1));
        assert_eq!(last_op(&history, is_union), Some(3));
        assert_eq!(last_op(&history, is_compound), None);
        assert_eq!(first_op(&history, is_subtract), Some(2));
    }
}
