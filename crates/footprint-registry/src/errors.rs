/// Errors raised while validating dimensions or resolving the layout.
/// All of them occur before any kernel call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: String, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: f64 },

    #[error("{field} is not a finite number")]
    NotFinite { field: String },

    #[error("invalid constraint: {0}")]
    InvalidConstraint(String),

    #[error("no components configured; the ghost union is empty")]
    EmptyGhostUnion,

    #[error("ghost bounds are degenerate: {0}")]
    DegenerateBounds(String),

    #[error("right column is impossible: right_col_x + right_col_margin = {sum}")]
    ImpossibleRightColumn { sum: f64 },

    #[error("screen is thinner than the lid ({screen_th} < {lid_th}); the display would sit proud of the fascia")]
    InvertedDisplayRecess { screen_th: f64, lid_th: f64 },

    #[error("{a} and {b} are closer than the {clearance} mm minimum clearance")]
    Collision { a: String, b: String, clearance: f64 },

    #[error("{component} does not fit inside the shell cavity")]
    GhostOutsideShell { component: String },

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("failed to read configuration: {0}")]
    Io(String),
}
