use csg_kernel::KernelError;

/// Geometry errors, each naming the feature or cutter at fault.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SynthError {
    #[error("feature {feature} failed: {source}")]
    Geometry {
        feature: String,
        source: KernelError,
    },

    #[error("void {cutter} of {feature} is misregistered: {reason}")]
    Misregistered {
        feature: String,
        cutter: String,
        reason: String,
    },

    #[error("{solid} is not a closed manifold: {source}")]
    NotClosed { solid: String, source: KernelError },

    #[error("sub-assembly {name} has no features")]
    EmptyAssembly { name: String },
}

impl SynthError {
    pub(crate) fn geometry(feature: &str) -> impl FnOnce(KernelError) -> SynthError + '_ {
        move |source| SynthError::Geometry {
            feature: feature.to_string(),
            source,
        }
    }

    /// Name of the feature, cutter or solid the error points at.
    pub fn culprit(&self) -> &str {
        match self {
            SynthError::Geometry { feature, .. } => feature,
            SynthError::Misregistered { cutter, .. } => cutter,
            SynthError::NotClosed { solid, .. } => solid,
            SynthError::EmptyAssembly { name } => name,
        }
    }
}
