//! Input checks shared by every kernel implementation.

use enclosure_types::SketchProfile;

use crate::types::{KernelError, Tier};

const EPS: f64 = 1e-9;

pub(crate) fn positive(operation: &'static str, name: &str, value: f64) -> Result<(), KernelError> {
    if value.is_finite() && value > EPS {
        Ok(())
    } else {
        Err(KernelError::Degenerate {
            operation,
            reason: format!("{name} must be positive, got {value}"),
        })
    }
}

pub(crate) fn box_size(size: [f64; 3]) -> Result<(), KernelError> {
    positive("make_box", "width", size[0])?;
    positive("make_box", "depth", size[1])?;
    positive("make_box", "height", size[2])
}

pub(crate) fn cone(bottom_radius: f64, top_radius: f64, height: f64) -> Result<(), KernelError> {
    positive("make_cone", "bottom radius", bottom_radius)?;
    positive("make_cone", "height", height)?;
    if !top_radius.is_finite() || top_radius < 0.0 {
        return Err(KernelError::Degenerate {
            operation: "make_cone",
            reason: format!("top radius must be non-negative, got {top_radius}"),
        });
    }
    Ok(())
}

/// Only the very top of a stack may close to a point.
pub(crate) fn stack(tiers: &[Tier]) -> Result<(), KernelError> {
    if tiers.is_empty() {
        return Err(KernelError::Degenerate {
            operation: "make_stack",
            reason: "no tiers".to_string(),
        });
    }
    let last = tiers.len() - 1;
    for (i, tier) in tiers.iter().enumerate() {
        positive("make_stack", "tier height", tier.height)?;
        positive("make_stack", "tier bottom radius", tier.bottom_radius)?;
        if i < last {
            positive("make_stack", "tier top radius", tier.top_radius)?;
        } else if !tier.top_radius.is_finite() || tier.top_radius < 0.0 {
            return Err(KernelError::Degenerate {
                operation: "make_stack",
                reason: format!("top radius must be non-negative, got {}", tier.top_radius),
            });
        }
    }
    Ok(())
}

pub(crate) fn profile(profile: &SketchProfile) -> Result<(), KernelError> {
    match profile {
        SketchProfile::Rectangle { width, height } => {
            positive("make_sketch", "width", *width)?;
            positive("make_sketch", "height", *height)
        }
    }
}

pub(crate) fn fillet(profile: &SketchProfile, radius: f64) -> Result<(), KernelError> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(KernelError::FilletFailed {
            reason: format!("radius must be non-negative, got {radius}"),
        });
    }
    let limit = profile.max_fillet_radius();
    if radius > limit + EPS {
        return Err(KernelError::FilletFailed {
            reason: format!("radius {radius} exceeds the largest corner radius {limit} of the profile"),
        });
    }
    Ok(())
}
