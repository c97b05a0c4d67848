pub mod assembly;
pub mod body;
pub mod cutouts;
pub mod errors;
pub mod feature;
pub mod fences;
pub mod lid;
pub mod pads;
pub mod posts;
pub mod registration;
pub mod shell;
pub mod standoffs;

pub use assembly::{tessellate_closed, SubAssembly};
pub use body::build_body;
pub use errors::SynthError;
pub use feature::{Cutter, Feature, FeatureKind};
pub use lid::build_lid;
pub use registration::{FacePlane, Registration, Side};

use csg_kernel::{Kernel, KernelSolidHandle};
use layout_engine::Layout;

/// Cutters reach this far past the faces they open on. Kept well above the
/// boolean tolerance so no cutter face lands near a host face.
pub const CUT_OVERSHOOT: f64 = 0.5;
/// Floor-mounted features sink this far into the floor so their bottom
/// faces are never coplanar with the floor top.
pub const EMBED_DEPTH: f64 = 0.5;

/// The two fabricable solids.
#[derive(Debug, Clone)]
pub struct Enclosure {
    pub body: KernelSolidHandle,
    pub lid: KernelSolidHandle,
}

/// Build both sub-assemblies from a resolved layout and realize them.
pub fn synthesize(layout: &Layout, kernel: &mut dyn Kernel) -> Result<Enclosure, SynthError> {
    let body = build_body(layout).realize(kernel)?;
    let lid = build_lid(layout).realize(kernel)?;
    Ok(Enclosure { body, lid })
}
