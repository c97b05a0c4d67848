pub mod derived;
pub mod dimensions;
pub mod errors;
pub mod registry;
pub mod validate;

pub use dimensions::*;
pub use errors::ConfigError;
pub use registry::{ComponentKind, Footprint, FootprintRegistry};
