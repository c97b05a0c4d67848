pub mod anchor;
pub mod bounds;
pub mod sketch;

pub use anchor::*;
pub use bounds::*;
pub use sketch::*;
