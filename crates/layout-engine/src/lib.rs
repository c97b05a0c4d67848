pub mod collision;
pub mod envelope;
pub mod ghosts;
pub mod layout;
pub mod placement;

pub use envelope::{EnvelopeDriver, ShellEnvelope};
pub use ghosts::{build_ghosts, GhostAssembly, GhostVolume};
pub use layout::{resolve_layout, Layout};
pub use placement::{Corner, DisplayStack, FenceSite, Site};
