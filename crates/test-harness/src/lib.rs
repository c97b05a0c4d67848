//! Test harness for enclosure generation.
//!
//! Drives the full pipeline against either kernel and checks the results
//! with oracles that report instead of panicking.
//!
//! # Key Components
//!
//! - [`EnclosureRun`]: Fluent builder: dimensions and kernel in, generated enclosure out
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`assertions`]: Assertion helpers with diagnostics
//! - [`helpers`]: Error type, reference dimension sets, history queries

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use workflow::{EnclosureRun, Generated};
