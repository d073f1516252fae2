//! gridkit-quali library - qualifying classification
//!
//! Exposes the qualifying pipeline to the CLI binary and the web facade.

pub mod classify;
pub mod mock;
pub mod p15;
pub mod pipeline;

pub use classify::{build_qualifying, classify};
pub use p15::get_p15;
pub use pipeline::{run, QualifyingReport, QualifyingRequest};
