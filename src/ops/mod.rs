//! High-level operations.
//!
//! This module contains the implementation of the `tsc-closure` commands.

pub mod emit;
pub mod externs;

pub use emit::{EmitPipeline, EmitStage};
pub use externs::{generated_externs, write_externs, write_manifest};
