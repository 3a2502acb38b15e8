//! Core data structures.

pub mod compilation_unit;

pub use compilation_unit::{CompilationUnit, UnitError};
