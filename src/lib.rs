//! tsc-closure - TypeScript to Closure module emit driver
//!
//! This crate provides the library side of `tsc-closure`: the host facade
//! placed between the build tool and the compiler backend, the naming policy
//! handed to the Closure transformer, and the diagnostic-gated emit pipeline.

pub mod backend;
pub mod core;
pub mod host;
pub mod ops;
pub mod transform;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides in-memory hosts, a stub backend and a
/// recording transformer.
#[cfg(test)]
pub mod test_support;

pub use backend::{Backend, LoadingBackend, Program};
pub use crate::core::{CompilationUnit, UnitError};
pub use host::{CompilerHost, CompilerOptions, FsCompilerHost, HostFacade};
pub use ops::{EmitPipeline, EmitStage};
pub use transform::{EmitError, EmitResult, ModuleWrapTransformer, TransformHost, Transformer};
pub use util::config::HostConfig;
pub use util::diagnostic::Diagnostic;
