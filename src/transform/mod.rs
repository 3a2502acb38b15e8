//! The source-to-source transform stage.
//!
//! A [`Transformer`] turns a diagnostic-clean [`Program`] into Closure
//! modules. It takes naming and scoping decisions from a [`TransformHost`]
//! and hands every artifact to a write callback; it never touches the
//! filesystem itself.

pub mod host;
mod module_wrap;

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::backend::Program;
use crate::core::compilation_unit::UnitError;
use crate::util::diagnostic::Diagnostic;

pub use host::{TransformFlags, TransformHost};
pub use module_wrap::ModuleWrapTransformer;

/// Error that aborts an emit run.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Output callback handed to the transformer: `(output_path, contents)`.
pub type WriteCallback<'a> = dyn FnMut(&Path, &str) -> Result<(), EmitError> + 'a;

/// Transformer trait - the transform stage of the pipeline.
pub trait Transformer {
    /// Transform `program`, writing every artifact through `write`.
    ///
    /// Problems in the sources are reported in the result's diagnostics.
    /// An `Err` means a write failed; artifacts written before the failure
    /// stay where they are.
    fn emit(
        &self,
        program: &Program,
        host: &TransformHost<'_>,
        write: &mut WriteCallback<'_>,
    ) -> Result<EmitResult, EmitError>;
}

/// Closure module names and what they reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModulesManifest {
    modules: BTreeMap<String, PathBuf>,
    references: BTreeMap<String, BTreeSet<String>>,
}

impl ModulesManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `module` was emitted from `file_name`.
    pub fn add_module(&mut self, module: impl Into<String>, file_name: impl Into<PathBuf>) {
        let module = module.into();
        self.references.entry(module.clone()).or_default();
        self.modules.insert(module, file_name.into());
    }

    /// Record that `module` requires `referenced`.
    pub fn add_reference(&mut self, module: &str, referenced: impl Into<String>) {
        self.references
            .entry(module.to_string())
            .or_default()
            .insert(referenced.into());
    }

    pub fn file_name(&self, module: &str) -> Option<&Path> {
        self.modules.get(module).map(PathBuf::as_path)
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn references(&self, module: &str) -> impl Iterator<Item = &str> {
        self.references
            .get(module)
            .into_iter()
            .flat_map(|refs| refs.iter().map(String::as_str))
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Outcome of one emit run.
#[derive(Debug, Clone, Default)]
pub struct EmitResult {
    /// Pre-emit diagnostics when skipped, transformer diagnostics otherwise
    pub diagnostics: Vec<Diagnostic>,
    /// True when the transformer never ran
    pub emit_skipped: bool,
    /// Output paths in the order they were written
    pub emitted_files: Vec<PathBuf>,
    /// Externs text per source file
    pub externs: BTreeMap<PathBuf, String>,
    pub modules_manifest: ModulesManifest,
}

impl EmitResult {
    /// Result for a run stopped at the diagnostic gate.
    pub fn skipped(diagnostics: Vec<Diagnostic>) -> Self {
        EmitResult {
            diagnostics,
            emit_skipped: true,
            ..EmitResult::default()
        }
    }

    /// True when emit ran and reported nothing.
    pub fn success(&self) -> bool {
        !self.emit_skipped && self.diagnostics.is_empty()
    }
}
