//! The compilation backend seen from the pipeline.
//!
//! The backend owns parsing and type checking. The pipeline only asks it to
//! build a [`Program`] from the compilation unit through a host, and to list
//! the diagnostics that must be clean before anything is emitted.

mod loading;

use std::path::{Path, PathBuf};

use crate::host::{CompilerHost, CompilerOptions, SourceFile};
use crate::util::diagnostic::Diagnostic;

pub use loading::LoadingBackend;

/// A program built by a backend.
///
/// Holds every source file the backend pulled in, which can be more than the
/// root names (default library, transitively imported files).
#[derive(Debug, Clone, Default)]
pub struct Program {
    root_names: Vec<PathBuf>,
    options: CompilerOptions,
    source_files: Vec<SourceFile>,
    diagnostics: Vec<Diagnostic>,
}

impl Program {
    pub fn new(root_names: Vec<PathBuf>, options: CompilerOptions) -> Self {
        Program {
            root_names,
            options,
            source_files: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Add a source file to the program.
    pub fn add_source_file(&mut self, file: SourceFile) {
        self.source_files.push(file);
    }

    /// Record a structural problem found while building (unreadable file,
    /// parse failure).
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn root_names(&self) -> &[PathBuf] {
        &self.root_names
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn source_files(&self) -> &[SourceFile] {
        &self.source_files
    }

    pub fn source_file(&self, file_name: &Path) -> Option<&SourceFile> {
        self.source_files.iter().find(|sf| sf.file_name == file_name)
    }

    /// Diagnostics recorded while building.
    pub fn structural_diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Backend trait - builds and validates programs.
pub trait Backend {
    /// Build a program for `root_names`, reading files through `host`.
    ///
    /// Problems with the inputs are recorded on the program as diagnostics,
    /// not returned as errors.
    fn create_program(
        &self,
        root_names: &[PathBuf],
        options: &CompilerOptions,
        host: &dyn CompilerHost,
    ) -> Program;

    /// Every diagnostic that must be clean before emit: syntax and type
    /// errors over the whole program, not only the root names.
    fn pre_emit_diagnostics(&self, program: &Program) -> Vec<Diagnostic>;
}
