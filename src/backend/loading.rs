//! A backend that loads files without checking them.

use std::path::PathBuf;

use crate::backend::{Backend, Program};
use crate::host::{CompilerHost, CompilerOptions};
use crate::util::diagnostic::Diagnostic;

/// Diagnostic code for an unreadable root file.
const FILE_NOT_FOUND: u32 = 6053;

/// Backend that reads each root name and the default library through the
/// host.
///
/// A root that cannot be read becomes an error diagnostic. No syntax or type
/// checking happens, so a program whose files all load is clean. The default
/// library is added only when the host reports it exists.
#[derive(Debug, Clone, Default)]
pub struct LoadingBackend;

impl LoadingBackend {
    pub fn new() -> Self {
        LoadingBackend
    }
}

impl Backend for LoadingBackend {
    fn create_program(
        &self,
        root_names: &[PathBuf],
        options: &CompilerOptions,
        host: &dyn CompilerHost,
    ) -> Program {
        let mut program = Program::new(root_names.to_vec(), options.clone());

        for root in root_names {
            match host.source_file(root, options.target) {
                Some(file) => program.add_source_file(file),
                None => program.add_diagnostic(
                    Diagnostic::error(format!("File '{}' not found.", root.display()))
                        .with_file(root.clone())
                        .with_code(FILE_NOT_FOUND),
                ),
            }
        }

        let lib = host.default_lib_file_name(options);
        if host.file_exists(&lib) {
            if let Some(file) = host.source_file(&lib, options.target) {
                tracing::debug!("loaded default library {}", lib.display());
                program.add_source_file(file);
            }
        }

        program
    }

    fn pre_emit_diagnostics(&self, program: &Program) -> Vec<Diagnostic> {
        program.structural_diagnostics().to_vec()
    }
}
