//! Implementation of the emit pipeline.
//!
//! ```text
//! Initialized ─▶ ProgramBuilt ─┬─▶ DiagnosticsFailed
//!                              └─▶ TransformInvoked ─┬─▶ EmitSucceeded
//!                                                    └─▶ EmitPartial
//! ```
//!
//! The transformer only ever sees a program whose pre-emit diagnostics are
//! empty. Diagnostics the transformer reports afterwards are returned, but
//! outputs already handed to the write callback stay written.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::backend::Backend;
use crate::core::compilation_unit::CompilationUnit;
use crate::host::{CompilerHost, CompilerOptions, HostFacade};
use crate::transform::{EmitError, EmitResult, TransformHost, Transformer};
use crate::util::config::HostConfig;

/// Pipeline stage, used for logging and to classify results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitStage {
    Initialized,
    ProgramBuilt,
    DiagnosticsFailed,
    TransformInvoked,
    EmitSucceeded,
    EmitPartial,
}

impl EmitStage {
    /// Terminal stage a finished run ended in.
    pub fn of(result: &EmitResult) -> EmitStage {
        if result.emit_skipped {
            EmitStage::DiagnosticsFailed
        } else if result.diagnostics.is_empty() {
            EmitStage::EmitSucceeded
        } else {
            EmitStage::EmitPartial
        }
    }
}

impl fmt::Display for EmitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EmitStage::Initialized => "initialized",
            EmitStage::ProgramBuilt => "program built",
            EmitStage::DiagnosticsFailed => "diagnostics failed",
            EmitStage::TransformInvoked => "transform invoked",
            EmitStage::EmitSucceeded => "emit succeeded",
            EmitStage::EmitPartial => "emit partial",
        };
        write!(f, "{}", name)
    }
}

/// One compile-then-transform run over a fixed set of inputs.
#[derive(Debug, Clone)]
pub struct EmitPipeline {
    unit: CompilationUnit,
    config: HostConfig,
    options: CompilerOptions,
    output_root: PathBuf,
}

impl EmitPipeline {
    /// Fix the compilation unit. Relative inputs resolve against `base`.
    ///
    /// Outputs go under `options.out_dir`, or `base` when it is unset.
    pub fn new<I, P>(
        files: I,
        base: &Path,
        config: HostConfig,
        options: CompilerOptions,
    ) -> Result<Self, EmitError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let unit = CompilationUnit::new(files, base)?;
        let output_root = options
            .out_dir
            .clone()
            .unwrap_or_else(|| base.to_path_buf());

        Ok(EmitPipeline {
            unit,
            config,
            options,
            output_root,
        })
    }

    pub fn unit(&self) -> &CompilationUnit {
        &self.unit
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Run the pipeline.
    ///
    /// `write` persists one artifact; it alone does filesystem I/O. A write
    /// failure aborts the run as `EmitError::Write`.
    pub fn run<W>(
        &self,
        backend: &dyn Backend,
        delegate: &dyn CompilerHost,
        transformer: &dyn Transformer,
        mut write: W,
    ) -> Result<EmitResult, EmitError>
    where
        W: FnMut(&Path, &str) -> io::Result<()>,
    {
        tracing::debug!("{}: {} input file(s)", EmitStage::Initialized, self.unit.len());

        let facade = HostFacade::new(delegate, &self.config);
        let program = backend.create_program(self.unit.files(), &self.options, &facade);
        tracing::debug!(
            "{}: {} source file(s)",
            EmitStage::ProgramBuilt,
            program.source_files().len()
        );

        let diagnostics = backend.pre_emit_diagnostics(&program);
        if !diagnostics.is_empty() {
            tracing::debug!(
                "{}: {} diagnostic(s), skipping emit",
                EmitStage::DiagnosticsFailed,
                diagnostics.len()
            );
            return Ok(EmitResult::skipped(diagnostics));
        }

        let host = TransformHost::new(
            &self.config,
            &self.unit,
            &facade,
            self.options.clone(),
            self.output_root.clone(),
        );

        tracing::debug!("{}", EmitStage::TransformInvoked);
        let mut sink = |path: &Path, contents: &str| -> Result<(), EmitError> {
            tracing::debug!("writing {}", path.display());
            write(path, contents).map_err(|source| EmitError::Write {
                path: path.to_path_buf(),
                source,
            })
        };
        let result = transformer.emit(&program, &host, &mut sink)?;

        let stage = EmitStage::of(&result);
        tracing::debug!(
            "{}: {} file(s) emitted, {} diagnostic(s)",
            stage,
            result.emitted_files.len(),
            result.diagnostics.len()
        );
        Ok(result)
    }
}
