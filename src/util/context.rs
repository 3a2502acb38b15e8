//! Execution context for one `tsc-closure` invocation.
//!
//! Build systems run the tool from an execution root and expect outputs
//! below a separate binary directory. Both usually arrive through the
//! environment (`JS_BINARY__EXECROOT`, `BAZEL_BINDIR`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::host::CompilerOptions;
use crate::util::paths::absolutize;

/// Paths an invocation resolves inputs and outputs against.
#[derive(Debug, Clone)]
pub struct ExecContext {
    /// Absolute execution root; inputs are relative to it
    exec_root: PathBuf,

    /// Output directory relative to the execution root, if any
    bin_dir: Option<PathBuf>,
}

impl ExecContext {
    /// Create a context rooted at `exec_root`, made absolute against the
    /// process working directory.
    pub fn new(exec_root: impl AsRef<Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(&cwd, exec_root))
    }

    /// Like [`new`](Self::new), resolving against `cwd` instead of the
    /// process working directory.
    pub fn with_cwd(cwd: &Path, exec_root: impl AsRef<Path>) -> Self {
        ExecContext {
            exec_root: absolutize(cwd, exec_root.as_ref()),
            bin_dir: None,
        }
    }

    /// Set the output directory, relative to the execution root.
    pub fn with_bin_dir(mut self, bin_dir: Option<PathBuf>) -> Self {
        self.bin_dir = bin_dir.filter(|dir| !dir.as_os_str().is_empty());
        self
    }

    pub fn exec_root(&self) -> &Path {
        &self.exec_root
    }

    /// Directory all artifacts are written below.
    pub fn output_root(&self) -> PathBuf {
        match &self.bin_dir {
            Some(bin_dir) => absolutize(&self.exec_root, bin_dir),
            None => self.exec_root.clone(),
        }
    }

    /// Resolve command-line inputs against the execution root.
    pub fn input_files<I, S>(&self, args: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        args.into_iter()
            .map(|arg| absolutize(&self.exec_root, arg.as_ref()))
            .collect()
    }

    /// Compiler options for a run in this context.
    pub fn compiler_options(&self) -> CompilerOptions {
        CompilerOptions {
            out_dir: Some(self.output_root()),
            root_dir: Some(self.exec_root.clone()),
            ..CompilerOptions::default()
        }
    }
}
