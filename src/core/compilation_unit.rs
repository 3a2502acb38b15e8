//! The set of input files one emit run is about.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::util::paths::{absolutize, common_parent_directory};

/// Error building a compilation unit.
#[derive(Debug, Error)]
pub enum UnitError {
    #[error("no input files were given")]
    Empty,
}

/// Absolute input paths, fixed for the lifetime of a pipeline run.
///
/// Paths are made absolute lexically against a base directory and are never
/// symlink-resolved, so membership tests compare exactly what the build tool
/// passed in.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    base: PathBuf,
    files: Vec<PathBuf>,
    index: HashSet<PathBuf>,
}

impl CompilationUnit {
    /// Build a unit from `files`, resolving relative paths against `base`.
    ///
    /// Duplicates are dropped; the first occurrence keeps its position.
    pub fn new<I, P>(files: I, base: &Path) -> Result<Self, UnitError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut unit = CompilationUnit {
            base: base.to_path_buf(),
            files: Vec::new(),
            index: HashSet::new(),
        };
        for file in files {
            let absolute = absolutize(base, file.as_ref());
            if unit.index.insert(absolute.clone()) {
                unit.files.push(absolute);
            }
        }

        if unit.files.is_empty() {
            return Err(UnitError::Empty);
        }
        Ok(unit)
    }

    /// Whether an absolute path belongs to the unit.
    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains(path)
    }

    /// Whether `path` belongs to the unit, resolving a relative path against
    /// the same base the unit was built with.
    pub fn contains_relative(&self, path: &Path) -> bool {
        self.contains(&absolutize(&self.base, path))
    }

    /// Directory relative inputs were resolved against.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Files in the order they were given.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Always false; construction rejects empty units.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Common parent directory of all files.
    ///
    /// Computed over the files' directories, so a single input yields its
    /// own directory rather than itself.
    pub fn common_root(&self) -> PathBuf {
        let dirs: Vec<&Path> = self
            .files
            .iter()
            .map(|file| file.parent().unwrap_or(file))
            .collect();
        common_parent_directory(&dirs)
    }
}
