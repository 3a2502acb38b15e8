//! Filesystem-backed compiler host.
//!
//! This is the host the CLI hands to the facade. It reads and writes the real
//! filesystem and offers the capabilities a plain disk can serve: directory
//! listing, directory checks, environment lookup, hashing, tracing and
//! symlink-resolving realpath. It has no custom module resolution and no
//! cancellation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::host::capabilities::{
    ContentHasher, DirectoryLister, DirectoryProbe, DirectoryReader, EnvironmentLookup,
    PathCanonicalizer, TraceSink,
};
use crate::host::trait_def::CompilerHost;
use crate::host::types::{CompilerOptions, ScriptTarget, SourceFile};
use crate::util::fs::normalize_path;
use crate::util::hash::content_hash;
use crate::util::paths::absolutize;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Compiler host over the local filesystem.
#[derive(Debug, Clone)]
pub struct FsCompilerHost {
    cwd: PathBuf,
    lib_dir: PathBuf,
}

impl FsCompilerHost {
    /// Create a host rooted at `cwd`. The default library is looked up in
    /// `cwd/node_modules/typescript/lib` unless overridden.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let lib_dir = cwd.join("node_modules").join("typescript").join("lib");
        FsCompilerHost { cwd, lib_dir }
    }

    /// Set the directory containing the default library files.
    pub fn with_lib_dir(mut self, lib_dir: impl Into<PathBuf>) -> Self {
        self.lib_dir = lib_dir.into();
        self
    }

    /// Relative names are relative to the host's directory, not the process's.
    fn resolve(&self, file_name: &Path) -> PathBuf {
        absolutize(&self.cwd, file_name)
    }
}

impl CompilerHost for FsCompilerHost {
    fn source_file(&self, file_name: &Path, target: ScriptTarget) -> Option<SourceFile> {
        let text = self.read_file(file_name)?;
        Some(SourceFile::new(file_name, text, target))
    }

    fn file_exists(&self, file_name: &Path) -> bool {
        self.resolve(file_name).is_file()
    }

    fn read_file(&self, file_name: &Path) -> Option<String> {
        match fs::read_to_string(self.resolve(file_name)) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("cannot read {}: {}", file_name.display(), e);
                None
            }
        }
    }

    fn write_file(&self, file_name: &Path, data: &str, write_byte_order_mark: bool) -> io::Result<()> {
        let file_name = &self.resolve(file_name);
        if let Some(parent) = file_name.parent() {
            fs::create_dir_all(parent)?;
        }
        if write_byte_order_mark {
            let mut contents = String::with_capacity(data.len() + BYTE_ORDER_MARK.len_utf8());
            contents.push(BYTE_ORDER_MARK);
            contents.push_str(data);
            fs::write(file_name, contents)
        } else {
            fs::write(file_name, data)
        }
    }

    fn current_directory(&self) -> PathBuf {
        self.cwd.clone()
    }

    fn canonical_file_name(&self, file_name: &Path) -> PathBuf {
        if self.use_case_sensitive_file_names() {
            file_name.to_path_buf()
        } else {
            PathBuf::from(file_name.to_string_lossy().to_lowercase())
        }
    }

    fn use_case_sensitive_file_names(&self) -> bool {
        !cfg!(any(windows, target_os = "macos"))
    }

    fn new_line(&self) -> &str {
        if cfg!(windows) {
            "\r\n"
        } else {
            "\n"
        }
    }

    fn default_lib_file_name(&self, options: &CompilerOptions) -> PathBuf {
        self.lib_dir.join(options.target.default_lib_file_name())
    }

    fn default_lib_location(&self) -> Option<PathBuf> {
        Some(self.lib_dir.clone())
    }

    fn as_directory_reader(&self) -> Option<&dyn DirectoryReader> {
        Some(self)
    }

    fn as_environment_lookup(&self) -> Option<&dyn EnvironmentLookup> {
        Some(self)
    }

    fn as_content_hasher(&self) -> Option<&dyn ContentHasher> {
        Some(self)
    }

    fn as_trace_sink(&self) -> Option<&dyn TraceSink> {
        Some(self)
    }

    fn as_directory_probe(&self) -> Option<&dyn DirectoryProbe> {
        Some(self)
    }

    fn as_directory_lister(&self) -> Option<&dyn DirectoryLister> {
        Some(self)
    }

    fn as_path_canonicalizer(&self) -> Option<&dyn PathCanonicalizer> {
        Some(self)
    }
}

/// `excludes` and `includes` are path fragments: an entry is dropped when it
/// contains any exclude, and kept only if it contains some include (when
/// includes are given).
impl DirectoryReader for FsCompilerHost {
    fn read_directory(
        &self,
        root: &Path,
        extensions: &[String],
        excludes: &[String],
        includes: &[String],
        depth: Option<usize>,
    ) -> Vec<PathBuf> {
        let mut walker = WalkDir::new(self.resolve(root)).sort_by_file_name();
        if let Some(depth) = depth {
            walker = walker.max_depth(depth);
        }

        walker
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                let name = path.to_string_lossy();
                let ext_ok = extensions.is_empty() || extensions.iter().any(|ext| name.ends_with(ext.as_str()));
                let excluded = excludes.iter().any(|ex| name.contains(ex.as_str()));
                let included = includes.is_empty() || includes.iter().any(|inc| name.contains(inc.as_str()));
                ext_ok && !excluded && included
            })
            .collect()
    }
}

impl EnvironmentLookup for FsCompilerHost {
    fn environment_variable(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl ContentHasher for FsCompilerHost {
    fn create_hash(&self, data: &str) -> String {
        content_hash(data)
    }
}

impl TraceSink for FsCompilerHost {
    fn trace(&self, message: &str) {
        tracing::trace!("{}", message);
    }
}

impl DirectoryProbe for FsCompilerHost {
    fn directory_exists(&self, directory_name: &Path) -> bool {
        self.resolve(directory_name).is_dir()
    }
}

impl DirectoryLister for FsCompilerHost {
    fn directories(&self, path: &Path) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(self.resolve(path)) else {
            return Vec::new();
        };
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|entry| entry.path())
            .collect();
        dirs.sort();
        dirs
    }
}

impl PathCanonicalizer for FsCompilerHost {
    fn realpath(&self, path: &Path) -> PathBuf {
        normalize_path(&self.resolve(path))
    }
}
