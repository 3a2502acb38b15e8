//! Data exchanged across the compiler host interface.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::util::diagnostic::Diagnostic;

/// Language level the backend parses and checks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptTarget {
    Es3,
    Es5,
    Es2015,
    Es2016,
    #[default]
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    EsNext,
}

impl ScriptTarget {
    /// File name of the default library for this target.
    pub fn default_lib_file_name(self) -> &'static str {
        match self {
            ScriptTarget::Es3 | ScriptTarget::Es5 => "lib.d.ts",
            ScriptTarget::Es2015 => "lib.es6.d.ts",
            ScriptTarget::Es2016 => "lib.es2016.full.d.ts",
            ScriptTarget::Es2017 => "lib.es2017.full.d.ts",
            ScriptTarget::Es2018 => "lib.es2018.full.d.ts",
            ScriptTarget::Es2019 => "lib.es2019.full.d.ts",
            ScriptTarget::Es2020 => "lib.es2020.full.d.ts",
            ScriptTarget::EsNext => "lib.esnext.full.d.ts",
        }
    }
}

/// Module system of the backend's own output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    None,
    #[default]
    CommonJs,
    Es2015,
    EsNext,
}

/// Options handed to the backend when building a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerOptions {
    pub target: ScriptTarget,
    pub module: ModuleKind,
    pub out_dir: Option<PathBuf>,
    pub root_dir: Option<PathBuf>,
    pub declaration: bool,
    pub import_helpers: bool,
    pub strict: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            target: ScriptTarget::Es2017,
            module: ModuleKind::CommonJs,
            out_dir: None,
            root_dir: None,
            declaration: true,
            import_helpers: true,
            strict: true,
        }
    }
}

/// A parsed source file as returned by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub file_name: PathBuf,
    pub text: String,
    pub target: ScriptTarget,
}

impl SourceFile {
    pub fn new(file_name: impl Into<PathBuf>, text: impl Into<String>, target: ScriptTarget) -> Self {
        SourceFile {
            file_name: file_name.into(),
            text: text.into(),
            target,
        }
    }

    /// Whether this is a `.d.ts` file.
    pub fn is_declaration_file(&self) -> bool {
        self.file_name.to_string_lossy().ends_with(".d.ts")
    }
}

/// Cooperative cancellation flag shared between the build tool and backend.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancellation_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A successfully resolved module import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub resolved_file_name: PathBuf,
    pub is_external_library_import: bool,
}

/// Module resolution outcome including the locations that were probed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedModuleWithFailedLookups {
    pub resolved_module: Option<ResolvedModule>,
    pub failed_lookup_locations: Vec<PathBuf>,
}

/// A resolved `/// <reference types="..." />` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTypeReferenceDirective {
    pub primary: bool,
    pub resolved_file_name: Option<PathBuf>,
}

/// Type reference resolution outcome including probed locations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedTypeReferenceWithFailedLookups {
    pub resolved_type_reference_directive: Option<ResolvedTypeReferenceDirective>,
    pub failed_lookup_locations: Vec<PathBuf>,
}

/// Memoised module resolutions keyed by containing directory and specifier.
#[derive(Debug, Clone, Default)]
pub struct ModuleResolutionCache {
    entries: HashMap<(PathBuf, String), ResolvedModule>,
}

impl ModuleResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, directory: impl Into<PathBuf>, specifier: impl Into<String>, module: ResolvedModule) {
        self.entries.insert((directory.into(), specifier.into()), module);
    }

    pub fn get(&self, directory: &Path, specifier: &str) -> Option<&ResolvedModule> {
        self.entries
            .get(&(directory.to_path_buf(), specifier.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A project configuration resolved to options and root files.
#[derive(Debug, Clone, Default)]
pub struct ParsedCommandLine {
    pub options: CompilerOptions,
    pub file_names: Vec<PathBuf>,
    pub errors: Vec<Diagnostic>,
}

/// How much of JSDoc the backend parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsDocParsingMode {
    ParseAll,
    KeepSemanticOnly,
    ParseNone,
    ParseForTypeErrors,
}
