//! Test utilities and mocks for unit tests.
//!
//! This module provides in-memory stand-ins for the pieces of an emit run
//! that are awkward to exercise for real: the backend's compiler host, the
//! backend itself, and the transformer.
//!
//! # Example
//!
//! ```rust,ignore
//! use tsc_closure::test_support::{MockCompilerHost, MockFileSystem};
//!
//! #[test]
//! fn test_example() {
//!     let mut fs = MockFileSystem::new();
//!     fs.add_file("/proj/src/a.ts", "export const a = 1;");
//!
//!     let host = MockCompilerHost::new(fs)
//!         .with_cwd("/proj")
//!         .with_capability(Capability::CreateHash);
//!
//!     // Use mocks in tests...
//! }
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use crate::backend::{Backend, Program};
use crate::host::{
    CancellationSource, CancellationToken, Capability, CapabilitySet, CommandLineLookup,
    CompilerHost, CompilerOptions, ContentHasher, DirectoryLister, DirectoryProbe,
    DirectoryReader, EnvironmentLookup, InvalidatedResolutions, JsDocParsingMode,
    ModuleLiteralResolver, ModuleNameResolver, ModuleResolutionCache, ParsedCommandLine,
    PathCanonicalizer, ResolutionCacheProvider, ResolvedModule, ResolvedModuleWithFailedLookups,
    ResolvedTypeReferenceDirective, ResolvedTypeReferenceWithFailedLookups, ScriptTarget,
    SourceFile, SourceFileByPath, TraceSink, TypeReferenceDirectiveResolver,
    TypeReferenceResolver,
};
use crate::transform::{EmitError, EmitResult, TransformHost, Transformer, WriteCallback};
use crate::util::diagnostic::Diagnostic;
use crate::util::hash::content_hash;
use crate::util::paths::normalize_lexically;

/// Extensions tried, in order, when resolving an import specifier.
const RESOLVE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".d.ts", "/index.ts"];

/// Mock filesystem for testing without real I/O.
///
/// Provides an in-memory filesystem with directory tracking and symlinks
/// between directories.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: HashMap<PathBuf, String>,
    dirs: Vec<PathBuf>,
    symlinks: Vec<(PathBuf, PathBuf)>,
}

impl MockFileSystem {
    /// Create a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content, creating its parent directories.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path, content.into());
    }

    /// Add a directory and all of its ancestors.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            if !self.dirs.iter().any(|d| d == ancestor) {
                self.dirs.push(ancestor.to_path_buf());
            }
        }
    }

    /// Make `link` point at `target`. Everything below `link` resolves below
    /// `target`.
    pub fn add_symlink(&mut self, link: impl AsRef<Path>, target: impl AsRef<Path>) {
        if let Some(parent) = link.as_ref().parent() {
            self.add_dir(parent);
        }
        self.symlinks
            .push((link.as_ref().to_path_buf(), target.as_ref().to_path_buf()));
    }

    /// Follow symlinks until `path` names a real location.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        let mut current = normalize_lexically(path);
        // Bounded so a cycle cannot hang a test.
        for _ in 0..32 {
            let hop = self.symlinks.iter().find_map(|(link, target)| {
                current
                    .strip_prefix(link)
                    .ok()
                    .map(|rest| target.join(rest))
            });
            match hop {
                Some(next) => current = normalize_lexically(&next),
                None => break,
            }
        }
        current
    }

    pub fn read(&self, path: &Path) -> Option<&str> {
        self.files.get(&self.resolve(path)).map(String::as_str)
    }

    pub fn write(&mut self, path: &Path, content: impl Into<String>) {
        self.add_file(self.resolve(path), content);
    }

    pub fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(&self.resolve(path))
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        let resolved = self.resolve(path);
        self.dirs.iter().any(|d| *d == resolved)
    }

    pub fn remove_file(&mut self, path: &Path) -> bool {
        let resolved = self.resolve(path);
        self.files.remove(&resolved).is_some()
    }

    /// Files anywhere below `root`, sorted.
    pub fn files_under(&self, root: &Path) -> Vec<PathBuf> {
        let root = self.resolve(root);
        let mut files: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|p| p.starts_with(&root))
            .cloned()
            .collect();
        files.sort();
        files
    }

    /// Immediate subdirectories of `path`, sorted.
    pub fn list_dirs(&self, path: &Path) -> Vec<PathBuf> {
        let path = self.resolve(path);
        let mut dirs: Vec<PathBuf> = self
            .dirs
            .iter()
            .filter(|d| d.parent() == Some(path.as_path()))
            .cloned()
            .collect();
        dirs.sort();
        dirs
    }
}

/// In-memory `CompilerHost`.
///
/// Every optional capability is implemented, but only the ones switched on
/// with [`with_capability`](Self::with_capability) are advertised through
/// the `as_*` probes.
#[derive(Debug)]
pub struct MockCompilerHost {
    fs: RefCell<MockFileSystem>,
    cwd: PathBuf,
    enabled: CapabilitySet,
    env: HashMap<String, String>,
    token: CancellationToken,
    cache: ModuleResolutionCache,
    traces: RefCell<Vec<String>>,
    written: RefCell<Vec<(PathBuf, String)>>,
    fail_writes: bool,
}

impl MockCompilerHost {
    pub fn new(fs: MockFileSystem) -> Self {
        MockCompilerHost {
            fs: RefCell::new(fs),
            cwd: PathBuf::from("/"),
            enabled: CapabilitySet::new(),
            env: HashMap::new(),
            token: CancellationToken::new(),
            cache: ModuleResolutionCache::new(),
            traces: RefCell::new(Vec::new()),
            written: RefCell::new(Vec::new()),
            fail_writes: false,
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// Advertise `capability` through the matching probe.
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.enabled.insert(capability);
        self
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    /// Make every `write_file` fail with `PermissionDenied`.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn traces(&self) -> Vec<String> {
        self.traces.borrow().clone()
    }

    /// Successful writes, in order.
    pub fn written(&self) -> Vec<(PathBuf, String)> {
        self.written.borrow().clone()
    }

    pub fn remove_file(&self, path: &Path) -> bool {
        self.fs.borrow_mut().remove_file(&self.absolute(path))
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        normalize_lexically(&self.cwd.join(path))
    }

    fn enabled(&self, capability: Capability) -> bool {
        self.enabled.contains(capability)
    }

    fn resolve_specifier(&self, specifier: &str, containing_file: &Path) -> Option<ResolvedModule> {
        if !specifier.starts_with('.') {
            return None;
        }
        let dir = containing_file.parent().unwrap_or_else(|| Path::new("/"));
        let base = dir.join(specifier);
        let fs = self.fs.borrow();
        RESOLVE_EXTENSIONS
            .iter()
            .map(|ext| normalize_lexically(Path::new(&format!("{}{}", base.display(), ext))))
            .find(|candidate| fs.is_file(candidate))
            .map(|resolved_file_name| ResolvedModule {
                resolved_file_name,
                is_external_library_import: false,
            })
    }
}

impl CompilerHost for MockCompilerHost {
    fn source_file(&self, file_name: &Path, target: ScriptTarget) -> Option<SourceFile> {
        let path = self.absolute(file_name);
        let text = self.fs.borrow().read(&path)?.to_string();
        Some(SourceFile::new(path, text, target))
    }

    fn file_exists(&self, file_name: &Path) -> bool {
        self.fs.borrow().is_file(&self.absolute(file_name))
    }

    fn read_file(&self, file_name: &Path) -> Option<String> {
        self.fs
            .borrow()
            .read(&self.absolute(file_name))
            .map(str::to_string)
    }

    fn write_file(&self, file_name: &Path, data: &str, _write_byte_order_mark: bool) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read-only: {}", file_name.display()),
            ));
        }
        let path = self.absolute(file_name);
        self.fs.borrow_mut().write(&path, data);
        self.written
            .borrow_mut()
            .push((file_name.to_path_buf(), data.to_string()));
        Ok(())
    }

    fn current_directory(&self) -> PathBuf {
        self.cwd.clone()
    }

    fn canonical_file_name(&self, file_name: &Path) -> PathBuf {
        file_name.to_path_buf()
    }

    fn use_case_sensitive_file_names(&self) -> bool {
        true
    }

    fn new_line(&self) -> &str {
        "\n"
    }

    fn default_lib_file_name(&self, options: &CompilerOptions) -> PathBuf {
        Path::new("/mock/lib").join(options.target.default_lib_file_name())
    }

    fn as_source_file_by_path(&self) -> Option<&dyn SourceFileByPath> {
        self.enabled(Capability::SourceFileByPath).then_some(self as _)
    }

    fn as_cancellation_source(&self) -> Option<&dyn CancellationSource> {
        self.enabled(Capability::CancellationToken).then_some(self as _)
    }

    fn as_directory_reader(&self) -> Option<&dyn DirectoryReader> {
        self.enabled(Capability::ReadDirectory).then_some(self as _)
    }

    fn as_module_name_resolver(&self) -> Option<&dyn ModuleNameResolver> {
        self.enabled(Capability::ResolveModuleNames).then_some(self as _)
    }

    fn as_module_literal_resolver(&self) -> Option<&dyn ModuleLiteralResolver> {
        self.enabled(Capability::ResolveModuleNameLiterals).then_some(self as _)
    }

    fn as_resolution_cache_provider(&self) -> Option<&dyn ResolutionCacheProvider> {
        self.enabled(Capability::ModuleResolutionCache).then_some(self as _)
    }

    fn as_type_reference_resolver(&self) -> Option<&dyn TypeReferenceResolver> {
        self.enabled(Capability::ResolveTypeReferenceDirectives).then_some(self as _)
    }

    fn as_type_reference_directive_resolver(&self) -> Option<&dyn TypeReferenceDirectiveResolver> {
        self.enabled(Capability::ResolveTypeReferenceDirectiveReferences)
            .then_some(self as _)
    }

    fn as_environment_lookup(&self) -> Option<&dyn EnvironmentLookup> {
        self.enabled(Capability::EnvironmentVariable).then_some(self as _)
    }

    fn as_invalidated_resolutions(&self) -> Option<&dyn InvalidatedResolutions> {
        self.enabled(Capability::HasInvalidatedResolutions).then_some(self as _)
    }

    fn as_content_hasher(&self) -> Option<&dyn ContentHasher> {
        self.enabled(Capability::CreateHash).then_some(self as _)
    }

    fn as_command_line_lookup(&self) -> Option<&dyn CommandLineLookup> {
        self.enabled(Capability::ParsedCommandLine).then_some(self as _)
    }

    fn as_trace_sink(&self) -> Option<&dyn TraceSink> {
        self.enabled(Capability::Trace).then_some(self as _)
    }

    fn as_directory_probe(&self) -> Option<&dyn DirectoryProbe> {
        self.enabled(Capability::DirectoryExists).then_some(self as _)
    }

    fn as_directory_lister(&self) -> Option<&dyn DirectoryLister> {
        self.enabled(Capability::GetDirectories).then_some(self as _)
    }

    fn as_path_canonicalizer(&self) -> Option<&dyn PathCanonicalizer> {
        self.enabled(Capability::Realpath).then_some(self as _)
    }

    fn js_doc_parsing_mode(&self) -> Option<JsDocParsingMode> {
        self.enabled(Capability::JsDocParsingMode)
            .then_some(JsDocParsingMode::ParseAll)
    }
}

impl SourceFileByPath for MockCompilerHost {
    fn source_file_by_path(&self, _file_name: &Path, path: &Path, target: ScriptTarget) -> Option<SourceFile> {
        self.source_file(path, target)
    }
}

impl CancellationSource for MockCompilerHost {
    fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl DirectoryReader for MockCompilerHost {
    fn read_directory(
        &self,
        root: &Path,
        extensions: &[String],
        excludes: &[String],
        includes: &[String],
        depth: Option<usize>,
    ) -> Vec<PathBuf> {
        let root = self.absolute(root);
        self.fs
            .borrow()
            .files_under(&root)
            .into_iter()
            .filter(|path| {
                let name = path.to_string_lossy();
                let levels = path
                    .strip_prefix(&root)
                    .map(|rest| rest.components().count())
                    .unwrap_or(0);
                extensions.iter().any(|ext| name.ends_with(ext.as_str()))
                    && !excludes.iter().any(|ex| name.contains(ex.as_str()))
                    && (includes.is_empty() || includes.iter().any(|inc| name.contains(inc.as_str())))
                    && depth.map_or(true, |max| levels <= max)
            })
            .collect()
    }
}

impl ModuleNameResolver for MockCompilerHost {
    fn resolve_module_names(
        &self,
        module_names: &[String],
        containing_file: &Path,
        _options: &CompilerOptions,
    ) -> Vec<Option<ResolvedModule>> {
        module_names
            .iter()
            .map(|name| self.resolve_specifier(name, containing_file))
            .collect()
    }
}

impl ModuleLiteralResolver for MockCompilerHost {
    fn resolve_module_name_literals(
        &self,
        module_literals: &[String],
        containing_file: &Path,
        _options: &CompilerOptions,
    ) -> Vec<ResolvedModuleWithFailedLookups> {
        module_literals
            .iter()
            .map(|literal| {
                let resolved_module = self.resolve_specifier(literal, containing_file);
                let failed_lookup_locations = if resolved_module.is_none() {
                    vec![containing_file.with_file_name(format!("{}.ts", literal))]
                } else {
                    Vec::new()
                };
                ResolvedModuleWithFailedLookups {
                    resolved_module,
                    failed_lookup_locations,
                }
            })
            .collect()
    }
}

impl ResolutionCacheProvider for MockCompilerHost {
    fn module_resolution_cache(&self) -> Option<&ModuleResolutionCache> {
        Some(&self.cache)
    }
}

impl TypeReferenceResolver for MockCompilerHost {
    fn resolve_type_reference_directives(
        &self,
        names: &[String],
        _containing_file: &Path,
        _options: &CompilerOptions,
    ) -> Vec<Option<ResolvedTypeReferenceDirective>> {
        names
            .iter()
            .map(|name| {
                let index = PathBuf::from(format!("/mock/types/{}/index.d.ts", name));
                self.file_exists(&index)
                    .then_some(ResolvedTypeReferenceDirective {
                        primary: true,
                        resolved_file_name: Some(index),
                    })
            })
            .collect()
    }
}

impl TypeReferenceDirectiveResolver for MockCompilerHost {
    fn resolve_type_reference_directive_references(
        &self,
        references: &[String],
        containing_file: &Path,
        options: &CompilerOptions,
    ) -> Vec<ResolvedTypeReferenceWithFailedLookups> {
        self.resolve_type_reference_directives(references, containing_file, options)
            .into_iter()
            .map(|resolved| ResolvedTypeReferenceWithFailedLookups {
                resolved_type_reference_directive: resolved,
                failed_lookup_locations: Vec::new(),
            })
            .collect()
    }
}

impl EnvironmentLookup for MockCompilerHost {
    fn environment_variable(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }
}

impl InvalidatedResolutions for MockCompilerHost {
    fn has_invalidated_resolutions(&self, _file_path: &Path) -> bool {
        false
    }
}

impl ContentHasher for MockCompilerHost {
    fn create_hash(&self, data: &str) -> String {
        content_hash(data)
    }
}

impl CommandLineLookup for MockCompilerHost {
    fn parsed_command_line(&self, file_name: &Path) -> Option<ParsedCommandLine> {
        self.file_exists(file_name).then(ParsedCommandLine::default)
    }
}

impl TraceSink for MockCompilerHost {
    fn trace(&self, message: &str) {
        self.traces.borrow_mut().push(message.to_string());
    }
}

impl DirectoryProbe for MockCompilerHost {
    fn directory_exists(&self, directory_name: &Path) -> bool {
        self.fs.borrow().is_dir(&self.absolute(directory_name))
    }
}

impl DirectoryLister for MockCompilerHost {
    fn directories(&self, path: &Path) -> Vec<PathBuf> {
        self.fs.borrow().list_dirs(&self.absolute(path))
    }
}

impl PathCanonicalizer for MockCompilerHost {
    fn realpath(&self, path: &Path) -> PathBuf {
        self.fs.borrow().resolve(&self.absolute(path))
    }
}

/// Backend that loads its roots through the host and reports a fixed set of
/// pre-emit diagnostics.
#[derive(Debug, Default)]
pub struct StubBackend {
    diagnostics: Vec<Diagnostic>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }
}

impl Backend for StubBackend {
    fn create_program(
        &self,
        root_names: &[PathBuf],
        options: &CompilerOptions,
        host: &dyn CompilerHost,
    ) -> Program {
        let mut program = Program::new(root_names.to_vec(), options.clone());
        for root in root_names {
            if let Some(file) = host.source_file(root, options.target) {
                program.add_source_file(file);
            }
        }
        program
    }

    fn pre_emit_diagnostics(&self, _program: &Program) -> Vec<Diagnostic> {
        self.diagnostics.clone()
    }
}

/// Transformer that records how it was called and writes a one-line module
/// per in-unit source file.
#[derive(Debug, Default)]
pub struct RecordingTransformer {
    calls: Cell<usize>,
    roots_seen: RefCell<Vec<PathBuf>>,
    capabilities_seen: RefCell<CapabilitySet>,
    skipped: RefCell<Vec<PathBuf>>,
    diagnostics: Vec<Diagnostic>,
    externs: BTreeMap<PathBuf, String>,
}

impl RecordingTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `diagnostic` from every run.
    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    /// Report `externs` for `file` from every run.
    pub fn with_externs(mut self, file: impl Into<PathBuf>, externs: impl Into<String>) -> Self {
        self.externs.insert(file.into(), externs.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Module root of every run, in order.
    pub fn roots_seen(&self) -> Vec<PathBuf> {
        self.roots_seen.borrow().clone()
    }

    /// Capabilities of the module resolution host in the last run.
    pub fn capabilities_seen(&self) -> CapabilitySet {
        self.capabilities_seen.borrow().clone()
    }

    /// Files the host told the transformer to leave alone.
    pub fn skipped(&self) -> Vec<PathBuf> {
        self.skipped.borrow().clone()
    }
}

impl Transformer for RecordingTransformer {
    fn emit(
        &self,
        program: &Program,
        host: &TransformHost<'_>,
        write: &mut WriteCallback<'_>,
    ) -> Result<EmitResult, EmitError> {
        self.calls.set(self.calls.get() + 1);
        self.roots_seen
            .borrow_mut()
            .push(host.root_module_path().to_path_buf());
        *self.capabilities_seen.borrow_mut() = host.module_resolution_host().capabilities();

        let mut result = EmitResult {
            diagnostics: self.diagnostics.clone(),
            externs: self.externs.clone(),
            ..EmitResult::default()
        };

        for file in program.source_files() {
            if host.should_skip_processing(&file.file_name) {
                self.skipped.borrow_mut().push(file.file_name.clone());
                continue;
            }
            let output = host.module_output(&file.file_name);
            write(&output.output_path, &format!("goog.module('{}');", output.module_id))?;
            result
                .modules_manifest
                .add_module(output.module_id, file.file_name.clone());
            result.emitted_files.push(output.output_path);
        }

        Ok(result)
    }
}
