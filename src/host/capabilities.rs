//! Optional compiler host capabilities.
//!
//! A backend host implements the mandatory `CompilerHost` operations and may
//! additionally offer any of the capabilities below. Each capability is its
//! own trait; a host advertises one by returning `Some(self)` from the
//! matching `as_*` probe on `CompilerHost`. Callers branch on presence, so a
//! host must never advertise a capability it cannot actually serve.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::host::types::{
    CancellationToken, CompilerOptions, ModuleResolutionCache, ParsedCommandLine, ResolvedModule,
    ResolvedModuleWithFailedLookups, ResolvedTypeReferenceDirective,
    ResolvedTypeReferenceWithFailedLookups, ScriptTarget, SourceFile,
};

/// Look up a source file by its already-canonical path.
pub trait SourceFileByPath {
    fn source_file_by_path(&self, file_name: &Path, path: &Path, target: ScriptTarget) -> Option<SourceFile>;
}

/// Hand out the token the backend polls for cancellation.
pub trait CancellationSource {
    fn cancellation_token(&self) -> CancellationToken;
}

/// Recursive directory listing filtered by extension.
pub trait DirectoryReader {
    fn read_directory(
        &self,
        root: &Path,
        extensions: &[String],
        excludes: &[String],
        includes: &[String],
        depth: Option<usize>,
    ) -> Vec<PathBuf>;
}

/// Custom module resolution by specifier name.
pub trait ModuleNameResolver {
    fn resolve_module_names(
        &self,
        module_names: &[String],
        containing_file: &Path,
        options: &CompilerOptions,
    ) -> Vec<Option<ResolvedModule>>;
}

/// Custom module resolution by import literal.
pub trait ModuleLiteralResolver {
    fn resolve_module_name_literals(
        &self,
        module_literals: &[String],
        containing_file: &Path,
        options: &CompilerOptions,
    ) -> Vec<ResolvedModuleWithFailedLookups>;
}

/// Access to the host's module resolution cache.
pub trait ResolutionCacheProvider {
    fn module_resolution_cache(&self) -> Option<&ModuleResolutionCache>;
}

/// Custom resolution of type reference directives.
pub trait TypeReferenceResolver {
    fn resolve_type_reference_directives(
        &self,
        names: &[String],
        containing_file: &Path,
        options: &CompilerOptions,
    ) -> Vec<Option<ResolvedTypeReferenceDirective>>;
}

/// Custom resolution of type reference directives, reporting probed locations.
pub trait TypeReferenceDirectiveResolver {
    fn resolve_type_reference_directive_references(
        &self,
        references: &[String],
        containing_file: &Path,
        options: &CompilerOptions,
    ) -> Vec<ResolvedTypeReferenceWithFailedLookups>;
}

pub trait EnvironmentLookup {
    fn environment_variable(&self, name: &str) -> Option<String>;
}

pub trait InvalidatedResolutions {
    fn has_invalidated_resolutions(&self, file_path: &Path) -> bool;
}

pub trait ContentHasher {
    fn create_hash(&self, data: &str) -> String;
}

/// Resolve a referenced project's configuration file.
pub trait CommandLineLookup {
    fn parsed_command_line(&self, file_name: &Path) -> Option<ParsedCommandLine>;
}

pub trait TraceSink {
    fn trace(&self, message: &str);
}

pub trait DirectoryProbe {
    fn directory_exists(&self, directory_name: &Path) -> bool;
}

pub trait DirectoryLister {
    fn directories(&self, path: &Path) -> Vec<PathBuf>;
}

/// Resolve a path to its real location (following symlinks).
pub trait PathCanonicalizer {
    fn realpath(&self, path: &Path) -> PathBuf;
}

/// Name of one optional host capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    SourceFileByPath,
    CancellationToken,
    ReadDirectory,
    ResolveModuleNames,
    ResolveModuleNameLiterals,
    ModuleResolutionCache,
    ResolveTypeReferenceDirectives,
    ResolveTypeReferenceDirectiveReferences,
    EnvironmentVariable,
    HasInvalidatedResolutions,
    CreateHash,
    ParsedCommandLine,
    Trace,
    DirectoryExists,
    GetDirectories,
    Realpath,
    JsDocParsingMode,
}

impl Capability {
    /// Every optional capability, in declaration order.
    pub const ALL: [Capability; 17] = [
        Capability::SourceFileByPath,
        Capability::CancellationToken,
        Capability::ReadDirectory,
        Capability::ResolveModuleNames,
        Capability::ResolveModuleNameLiterals,
        Capability::ModuleResolutionCache,
        Capability::ResolveTypeReferenceDirectives,
        Capability::ResolveTypeReferenceDirectiveReferences,
        Capability::EnvironmentVariable,
        Capability::HasInvalidatedResolutions,
        Capability::CreateHash,
        Capability::ParsedCommandLine,
        Capability::Trace,
        Capability::DirectoryExists,
        Capability::GetDirectories,
        Capability::Realpath,
        Capability::JsDocParsingMode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::SourceFileByPath => "getSourceFileByPath",
            Capability::CancellationToken => "getCancellationToken",
            Capability::ReadDirectory => "readDirectory",
            Capability::ResolveModuleNames => "resolveModuleNames",
            Capability::ResolveModuleNameLiterals => "resolveModuleNameLiterals",
            Capability::ModuleResolutionCache => "getModuleResolutionCache",
            Capability::ResolveTypeReferenceDirectives => "resolveTypeReferenceDirectives",
            Capability::ResolveTypeReferenceDirectiveReferences => {
                "resolveTypeReferenceDirectiveReferences"
            }
            Capability::EnvironmentVariable => "getEnvironmentVariable",
            Capability::HasInvalidatedResolutions => "hasInvalidatedResolutions",
            Capability::CreateHash => "createHash",
            Capability::ParsedCommandLine => "getParsedCommandLine",
            Capability::Trace => "trace",
            Capability::DirectoryExists => "directoryExists",
            Capability::GetDirectories => "getDirectories",
            Capability::Realpath => "realpath",
            Capability::JsDocParsingMode => "jsDocParsingMode",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of optional capabilities a host reports as present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, capability: Capability) {
        self.0.insert(capability);
    }

    /// Insert `capability` when `present` is true.
    pub fn insert_if(&mut self, capability: Capability, present: bool) {
        if present {
            self.insert(capability);
        }
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        CapabilitySet(iter.into_iter().collect())
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(none)");
        }
        let names: Vec<&str> = self.0.iter().map(Capability::as_str).collect();
        write!(f, "{}", names.join(", "))
    }
}
