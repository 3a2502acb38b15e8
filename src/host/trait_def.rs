//! CompilerHost trait definition.

use std::io;
use std::path::{Path, PathBuf};

use crate::host::capabilities::{
    CancellationSource, Capability, CapabilitySet, CommandLineLookup, ContentHasher,
    DirectoryLister, DirectoryProbe, DirectoryReader, EnvironmentLookup, InvalidatedResolutions,
    ModuleLiteralResolver, ModuleNameResolver, PathCanonicalizer, ResolutionCacheProvider,
    SourceFileByPath, TraceSink, TypeReferenceDirectiveResolver, TypeReferenceResolver,
};
use crate::host::types::{CompilerOptions, JsDocParsingMode, ScriptTarget, SourceFile};

/// CompilerHost trait - the file and resolution interface a backend compiles
/// against.
///
/// The required methods are the mandatory operations every host provides.
/// The `as_*` probes expose optional capabilities; they default to `None`
/// and a host overrides a probe only when it really implements the
/// capability.
pub trait CompilerHost {
    /// Read and parse a source file. `None` when it cannot be read.
    fn source_file(&self, file_name: &Path, target: ScriptTarget) -> Option<SourceFile>;

    fn file_exists(&self, file_name: &Path) -> bool;

    fn read_file(&self, file_name: &Path) -> Option<String>;

    fn write_file(&self, file_name: &Path, data: &str, write_byte_order_mark: bool) -> io::Result<()>;

    fn current_directory(&self) -> PathBuf;

    fn canonical_file_name(&self, file_name: &Path) -> PathBuf;

    fn use_case_sensitive_file_names(&self) -> bool;

    fn new_line(&self) -> &str;

    /// Path of the default library for `options`.
    fn default_lib_file_name(&self, options: &CompilerOptions) -> PathBuf;

    /// Directory containing the default library, if the host knows it.
    fn default_lib_location(&self) -> Option<PathBuf> {
        None
    }

    fn as_source_file_by_path(&self) -> Option<&dyn SourceFileByPath> {
        None
    }

    fn as_cancellation_source(&self) -> Option<&dyn CancellationSource> {
        None
    }

    fn as_directory_reader(&self) -> Option<&dyn DirectoryReader> {
        None
    }

    fn as_module_name_resolver(&self) -> Option<&dyn ModuleNameResolver> {
        None
    }

    fn as_module_literal_resolver(&self) -> Option<&dyn ModuleLiteralResolver> {
        None
    }

    fn as_resolution_cache_provider(&self) -> Option<&dyn ResolutionCacheProvider> {
        None
    }

    fn as_type_reference_resolver(&self) -> Option<&dyn TypeReferenceResolver> {
        None
    }

    fn as_type_reference_directive_resolver(&self) -> Option<&dyn TypeReferenceDirectiveResolver> {
        None
    }

    fn as_environment_lookup(&self) -> Option<&dyn EnvironmentLookup> {
        None
    }

    fn as_invalidated_resolutions(&self) -> Option<&dyn InvalidatedResolutions> {
        None
    }

    fn as_content_hasher(&self) -> Option<&dyn ContentHasher> {
        None
    }

    fn as_command_line_lookup(&self) -> Option<&dyn CommandLineLookup> {
        None
    }

    fn as_trace_sink(&self) -> Option<&dyn TraceSink> {
        None
    }

    fn as_directory_probe(&self) -> Option<&dyn DirectoryProbe> {
        None
    }

    fn as_directory_lister(&self) -> Option<&dyn DirectoryLister> {
        None
    }

    fn as_path_canonicalizer(&self) -> Option<&dyn PathCanonicalizer> {
        None
    }

    fn js_doc_parsing_mode(&self) -> Option<JsDocParsingMode> {
        None
    }

    /// The optional capabilities this host reports as present.
    fn capabilities(&self) -> CapabilitySet {
        let mut set = CapabilitySet::new();
        set.insert_if(Capability::SourceFileByPath, self.as_source_file_by_path().is_some());
        set.insert_if(Capability::CancellationToken, self.as_cancellation_source().is_some());
        set.insert_if(Capability::ReadDirectory, self.as_directory_reader().is_some());
        set.insert_if(Capability::ResolveModuleNames, self.as_module_name_resolver().is_some());
        set.insert_if(
            Capability::ResolveModuleNameLiterals,
            self.as_module_literal_resolver().is_some(),
        );
        set.insert_if(
            Capability::ModuleResolutionCache,
            self.as_resolution_cache_provider().is_some(),
        );
        set.insert_if(
            Capability::ResolveTypeReferenceDirectives,
            self.as_type_reference_resolver().is_some(),
        );
        set.insert_if(
            Capability::ResolveTypeReferenceDirectiveReferences,
            self.as_type_reference_directive_resolver().is_some(),
        );
        set.insert_if(Capability::EnvironmentVariable, self.as_environment_lookup().is_some());
        set.insert_if(
            Capability::HasInvalidatedResolutions,
            self.as_invalidated_resolutions().is_some(),
        );
        set.insert_if(Capability::CreateHash, self.as_content_hasher().is_some());
        set.insert_if(Capability::ParsedCommandLine, self.as_command_line_lookup().is_some());
        set.insert_if(Capability::Trace, self.as_trace_sink().is_some());
        set.insert_if(Capability::DirectoryExists, self.as_directory_probe().is_some());
        set.insert_if(Capability::GetDirectories, self.as_directory_lister().is_some());
        set.insert_if(Capability::Realpath, self.as_path_canonicalizer().is_some());
        set.insert_if(Capability::JsDocParsingMode, self.js_doc_parsing_mode().is_some());
        set
    }
}
