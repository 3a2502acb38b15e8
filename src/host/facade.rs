//! Capability-forwarding host facade.
//!
//! `HostFacade` wraps the backend's own host. Mandatory operations forward to
//! the delegate. Each optional capability is probed once, at construction:
//! if the delegate has it, the facade's slot holds the delegate's own
//! implementation; if not, the slot stays empty and the facade reports the
//! capability as absent.
//!
//! Three operations are overridden regardless of the delegate:
//!
//! - the default library file name moves under `nodeModulesPrefix` when one
//!   is configured, and the default library location follows it;
//! - `realpath` is the identity. Module resolution must see the same
//!   unresolved absolute paths the compilation unit was built from, otherwise
//!   membership checks depend on where symlinks happen to point.

use std::io;
use std::path::{Path, PathBuf};

use crate::host::capabilities::{
    CancellationSource, CommandLineLookup, ContentHasher, DirectoryLister, DirectoryProbe,
    DirectoryReader, EnvironmentLookup, InvalidatedResolutions, ModuleLiteralResolver,
    ModuleNameResolver, PathCanonicalizer, ResolutionCacheProvider, SourceFileByPath, TraceSink,
    TypeReferenceDirectiveResolver, TypeReferenceResolver,
};
use crate::host::trait_def::CompilerHost;
use crate::host::types::{CompilerOptions, JsDocParsingMode, ScriptTarget, SourceFile};
use crate::util::config::HostConfig;

/// Relative location of the bundled default libraries below `node_modules`.
const TYPESCRIPT_LIB_DIR: &str = "typescript/lib";

/// Host facade over a delegate `CompilerHost`.
pub struct HostFacade<'a> {
    delegate: &'a dyn CompilerHost,
    node_modules_prefix: Option<PathBuf>,

    source_file_by_path: Option<&'a dyn SourceFileByPath>,
    cancellation_source: Option<&'a dyn CancellationSource>,
    directory_reader: Option<&'a dyn DirectoryReader>,
    module_name_resolver: Option<&'a dyn ModuleNameResolver>,
    module_literal_resolver: Option<&'a dyn ModuleLiteralResolver>,
    resolution_cache_provider: Option<&'a dyn ResolutionCacheProvider>,
    type_reference_resolver: Option<&'a dyn TypeReferenceResolver>,
    type_reference_directive_resolver: Option<&'a dyn TypeReferenceDirectiveResolver>,
    environment_lookup: Option<&'a dyn EnvironmentLookup>,
    invalidated_resolutions: Option<&'a dyn InvalidatedResolutions>,
    content_hasher: Option<&'a dyn ContentHasher>,
    command_line_lookup: Option<&'a dyn CommandLineLookup>,
    trace_sink: Option<&'a dyn TraceSink>,
    directory_probe: Option<&'a dyn DirectoryProbe>,
    directory_lister: Option<&'a dyn DirectoryLister>,
    js_doc_parsing_mode: Option<JsDocParsingMode>,
}

impl<'a> HostFacade<'a> {
    /// Wrap `delegate`, binding every optional capability it provides.
    pub fn new(delegate: &'a dyn CompilerHost, config: &HostConfig) -> Self {
        let facade = HostFacade {
            delegate,
            node_modules_prefix: config.node_modules_prefix().map(Path::to_path_buf),
            source_file_by_path: delegate.as_source_file_by_path(),
            cancellation_source: delegate.as_cancellation_source(),
            directory_reader: delegate.as_directory_reader(),
            module_name_resolver: delegate.as_module_name_resolver(),
            module_literal_resolver: delegate.as_module_literal_resolver(),
            resolution_cache_provider: delegate.as_resolution_cache_provider(),
            type_reference_resolver: delegate.as_type_reference_resolver(),
            type_reference_directive_resolver: delegate.as_type_reference_directive_resolver(),
            environment_lookup: delegate.as_environment_lookup(),
            invalidated_resolutions: delegate.as_invalidated_resolutions(),
            content_hasher: delegate.as_content_hasher(),
            command_line_lookup: delegate.as_command_line_lookup(),
            trace_sink: delegate.as_trace_sink(),
            directory_probe: delegate.as_directory_probe(),
            directory_lister: delegate.as_directory_lister(),
            js_doc_parsing_mode: delegate.js_doc_parsing_mode(),
        };

        tracing::debug!("host capabilities: {}", facade.capabilities());
        facade
    }

    /// The wrapped host.
    pub fn delegate(&self) -> &'a dyn CompilerHost {
        self.delegate
    }
}

impl CompilerHost for HostFacade<'_> {
    fn source_file(&self, file_name: &Path, target: ScriptTarget) -> Option<SourceFile> {
        self.delegate.source_file(file_name, target)
    }

    fn file_exists(&self, file_name: &Path) -> bool {
        self.delegate.file_exists(file_name)
    }

    fn read_file(&self, file_name: &Path) -> Option<String> {
        self.delegate.read_file(file_name)
    }

    fn write_file(&self, file_name: &Path, data: &str, write_byte_order_mark: bool) -> io::Result<()> {
        self.delegate.write_file(file_name, data, write_byte_order_mark)
    }

    fn current_directory(&self) -> PathBuf {
        self.delegate.current_directory()
    }

    fn canonical_file_name(&self, file_name: &Path) -> PathBuf {
        self.delegate.canonical_file_name(file_name)
    }

    fn use_case_sensitive_file_names(&self) -> bool {
        self.delegate.use_case_sensitive_file_names()
    }

    fn new_line(&self) -> &str {
        self.delegate.new_line()
    }

    fn default_lib_file_name(&self, options: &CompilerOptions) -> PathBuf {
        match &self.node_modules_prefix {
            Some(prefix) => prefix
                .join(TYPESCRIPT_LIB_DIR)
                .join(ScriptTarget::Es5.default_lib_file_name()),
            None => self.delegate.default_lib_file_name(options),
        }
    }

    fn default_lib_location(&self) -> Option<PathBuf> {
        // Overriding the file name means the directory has to follow, or the
        // backend goes looking for the library next to its own install.
        let es5 = CompilerOptions {
            target: ScriptTarget::Es5,
            ..CompilerOptions::default()
        };
        self.default_lib_file_name(&es5)
            .parent()
            .map(Path::to_path_buf)
    }

    fn as_source_file_by_path(&self) -> Option<&dyn SourceFileByPath> {
        self.source_file_by_path
    }

    fn as_cancellation_source(&self) -> Option<&dyn CancellationSource> {
        self.cancellation_source
    }

    fn as_directory_reader(&self) -> Option<&dyn DirectoryReader> {
        self.directory_reader
    }

    fn as_module_name_resolver(&self) -> Option<&dyn ModuleNameResolver> {
        self.module_name_resolver
    }

    fn as_module_literal_resolver(&self) -> Option<&dyn ModuleLiteralResolver> {
        self.module_literal_resolver
    }

    fn as_resolution_cache_provider(&self) -> Option<&dyn ResolutionCacheProvider> {
        self.resolution_cache_provider
    }

    fn as_type_reference_resolver(&self) -> Option<&dyn TypeReferenceResolver> {
        self.type_reference_resolver
    }

    fn as_type_reference_directive_resolver(&self) -> Option<&dyn TypeReferenceDirectiveResolver> {
        self.type_reference_directive_resolver
    }

    fn as_environment_lookup(&self) -> Option<&dyn EnvironmentLookup> {
        self.environment_lookup
    }

    fn as_invalidated_resolutions(&self) -> Option<&dyn InvalidatedResolutions> {
        self.invalidated_resolutions
    }

    fn as_content_hasher(&self) -> Option<&dyn ContentHasher> {
        self.content_hasher
    }

    fn as_command_line_lookup(&self) -> Option<&dyn CommandLineLookup> {
        self.command_line_lookup
    }

    fn as_trace_sink(&self) -> Option<&dyn TraceSink> {
        self.trace_sink
    }

    fn as_directory_probe(&self) -> Option<&dyn DirectoryProbe> {
        self.directory_probe
    }

    fn as_directory_lister(&self) -> Option<&dyn DirectoryLister> {
        self.directory_lister
    }

    /// Always present; takes precedence over the delegate's realpath.
    fn as_path_canonicalizer(&self) -> Option<&dyn PathCanonicalizer> {
        Some(self)
    }

    fn js_doc_parsing_mode(&self) -> Option<JsDocParsingMode> {
        self.js_doc_parsing_mode
    }
}

impl PathCanonicalizer for HostFacade<'_> {
    fn realpath(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}
