//! Naming, scoping and warning policy for the transformer.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::core::compilation_unit::CompilationUnit;
use crate::host::{CompilerHost, CompilerOptions};
use crate::util::config::HostConfig;
use crate::util::diagnostic::Diagnostic;
use crate::util::paths::{absolutize, derive_module_output, path_to_module_name, ModuleOutput};

/// Switches read by the transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformFlags {
    pub transform_decorators: bool,
    pub transform_types_to_closure: bool,
    pub googmodule: bool,
    pub generate_extra_suppressions: bool,
    pub untyped: bool,
    pub provide_external_module_dts_namespace: bool,
    pub generate_ts_migration_exports_shim: bool,
    pub add_dts_clutz_aliases: bool,
    pub is_js_transpilation: bool,
    pub convert_index_import_shorthand: bool,
    pub use_declaration_merging_transformation: bool,
}

impl Default for TransformFlags {
    fn default() -> Self {
        TransformFlags {
            transform_decorators: true,
            transform_types_to_closure: true,
            googmodule: true,
            generate_extra_suppressions: true,
            untyped: false,
            provide_external_module_dts_namespace: false,
            generate_ts_migration_exports_shim: false,
            add_dts_clutz_aliases: false,
            is_js_transpilation: false,
            convert_index_import_shorthand: false,
            use_declaration_merging_transformation: false,
        }
    }
}

type WarningSink<'h> = Box<dyn Fn(&Diagnostic) + 'h>;

/// Policy object consumed by the transformer.
pub struct TransformHost<'h> {
    unit: &'h CompilationUnit,
    compiler_host: &'h dyn CompilerHost,
    options: CompilerOptions,
    flags: TransformFlags,
    root_module_path: PathBuf,
    output_root: PathBuf,
    es5_mode: bool,
    ignore_warnings_path: Vec<String>,
    type_black_list_paths: HashSet<String>,
    unknown_types_paths: HashSet<String>,
    warning_sink: WarningSink<'h>,
}

impl<'h> TransformHost<'h> {
    /// Build the policy for one run.
    ///
    /// The module root is `config.rootModulePath` when set (made absolute
    /// against the host's current directory), then `options.root_dir`, and
    /// only then the common parent of the unit's files.
    pub fn new(
        config: &HostConfig,
        unit: &'h CompilationUnit,
        compiler_host: &'h dyn CompilerHost,
        options: CompilerOptions,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        let cwd = compiler_host.current_directory();
        let root_module_path = match (config.root_module_path(), &options.root_dir) {
            (Some(root), _) => absolutize(&cwd, root),
            (None, Some(root_dir)) => absolutize(&cwd, root_dir),
            (None, None) => unit.common_root(),
        };
        tracing::debug!("module root: {}", root_module_path.display());

        TransformHost {
            unit,
            compiler_host,
            options,
            flags: TransformFlags::default(),
            root_module_path,
            output_root: output_root.into(),
            es5_mode: config.es5_mode,
            ignore_warnings_path: config.ignore_warnings_path.clone(),
            type_black_list_paths: config.type_black_list_paths.iter().cloned().collect(),
            unknown_types_paths: config.unknown_types_paths.iter().cloned().collect(),
            warning_sink: Box::new(|warning: &Diagnostic| tracing::warn!("{}", warning)),
        }
    }

    /// Replace the transformer flags.
    pub fn with_flags(mut self, flags: TransformFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Route forwarded warnings somewhere other than the log.
    pub fn with_warning_sink(mut self, sink: impl Fn(&Diagnostic) + 'h) -> Self {
        self.warning_sink = Box::new(sink);
        self
    }

    pub fn flags(&self) -> &TransformFlags {
        &self.flags
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn root_module_path(&self) -> &Path {
        &self.root_module_path
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Host used for module resolution inside the transformer.
    pub fn module_resolution_host(&self) -> &'h dyn CompilerHost {
        self.compiler_host
    }

    /// Module id and output path for a source file.
    pub fn module_output(&self, file_name: &Path) -> ModuleOutput {
        derive_module_output(
            &self.root_dirs_relative(file_name),
            &self.root_module_path,
            &self.output_root,
            self.es5_mode,
        )
    }

    pub fn file_name_to_module_id(&self, file_name: &Path) -> String {
        self.module_output(file_name).module_id
    }

    /// Closure module name for `import_path` as seen from `context`.
    pub fn path_to_module_name(&self, context: &Path, import_path: &str) -> String {
        path_to_module_name(&self.root_module_path, context, import_path)
    }

    pub fn root_dirs_relative(&self, file_name: &Path) -> PathBuf {
        file_name.to_path_buf()
    }

    /// True for files pulled into the program that were not requested as
    /// inputs (default library, dependencies).
    ///
    /// Relative names resolve against the unit's own base, so the answer
    /// matches how the inputs were recorded.
    pub fn should_skip_processing(&self, file_name: &Path) -> bool {
        !self.unit.contains_relative(file_name)
    }

    /// Whether a warning is dropped because its file matches an ignore
    /// fragment. Warnings without a file are never dropped.
    pub fn is_warning_suppressed(&self, warning: &Diagnostic) -> bool {
        let Some(file) = warning.file() else {
            return false;
        };
        let file = file.to_string_lossy();
        self.ignore_warnings_path
            .iter()
            .any(|fragment| file.contains(fragment.as_str()))
    }

    /// Forward a transformer warning unless it is suppressed.
    pub fn log_warning(&self, warning: &Diagnostic) {
        if self.is_warning_suppressed(warning) {
            return;
        }
        (self.warning_sink)(warning);
    }

    /// Files whose declared types never appear in generated declarations.
    pub fn type_black_list_paths(&self) -> &HashSet<String> {
        &self.type_black_list_paths
    }

    /// Files whose types always emit as the unknown type.
    pub fn unknown_types_paths(&self) -> &HashSet<String> {
        &self.unknown_types_paths
    }
}
