//! Transformer that wraps sources in `goog.module` declarations.

use crate::backend::Program;
use crate::transform::{EmitError, EmitResult, TransformHost, Transformer, WriteCallback};

/// Emits each in-unit source file as a Closure module.
///
/// The body is copied verbatim below a `goog.module('<name>');` header; no
/// type erasure or rewriting happens. Declaration files and files outside
/// the compilation unit are not emitted.
#[derive(Debug, Clone, Default)]
pub struct ModuleWrapTransformer;

impl ModuleWrapTransformer {
    pub fn new() -> Self {
        ModuleWrapTransformer
    }
}

impl Transformer for ModuleWrapTransformer {
    fn emit(
        &self,
        program: &Program,
        host: &TransformHost<'_>,
        write: &mut WriteCallback<'_>,
    ) -> Result<EmitResult, EmitError> {
        let mut result = EmitResult::default();
        let new_line = host.module_resolution_host().new_line();

        for file in program.source_files() {
            if host.should_skip_processing(&file.file_name) || file.is_declaration_file() {
                continue;
            }

            let output = host.module_output(&file.file_name);
            let module_name = host.path_to_module_name(&file.file_name, &file.file_name.to_string_lossy());

            let mut contents = format!("goog.module('{}');{}", module_name, new_line);
            if host.flags().generate_extra_suppressions {
                contents.insert_str(0, &format!("/** @fileoverview @suppress {{checkTypes}} */{}", new_line));
            }
            contents.push_str(&file.text);

            write(&output.output_path, &contents)?;
            result.modules_manifest.add_module(module_name, file.file_name.clone());
            result.emitted_files.push(output.output_path);
        }

        Ok(result)
    }
}
