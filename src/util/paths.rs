//! Module identity and output path derivation.
//!
//! Everything here is pure: no filesystem access, no symlink resolution.
//! Paths are compared component by component exactly as given.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR_STR};
use std::sync::LazyLock;

use regex::Regex;

use crate::util::fs::relative_path;

/// Qualifier appended to output names outside of ES5 mode.
pub const CLOSURE_QUALIFIER: &str = ".closure";

/// Extension of every emitted module.
pub const OUTPUT_EXTENSION: &str = ".js";

/// `.ts`, `.tsx`, `.js`, `.jsx`, optionally preceded by `.d`.
static SOURCE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\.d)?\.[jt]sx?$").expect("source suffix pattern is valid"));

/// Module identity and output location for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOutput {
    /// Root-relative path with the source suffix stripped
    pub module_id: String,
    /// Where the emitted module is written
    pub output_path: PathBuf,
}

/// Longest common leading directory of a set of paths.
///
/// Returns the root separator when the paths share nothing (or when `paths`
/// is empty).
pub fn common_parent_directory<P: AsRef<Path>>(paths: &[P]) -> PathBuf {
    let mut iter = paths.iter();
    let Some(first) = iter.next() else {
        return PathBuf::from(MAIN_SEPARATOR_STR);
    };

    let mut prefix: Vec<Component<'_>> = first.as_ref().components().collect();
    for path in iter {
        let shared = prefix
            .iter()
            .zip(path.as_ref().components())
            .take_while(|(a, b)| **a == *b)
            .count();
        prefix.truncate(shared);
    }

    if prefix.is_empty() {
        return PathBuf::from(MAIN_SEPARATOR_STR);
    }
    prefix.iter().collect()
}

/// Resolve `.` and `..` without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Make `path` absolute against `base`, lexically.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_lexically(path)
    } else {
        normalize_lexically(&base.join(path))
    }
}

/// Strip a source suffix. A declaration suffix (`.d.ts`) goes in one step.
pub fn strip_source_suffix(name: &str) -> String {
    SOURCE_SUFFIX.replace(name, "").into_owned()
}

/// Derive the module id and output path for `file`.
///
/// `file` is made relative to `root`, stripped of its source suffix (that is
/// the module id), then qualified with `.closure` unless `es5_mode` is set and
/// given the `.js` extension under `out_root`.
pub fn derive_module_output(file: &Path, root: &Path, out_root: &Path, es5_mode: bool) -> ModuleOutput {
    let relative = relative_path(root, file);
    let module_id = strip_source_suffix(&relative.to_string_lossy());

    let mut output = module_id.clone();
    if !es5_mode {
        output.push_str(CLOSURE_QUALIFIER);
    }
    output.push_str(OUTPUT_EXTENSION);

    ModuleOutput {
        module_id,
        output_path: out_root.join(output),
    }
}

/// Map an import path to a dotted Closure module name.
///
/// Relative imports resolve against the directory of `context`. Characters
/// Closure does not accept in module names become `_`.
pub fn path_to_module_name(root: &Path, context: &Path, import_path: &str) -> String {
    let stripped = strip_source_suffix(import_path);
    let resolved = if stripped.starts_with('.') {
        let dir = context.parent().unwrap_or_else(|| Path::new(""));
        normalize_lexically(&dir.join(&stripped))
    } else {
        PathBuf::from(&stripped)
    };

    let relative = relative_path(root, &resolved);
    let dotted = relative.to_string_lossy().replace(['/', '\\'], ".");

    dotted
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let allowed = if i == 0 {
                ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
            } else {
                ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '$')
            };
            if allowed {
                ch
            } else {
                '_'
            }
        })
        .collect()
}
