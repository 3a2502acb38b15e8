//! Aggregated externs and modules manifest output.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::transform::ModulesManifest;
use crate::util::fs::{relative_path, write_string};

/// Header every generated externs file starts with.
pub const EXTERNS_HEADER: &str = "/**\n * @externs\n * @suppress {checkTypes,const,duplicate,missingOverride}\n */\n// NOTE: generated by tsc-closure, do not edit.\n";

/// Render per-file externs into one externs file.
///
/// Sections appear in path order, each preceded by a comment naming the
/// source file relative to `root`. Files with empty externs are omitted.
pub fn generated_externs(externs: &BTreeMap<PathBuf, String>, root: &Path) -> String {
    let mut out = String::from(EXTERNS_HEADER);
    for (file, text) in externs {
        if text.trim().is_empty() {
            continue;
        }
        out.push_str(&format!("\n// {}\n", relative_path(root, file).display()));
        out.push_str(text);
        if !text.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Write the externs file for one run.
pub fn write_externs(path: &Path, externs: &BTreeMap<PathBuf, String>, root: &Path) -> Result<()> {
    tracing::debug!("writing externs for {} file(s) to {}", externs.len(), path.display());
    write_string(path, &generated_externs(externs, root))
}

/// Write the modules manifest as pretty JSON.
pub fn write_manifest(path: &Path, manifest: &ModulesManifest) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest).context("failed to serialize modules manifest")?;
    write_string(path, &json)
}
