//! Host configuration.
//!
//! The host config is a JSON document written by the build rule, read once at
//! process start:
//!
//! ```json
//! {
//!   "rootModulePath": "/execroot/pkg",
//!   "es5Mode": false,
//!   "ignoreWarningsPath": ["/node_modules/"],
//!   "typeBlackListPaths": [],
//!   "unknownTypesPaths": [],
//!   "nodeModulesPrefix": "external/npm/node_modules"
//! }
//! ```
//!
//! Path fields are opaque strings. They are matched by substring or used as
//! prefixes, never parsed as globs.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error loading the host configuration.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("failed to read host config: {}", path.display())]
    #[diagnostic(code(tsc_closure::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse host config: {}", path.display())]
    #[diagnostic(
        code(tsc_closure::config::parse),
        help("the host config is a JSON object with camelCase keys")
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Naming, scoping and filtering policy for one emit run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostConfig {
    /// Root that module ids are relative to. Empty or absent means "use the
    /// common parent of the inputs".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_module_path: Option<String>,

    /// Emit `.js` instead of `.closure.js`
    pub es5_mode: bool,

    /// Warnings for files whose path contains one of these are dropped
    pub ignore_warnings_path: Vec<String>,

    /// Types declared in these files never appear in generated declarations
    pub type_black_list_paths: Vec<String>,

    /// Types from these files always emit as the unknown type
    pub unknown_types_paths: Vec<String>,

    /// Alternate location of `node_modules`, used to find the default library
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_modules_prefix: Option<String>,
}

impl HostConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The configured root, if one is set and non-empty.
    pub fn root_module_path(&self) -> Option<&Path> {
        self.root_module_path
            .as_deref()
            .filter(|root| !root.is_empty())
            .map(Path::new)
    }

    /// The configured `node_modules` prefix, if one is set and non-empty.
    pub fn node_modules_prefix(&self) -> Option<&Path> {
        self.node_modules_prefix
            .as_deref()
            .filter(|prefix| !prefix.is_empty())
            .map(Path::new)
    }

    /// Set the root module path.
    pub fn with_root_module_path(mut self, root: impl Into<String>) -> Self {
        self.root_module_path = Some(root.into());
        self
    }

    /// Set ES5 mode.
    pub fn with_es5_mode(mut self, es5_mode: bool) -> Self {
        self.es5_mode = es5_mode;
        self
    }

    /// Add a path fragment whose warnings are ignored.
    pub fn with_ignored_warnings(mut self, fragment: impl Into<String>) -> Self {
        self.ignore_warnings_path.push(fragment.into());
        self
    }

    /// Set the `node_modules` prefix.
    pub fn with_node_modules_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.node_modules_prefix = Some(prefix.into());
        self
    }
}
