//! Shared utilities

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod fs;
pub mod hash;
pub mod paths;

pub use config::{ConfigError, HostConfig};
pub use context::ExecContext;
pub use diagnostic::Diagnostic;
