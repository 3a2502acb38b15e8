//! Compiler diagnostics.
//!
//! Both the backend (before emit) and the transformer (during emit) report
//! problems in the same shape: an optional file, an optional position and a
//! message. Diagnostics are data, never errors; the pipeline aggregates them
//! into the emit result and the CLI decides the exit code.

use std::fmt;
use std::path::{Path, PathBuf};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Suggestion,
    Message,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Suggestion => write!(f, "suggestion"),
            Severity::Message => write!(f, "message"),
        }
    }
}

/// A 1-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// A diagnostic reported by the backend or the transformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Source file the diagnostic refers to, if any
    pub file: Option<PathBuf>,
    /// Position inside `file`, if known
    pub position: Option<Position>,
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Backend-specific diagnostic code
    pub code: Option<u32>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            file: None,
            position: None,
            message: message.into(),
            severity: Severity::Error,
            code: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Diagnostic::error(message)
        }
    }

    /// Attach the source file.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Attach a 1-based position.
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.position = Some(Position { line, column });
        self
    }

    /// Attach a diagnostic code.
    pub fn with_code(mut self, code: u32) -> Self {
        self.code = Some(code);
        self
    }

    /// The source file, if any.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Renders `file (line,col): message` when the position is known, otherwise
/// just `message`.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.position) {
            (Some(file), Some(pos)) => write!(
                f,
                "{} ({},{}): {}",
                file.display(),
                pos.line,
                pos.column,
                self.message
            ),
            _ => write!(f, "{}", self.message),
        }
    }
}

/// Format a list of diagnostics, one per line, in the order given.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut output = String::new();
    for diag in diagnostics {
        output.push_str(&diag.to_string());
        output.push('\n');
    }
    output
}

/// Print diagnostics to stderr.
pub fn emit(diagnostics: &[Diagnostic]) {
    eprint!("{}", format_diagnostics(diagnostics));
}
