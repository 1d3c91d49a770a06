//! Engine errors

use thiserror::Error;

/// Engine result
pub type EngineResult<T> = Result<T, EngineError>;

/// Failures raised by the embedded script engine itself.
///
/// These are the errors the original contract pushed into the runtime's
/// own logging; here they are surfaced as values so the bridge can
/// report them.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine used before bootstrap")]
    NotBootstrapped,

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("undefined variable at line {line}: {name}")]
    UndefinedVariable { line: usize, name: String },

    #[error("type mismatch at line {line}: {message}")]
    TypeMismatch { line: usize, message: String },

    #[error("division by zero at line {line}")]
    DivisionByZero { line: usize },

    #[error("module not found on search paths: {module}")]
    ImportNotFound { module: String },

    #[error("import depth exceeded while loading {module} (max {max})")]
    ImportDepth { module: String, max: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Shorthand for parse errors.
    pub fn parse(
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        EngineError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Shorthand for type-mismatch errors.
    pub fn type_mismatch(
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        EngineError::TypeMismatch {
            line,
            message: message.into(),
        }
    }
}
