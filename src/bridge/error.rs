//! Bridge errors
//!
//! The original contract signaled initialization failure as a bare
//! boolean. The taxonomy below widens that to enumerated reasons; the
//! boolean surface survives as `InterpreterBridge::try_initialize`.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::EngineError;

use super::paths::PathRole;

/// Initialize result
pub type InitResult<T> = Result<T, InitError>;

/// Bridge result
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Reasons initialize can fail.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("interpreter is already initialized")]
    AlreadyInitialized,

    #[error("{role} path does not exist: {}", .path.display())]
    MissingPath { role: PathRole, path: PathBuf },

    #[error("{role} path is not a directory: {}", .path.display())]
    NotADirectory { role: PathRole, path: PathBuf },

    #[error("engine bootstrap failed: {0}")]
    Bootstrap(#[source] EngineError),

    #[error("manifest error: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the initialized-lifecycle operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("interpreter is not initialized")]
    NotInitialized,

    #[error(transparent)]
    Init(#[from] InitError),

    #[error("module not found: {module} (searched {})", format_roots(.searched))]
    ModuleNotFound {
        module: String,
        searched: Vec<PathBuf>,
    },

    #[error("module execution failed: {0}")]
    Engine(#[from] EngineError),
}

fn format_roots(roots: &[PathBuf]) -> String {
    let parts: Vec<String> = roots.iter().map(|p| p.display().to_string()).collect();
    parts.join(", ")
}
