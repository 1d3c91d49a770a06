//! Tessella
//!
//! A lifecycle-guarded bridge around an embedded script interpreter.
//! The host hands the bridge four search paths (interpreter home,
//! application code, packages, native extensions), runs modules by
//! name, and tears the runtime down when done.
//!
//! # Example
//!
//! ```no_run
//! use tessella::bridge::{InterpreterBridge, PathConfig};
//!
//! fn main() -> tessella::Result<()> {
//!     let bridge = InterpreterBridge::new();
//!     let paths = PathConfig::new("/app/home", "/app/code", "/app/packages", "/app/extensions");
//!     bridge.initialize(paths)?;
//!     bridge.run_module("entrypoint")?;
//!     bridge.finalize();
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/tessella")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod bridge;
pub mod engine;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

pub use bridge::{InterpreterBridge, PathConfig, RuntimeStatus};
pub use engine::Value;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "Tessella";

/// One-shot convenience: initialize a private bridge, run a single
/// module, and finalize, regardless of outcome.
///
/// Hosts that need the interpreter to stay live across calls should use
/// [`InterpreterBridge`] (or [`bridge::global`]) directly.
pub fn run_module_with_paths(
    paths: PathConfig,
    module: &str,
) -> Result<Value> {
    let bridge = InterpreterBridge::new();
    bridge
        .initialize(paths)
        .context("interpreter initialization failed")?;
    let result = bridge
        .run_module(module)
        .with_context(|| format!("failed to run module: {}", module));
    bridge.finalize_with_reason("one-shot run complete");
    result
}
