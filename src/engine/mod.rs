//! Embedded script engine
//!
//! Immediate, synchronous module executor: no scheduler, no async, one
//! statement at a time in source order. The bridge owns exactly one
//! engine instance at a time and serializes all access to it.

pub mod error;
pub mod eval;
pub mod lexer;
pub mod resolver;
pub mod value;

pub use error::{EngineError, EngineResult};
pub use resolver::{ModuleResolver, MODULE_EXT};
pub use value::Value;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::bridge::PathConfig;
use eval::{eval_expr, parse_line, Stmt};

/// Maximum transitive import nesting before the engine gives up.
pub const MAX_IMPORT_DEPTH: usize = 16;

/// The seam between the bridge and the interpreter it embeds.
///
/// The bridge is a pure lifecycle wrapper; everything the runtime
/// actually does goes through this trait.
pub trait ModuleEngine {
    /// Bring the runtime to a ready state for the given search paths.
    fn bootstrap(
        &mut self,
        paths: &PathConfig,
    ) -> EngineResult<()>;

    /// Resolve and execute a module to completion.
    fn run_module(
        &mut self,
        name: &str,
    ) -> EngineResult<Value>;

    /// Tear down runtime state. Called exactly once, at finalize.
    fn shutdown(&mut self);
}

/// Default engine: executes `.tsl` script modules.
///
/// All modules share one global namespace, mirroring a single embedded
/// interpreter instance. `import` executes a module at most once per
/// engine lifetime; `run_module` always executes.
#[derive(Debug, Default)]
pub struct ScriptEngine {
    resolver: Option<ModuleResolver>,
    globals: HashMap<String, Value>,
    loaded: HashSet<String>,
}

impl ScriptEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a variable from the shared global namespace.
    pub fn global(
        &self,
        name: &str,
    ) -> Option<&Value> {
        self.globals.get(name)
    }

    fn execute_file(
        &mut self,
        module: &str,
        path: &Path,
        depth: usize,
    ) -> EngineResult<Value> {
        debug!("executing module {} ({})", module, path.display());
        let source = fs::read_to_string(path)?;

        let mut last = Value::Unit;
        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            let Some(stmt) = parse_line(line, raw)? else {
                continue;
            };
            match stmt {
                Stmt::Let { name, expr } => {
                    let value = eval_expr(line, &expr, &self.globals)?;
                    self.globals.insert(name, value);
                }
                Stmt::Print { args } => {
                    let mut parts = Vec::with_capacity(args.len());
                    for arg in &args {
                        parts.push(eval_expr(line, arg, &self.globals)?.to_string());
                    }
                    println!("{}", parts.join(" "));
                }
                Stmt::Import { module } => {
                    self.import_module(&module, depth + 1)?;
                }
                Stmt::Expr { expr } => {
                    last = eval_expr(line, &expr, &self.globals)?;
                }
            }
        }
        Ok(last)
    }

    fn import_module(
        &mut self,
        module: &str,
        depth: usize,
    ) -> EngineResult<()> {
        if self.loaded.contains(module) {
            return Ok(());
        }
        if depth > MAX_IMPORT_DEPTH {
            return Err(EngineError::ImportDepth {
                module: module.to_string(),
                max: MAX_IMPORT_DEPTH,
            });
        }

        let path = self
            .resolver
            .as_ref()
            .ok_or(EngineError::NotBootstrapped)?
            .resolve(module)
            .ok_or_else(|| EngineError::ImportNotFound {
                module: module.to_string(),
            })?;

        // Mark before executing so import cycles terminate.
        self.loaded.insert(module.to_string());
        self.execute_file(module, &path, depth)?;
        Ok(())
    }
}

impl ModuleEngine for ScriptEngine {
    fn bootstrap(
        &mut self,
        paths: &PathConfig,
    ) -> EngineResult<()> {
        let roots = paths.search_roots();
        debug!("engine bootstrap with {} search roots", roots.len());
        self.resolver = Some(ModuleResolver::new(roots));
        Ok(())
    }

    fn run_module(
        &mut self,
        name: &str,
    ) -> EngineResult<Value> {
        let path = self
            .resolver
            .as_ref()
            .ok_or(EngineError::NotBootstrapped)?
            .resolve(name)
            .ok_or_else(|| EngineError::ImportNotFound {
                module: name.to_string(),
            })?;
        self.execute_file(name, &path, 0)
    }

    fn shutdown(&mut self) {
        debug!("engine shutdown ({} modules loaded)", self.loaded.len());
        self.resolver = None;
        self.globals.clear();
        self.loaded.clear();
    }
}
