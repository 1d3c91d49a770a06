//! Interpreter lifecycle bridge
//!
//! Owns the process-wide lifecycle of a single embedded interpreter:
//! initialize with four search paths, run modules, report state, tear
//! down. The engine handle is an owned `Option` behind a mutex rather
//! than a bare global, so double-init and use-after-finalize are
//! checked errors instead of undefined behavior. All four operations
//! are synchronous; `run_module` may block for as long as the module
//! runs.

pub mod error;
pub mod paths;

pub use error::{BridgeError, BridgeResult, InitError, InitResult};
pub use paths::{PathConfig, PathRole, SEARCH_PATH_ENV};

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::engine::{EngineError, ModuleEngine, ScriptEngine, Value};

/// Everything that only exists while the interpreter is live.
struct EngineSlot {
    engine: Box<dyn ModuleEngine + Send>,
    paths: PathConfig,
    started_at: Instant,
    modules_run: u64,
    last_module: Option<String>,
}

/// Snapshot of the bridge's lifecycle state.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeStatus {
    pub initialized: bool,
    pub modules_run: u64,
    pub last_module: Option<String>,
    pub uptime: Option<Duration>,
}

/// Lifecycle wrapper around one embedded interpreter instance.
///
/// At most one engine is live per bridge at a time. Calls are
/// serialized through an internal mutex; `is_initialized` reads an
/// atomic mirror so it never queues behind a running module.
pub struct InterpreterBridge {
    slot: Mutex<Option<EngineSlot>>,
    initialized: AtomicBool,
}

impl Default for InterpreterBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterBridge {
    pub const fn new() -> Self {
        InterpreterBridge {
            slot: Mutex::new(None),
            initialized: AtomicBool::new(false),
        }
    }

    /// Initialize the default script engine with the given paths.
    ///
    /// Calling while already initialized is rejected with
    /// `InitError::AlreadyInitialized`; the live engine is untouched.
    pub fn initialize(
        &self,
        paths: PathConfig,
    ) -> InitResult<()> {
        self.initialize_with_engine(paths, Box::new(ScriptEngine::new()))
    }

    /// Initialize with a caller-supplied engine implementation.
    pub fn initialize_with_engine(
        &self,
        paths: PathConfig,
        mut engine: Box<dyn ModuleEngine + Send>,
    ) -> InitResult<()> {
        let mut slot = self.slot.lock();
        if slot.is_some() {
            return Err(InitError::AlreadyInitialized);
        }

        paths.validate()?;
        engine.bootstrap(&paths).map_err(InitError::Bootstrap)?;

        info!(
            "interpreter initialized (app: {}, home: {})",
            paths.app_path.display(),
            paths.home.display()
        );
        *slot = Some(EngineSlot {
            engine,
            paths,
            started_at: Instant::now(),
            modules_run: 0,
            last_module: None,
        });
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Boolean projection of `initialize`: the original contract's
    /// surface. Failure detail goes to the log instead of the caller.
    pub fn try_initialize(
        &self,
        paths: PathConfig,
    ) -> bool {
        match self.initialize(paths) {
            Ok(()) => true,
            Err(err) => {
                error!("interpreter initialization failed: {}", err);
                false
            }
        }
    }

    /// Resolve and execute a module against the configured paths.
    ///
    /// Returns the module's result value. Fails with `NotInitialized`
    /// before initialize or after finalize; a missing top-level module
    /// is reported as `ModuleNotFound` with the searched roots.
    pub fn run_module(
        &self,
        name: &str,
    ) -> BridgeResult<Value> {
        let mut slot = self.slot.lock();
        let slot = slot.as_mut().ok_or(BridgeError::NotInitialized)?;

        debug!("run_module: {}", name);
        match slot.engine.run_module(name) {
            Ok(value) => {
                slot.modules_run += 1;
                slot.last_module = Some(name.to_string());
                Ok(value)
            }
            Err(EngineError::ImportNotFound { module }) if module == name => {
                Err(BridgeError::ModuleNotFound {
                    module,
                    searched: slot.paths.search_roots(),
                })
            }
            Err(err) => Err(BridgeError::Engine(err)),
        }
    }

    /// Pure read of the lifecycle flag. Never blocks.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Tear down the engine. Idempotent: finalizing an uninitialized
    /// bridge is a no-op.
    pub fn finalize(&self) {
        self.finalize_with_reason("host requested finalize");
    }

    /// Tear down, recording why.
    pub fn finalize_with_reason(
        &self,
        reason: &str,
    ) {
        let mut slot = self.slot.lock();
        match slot.take() {
            Some(mut live) => {
                live.engine.shutdown();
                self.initialized.store(false, Ordering::SeqCst);
                info!(
                    "interpreter finalized after {} modules: {}",
                    live.modules_run, reason
                );
            }
            None => debug!("finalize on uninitialized bridge: {}", reason),
        }
    }

    /// Lifecycle snapshot for hosts and the CLI `check` command.
    pub fn status(&self) -> RuntimeStatus {
        let slot = self.slot.lock();
        match slot.as_ref() {
            Some(live) => RuntimeStatus {
                initialized: true,
                modules_run: live.modules_run,
                last_module: live.last_module.clone(),
                uptime: Some(live.started_at.elapsed()),
            },
            None => RuntimeStatus {
                initialized: false,
                modules_run: 0,
                last_module: None,
                uptime: None,
            },
        }
    }
}

/// The process-wide bridge instance.
///
/// Embedding hosts that want scoped lifecycles can construct their own
/// `InterpreterBridge`; the global exists for hosts that mirror the
/// original one-interpreter-per-process contract.
pub fn global() -> &'static InterpreterBridge {
    static GLOBAL: Lazy<InterpreterBridge> = Lazy::new(InterpreterBridge::new);
    &GLOBAL
}
