//! Module resolution over the configured search roots
//!
//! Search order is fixed by the bridge configuration: application code,
//! packages, extra search paths, native extensions, interpreter home.
//! Dotted module names map to subdirectories; a module `foo.bar` is
//! looked up as `<root>/foo/bar.tsl`, then `<root>/foo/bar/mod.tsl`.

use std::path::{Path, PathBuf};

use tracing::trace;

/// Module source file extension.
pub const MODULE_EXT: &str = "tsl";

/// Resolves module names to source files across an ordered root list.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    roots: Vec<PathBuf>,
}

impl ModuleResolver {
    /// Create a resolver over the given roots, highest priority first.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        ModuleResolver { roots }
    }

    /// Resolve a dotted module name to a source file path.
    ///
    /// Returns None when no root contains the module. Empty names and
    /// names with empty segments never resolve.
    pub fn resolve(
        &self,
        module: &str,
    ) -> Option<PathBuf> {
        let parts: Vec<&str> = module.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        for root in &self.roots {
            if let Some(path) = resolve_in_root(root, &parts) {
                trace!("resolved module {} -> {}", module, path.display());
                return Some(path);
            }
        }
        None
    }
}

fn resolve_in_root(
    root: &Path,
    parts: &[&str],
) -> Option<PathBuf> {
    if !root.exists() {
        return None;
    }

    let mut rel = PathBuf::new();
    for part in parts {
        rel.push(part);
    }

    let candidates = [
        root.join(rel.with_extension(MODULE_EXT)),
        root.join(rel.join("mod")).with_extension(MODULE_EXT),
    ];
    candidates.into_iter().find(|c| c.is_file())
}
