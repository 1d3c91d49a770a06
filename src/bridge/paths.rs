//! Path configuration for the embedded interpreter
//!
//! Four roles, supplied by the host at initialize time: interpreter home
//! (standard modules), application code, third-party packages, and
//! native-extension libraries. Extra search paths can be appended via
//! the `TESSELLA_PATH` environment variable or a `tessella.toml`
//! manifest.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{InitError, InitResult};

/// Environment variable holding extra package search paths
/// (`:` or `;` separated).
pub const SEARCH_PATH_ENV: &str = "TESSELLA_PATH";

/// Which of the four configured locations a path error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    Home,
    App,
    Packages,
    Extensions,
}

impl fmt::Display for PathRole {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            PathRole::Home => "interpreter home",
            PathRole::App => "application code",
            PathRole::Packages => "packages",
            PathRole::Extensions => "native extensions",
        };
        write!(f, "{}", name)
    }
}

/// The four path roles plus optional extra search paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    pub home: PathBuf,
    pub app_path: PathBuf,
    pub packages_path: PathBuf,
    pub extensions_path: PathBuf,
    /// Additional module roots, searched between packages and extensions.
    #[serde(default)]
    pub extra_search_paths: Vec<PathBuf>,
}

/// On-disk manifest shape (`tessella.toml`).
#[derive(Debug, Deserialize)]
struct Manifest {
    paths: ManifestPaths,
}

#[derive(Debug, Deserialize)]
struct ManifestPaths {
    home: PathBuf,
    app: PathBuf,
    packages: PathBuf,
    extensions: PathBuf,
    #[serde(default)]
    search: Vec<PathBuf>,
}

impl PathConfig {
    /// Build a configuration from the four positional paths, picking up
    /// extra search paths from `TESSELLA_PATH`.
    pub fn new(
        home: impl Into<PathBuf>,
        app_path: impl Into<PathBuf>,
        packages_path: impl Into<PathBuf>,
        extensions_path: impl Into<PathBuf>,
    ) -> Self {
        PathConfig {
            home: home.into(),
            app_path: app_path.into(),
            packages_path: packages_path.into(),
            extensions_path: extensions_path.into(),
            extra_search_paths: extra_paths_from_env(),
        }
    }

    /// Load a configuration from a `tessella.toml` manifest.
    pub fn from_manifest(path: &Path) -> InitResult<Self> {
        let content = fs::read_to_string(path)?;
        let manifest: Manifest = toml::from_str(&content)?;
        let mut config = PathConfig::new(
            manifest.paths.home,
            manifest.paths.app,
            manifest.paths.packages,
            manifest.paths.extensions,
        );
        // Manifest search entries take priority over env-provided ones.
        let env_extras = std::mem::take(&mut config.extra_search_paths);
        config.extra_search_paths = manifest.paths.search;
        config.extra_search_paths.extend(env_extras);
        Ok(config)
    }

    /// Check that every role points at an existing directory.
    ///
    /// Extra search paths are not validated here: missing entries are
    /// simply skipped at resolution time, matching how env-provided
    /// paths behave.
    pub fn validate(&self) -> InitResult<()> {
        for (role, path) in self.roles() {
            if !path.exists() {
                return Err(InitError::MissingPath {
                    role,
                    path: path.to_path_buf(),
                });
            }
            if !path.is_dir() {
                return Err(InitError::NotADirectory {
                    role,
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(())
    }

    /// Module search roots in resolution order: application code first,
    /// then packages, extra paths, extensions, and finally home.
    pub fn search_roots(&self) -> Vec<PathBuf> {
        let mut roots = vec![self.app_path.clone(), self.packages_path.clone()];
        roots.extend(self.extra_search_paths.iter().cloned());
        roots.push(self.extensions_path.clone());
        roots.push(self.home.clone());
        roots
    }

    fn roles(&self) -> [(PathRole, &Path); 4] {
        [
            (PathRole::Home, self.home.as_path()),
            (PathRole::App, self.app_path.as_path()),
            (PathRole::Packages, self.packages_path.as_path()),
            (PathRole::Extensions, self.extensions_path.as_path()),
        ]
    }
}

fn extra_paths_from_env() -> Vec<PathBuf> {
    match std::env::var(SEARCH_PATH_ENV) {
        Ok(raw) => split_search_path(&raw),
        Err(_) => Vec::new(),
    }
}

/// Split a `TESSELLA_PATH` value on `:` and `;`, keeping only existing,
/// deduplicated entries.
pub(crate) fn split_search_path(raw: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for part in raw.split([':', ';']) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let path = PathBuf::from(part);
        if path.exists() && !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}
