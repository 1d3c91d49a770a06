//! Shared fixtures for integration tests

use tempfile::TempDir;
use tessella::PathConfig;

/// Create the four-directory layout the bridge expects and populate the
/// given files. Paths in `files` are relative to the fixture root, e.g.
/// `("app/entrypoint.tsl", "...")`.
pub fn fixture(files: &[(&str, &str)]) -> (TempDir, PathConfig) {
    let tmp = TempDir::new().unwrap();
    for dir in ["home", "app", "packages", "extensions"] {
        std::fs::create_dir_all(tmp.path().join(dir)).unwrap();
    }
    for (rel, content) in files {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
    let config = PathConfig::new(
        tmp.path().join("home"),
        tmp.path().join("app"),
        tmp.path().join("packages"),
        tmp.path().join("extensions"),
    );
    (tmp, config)
}
