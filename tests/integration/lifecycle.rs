//! End-to-end lifecycle tests
//!
//! The full contract: initialize with a path quadruple, run modules,
//! inspect state, finalize.

use tessella::{InterpreterBridge, Value};

use crate::common::fixture;

#[test]
fn full_lifecycle_scenario() {
    // initialize(home, app, packages, extensions) -> ok;
    // is_initialized -> true; run_module("entrypoint") completes;
    // finalize; is_initialized -> false.
    let (_tmp, config) = fixture(&[(
        "app/entrypoint.tsl",
        "let greeting = \"hello\"\nprint(greeting)\n0\n",
    )]);
    let bridge = InterpreterBridge::new();

    bridge.initialize(config).unwrap();
    assert!(bridge.is_initialized());

    let value = bridge.run_module("entrypoint").unwrap();
    assert_eq!(value, Value::Int(0));

    bridge.finalize();
    assert!(!bridge.is_initialized());
}

#[test]
fn modules_resolve_across_all_roots() {
    let (_tmp, config) = fixture(&[
        ("app/entrypoint.tsl", "import vendored\nimport stdmod\nbase + offset\n"),
        ("packages/vendored.tsl", "let base = 40\n"),
        ("home/stdmod.tsl", "let offset = 2\n"),
    ]);
    let bridge = InterpreterBridge::new();
    bridge.initialize(config).unwrap();

    assert_eq!(bridge.run_module("entrypoint").unwrap(), Value::Int(42));
}

#[test]
fn app_root_shadows_packages_root() {
    let (_tmp, config) = fixture(&[
        ("app/dep.tsl", "let origin = \"app\"\norigin\n"),
        ("packages/dep.tsl", "let origin = \"packages\"\norigin\n"),
    ]);
    let bridge = InterpreterBridge::new();
    bridge.initialize(config).unwrap();

    assert_eq!(
        bridge.run_module("dep").unwrap(),
        Value::Str("app".into())
    );
}

#[test]
fn dotted_module_names_map_to_subdirectories() {
    let (_tmp, config) = fixture(&[("app/pkg/inner.tsl", "let v = 7\nv\n")]);
    let bridge = InterpreterBridge::new();
    bridge.initialize(config).unwrap();

    assert_eq!(bridge.run_module("pkg.inner").unwrap(), Value::Int(7));
}

#[test]
fn globals_persist_between_runs() {
    // One engine instance, one namespace: a later run sees what an
    // earlier run defined.
    let (_tmp, config) = fixture(&[
        ("app/setup.tsl", "let counter = 10\n"),
        ("app/use.tsl", "counter + 1\n"),
    ]);
    let bridge = InterpreterBridge::new();
    bridge.initialize(config).unwrap();

    bridge.run_module("setup").unwrap();
    assert_eq!(bridge.run_module("use").unwrap(), Value::Int(11));
}

#[test]
fn one_shot_helper_finalizes_on_success_and_failure() {
    let (_tmp, config) = fixture(&[("app/entrypoint.tsl", "1 + 1\n")]);
    let value = tessella::run_module_with_paths(config.clone(), "entrypoint").unwrap();
    assert_eq!(value, Value::Int(2));

    assert!(tessella::run_module_with_paths(config, "missing").is_err());
}

#[test]
fn global_bridge_lifecycle() {
    // The process-wide instance follows the same contract. Kept to a
    // single test so parallel tests never race on the global.
    let (_tmp, config) = fixture(&[("app/entrypoint.tsl", "true\n")]);
    let bridge = tessella::bridge::global();

    assert!(!bridge.is_initialized());
    bridge.initialize(config).unwrap();
    assert_eq!(bridge.run_module("entrypoint").unwrap(), Value::Bool(true));
    bridge.finalize();
    assert!(!bridge.is_initialized());
}
