//! Error-path integration tests

use std::path::PathBuf;

use tessella::bridge::{BridgeError, InitError, PathRole};
use tessella::engine::EngineError;
use tessella::InterpreterBridge;

use crate::common::fixture;

#[test]
fn each_missing_role_is_named() {
    let (tmp, config) = fixture(&[]);

    let cases = [
        (PathRole::Home, "home"),
        (PathRole::App, "app"),
        (PathRole::Packages, "packages"),
        (PathRole::Extensions, "extensions"),
    ];
    for (role, dir) in cases {
        let mut broken = config.clone();
        let bad = tmp.path().join("missing").join(dir);
        match role {
            PathRole::Home => broken.home = bad,
            PathRole::App => broken.app_path = bad,
            PathRole::Packages => broken.packages_path = bad,
            PathRole::Extensions => broken.extensions_path = bad,
        }

        let bridge = InterpreterBridge::new();
        match bridge.initialize(broken) {
            Err(InitError::MissingPath { role: got, .. }) => assert_eq!(got, role),
            other => panic!("expected MissingPath for {:?}, got {:?}", role, other),
        }
        assert!(!bridge.is_initialized());
    }
}

#[test]
fn initialize_failure_leaves_bridge_usable() {
    let (_tmp, config) = fixture(&[("app/entrypoint.tsl", "1\n")]);
    let bridge = InterpreterBridge::new();

    let mut bad = config.clone();
    bad.home = PathBuf::from("/nope");
    assert!(bridge.initialize(bad).is_err());

    // A failed attempt does not consume the lifecycle.
    bridge.initialize(config).unwrap();
    bridge.run_module("entrypoint").unwrap();
}

#[test]
fn script_failures_carry_engine_detail() {
    let (_tmp, config) = fixture(&[
        ("app/div.tsl", "let x = 1 / 0\n"),
        ("app/types.tsl", "\"a\" + 1\n"),
        ("app/syntax.tsl", "let = broken\n"),
        ("app/undef.tsl", "nobody\n"),
    ]);
    let bridge = InterpreterBridge::new();
    bridge.initialize(config).unwrap();

    assert!(matches!(
        bridge.run_module("div"),
        Err(BridgeError::Engine(EngineError::DivisionByZero { line: 1 }))
    ));
    assert!(matches!(
        bridge.run_module("types"),
        Err(BridgeError::Engine(EngineError::TypeMismatch { .. }))
    ));
    assert!(matches!(
        bridge.run_module("syntax"),
        Err(BridgeError::Engine(EngineError::Parse { .. }))
    ));
    assert!(matches!(
        bridge.run_module("undef"),
        Err(BridgeError::Engine(EngineError::UndefinedVariable { .. }))
    ));
}

#[test]
fn module_not_found_names_the_search_roots() {
    let (tmp, config) = fixture(&[]);
    let bridge = InterpreterBridge::new();
    bridge.initialize(config).unwrap();

    let err = bridge.run_module("ghost").unwrap_err();
    match err {
        BridgeError::ModuleNotFound { module, searched } => {
            assert_eq!(module, "ghost");
            assert_eq!(searched.len(), 4);
            assert_eq!(searched[0], tmp.path().join("app"));
        }
        other => panic!("expected ModuleNotFound, got {:?}", other),
    }
}

#[test]
fn failed_module_does_not_poison_the_engine() {
    let (_tmp, config) = fixture(&[
        ("app/bad.tsl", "1 / 0\n"),
        ("app/good.tsl", "let ok = true\nok\n"),
    ]);
    let bridge = InterpreterBridge::new();
    bridge.initialize(config).unwrap();

    assert!(bridge.run_module("bad").is_err());
    assert_eq!(
        bridge.run_module("good").unwrap(),
        tessella::Value::Bool(true)
    );
}
