//! Concurrent-access contract tests
//!
//! The bridge serializes all engine access internally; these tests pin
//! the documented behavior under racing callers.

use std::sync::Arc;
use std::thread;

use tessella::bridge::InitError;
use tessella::{InterpreterBridge, Value};

use crate::common::fixture;

#[test]
fn racing_initializers_produce_exactly_one_winner() {
    let (_tmp, config) = fixture(&[]);
    let bridge = Arc::new(InterpreterBridge::new());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let bridge = Arc::clone(&bridge);
        let config = config.clone();
        handles.push(thread::spawn(move || bridge.initialize(config).is_ok()));
    }

    let wins: usize = handles
        .into_iter()
        .map(|h| h.join().unwrap() as usize)
        .sum();
    assert_eq!(wins, 1);
    assert!(bridge.is_initialized());
}

#[test]
fn losing_initializers_see_already_initialized() {
    let (_tmp, config) = fixture(&[]);
    let bridge = InterpreterBridge::new();

    bridge.initialize(config.clone()).unwrap();
    assert!(matches!(
        bridge.initialize(config),
        Err(InitError::AlreadyInitialized)
    ));
}

#[test]
fn concurrent_run_module_calls_all_complete() {
    let (_tmp, config) = fixture(&[("app/entrypoint.tsl", "let x = 21\nx * 2\n")]);
    let bridge = Arc::new(InterpreterBridge::new());
    bridge.initialize(config).unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let bridge = Arc::clone(&bridge);
        handles.push(thread::spawn(move || bridge.run_module("entrypoint")));
    }
    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), Value::Int(42));
    }
    assert_eq!(bridge.status().modules_run, 8);
}

#[test]
fn is_initialized_is_readable_while_others_hold_the_engine() {
    let (_tmp, config) = fixture(&[("app/entrypoint.tsl", "1\n")]);
    let bridge = Arc::new(InterpreterBridge::new());
    bridge.initialize(config).unwrap();

    let runner = {
        let bridge = Arc::clone(&bridge);
        thread::spawn(move || {
            for _ in 0..100 {
                bridge.run_module("entrypoint").unwrap();
            }
        })
    };
    // Status flag reads are lock-free and must stay true throughout.
    for _ in 0..100 {
        assert!(bridge.is_initialized());
    }
    runner.join().unwrap();
}

#[test]
fn finalize_races_cleanly_with_runners() {
    let (_tmp, config) = fixture(&[("app/entrypoint.tsl", "1\n")]);
    let bridge = Arc::new(InterpreterBridge::new());
    bridge.initialize(config).unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let bridge = Arc::clone(&bridge);
        handles.push(thread::spawn(move || {
            // Either a completed run or a clean NotInitialized; never
            // a crash against a half-torn-down engine.
            let _ = bridge.run_module("entrypoint");
        }));
    }
    bridge.finalize();
    for handle in handles {
        handle.join().unwrap();
    }
    assert!(!bridge.is_initialized());
}
