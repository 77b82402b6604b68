//! Ordering, re-sorting, errors, reentrancy and debug events.

use hookline::{
    BoxError, CallbackDescriptor, HookError, Hooks,
    sinks::RecordingSink,
    testing::{Recorder, failing, returning},
};
use serde_json::json;
use std::{cell::RefCell, rc::Rc};

mod common;
use common::strings;

#[test]
fn test_equal_priorities_keep_registration_order() {
    let mut hooks = Hooks::new();
    hooks
        .register_fn("Ties", 5, |_| "a")
        .register_fn("Ties", 1, |_| "first")
        .register_fn("Ties", 5, |_| "b")
        .register_fn("Ties", 5, |_| "c");

    assert_eq!(hooks.all("Ties", ()).unwrap().join(",").unwrap(), "first,a,b,c");
}

#[test]
fn test_repeated_dispatch_is_stable() {
    let mut hooks = strings();
    for _ in 0..3 {
        assert_eq!(hooks.all("Strings", ()).unwrap().join(":").unwrap(), "Foo:Bar:Baz");
    }
}

#[test]
fn test_late_registration_is_sorted_in() {
    let mut hooks = strings();
    hooks.all("Strings", ()).unwrap();

    hooks.register_fn("Strings", 2, |_| "Bar2");
    hooks.register_fn("Strings", -1, |_| "Pre");
    assert_eq!(
        hooks.all("Strings", ()).unwrap().join(":").unwrap(),
        "Pre:Foo:Bar:Bar2:Baz"
    );
    assert_eq!(hooks.first("Strings", ()).unwrap().join("").unwrap(), "Pre");
}

#[test]
fn test_first_on_empty_hook_point_is_an_error() {
    let mut hooks = Hooks::new();
    let err = hooks.first("Nothing", ()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "no callbacks registered for hook point `Nothing`"
    );
    assert!(matches!(
        hooks.last("Nothing", ()),
        Err(HookError::NoCallbacks { .. })
    ));
}

#[test]
fn test_callback_error_stops_dispatch_and_discards_output() {
    let after = Recorder::new();
    let mut hooks = Hooks::new();
    hooks
        .register("Broken", returning(json!("kept?")), 1)
        .register("Broken", failing("database unavailable"), 2)
        .register("Broken", after.callback(), 3);

    let err = hooks.all("Broken", ()).unwrap_err();
    assert_eq!(err.to_string(), "database unavailable");
    assert_eq!(after.call_count(), 0);
    assert!(hooks.output().is_empty());
}

#[test]
fn test_nested_output_is_discarded_when_outer_callback_fails() {
    let mut hooks = Hooks::new();
    hooks
        .register_fn("Inner", 1, |_| "Leaked")
        .register_fn("Outer", 1, |call| call.hooks().all("Inner", ()).map(|_| "outer"))
        .register("Outer", failing("boom"), 2);

    let err = hooks.all("Outer", ()).unwrap_err();
    assert_eq!(err.to_string(), "boom");
    assert!(hooks.output().is_empty());
    assert_eq!(hooks.to_value(), json!([]));
}

#[test]
fn test_nested_output_is_discarded_when_single_dispatch_fails() {
    let mut hooks = Hooks::new();
    hooks
        .register_fn("Inner", 1, |_| "Leaked")
        .register_fn("Outer", 1, |call| {
            call.hooks().all("Inner", ())?;
            Err::<&str, BoxError>("boom".into())
        });

    assert!(hooks.first("Outer", ()).is_err());
    assert!(hooks.output().is_empty());
}

#[test]
fn test_reentrant_registration_applies_to_next_dispatch() {
    let mut hooks = Hooks::new();
    hooks.register_fn("Grow", 1, |call| {
        call.hooks().register_fn("Grow", 2, |_| "added");
        "base"
    });

    assert_eq!(hooks.all("Grow", ()).unwrap().to_value(), json!(["base"]));
    assert_eq!(hooks.count("Grow"), 2);
    assert_eq!(
        hooks.all("Grow", ()).unwrap().to_value(),
        json!(["base", "added"])
    );
}

#[test]
fn test_nested_dispatch_keeps_outer_output() {
    let mut hooks = strings();
    hooks
        .register_fn("Outer", 1, |call| {
            let inner = call.hooks().all("Strings", ()).map(|h| h.to_value());
            inner.map(|value| json!({ "inner": value }))
        })
        .register_fn("Outer", 2, |_| json!({"outer": true}));

    assert_eq!(
        hooks.all("Outer", ()).unwrap().to_value(),
        json!({"inner": ["Foo", "Bar", "Baz"], "outer": true})
    );
}

#[test]
fn test_debug_sink_receives_enumerated_events() {
    let sink = RecordingSink::new();
    let mut hooks = Hooks::builder()
        .source_file("plugins/strings.rs")
        .debug(sink.clone())
        .build();

    hooks
        .register_fn("Strings", 1, |_| "Foo")
        .register_fn("Strings", 2, |_| "Bar");
    assert_eq!(sink.count_matching("registered"), 2);
    assert!(sink.contains("plugins/strings.rs"));
    assert!(sink.contains("priority 2"));

    hooks.all("Strings", ()).unwrap();
    hooks.first("Strings", ()).unwrap();
    hooks.last("Strings", ()).unwrap();

    assert_eq!(sink.count_matching("sorted"), 1);
    assert_eq!(sink.count_matching("dispatched `all`"), 1);
    assert_eq!(sink.count_matching("dispatched `first`"), 1);
    assert_eq!(sink.count_matching("dispatched `last`"), 1);
    assert_eq!(sink.count(), 6);
}

#[test]
fn test_debug_sink_skips_invalid_registration_and_can_be_disabled() {
    let lines = Rc::new(RefCell::new(Vec::<String>::new()));
    let captured = lines.clone();
    let mut hooks = Hooks::new();
    hooks.debug(move |line: &str| captured.borrow_mut().push(line.to_owned()));

    hooks.register("Missing", CallbackDescriptor::named("nope"), 1);
    assert!(lines.borrow().is_empty());

    hooks.register_fn("Strings", 1, |_| "Foo");
    assert_eq!(lines.borrow().len(), 1);
    assert!(lines.borrow()[0].contains("[Unknown]"));

    hooks.debug_off();
    hooks.all("Strings", ()).unwrap();
    assert_eq!(lines.borrow().len(), 1);
    assert!(!hooks.is_debugging());
}
