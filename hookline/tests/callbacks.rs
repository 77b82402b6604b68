//! Callback descriptor shapes and registration validation.

use hookline::{CallbackDescriptor, Hooks, testing::Counter};
use serde_json::json;
use std::rc::Rc;

mod common;
use common::FooBar;

#[test]
fn test_every_descriptor_shape() {
    let mut hooks = Hooks::new();
    hooks.define("simple_function_name", |_| "SimpleFunction");

    hooks
        .register_fn("Callback", 1, |_| "Closure")
        .register("Callback", CallbackDescriptor::named("simple_function_name"), 2)
        .register("Callback", CallbackDescriptor::function(FooBar::is_static), 3)
        .register("Callback", CallbackDescriptor::unbound::<FooBar>("object_based"), 4)
        .register(
            "Callback",
            CallbackDescriptor::bound(Rc::new(FooBar), "object_based"),
            5,
        );

    assert_eq!(
        hooks.all("Callback", ()).unwrap().to_value(),
        json!([
            "Closure",
            "SimpleFunction",
            "StaticMethod",
            "ObjectMethod",
            "ObjectMethod"
        ])
    );
}

#[test]
fn test_invalid_registrations_are_ignored() {
    let mut hooks = Hooks::new();
    hooks
        .register("Callback", CallbackDescriptor::named("not_defined"), 1)
        .register("Callback", CallbackDescriptor::unbound::<FooBar>("missing"), 1)
        .register(
            "Callback",
            CallbackDescriptor::bound(Rc::new(FooBar), "missing"),
            1,
        );

    assert_eq!(hooks.count("Callback"), 0);
    assert!(!hooks.contains("Callback"));
    assert!(hooks.all("Callback", ()).unwrap().output().is_empty());
}

#[test]
fn test_named_function_defined_later_is_not_retroactive() {
    let mut hooks = Hooks::new();
    hooks.register("Late", CallbackDescriptor::named("late"), 1);
    hooks.define("late", |_| "Late");
    assert_eq!(hooks.count("Late"), 0);

    hooks.register("Late", CallbackDescriptor::named("late"), 1);
    assert_eq!(hooks.all("Late", ()).unwrap().to_value(), json!(["Late"]));
}

#[test]
fn test_redefined_function_is_looked_up_at_dispatch() {
    let mut hooks = Hooks::new();
    hooks.define("greeting", |_| "Hello");
    hooks.register("Greet", CallbackDescriptor::named("greeting"), 1);
    hooks.define("greeting", |_| "Howdy");

    assert_eq!(hooks.all("Greet", ()).unwrap().to_value(), json!(["Howdy"]));
}

#[test]
fn test_unbound_targets_are_fresh_per_call() {
    let mut hooks = Hooks::new();
    hooks.register("Tick", CallbackDescriptor::unbound::<Counter>("tick"), 1);
    hooks.register("Tick", CallbackDescriptor::unbound::<Counter>("tick"), 2);

    assert_eq!(hooks.all("Tick", ()).unwrap().to_value(), json!([1, 1]));
    assert_eq!(hooks.all("Tick", ()).unwrap().to_value(), json!([1, 1]));
}

#[test]
fn test_bound_targets_are_shared() {
    let counter = Rc::new(Counter::default());
    let mut hooks = Hooks::new();
    hooks.register("Tick", CallbackDescriptor::bound(counter.clone(), "tick"), 1);
    hooks.register("Tick", CallbackDescriptor::bound(counter.clone(), "tick"), 2);

    assert_eq!(hooks.all("Tick", ()).unwrap().to_value(), json!([1, 2]));
    assert_eq!(hooks.all("Tick", ()).unwrap().to_value(), json!([3, 4]));
    assert_eq!(counter.ticks(), 4);
}
