#![allow(dead_code)]

use hookline::{Call, CallbackResult, Hooks, Params, Target, Value};

// ============================================================================
// Fixtures
// ============================================================================

/// A target with one instance method, plus an associated function.
#[derive(Default)]
pub struct FooBar;

impl FooBar {
    pub fn is_static(_call: &mut Call<'_>) -> &'static str {
        "StaticMethod"
    }
}

impl Target for FooBar {
    fn methods() -> &'static [&'static str] {
        &["object_based"]
    }

    fn invoke(&self, method: &str, _call: &mut Call<'_>) -> Option<CallbackResult> {
        match method {
            "object_based" => Some(Ok(Value::from("ObjectMethod"))),
            _ => None,
        }
    }
}

/// An opaque value handed to callbacks as a subject.
#[derive(Debug)]
pub struct FooBarBaz {
    pub id: i64,
}

impl FooBarBaz {
    pub fn new(id: i64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Unwrap a JSON object literal into a parameter mapping.
pub fn object(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

/// Three string callbacks registered out of priority order.
pub fn strings() -> Hooks {
    let mut hooks = Hooks::new();
    hooks
        .register_fn("Strings", 1, |_| "Foo")
        .register_fn("Strings", 3, |_| "Baz")
        .register_fn("Strings", 2, |_| "Bar");
    hooks
}
