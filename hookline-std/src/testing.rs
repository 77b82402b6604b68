//! Testing utilities for hookline.
//!
//! # Features
//!
//! - [`Recorder`]: a callback that records the parameters it was called with
//! - [`Counter`]: a [`Target`] whose `tick` method counts calls per instance
//! - [`returning`] / [`failing`]: canned callbacks

use hookline_core::{
    BoxError, Call, CallbackDescriptor, CallbackResult, Params, Target, Value,
};
use std::{cell::Cell, cell::RefCell, rc::Rc};

// ============================================================================
// Recorder
// ============================================================================

/// A callback that records every parameter mapping it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = Recorder::returning(json!("ok"));
/// hooks.register("Save", recorder.callback(), 1);
///
/// hooks.all("Save", params! { "id" => 7 })?;
/// assert_eq!(recorder.calls()[0]["id"], json!(7));
/// ```
#[derive(Debug, Clone)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<Params>>>,
    result: Value,
}

impl Recorder {
    /// Create a recorder returning `null`.
    pub fn new() -> Self {
        Self::returning(Value::Null)
    }

    /// Create a recorder returning `result` on every call.
    pub fn returning(result: Value) -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            result,
        }
    }

    /// A descriptor sharing this recorder's log.
    pub fn callback(&self) -> CallbackDescriptor {
        let recorder = self.clone();
        CallbackDescriptor::function(move |call: &mut Call<'_>| {
            recorder.calls.borrow_mut().push(call.params().clone());
            recorder.result.clone()
        })
    }

    /// A copy of the recorded parameter mappings.
    pub fn calls(&self) -> Vec<Params> {
        self.calls.borrow().clone()
    }

    /// Number of calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Counter
// ============================================================================

/// A target that counts how often its own instance was ticked.
///
/// Registered bound, the count grows across dispatches; registered unbound,
/// every call sees a fresh instance and returns 1.
#[derive(Debug, Default)]
pub struct Counter {
    ticks: Cell<u64>,
}

impl Counter {
    /// Ticks recorded by this instance.
    pub fn ticks(&self) -> u64 {
        self.ticks.get()
    }
}

impl Target for Counter {
    fn methods() -> &'static [&'static str] {
        &["tick", "ticks"]
    }

    fn invoke(&self, method: &str, _call: &mut Call<'_>) -> Option<CallbackResult> {
        match method {
            "tick" => {
                self.ticks.set(self.ticks.get() + 1);
                Some(Ok(Value::from(self.ticks.get())))
            }
            "ticks" => Some(Ok(Value::from(self.ticks.get()))),
            _ => None,
        }
    }
}

// ============================================================================
// Canned callbacks
// ============================================================================

/// A callback returning a clone of `value`.
pub fn returning(value: Value) -> CallbackDescriptor {
    CallbackDescriptor::function(move |_: &mut Call<'_>| value.clone())
}

/// A callback failing with `message`.
pub fn failing(message: &'static str) -> CallbackDescriptor {
    CallbackDescriptor::function(move |_: &mut Call<'_>| -> Result<Value, BoxError> {
        Err(message.into())
    })
}
