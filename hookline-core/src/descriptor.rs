//! Callback descriptors and their resolution.
//!
//! A [`CallbackDescriptor`] names something that can be invoked:
//!
//! - [`Function`](CallbackDescriptor::Function): a closure or function value,
//! - [`Named`](CallbackDescriptor::Named): a free function looked up by name,
//!   first in the dispatcher's own table, then (with the `inventory` feature)
//!   among functions submitted process-wide as [`NamedFunction`],
//! - [`Bound`](CallbackDescriptor::Bound): a method on an existing instance,
//! - [`Unbound`](CallbackDescriptor::Unbound): a method on a type; a fresh
//!   instance is built for every invocation.

use crate::{
    callback::{Call, Callback, CallbackResult},
    error::HookError,
    hooks::Hooks,
};
use serde_json::Value;
use std::{any::type_name, fmt, rc::Rc};

/// A type exposing named methods as callbacks.
///
/// Usually generated with `#[hookline::target]` on an `impl` block.
pub trait Target: 'static {
    /// Names of the methods reachable through [`invoke`](Target::invoke).
    fn methods() -> &'static [&'static str]
    where
        Self: Sized;

    /// Invoke `method`, or return `None` if the type has no such method.
    fn invoke(&self, method: &str, call: &mut Call<'_>) -> Option<CallbackResult>;
}

fn construct<T: Target + Default>() -> Box<dyn Target> {
    Box::new(T::default())
}

/// A constructible [`Target`] type, captured without an instance.
#[derive(Clone, Copy)]
pub struct TargetType {
    name: &'static str,
    methods: &'static [&'static str],
    construct: fn() -> Box<dyn Target>,
}

impl TargetType {
    /// Capture `T`.
    pub fn of<T: Target + Default>() -> Self {
        Self {
            name: type_name::<T>(),
            methods: T::methods(),
            construct: construct::<T>,
        }
    }

    /// Type name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the type exposes `method`.
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains(&method)
    }

    fn instantiate(&self) -> Box<dyn Target> {
        (self.construct)()
    }
}

impl fmt::Debug for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetType")
            .field("name", &self.name)
            .field("methods", &self.methods)
            .finish()
    }
}

/// A free function that can be found by name.
///
/// With the `inventory` feature these are collected process-wide; submit one
/// with `inventory::submit!` or the `#[hookline::callback]` attribute.
pub struct NamedFunction {
    name: &'static str,
    function: fn(&mut Call<'_>) -> CallbackResult,
}

impl NamedFunction {
    /// Create a named function.
    pub const fn new(name: &'static str, function: fn(&mut Call<'_>) -> CallbackResult) -> Self {
        Self { name, function }
    }

    /// The lookup name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The function as a callback.
    pub fn callback(&self) -> Rc<dyn Callback> {
        Rc::new(self.function)
    }
}

#[cfg(feature = "inventory")]
inventory::collect!(NamedFunction);

/// Look a name up among the functions submitted through `inventory`.
#[cfg(feature = "inventory")]
pub(crate) fn global_function(name: &str) -> Option<Rc<dyn Callback>> {
    inventory::iter::<NamedFunction>
        .into_iter()
        .find(|f| f.name == name)
        .map(NamedFunction::callback)
}

#[cfg(not(feature = "inventory"))]
pub(crate) fn global_function(_name: &str) -> Option<Rc<dyn Callback>> {
    None
}

/// A closure or function value.
#[derive(Clone)]
pub struct FunctionCallback {
    callback: Rc<dyn Callback>,
    identity: &'static str,
}

/// A method on an existing instance.
#[derive(Clone)]
pub struct BoundMethod {
    instance: Rc<dyn Target>,
    type_name: &'static str,
    methods: &'static [&'static str],
    method: String,
}

impl BoundMethod {
    /// The shared instance.
    pub fn instance(&self) -> &Rc<dyn Target> {
        &self.instance
    }
}

/// A method on a type that is instantiated per call.
#[derive(Clone)]
pub struct UnboundMethod {
    target: TargetType,
    method: String,
}

/// Something that can be registered on a hook point.
#[derive(Clone)]
pub enum CallbackDescriptor {
    /// A closure or function value.
    Function(FunctionCallback),
    /// A free function looked up by name when invoked.
    Named(String),
    /// A method on an existing instance.
    Bound(BoundMethod),
    /// A method on a freshly constructed instance of a type.
    Unbound(UnboundMethod),
}

impl CallbackDescriptor {
    /// Describe a closure or function value.
    pub fn function<C: Callback>(callback: C) -> Self {
        CallbackDescriptor::Function(FunctionCallback {
            callback: Rc::new(callback),
            identity: type_name::<C>(),
        })
    }

    /// Describe a free function by name.
    pub fn named(name: impl Into<String>) -> Self {
        CallbackDescriptor::Named(name.into())
    }

    /// Describe `method` on an existing instance.
    pub fn bound<T: Target>(instance: Rc<T>, method: impl Into<String>) -> Self {
        CallbackDescriptor::Bound(BoundMethod {
            instance,
            type_name: type_name::<T>(),
            methods: T::methods(),
            method: method.into(),
        })
    }

    /// Describe `method` on a new `T` built for every invocation.
    pub fn unbound<T: Target + Default>(method: impl Into<String>) -> Self {
        Self::unbound_type(TargetType::of::<T>(), method)
    }

    /// Describe `method` on a captured [`TargetType`].
    pub fn unbound_type(target: TargetType, method: impl Into<String>) -> Self {
        CallbackDescriptor::Unbound(UnboundMethod {
            target,
            method: method.into(),
        })
    }

    /// Identity used in debug output.
    pub fn identity(&self) -> String {
        match self {
            CallbackDescriptor::Function(f) => f.identity.to_owned(),
            CallbackDescriptor::Named(name) => format!("{name}()"),
            CallbackDescriptor::Bound(b) => format!("{}->{}()", b.type_name, b.method),
            CallbackDescriptor::Unbound(u) => format!("{}::{}()", u.target.name, u.method),
        }
    }

    /// Whether the descriptor can be invoked through `hooks`.
    pub(crate) fn is_resolvable(&self, hooks: &Hooks) -> bool {
        match self {
            CallbackDescriptor::Function(_) => true,
            CallbackDescriptor::Named(name) => hooks.function(name).is_some(),
            CallbackDescriptor::Bound(b) => b.methods.contains(&b.method.as_str()),
            CallbackDescriptor::Unbound(u) => u.target.has_method(&u.method),
        }
    }

    pub(crate) fn invoke(&self, call: &mut Call<'_>) -> Result<Value, HookError> {
        match self {
            CallbackDescriptor::Function(f) => f.callback.call(call).map_err(HookError::Callback),
            CallbackDescriptor::Named(name) => {
                let callback = call
                    .hooks()
                    .function(name)
                    .ok_or_else(|| HookError::UnknownFunction(name.clone()))?;
                callback.call(call).map_err(HookError::Callback)
            }
            CallbackDescriptor::Bound(b) => match b.instance.invoke(&b.method, call) {
                Some(result) => result.map_err(HookError::Callback),
                None => Err(HookError::UnknownMethod {
                    target: b.type_name,
                    method: b.method.clone(),
                }),
            },
            CallbackDescriptor::Unbound(u) => {
                let instance = u.target.instantiate();
                match instance.invoke(&u.method, call) {
                    Some(result) => result.map_err(HookError::Callback),
                    None => Err(HookError::UnknownMethod {
                        target: u.target.name,
                        method: u.method.clone(),
                    }),
                }
            }
        }
    }
}

impl fmt::Debug for CallbackDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CallbackDescriptor")
            .field(&self.identity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Greeter;

    impl Target for Greeter {
        fn methods() -> &'static [&'static str] {
            &["greet"]
        }

        fn invoke(&self, method: &str, _call: &mut Call<'_>) -> Option<CallbackResult> {
            match method {
                "greet" => Some(Ok(Value::from("hello"))),
                _ => None,
            }
        }
    }

    #[test]
    fn test_target_type_methods() {
        let ty = TargetType::of::<Greeter>();
        assert!(ty.has_method("greet"));
        assert!(!ty.has_method("wave"));
        assert!(ty.name().ends_with("Greeter"));
    }

    #[test]
    fn test_identity_strings() {
        let bound = CallbackDescriptor::bound(Rc::new(Greeter), "greet");
        assert!(bound.identity().ends_with("Greeter->greet()"));

        let unbound = CallbackDescriptor::unbound::<Greeter>("greet");
        assert!(unbound.identity().ends_with("Greeter::greet()"));

        assert_eq!(CallbackDescriptor::named("render").identity(), "render()");
    }

    #[test]
    fn test_resolvable_checks_method_list() {
        let hooks = Hooks::new();
        assert!(CallbackDescriptor::unbound::<Greeter>("greet").is_resolvable(&hooks));
        assert!(!CallbackDescriptor::unbound::<Greeter>("wave").is_resolvable(&hooks));
        assert!(!CallbackDescriptor::bound(Rc::new(Greeter), "wave").is_resolvable(&hooks));
        assert!(!CallbackDescriptor::named("missing").is_resolvable(&hooks));
    }
}
