//! Callback invocation.
//!
//! A callback receives a [`Call`] and returns anything implementing
//! [`IntoOutput`]. What the call carries depends on the per-call
//! [`Overrides`]:
//!
//! - a mapping (or nothing) yields [`Arguments::Params`]: the permanent
//!   parameters deep-merged with the overrides,
//! - an opaque subject yields [`Arguments::Subject`]: the subject untouched,
//!   followed by the permanent parameters as they are.

use crate::{error::BoxError, hooks::Hooks};
use serde_json::{Map, Value};
use std::any::Any;

/// Parameter mapping handed to callbacks.
pub type Params = Map<String, Value>;

/// What every callback return value is reduced to.
pub type CallbackResult = Result<Value, BoxError>;

/// Conversion of a callback's return value into an output fragment.
///
/// # Default Implementations
///
/// - `Value`, `Params`, strings, numbers and `bool` → as JSON values
/// - `()` and `None` → `null`
/// - `Vec<T>` → a sequence, appended element-wise to the output
/// - `Result<T, E>` → delegates to `T` or propagates the error
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a callback return value",
    label = "missing `IntoOutput` implementation",
    note = "Return a `serde_json::Value`, a scalar, a `Vec` or a `Result` of those."
)]
pub trait IntoOutput {
    /// Convert into an output fragment or an error.
    fn into_output(self) -> CallbackResult;
}

impl IntoOutput for Value {
    fn into_output(self) -> CallbackResult {
        Ok(self)
    }
}

impl IntoOutput for Params {
    fn into_output(self) -> CallbackResult {
        Ok(Value::Object(self))
    }
}

impl IntoOutput for () {
    fn into_output(self) -> CallbackResult {
        Ok(Value::Null)
    }
}

impl IntoOutput for String {
    fn into_output(self) -> CallbackResult {
        Ok(Value::String(self))
    }
}

impl IntoOutput for &str {
    fn into_output(self) -> CallbackResult {
        Ok(Value::from(self))
    }
}

macro_rules! into_output_via_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoOutput for $ty {
                fn into_output(self) -> CallbackResult {
                    Ok(Value::from(self))
                }
            }
        )*
    };
}

into_output_via_from!(bool, i32, i64, u32, u64, usize, f64);

impl<T: Into<Value>> IntoOutput for Vec<T> {
    fn into_output(self) -> CallbackResult {
        Ok(Value::Array(self.into_iter().map(Into::into).collect()))
    }
}

impl<T: IntoOutput> IntoOutput for Option<T> {
    fn into_output(self) -> CallbackResult {
        match self {
            Some(t) => t.into_output(),
            None => Ok(Value::Null),
        }
    }
}

impl<T, E> IntoOutput for Result<T, E>
where
    T: IntoOutput,
    E: Into<BoxError>,
{
    fn into_output(self) -> CallbackResult {
        match self {
            Ok(t) => t.into_output(),
            Err(e) => Err(e.into()),
        }
    }
}

/// A directly invocable callback.
///
/// Implemented for every `Fn(&mut Call<'_>) -> R` where `R: IntoOutput`,
/// so plain closures and functions can be registered as they are.
pub trait Callback: 'static {
    /// Run the callback.
    fn call(&self, call: &mut Call<'_>) -> CallbackResult;
}

impl<F, R> Callback for F
where
    F: Fn(&mut Call<'_>) -> R + 'static,
    R: IntoOutput,
{
    fn call(&self, call: &mut Call<'_>) -> CallbackResult {
        self(call).into_output()
    }
}

/// Per-call arguments for a dispatch.
pub enum Overrides<'a> {
    /// Deep-merged over the permanent parameters for this call only.
    Params(Params),
    /// Passed through untouched, next to the unmerged permanent parameters.
    Subject(&'a dyn Any),
}

impl<'a> Overrides<'a> {
    /// Pass `value` to every callback as an opaque subject.
    pub fn subject<T: Any>(value: &'a T) -> Self {
        Overrides::Subject(value)
    }
}

impl Default for Overrides<'_> {
    fn default() -> Self {
        Overrides::Params(Params::new())
    }
}

impl From<()> for Overrides<'_> {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<Params> for Overrides<'_> {
    fn from(params: Params) -> Self {
        Overrides::Params(params)
    }
}

impl From<Option<Params>> for Overrides<'_> {
    fn from(params: Option<Params>) -> Self {
        Overrides::Params(params.unwrap_or_default())
    }
}

/// Arguments as a callback sees them.
pub enum Arguments<'a> {
    /// Permanent parameters deep-merged with the per-call mapping.
    Params(Params),
    /// The per-call subject followed by the unmerged permanent parameters.
    Subject {
        /// The value passed to the dispatch.
        subject: &'a dyn Any,
        /// Permanent parameters at the time of the call.
        params: Params,
    },
}

impl Arguments<'_> {
    /// The parameter mapping, merged or not depending on the variant.
    pub fn params(&self) -> &Params {
        match self {
            Arguments::Params(params) => params,
            Arguments::Subject { params, .. } => params,
        }
    }
}

/// The invocation context of a single callback.
///
/// Besides the arguments, it hands out the dispatcher itself so a callback
/// can change parameters or register further callbacks while a dispatch is
/// running.
pub struct Call<'a> {
    hooks: &'a mut Hooks,
    hook_point: &'a str,
    arguments: Arguments<'a>,
}

impl<'a> Call<'a> {
    pub(crate) fn new(hooks: &'a mut Hooks, hook_point: &'a str, arguments: Arguments<'a>) -> Self {
        Self {
            hooks,
            hook_point,
            arguments,
        }
    }

    /// Name of the hook point being dispatched.
    pub fn hook_point(&self) -> &str {
        self.hook_point
    }

    /// The parameter mapping for this call.
    pub fn params(&self) -> &Params {
        self.arguments.params()
    }

    /// A single parameter by name.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params().get(name)
    }

    /// The per-call subject, if the dispatch was given one of type `T`.
    pub fn subject<T: Any>(&self) -> Option<&T> {
        match &self.arguments {
            Arguments::Subject { subject, .. } => subject.downcast_ref::<T>(),
            Arguments::Params(_) => None,
        }
    }

    /// The raw arguments.
    pub fn arguments(&self) -> &Arguments<'a> {
        &self.arguments
    }

    /// The dispatcher running this call.
    pub fn hooks(&mut self) -> &mut Hooks {
        self.hooks
    }
}
