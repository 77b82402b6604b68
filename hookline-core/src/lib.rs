//! # hookline-core
//!
//! The registry and dispatch engine of hookline.
//!
//! Callbacks are attached to named hook points with an integer priority and
//! invoked later in ascending priority order, either all of them
//! ([`Hooks::all`]) or just the first or last ([`Hooks::first`],
//! [`Hooks::last`]). Their return values are folded into an [`Output`].
//!
//! # Parameters
//!
//! The dispatcher carries permanent parameters. A dispatch may add per-call
//! [`Overrides`]:
//!
//! - a mapping is deep-merged over the permanent parameters for that call,
//! - an opaque subject is handed to callbacks as is, next to the unmerged
//!   permanent parameters (see [`Arguments`]).
//!
//! # Callbacks
//!
//! A [`CallbackDescriptor`] is a closure, a named function, a method on an
//! instance, or a method on a [`Target`] type constructed per call.
//! Descriptors that cannot be resolved are dropped silently at registration.
//!
//! # Error Types
//!
//! - [`HookError`] - Dispatch and output errors
//! - [`BoxError`] - Errors returned by callbacks

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod callback;
mod debug;
mod descriptor;
mod error;
mod hooks;
mod output;
mod params;

// Re-exports
pub use callback::{Arguments, Call, Callback, CallbackResult, IntoOutput, Overrides, Params};
pub use debug::{DebugEvent, DebugSink, DispatchKind};
pub use descriptor::{
    BoundMethod, CallbackDescriptor, FunctionCallback, NamedFunction, Target, TargetType,
    UnboundMethod,
};
pub use error::{BoxError, HookError};
pub use hooks::{DEFAULT_PRIORITY, Hooks, HooksBuilder};
pub use output::{Output, OutputKey};
pub use params::{merge_params, merge_value};
pub use serde_json::{Map, Value};

#[cfg(feature = "inventory")]
pub use inventory;

#[doc(hidden)]
pub mod __private {
    pub use serde_json::json;
}

/// Build a [`Params`] mapping.
///
/// Values go through `serde_json::json!`, so nested literals work.
///
/// ```rust,ignore
/// let overrides = params! { "email" => "qux@email.com", "tags" => ["a", "b"] };
/// hooks.all("Profile", overrides)?;
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::Params::new() };
    ($($name:expr => $value:tt),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $(
            params.insert(
                ::std::string::String::from($name),
                $crate::__private::json!($value),
            );
        )+
        params
    }};
}
