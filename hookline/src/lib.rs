//! # hookline - Priority-Ordered Callback Registry
//!
//! `hookline` lets a program declare named extension points ("hook points"),
//! attach callbacks to them with an integer priority, and later run them in
//! priority order, collecting what they return.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hookline::prelude::*;
//!
//! let mut hooks = Hooks::new();
//! hooks
//!     .register_fn("Strings", 1, |_| "Foo")
//!     .register_fn("Strings", 3, |_| "Baz")
//!     .register_fn("Strings", 2, |_| "Bar");
//!
//! assert_eq!(hooks.all("Strings", ())?.join(":")?, "Foo:Bar:Baz");
//! assert_eq!(hooks.last("Strings", ())?.to_value(), json!(["Baz"]));
//! ```
//!
//! ## Parameters
//!
//! ```rust,ignore
//! hooks.set_parameter("id", "Foo");
//! hooks.register_fn("Profile", 1, |call| call.params().clone());
//!
//! // Per-call overrides are deep-merged for this dispatch only.
//! hooks.all("Profile", params! { "email" => "qux@email.com" })?;
//!
//! // Opaque subjects are passed through next to the permanent parameters.
//! hooks.all("Profile", Overrides::subject(&user))?;
//! ```
//!
//! ## Features
//!
//! - `tracing`: structured logs for registration, sorting and dispatch
//! - `inventory`: process-wide named functions
//! - `macros`: `#[callback]` and `#[target]` attributes

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use hookline_core::{
    // Call context
    Arguments,
    // Descriptors
    BoundMethod,
    // Error types
    BoxError,
    Call,
    Callback,
    CallbackDescriptor,
    CallbackResult,
    // Debugging
    DebugEvent,
    DebugSink,
    // Dispatcher
    DEFAULT_PRIORITY,
    DispatchKind,
    FunctionCallback,
    HookError,
    Hooks,
    HooksBuilder,
    IntoOutput,
    // Values
    Map,
    NamedFunction,
    // Output
    Output,
    OutputKey,
    Overrides,
    Params,
    Target,
    TargetType,
    UnboundMethod,
    Value,
    merge_params,
    merge_value,
    params,
};

/// Standard debug sinks.
pub mod sinks {
    pub use hookline_std::sinks::{RecordingSink, TracingSink};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use hookline_std::testing::*;
}

/// Prelude module - common imports for hookline.
///
/// # Usage
///
/// ```rust,ignore
/// use hookline::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        // Core types
        Call,
        CallbackDescriptor,
        DEFAULT_PRIORITY,
        HookError,
        Hooks,
        IntoOutput,
        Overrides,
        Params,
        Target,
        Value,
        params,
    };
}

#[cfg(feature = "macros")]
pub use hookline_macros::{callback, target};

#[cfg(feature = "inventory")]
pub use hookline_core::inventory;
