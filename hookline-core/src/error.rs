//! Error types for hookline.
//!
//! Registration never fails: an unresolvable callback is silently dropped.
//! Everything else that can go wrong during dispatch or output conversion is
//! a [`HookError`].

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by dispatch and output conversion.
#[derive(Error, Debug)]
pub enum HookError {
    /// `first` or `last` was called on a hook point without callbacks.
    #[error("no callbacks registered for hook point `{hook_point}`")]
    NoCallbacks {
        /// The hook point that was dispatched.
        hook_point: String,
    },

    /// A target was asked for a method it does not expose.
    #[error("method `{method}` is not exposed by `{target}`")]
    UnknownMethod {
        /// Type name of the target.
        target: &'static str,
        /// The requested method.
        method: String,
    },

    /// A named callback could not be found at dispatch time.
    #[error("no function named `{0}` is defined")]
    UnknownFunction(String),

    /// [`Output::join`](crate::Output::join) met a structured element.
    #[error("output element `{key}` is not a scalar and cannot be joined")]
    NotStringifiable {
        /// Key of the offending element.
        key: String,
    },

    /// A callback returned an error. It is passed through unchanged.
    #[error(transparent)]
    Callback(BoxError),
}

impl From<BoxError> for HookError {
    fn from(err: BoxError) -> Self {
        HookError::Callback(err)
    }
}
