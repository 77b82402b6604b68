//! Debug events and sinks.

use std::fmt;

/// Receives one formatted line per debug event.
///
/// Implemented for every `Fn(&str)`.
pub trait DebugSink: 'static {
    /// Handle a formatted event.
    fn log(&self, message: &str);
}

impl<F: Fn(&str) + 'static> DebugSink for F {
    fn log(&self, message: &str) {
        self(message)
    }
}

/// Which dispatch operation ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchKind {
    /// Every callback.
    All,
    /// The lowest-priority callback only.
    First,
    /// The highest-priority callback only.
    Last,
}

impl DispatchKind {
    /// Short name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchKind::All => "all",
            DispatchKind::First => "first",
            DispatchKind::Last => "last",
        }
    }
}

/// Something worth reporting to a [`DebugSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugEvent<'a> {
    /// A callback was added to a hook point.
    Register {
        /// Source file label.
        source: &'a str,
        /// The hook point.
        hook_point: &'a str,
        /// Identity of the callback.
        callback: String,
        /// Its priority.
        priority: i32,
    },
    /// A hook point's callbacks were re-ordered by priority.
    Sort {
        /// Source file label.
        source: &'a str,
        /// The hook point.
        hook_point: &'a str,
        /// Number of callbacks sorted.
        callbacks: usize,
    },
    /// A hook point was dispatched.
    Dispatch {
        /// Source file label.
        source: &'a str,
        /// The hook point.
        hook_point: &'a str,
        /// The operation.
        kind: DispatchKind,
        /// Number of callbacks invoked.
        callbacks: usize,
    },
}

impl fmt::Display for DebugEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugEvent::Register {
                source,
                hook_point,
                callback,
                priority,
            } => write!(
                f,
                "[{source}] registered `{callback}` on hook point `{hook_point}` with priority {priority}"
            ),
            DebugEvent::Sort {
                source,
                hook_point,
                callbacks,
            } => write!(
                f,
                "[{source}] sorted {callbacks} callback(s) on hook point `{hook_point}`"
            ),
            DebugEvent::Dispatch {
                source,
                hook_point,
                kind,
                callbacks,
            } => write!(
                f,
                "[{source}] dispatched `{}` on hook point `{hook_point}` ({callbacks} callback(s))",
                kind.as_str()
            ),
        }
    }
}
