//! Debug sinks.

use hookline_core::DebugSink;
use std::{cell::RefCell, rc::Rc};

/// A sink that forwards debug events to `tracing`.
///
/// Events are emitted at `DEBUG` level under the `hookline` target. Without
/// the `tracing` feature the sink discards everything.
///
/// # Example
///
/// ```rust,ignore
/// let mut hooks = Hooks::new();
/// hooks.debug(TracingSink::named("plugins"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    name: &'static str,
}

impl TracingSink {
    /// Create a sink with the default name.
    pub fn new() -> Self {
        Self { name: "hooks" }
    }

    /// Create a sink with a custom name, attached to every event.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The sink's name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugSink for TracingSink {
    fn log(&self, message: &str) {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(target: "hookline", name = %self.name, "{message}");
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (self.name, message);
        }
    }
}

/// A sink that keeps every message it receives.
///
/// Clones share the same buffer, so one clone can be installed on the
/// dispatcher while another is used for inspection.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingSink::new();
/// hooks.debug(recorder.clone());
///
/// hooks.all("Strings", ())?;
/// assert!(recorder.contains("dispatched `all`"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the recorded messages.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Number of recorded messages.
    pub fn count(&self) -> usize {
        self.lines.borrow().len()
    }

    /// Number of recorded messages containing `pattern`.
    pub fn count_matching(&self, pattern: &str) -> usize {
        self.lines
            .borrow()
            .iter()
            .filter(|line| line.contains(pattern))
            .count()
    }

    /// Whether any recorded message contains `pattern`.
    pub fn contains(&self, pattern: &str) -> bool {
        self.count_matching(pattern) > 0
    }

    /// Forget all recorded messages.
    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl DebugSink for RecordingSink {
    fn log(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_shares_buffer() {
        let sink = RecordingSink::new();
        let installed = sink.clone();
        installed.log("[Unknown] sorted 2 callback(s) on hook point `A`");
        installed.log("[Unknown] dispatched `all` on hook point `A` (2 callback(s))");

        assert_eq!(sink.count(), 2);
        assert!(sink.contains("sorted"));
        assert_eq!(sink.count_matching("hook point `A`"), 2);

        sink.clear();
        assert_eq!(installed.count(), 0);
    }

    #[test]
    fn test_tracing_sink_accepts_messages() {
        let sink = TracingSink::named("plugins");
        assert_eq!(sink.name(), "plugins");
        sink.log("anything");
    }
}
