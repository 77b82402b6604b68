//! The dispatcher.
//!
//! [`Hooks`] keeps, per hook point, the registered callbacks with their
//! priorities. Callbacks are sorted lazily: registering marks the hook point
//! dirty and the next dispatch touching it sorts once (stable, ascending
//! priority, so equal priorities keep registration order).
//!
//! # Threading
//!
//! `Hooks` is single-threaded and `!Send`. Callbacks may re-enter the
//! dispatcher through [`Call::hooks`]; anything beyond that, such as sharing
//! one dispatcher between threads, needs the caller's own synchronization.

use crate::{
    callback::{Arguments, Call, Callback, IntoOutput, Overrides, Params},
    debug::{DebugEvent, DebugSink, DispatchKind},
    descriptor::{CallbackDescriptor, global_function},
    error::HookError,
    output::Output,
    params::merge_params,
};
use serde_json::Value;
use std::{collections::HashMap, fmt, rc::Rc};

/// Priority used when none is given.
pub const DEFAULT_PRIORITY: i32 = 1;

const UNKNOWN_SOURCE: &str = "Unknown";

#[derive(Clone)]
struct Entry {
    priority: i32,
    callback: CallbackDescriptor,
}

#[derive(Default)]
struct HookPoint {
    entries: Vec<Entry>,
    sorted: bool,
}

impl HookPoint {
    /// Sort if needed; returns whether a sort happened.
    fn ensure_sorted(&mut self) -> bool {
        if self.sorted {
            return false;
        }
        self.entries.sort_by_key(|e| e.priority);
        self.sorted = true;
        true
    }
}

/// A priority-ordered callback registry.
///
/// # Example
///
/// ```rust,ignore
/// let mut hooks = Hooks::new();
/// hooks
///     .register_fn("Strings", 1, |_| "Foo")
///     .register_fn("Strings", 3, |_| "Baz")
///     .register_fn("Strings", 2, |_| "Bar");
///
/// assert_eq!(hooks.all("Strings", ())?.join(":")?, "Foo:Bar:Baz");
/// ```
pub struct Hooks {
    hook_points: HashMap<String, HookPoint>,
    parameters: Params,
    output: Output,
    functions: HashMap<String, Rc<dyn Callback>>,
    sink: Option<Box<dyn DebugSink>>,
    source_file: Option<String>,
}

impl Default for Hooks {
    fn default() -> Self {
        Self::new()
    }
}

impl Hooks {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self {
            hook_points: HashMap::new(),
            parameters: Params::new(),
            output: Output::new(),
            functions: HashMap::new(),
            sink: None,
            source_file: None,
        }
    }

    /// Create a dispatcher seeded with permanent parameters.
    pub fn with_parameters(parameters: Params) -> Self {
        let mut hooks = Self::new();
        hooks.set_parameters(parameters);
        hooks
    }

    /// Start a [`HooksBuilder`].
    pub fn builder() -> HooksBuilder {
        HooksBuilder::new()
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register `callback` on `hook_point`.
    ///
    /// A descriptor that cannot be resolved (an unknown function name, a
    /// method the target does not expose) is ignored without error; the
    /// hook point is left as it was and nothing is logged.
    pub fn register(
        &mut self,
        hook_point: &str,
        callback: CallbackDescriptor,
        priority: i32,
    ) -> &mut Self {
        if !callback.is_resolvable(self) {
            #[cfg(feature = "tracing")]
            {
                tracing::trace!(hook_point, callback = %callback.identity(), "Ignoring unresolvable callback");
            }
            return self;
        }

        let identity = callback.identity();
        let point = self.hook_points.entry(hook_point.to_owned()).or_default();
        point.entries.push(Entry { priority, callback });
        point.sorted = false;

        self.emit(DebugEvent::Register {
            source: self.source_file(),
            hook_point,
            callback: identity,
            priority,
        });
        self
    }

    /// Register a closure on `hook_point`.
    pub fn register_fn<F, R>(&mut self, hook_point: &str, priority: i32, callback: F) -> &mut Self
    where
        F: Fn(&mut Call<'_>) -> R + 'static,
        R: IntoOutput,
    {
        self.register(hook_point, CallbackDescriptor::function(callback), priority)
    }

    /// Define a named function for [`CallbackDescriptor::named`].
    ///
    /// Redefining a name replaces the previous function.
    pub fn define<F, R>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(&mut Call<'_>) -> R + 'static,
        R: IntoOutput,
    {
        self.functions.insert(name.into(), Rc::new(function));
        self
    }

    /// Look up a named function, locally defined ones first.
    pub fn function(&self, name: &str) -> Option<Rc<dyn Callback>> {
        self.functions
            .get(name)
            .cloned()
            .or_else(|| global_function(name))
    }

    /// Number of callbacks on `hook_point`.
    pub fn count(&self, hook_point: &str) -> usize {
        self.hook_points
            .get(hook_point)
            .map_or(0, |point| point.entries.len())
    }

    /// Whether `hook_point` has at least one callback.
    pub fn contains(&self, hook_point: &str) -> bool {
        self.count(hook_point) > 0
    }

    /// Names of all hook points with callbacks, in no particular order.
    pub fn hook_points(&self) -> impl Iterator<Item = &str> {
        self.hook_points.keys().map(String::as_str)
    }

    // ------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------

    /// Set one permanent parameter.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Alias of [`set_parameter`](Self::set_parameter).
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.set_parameter(name, value)
    }

    /// Replace permanent parameters key by key.
    ///
    /// Keys in `parameters` overwrite existing ones as a whole; nested values
    /// are not merged. Keys not mentioned are kept.
    pub fn set_parameters(&mut self, parameters: Params) -> &mut Self {
        for (name, value) in parameters {
            self.parameters.insert(name, value);
        }
        self
    }

    /// Alias of [`set_parameters`](Self::set_parameters).
    pub fn set_params(&mut self, parameters: Params) -> &mut Self {
        self.set_parameters(parameters)
    }

    /// The permanent parameters.
    pub fn parameters(&self) -> &Params {
        &self.parameters
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Invoke every callback on `hook_point` in priority order.
    ///
    /// A hook point without callbacks yields an empty output. If a callback
    /// fails, the remaining ones are skipped, the output stays empty and the
    /// error is returned as is.
    pub fn all<'o>(
        &mut self,
        hook_point: &str,
        overrides: impl Into<Overrides<'o>>,
    ) -> Result<&mut Self, HookError> {
        let overrides = overrides.into();
        let entries = self.prepare(hook_point);
        if entries.is_empty() {
            return Ok(self);
        }

        let mut output = Output::new();
        for entry in &entries {
            output.absorb(self.invoke_or_reset(hook_point, entry, &overrides)?);
        }
        self.output = output;

        self.emit(DebugEvent::Dispatch {
            source: self.source_file(),
            hook_point,
            kind: DispatchKind::All,
            callbacks: entries.len(),
        });
        Ok(self)
    }

    /// Invoke only the first callback (lowest priority) on `hook_point`.
    ///
    /// Fails with [`HookError::NoCallbacks`] if there is none.
    pub fn first<'o>(
        &mut self,
        hook_point: &str,
        overrides: impl Into<Overrides<'o>>,
    ) -> Result<&mut Self, HookError> {
        self.dispatch_one(hook_point, overrides.into(), DispatchKind::First)
    }

    /// Invoke only the last callback (highest priority) on `hook_point`.
    ///
    /// Fails with [`HookError::NoCallbacks`] if there is none.
    pub fn last<'o>(
        &mut self,
        hook_point: &str,
        overrides: impl Into<Overrides<'o>>,
    ) -> Result<&mut Self, HookError> {
        self.dispatch_one(hook_point, overrides.into(), DispatchKind::Last)
    }

    fn dispatch_one(
        &mut self,
        hook_point: &str,
        overrides: Overrides<'_>,
        kind: DispatchKind,
    ) -> Result<&mut Self, HookError> {
        let entries = self.prepare(hook_point);
        let entry = match kind {
            DispatchKind::Last => entries.last(),
            _ => entries.first(),
        }
        .ok_or_else(|| HookError::NoCallbacks {
            hook_point: hook_point.to_owned(),
        })?;

        let mut output = Output::new();
        output.absorb(self.invoke_or_reset(hook_point, entry, &overrides)?);
        self.output = output;

        self.emit(DebugEvent::Dispatch {
            source: self.source_file(),
            hook_point,
            kind,
            callbacks: 1,
        });
        Ok(self)
    }

    /// Reset the output and return a sorted snapshot of the hook point.
    ///
    /// Callbacks run against the snapshot, so registering from inside a
    /// callback takes effect from the next dispatch on.
    fn prepare(&mut self, hook_point: &str) -> Vec<Entry> {
        self.output.clear();

        let Some(point) = self.hook_points.get_mut(hook_point) else {
            return Vec::new();
        };
        let resorted = point.ensure_sorted();
        let entries = point.entries.clone();

        if resorted {
            self.emit(DebugEvent::Sort {
                source: self.source_file(),
                hook_point,
                callbacks: entries.len(),
            });
        }
        entries
    }

    /// Like [`invoke`](Self::invoke), but a failure also drops whatever a
    /// nested dispatch left in the output.
    fn invoke_or_reset(
        &mut self,
        hook_point: &str,
        entry: &Entry,
        overrides: &Overrides<'_>,
    ) -> Result<Value, HookError> {
        let result = self.invoke(hook_point, entry, overrides);
        if result.is_err() {
            self.output.clear();
        }
        result
    }

    fn invoke(
        &mut self,
        hook_point: &str,
        entry: &Entry,
        overrides: &Overrides<'_>,
    ) -> Result<Value, HookError> {
        let arguments = match overrides {
            Overrides::Params(params) => Arguments::Params(merge_params(&self.parameters, params)),
            Overrides::Subject(subject) => Arguments::Subject {
                subject: *subject,
                params: self.parameters.clone(),
            },
        };

        #[cfg(feature = "tracing")]
        {
            tracing::trace!(
                hook_point,
                priority = entry.priority,
                callback = %entry.callback.identity(),
                "Invoking callback"
            );
        }

        let mut call = Call::new(self, hook_point, arguments);
        entry.callback.invoke(&mut call)
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Output of the latest dispatch.
    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Output of the latest dispatch as a JSON value.
    pub fn to_value(&self) -> Value {
        self.output.to_value()
    }

    /// Join the output of the latest dispatch with `separator`.
    pub fn join(&self, separator: &str) -> Result<String, HookError> {
        self.output.join(separator)
    }

    // ------------------------------------------------------------------
    // Debugging
    // ------------------------------------------------------------------

    /// Send debug events to `sink`, replacing any previous sink.
    pub fn debug(&mut self, sink: impl DebugSink) -> &mut Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Stop sending debug events.
    pub fn debug_off(&mut self) -> &mut Self {
        self.sink = None;
        self
    }

    /// Whether a debug sink is installed.
    pub fn is_debugging(&self) -> bool {
        self.sink.is_some()
    }

    /// Set the source label used in debug events; `None` clears it.
    pub fn set_source_file(&mut self, path: Option<&str>) -> &mut Self {
        self.source_file = path.map(str::to_owned);
        self
    }

    /// The source label, `"Unknown"` when unset.
    pub fn source_file(&self) -> &str {
        self.source_file.as_deref().unwrap_or(UNKNOWN_SOURCE)
    }

    fn emit(&self, event: DebugEvent<'_>) {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(target: "hookline", "{event}");
        }

        if let Some(sink) = &self.sink {
            sink.log(&event.to_string());
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .hook_points
            .iter()
            .map(|(name, point)| (name.as_str(), point.entries.len()))
            .collect();
        f.debug_struct("Hooks")
            .field("hook_points", &counts)
            .field("parameters", &self.parameters)
            .field("output", &self.output)
            .field("source_file", &self.source_file())
            .field("debugging", &self.is_debugging())
            .finish()
    }
}

/// Concatenation of the latest output, see [`Output`]'s `Display`.
impl fmt::Display for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.output, f)
    }
}

// ============================================================================
// HooksBuilder
// ============================================================================

/// Builder for a configured [`Hooks`].
///
/// # Example
/// ```ignore
/// let hooks = Hooks::builder()
///     .parameter("site", "example.org")
///     .source_file("plugins/seo.rs")
///     .debug(|line: &str| eprintln!("{line}"))
///     .build();
/// ```
#[derive(Default)]
pub struct HooksBuilder {
    parameters: Params,
    source_file: Option<String>,
    sink: Option<Box<dyn DebugSink>>,
}

impl HooksBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one permanent parameter.
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Seed permanent parameters, replacing same-named keys.
    pub fn parameters(mut self, parameters: Params) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Set the source label.
    pub fn source_file(mut self, path: impl Into<String>) -> Self {
        self.source_file = Some(path.into());
        self
    }

    /// Install a debug sink.
    pub fn debug(mut self, sink: impl DebugSink) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build the dispatcher.
    pub fn build(self) -> Hooks {
        let mut hooks = Hooks::with_parameters(self.parameters);
        hooks.source_file = self.source_file;
        hooks.sink = self.sink;
        hooks
    }
}
