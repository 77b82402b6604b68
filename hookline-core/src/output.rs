//! Accumulated dispatch output.

use crate::error::HookError;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::{borrow::Cow, fmt};

/// Key of an output element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputKey {
    /// Positional key, assigned in append order.
    Index(usize),
    /// Named key, taken from a mapping-valued return.
    Name(String),
}

impl fmt::Display for OutputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKey::Index(index) => write!(f, "{index}"),
            OutputKey::Name(name) => f.write_str(name),
        }
    }
}

/// Output accumulated over one dispatch.
///
/// Sequences are appended element by element, mappings are merged by key
/// (later values replace earlier ones in place) and anything else is
/// appended as a single element. Mapping keys written as canonical integers
/// (`"0"`, `"-3"`, not `"01"`) are positional and get appended too.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Output {
    elements: IndexMap<OutputKey, Value>,
    next_index: usize,
}

impl Output {
    /// Create an empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one callback return value into the output.
    pub fn absorb(&mut self, value: Value) {
        match value {
            Value::Array(items) => {
                for item in items {
                    self.push(item);
                }
            }
            Value::Object(map) => {
                for (name, item) in map {
                    if is_integer_key(&name) {
                        self.push(item);
                    } else {
                        self.elements.insert(OutputKey::Name(name), item);
                    }
                }
            }
            scalar => self.push(scalar),
        }
    }

    /// Append one element under the next positional key.
    pub fn push(&mut self, value: Value) {
        self.elements.insert(OutputKey::Index(self.next_index), value);
        self.next_index += 1;
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing was accumulated.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element under a named key.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.elements.get(&OutputKey::Name(name.to_owned()))
    }

    /// Element at a positional key.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.elements.get(&OutputKey::Index(index))
    }

    /// Iterate over elements in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&OutputKey, &Value)> {
        self.elements.iter()
    }

    /// Whether every key is positional.
    pub fn is_list(&self) -> bool {
        self.elements
            .keys()
            .all(|key| matches!(key, OutputKey::Index(_)))
    }

    /// The output as a JSON value.
    ///
    /// A list of positional elements becomes an array; as soon as one key is
    /// named the whole output becomes an object with positional keys written
    /// as decimal strings.
    pub fn to_value(&self) -> Value {
        self.clone().into_value()
    }

    /// Consume the output into a JSON value. See [`to_value`](Self::to_value).
    pub fn into_value(self) -> Value {
        if self.is_list() {
            return Value::Array(self.elements.into_values().collect());
        }
        let map: Map<String, Value> = self
            .elements
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        Value::Object(map)
    }

    /// Join scalar elements with `separator`.
    ///
    /// Strings are taken verbatim, numbers in decimal, `true` as `"1"`,
    /// `false` and `null` as empty strings. Structured elements fail with
    /// [`HookError::NotStringifiable`].
    pub fn join(&self, separator: &str) -> Result<String, HookError> {
        let mut joined = String::new();
        for (position, (key, value)) in self.elements.iter().enumerate() {
            if position > 0 {
                joined.push_str(separator);
            }
            let text = scalar_text(value).ok_or_else(|| HookError::NotStringifiable {
                key: key.to_string(),
            })?;
            joined.push_str(&text);
        }
        Ok(joined)
    }

    pub(crate) fn clear(&mut self) {
        self.elements.clear();
        self.next_index = 0;
    }
}

fn is_integer_key(name: &str) -> bool {
    name.parse::<i64>()
        .is_ok_and(|parsed| parsed.to_string() == name)
}

/// Integral floats below 1e15 print without a fraction.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(number_text(n))),
        Value::Bool(true) => Some(Cow::Borrowed("1")),
        Value::Bool(false) | Value::Null => Some(Cow::Borrowed("")),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Concatenates the elements like `join("")`, rendering structured elements
/// as compact JSON.
impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.elements.values() {
            match scalar_text(value) {
                Some(text) => f.write_str(&text)?,
                None => write!(f, "{value}")?,
            }
        }
        Ok(())
    }
}
