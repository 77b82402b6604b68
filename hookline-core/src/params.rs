//! Parameter merging.

use crate::callback::Params;
use serde_json::Value;

/// Deep-merge `overrides` over `base` without touching either.
///
/// Mappings merge key by key and sequences index by index, recursively;
/// any other pairing is replaced by the override. Sequence elements beyond
/// the override's length are kept from `base`.
pub fn merge_params(base: &Params, overrides: &Params) -> Params {
    let mut merged = base.clone();
    for (name, value) in overrides {
        match merged.get_mut(name) {
            Some(existing) => merge_value(existing, value.clone()),
            None => {
                merged.insert(name.clone(), value.clone());
            }
        }
    }
    merged
}

/// Merge `overlay` into `base` in place.
pub fn merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (name, value) in overlay {
                match base.get_mut(&name) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        base.insert(name, value);
                    }
                }
            }
        }
        (Value::Array(base), Value::Array(overlay)) => {
            for (index, value) in overlay.into_iter().enumerate() {
                match base.get_mut(index) {
                    Some(existing) => merge_value(existing, value),
                    None => base.push(value),
                }
            }
        }
        (slot, overlay) => *slot = overlay,
    }
}
