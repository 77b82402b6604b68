//! Scalar outputs: ordering, joining and single dispatch.

use serde_json::json;

mod common;
use common::strings;

#[test]
fn test_strings_join() {
    let mut hooks = strings();
    assert_eq!(hooks.all("Strings", ()).unwrap().join("").unwrap(), "FooBarBaz");
}

#[test]
fn test_strings_join_with_separator() {
    let mut hooks = strings();
    assert_eq!(
        hooks.all("Strings", ()).unwrap().join(":").unwrap(),
        "Foo:Bar:Baz"
    );
}

#[test]
fn test_strings_to_value() {
    let mut hooks = strings();
    assert_eq!(
        hooks.all("Strings", ()).unwrap().to_value(),
        json!(["Foo", "Bar", "Baz"])
    );
}

#[test]
fn test_first() {
    let mut hooks = strings();
    assert_eq!(hooks.first("Strings", ()).unwrap().join("").unwrap(), "Foo");
    assert_eq!(hooks.first("Strings", ()).unwrap().to_value(), json!(["Foo"]));
}

#[test]
fn test_last() {
    let mut hooks = strings();
    assert_eq!(hooks.last("Strings", ()).unwrap().join("").unwrap(), "Baz");
    assert_eq!(hooks.last("Strings", ()).unwrap().to_value(), json!(["Baz"]));
}

#[test]
fn test_display_matches_empty_separator() {
    let mut hooks = strings();
    hooks.all("Strings", ()).unwrap();
    assert_eq!(hooks.to_string(), "FooBarBaz");
}

#[test]
fn test_output_is_replaced_by_next_dispatch() {
    let mut hooks = strings();
    hooks.register_fn("Other", 1, |_| "Qux");

    hooks.all("Strings", ()).unwrap();
    hooks.all("Other", ()).unwrap();
    assert_eq!(hooks.to_value(), json!(["Qux"]));

    hooks.all("Nothing", ()).unwrap();
    assert!(hooks.output().is_empty());
}
