//! # hookline-std
//!
//! Standard implementations for the hookline callback registry.
//!
//! This crate provides:
//! - **Debug sinks**: [`sinks::TracingSink`], [`sinks::RecordingSink`]
//! - **Testing utilities**: recorders, counters and canned callbacks in
//!   [`testing`]

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core
pub use hookline_core;

// Modules
pub mod sinks;
pub mod testing;
