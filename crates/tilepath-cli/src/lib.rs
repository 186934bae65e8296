//! tilepath CLI library.
//!
//! Map-path resolution and output formatting shared by the `tilepath-cli`
//! binary and its tests.

pub mod config;
pub mod output;
