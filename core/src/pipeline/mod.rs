// order_flow/src/pipeline/mod.rs

//! Defines the `Pipeline` struct, its construction, handler registration and execution.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::{Pipeline, RetryFilter};
