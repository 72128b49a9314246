// baremetal_order/src/lib.rs

//! Automated ordering of an OVH bare-metal server.
//!
//! Creates a cart, adds and configures the server with its options, checks out
//! (retrying transient failures) and pays with the account's first payment method.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod pipelines;
pub mod profile;

pub use errors::{AppError, OrderStep};
pub use pipelines::{run_order, OrderOutcome};
pub use profile::OrderProfile;
