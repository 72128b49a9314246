// order_flow/src/lib.rs

//! order_flow: an async step pipeline for linear remote workflows.
//!
//! A pipeline is an ordered list of named steps sharing one context. It offers:
//!  - Async handlers per step, run strictly in sequence.
//!  - Early stopping via `PipelineControl::Stop`.
//!  - Skip conditions and optional steps.
//!  - A per-step retry policy with exponential backoff, where the delay itself is
//!    injectable (`Sleeper`) so retry behaviour can be tested without waiting.

pub mod core;
pub mod error;
pub mod pipeline;
pub mod retry;

pub use crate::core::context::Handler;
pub use crate::core::context_data::ContextData;
pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::core::step::{SkipCondition, StepDef};

pub use crate::pipeline::definition::{Pipeline, RetryFilter};

pub use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};

pub use crate::error::{FlowError, FlowResult};

/*
    Core Workflow:
    1. Define a context struct `MyCtx` carrying the identifiers the steps hand to each other.
    2. Create a `Pipeline<MyCtx, MyError>` with its ordered steps.
    3. Register async handlers with `.on_root()`.
    4. Optionally attach a retry policy to a flaky step with `.set_retry_policy()`.
    5. Wrap the initial state in `ContextData::new(..)` and `.run(ctx).await` it.
*/
