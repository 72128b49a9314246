// order_flow/src/core/context.rs

//! The `Handler<TData, Err>` type for pipeline step handlers.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use std::future::Future;
use std::pin::Pin;

/// A pipeline step handler.
///
/// Takes a clone of the pipeline's `ContextData<TData>` and returns a boxed future
/// resolving to `Result<PipelineControl, Err>`.
///
/// Handlers must drop any lock guard before their first `.await`. A step with a
/// retry policy may invoke its handlers more than once, so a handler should only
/// write to the context after its remote call has succeeded.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;
