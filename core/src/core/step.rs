// order_flow/src/core/step.rs

//! Defines the structure for a single step within a pipeline.

use super::ContextData;
use crate::retry::RetryPolicy;

/// Evaluated right before a step runs. Returning `true` skips the step.
pub type SkipCondition<TData> = std::sync::Arc<dyn Fn(ContextData<TData>) -> bool + Send + Sync + 'static>;

#[derive(Clone)]
pub struct StepDef<T: 'static + Send + Sync> {
  pub name: String,
  pub optional: bool,
  pub skip_if: Option<SkipCondition<T>>,
  /// When set, the step's handlers are re-run on retryable failures.
  pub retry: Option<RetryPolicy>,
}

impl<T: 'static + Send + Sync> std::fmt::Debug for StepDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .field("retry", &self.retry)
      .finish()
  }
}
