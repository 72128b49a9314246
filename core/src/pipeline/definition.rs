// order_flow/src/pipeline/definition.rs

//! Contains the `Pipeline<TData, Err>` struct definition and methods for its
//! construction and per-step configuration.

use crate::core::context::Handler;
use crate::core::step::{SkipCondition, StepDef};
use crate::error::FlowError;
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};
use std::collections::HashMap;
use std::sync::Arc;

/// Decides whether a failed attempt of a retried step may be attempted again.
pub type RetryFilter<Err> = Arc<dyn Fn(&Err) -> bool + Send + Sync + 'static>;

/// An ordered list of named steps over a shared context `TData`, whose handlers
/// fail with `Err`.
///
/// `Err` must be `From<FlowError>` so that framework failures (missing handlers,
/// exhausted retries) surface through the same error type as handler failures.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef<TData>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) retry_filters: HashMap<String, RetryFilter<Err>>,
  pub(crate) sleeper: Arc<dyn Sleeper>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Creates a pipeline from `(name, optional, skip_if)` triples, run in the given order.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let mut pipeline = Self {
      steps: Vec::with_capacity(step_defs.len()),
      on: HashMap::new(),
      retry_filters: HashMap::new(),
      sleeper: Arc::new(TokioSleeper),
    };
    for (name, optional, skip_cond_opt) in step_defs {
      pipeline.ensure_step_not_exists(name);
      pipeline.steps.push(StepDef {
        name: (*name).to_string(),
        optional: *optional,
        skip_if: skip_cond_opt.clone(),
        retry: None,
      });
    }
    pipeline
  }

  /// Panics if the step is unknown. A typo in a step name is a setup bug, not a runtime error.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!("Pipeline setup error: Step '{}' not found in pipeline definition.", step_name);
    }
  }

  fn ensure_step_not_exists(&self, step_name: &str) {
    if self.steps.iter().any(|s| s.name == step_name) {
      panic!("Pipeline setup error: Step '{}' already exists in pipeline definition.", step_name);
    }
  }

  /// Step names in execution order.
  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  /// Re-runs the step's handlers according to `policy` whenever they fail with an
  /// error for which `retry_if` returns `true`. Other errors end the run immediately.
  pub fn set_retry_policy(
    &mut self,
    step_name: &str,
    policy: RetryPolicy,
    retry_if: impl Fn(&Err) -> bool + Send + Sync + 'static,
  ) {
    self.ensure_step_exists(step_name);
    if let Some(step) = self.steps.iter_mut().find(|s| s.name == step_name) {
      step.retry = Some(policy);
    }
    self.retry_filters.insert(step_name.to_string(), Arc::new(retry_if));
  }

  /// Replaces the delay used between retry attempts (defaults to `TokioSleeper`).
  pub fn set_sleeper(&mut self, sleeper: Arc<dyn Sleeper>) {
    self.sleeper = sleeper;
  }
}
