// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use order_flow::{ContextData, FlowError, PipelineControl, Sleeper};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Flow error: {0}")]
  Flow(String),

  #[error("Test handler failed: {0}")]
  Handler(String),

  #[error("Transient failure: {0}")]
  Transient(String),

  #[error("Permanent failure: {0}")]
  Permanent(String),
}

impl TestError {
  pub fn is_transient(&self) -> bool {
    matches!(self, TestError::Transient(_))
  }
}

impl From<FlowError> for TestError {
  fn from(fe: FlowError) -> Self {
    TestError::Flow(format!("{:?}", fe))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> order_flow::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    let step_name_owned = step_name.to_string();
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name_owned.clone());
      if guard.should_stop_at.as_deref() == Some(step_name_owned.as_str()) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> order_flow::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    let step_name_owned = step_name.to_string();
    let error_message_owned = error_message.to_string();
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name_owned);
      Err(TestError::Handler(error_message_owned))
    })
  })
}

/// Fails with `TestError::Transient` for the first `failures` calls, then succeeds.
pub fn create_flaky_handler(
  step_name: &'static str,
  failures: u32,
  calls: Arc<AtomicU32>,
) -> order_flow::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    let call_no = calls.fetch_add(1, Ordering::SeqCst) + 1;
    Box::pin(async move {
      if call_no <= failures {
        return Err(TestError::Transient(format!("{} attempt {}", step_name, call_no)));
      }
      ctx.write().steps_executed.push(step_name.to_string());
      Ok(PipelineControl::Continue)
    })
  })
}

/// Records requested delays instead of waiting.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
  delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
  pub fn delays(&self) -> Vec<Duration> {
    self.delays.lock().clone()
  }

  pub fn total(&self) -> Duration {
    self.delays.lock().iter().sum()
  }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
  async fn sleep(&self, delay: Duration) {
    self.delays.lock().push(delay);
  }
}

use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
