// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use baremetal_order::api::{ApiClient, ApiError};
use baremetal_order::profile::{CheckoutRetry, ConfigurationEntry, OrderProfile, PlanSelection};
use once_cell::sync::Lazy;
use order_flow::Sleeper;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tracing::Level;

#[derive(Debug, Clone)]
pub enum Scripted {
  Ok(Value),
  Status(u16, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
  pub method: &'static str,
  pub path: String,
  pub body: Option<Value>,
}

/// `ApiClient` that answers from per-(method, path) scripts and records every call.
///
/// Responses are consumed in order; the last one of a script repeats forever.
/// A call with no script fails with a 404.
#[derive(Debug, Default)]
pub struct StubApiClient {
  scripts: Mutex<HashMap<(&'static str, String), VecDeque<Scripted>>>,
  calls: Mutex<Vec<RecordedCall>>,
}

impl StubApiClient {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn on(self, method: &'static str, path: &str, responses: Vec<Scripted>) -> Self {
    self.scripts.lock().insert((method, path.to_string()), responses.into());
    self
  }

  pub fn calls(&self) -> Vec<RecordedCall> {
    self.calls.lock().clone()
  }

  pub fn calls_to(&self, method: &str, path: &str) -> Vec<RecordedCall> {
    self
      .calls
      .lock()
      .iter()
      .filter(|c| c.method == method && c.path == path)
      .cloned()
      .collect()
  }

  fn answer(&self, method: &'static str, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
    self.calls.lock().push(RecordedCall {
      method,
      path: path.to_string(),
      body,
    });
    let mut scripts = self.scripts.lock();
    let next = scripts.get_mut(&(method, path.to_string())).and_then(|queue| {
      if queue.len() > 1 {
        queue.pop_front()
      } else {
        queue.front().cloned()
      }
    });
    match next {
      Some(Scripted::Ok(value)) => Ok(value),
      Some(Scripted::Status(status, message)) => Err(ApiError::Status {
        status,
        message,
        query_id: None,
      }),
      None => Err(ApiError::Status {
        status: 404,
        message: format!("no scripted response for {} {}", method, path),
        query_id: None,
      }),
    }
  }
}

#[async_trait]
impl ApiClient for StubApiClient {
  async fn get(&self, path: &str) -> Result<Value, ApiError> {
    self.answer("GET", path, None)
  }

  async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
    self.answer("POST", path, body)
  }
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
}

#[async_trait]
impl Sleeper for RecordingSleeper {
  async fn sleep(&self, delay: Duration) {
    self.delays.lock().push(delay);
  }
}

/// One configuration entry, one option.
pub fn test_profile() -> OrderProfile {
  OrderProfile {
    name: "test".to_string(),
    subsidiary: "US".to_string(),
    description: "Automated Dedicated Server Order".to_string(),
    server: PlanSelection {
      plan_code: "24rise01-us".to_string(),
      duration: "P1M".to_string(),
      pricing_mode: "default".to_string(),
      quantity: 1,
    },
    configuration: vec![ConfigurationEntry::new("region", "united_states")],
    options: vec!["vrack-bandwidth-1000-24rise-us".to_string()],
    checkout_retry: CheckoutRetry::default(),
  }
}

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
