// baremetal_order/src/api/mod.rs

//! The remote commerce API as seen by the order workflow.
//!
//! Steps only depend on the `ApiClient` trait: a signed `get`/`post` returning
//! raw JSON. `OvhClient` is the production implementation; tests script a stub.

pub mod endpoint;
pub mod ovh_client;
pub mod signing;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use ovh_client::{ApiCredentials, OvhClient};

/// A failed remote call: the request never completed, or the API rejected it.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("HTTP transport error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("API responded with status {status}: {message}")]
  Status {
    status: u16,
    message: String,
    query_id: Option<String>,
  },

  #[error("Response body is not valid JSON: {0}")]
  InvalidJson(#[from] serde_json::Error),

  #[error("Unknown API endpoint '{0}' (expected an alias such as 'ovh-eu' or an https:// URL)")]
  InvalidEndpoint(String),
}

#[async_trait]
pub trait ApiClient: Send + Sync {
  /// `GET {path}`. An empty response body yields `Value::Null`.
  async fn get(&self, path: &str) -> Result<Value, ApiError>;

  /// `POST {path}` with an optional JSON body. An empty response body yields `Value::Null`.
  async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError>;
}
