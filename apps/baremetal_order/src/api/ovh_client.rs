// baremetal_order/src/api/ovh_client.rs

use super::{endpoint, signing, ApiClient, ApiError};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

/// The four values needed to sign OVH API requests.
#[derive(Clone)]
pub struct ApiCredentials {
  pub endpoint: String,
  pub application_key: String,
  pub application_secret: String,
  pub consumer_key: String,
}

impl fmt::Debug for ApiCredentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ApiCredentials")
      .field("endpoint", &self.endpoint)
      .field("application_key", &self.application_key)
      .field("application_secret", &"[REDACTED]")
      .field("consumer_key", &"[REDACTED]")
      .finish()
  }
}

#[derive(Deserialize)]
struct ErrorBody {
  message: String,
}

/// Signed HTTPS client for the OVH API.
pub struct OvhClient {
  http: reqwest::Client,
  base_url: String,
  credentials: ApiCredentials,
  // Server clock minus local clock, in seconds. Fetched once from /auth/time.
  time_delta: OnceCell<i64>,
}

impl OvhClient {
  pub fn new(credentials: ApiCredentials, timeout: Duration) -> Result<Self, ApiError> {
    let base_url = endpoint::resolve(&credentials.endpoint)?;
    let http = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(Self {
      http,
      base_url,
      credentials,
      time_delta: OnceCell::new(),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  async fn time_delta(&self) -> Result<i64, ApiError> {
    self
      .time_delta
      .get_or_try_init(|| async {
        let server_time: i64 = self
          .http
          .get(format!("{}/auth/time", self.base_url))
          .send()
          .await?
          .error_for_status()?
          .json()
          .await?;
        let delta = server_time - Utc::now().timestamp();
        debug!(delta, "Fetched OVH server time delta.");
        Ok::<i64, ApiError>(delta)
      })
      .await
      .copied()
  }

  #[instrument(name = "OvhClient::call", skip(self, body), err(Display))]
  async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
    let url = format!("{}{}", self.base_url, path);
    let body_text = match &body {
      Some(value) => serde_json::to_string(value)?,
      None => String::new(),
    };
    let timestamp = Utc::now().timestamp() + self.time_delta().await?;
    let signature = signing::signature(
      &self.credentials.application_secret,
      &self.credentials.consumer_key,
      method.as_str(),
      &url,
      &body_text,
      timestamp,
    );

    let mut request = self
      .http
      .request(method, &url)
      .header("X-Ovh-Application", &self.credentials.application_key)
      .header("X-Ovh-Consumer", &self.credentials.consumer_key)
      .header("X-Ovh-Timestamp", timestamp.to_string())
      .header("X-Ovh-Signature", signature)
      .header(ACCEPT, "application/json")
      .header(CONTENT_TYPE, "application/json;charset=utf-8");
    if body.is_some() {
      request = request.body(body_text);
    }

    decode_response(request.send().await?).await
  }
}

async fn decode_response(response: Response) -> Result<Value, ApiError> {
  let status = response.status();
  let query_id = response
    .headers()
    .get("X-Ovh-QueryID")
    .and_then(|v| v.to_str().ok())
    .map(str::to_string);
  let bytes = response.bytes().await?;

  if !status.is_success() {
    let message = serde_json::from_slice::<ErrorBody>(&bytes)
      .map(|b| b.message)
      .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
    return Err(ApiError::Status {
      status: status.as_u16(),
      message,
      query_id,
    });
  }

  if bytes.iter().all(u8::is_ascii_whitespace) {
    return Ok(Value::Null);
  }
  Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl ApiClient for OvhClient {
  async fn get(&self, path: &str) -> Result<Value, ApiError> {
    self.call(Method::GET, path, None).await
  }

  async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
    self.call(Method::POST, path, body).await
  }
}
