// baremetal_order/src/config.rs

use crate::api::ApiCredentials;
use crate::errors::{AppError, Result};
use crate::profile::{OrderProfile, DEFAULT_PROFILE};
use dotenvy::dotenv;
use std::env;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const REQUIRED_CREDENTIALS: [&str; 4] = [
  "OVH_ENDPOINT",
  "OVH_APPLICATION_KEY",
  "OVH_APPLICATION_SECRET",
  "OVH_CONSUMER_KEY",
];

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 180;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub credentials: ApiCredentials,
  pub profile: Arc<OrderProfile>,
  pub http_timeout: Duration,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the configuration from any variable source. Blank values count as missing.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let missing: Vec<&str> = REQUIRED_CREDENTIALS
      .iter()
      .copied()
      .filter(|name| get(name).is_none())
      .collect();
    if !missing.is_empty() {
      return Err(AppError::Config(format!(
        "Missing environment variable(s): {}",
        missing.join(", ")
      )));
    }
    let required = |name: &str| get(name).unwrap_or_default();
    let credentials = ApiCredentials {
      endpoint: required("OVH_ENDPOINT"),
      application_key: required("OVH_APPLICATION_KEY"),
      application_secret: required("OVH_APPLICATION_SECRET"),
      consumer_key: required("OVH_CONSUMER_KEY"),
    };

    let profile = match get("ORDER_PROFILE_FILE") {
      Some(path) => OrderProfile::from_json_file(Path::new(&path))?,
      None => {
        let name = get("ORDER_PROFILE").unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        OrderProfile::builtin(&name).ok_or_else(|| {
          AppError::Config(format!(
            "Unknown ORDER_PROFILE '{}' (available: {})",
            name,
            OrderProfile::BUILTIN_NAMES.join(", ")
          ))
        })?
      }
    };

    let http_timeout = match get("OVH_HTTP_TIMEOUT_SECS") {
      Some(raw) => raw
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| AppError::Config(format!("Invalid OVH_HTTP_TIMEOUT_SECS '{}': {}", raw, e)))?,
      None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
    };

    tracing::info!(
      endpoint = %credentials.endpoint,
      profile = %profile.name,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      credentials,
      profile: Arc::new(profile),
      http_timeout,
    })
  }
}
