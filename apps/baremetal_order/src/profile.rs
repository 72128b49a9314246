// baremetal_order/src/profile.rs

//! What to order: the server plan, its configuration and its options.
//!
//! The workflow itself never changes between orders; only this data does.

use crate::errors::{AppError, Result};
use order_flow::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PROFILE: &str = "rise-vrack";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSelection {
  pub plan_code: String,
  #[serde(default = "default_duration")]
  pub duration: String,
  #[serde(default = "default_pricing_mode")]
  pub pricing_mode: String,
  #[serde(default = "default_quantity")]
  pub quantity: u32,
}

/// A required attribute of the server item. Serialized as the configuration call body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationEntry {
  pub label: String,
  pub value: String,
}

impl ConfigurationEntry {
  pub fn new(label: &str, value: &str) -> Self {
    Self {
      label: label.to_string(),
      value: value.to_string(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRetry {
  pub max_attempts: u32,
  pub base_delay_secs: u64,
  /// Wait once more after the last failed attempt before giving up.
  #[serde(default = "default_delay_after_last")]
  pub delay_after_last: bool,
}

impl CheckoutRetry {
  pub fn policy(&self) -> RetryPolicy {
    let policy = RetryPolicy::exponential(self.max_attempts, Duration::from_secs(self.base_delay_secs));
    if self.delay_after_last {
      policy.with_delay_after_last()
    } else {
      policy
    }
  }
}

impl Default for CheckoutRetry {
  // 3 attempts, waiting 2s, 4s, then 8s after the last failure.
  fn default() -> Self {
    Self {
      max_attempts: 3,
      base_delay_secs: 1,
      delay_after_last: default_delay_after_last(),
    }
  }
}

fn default_delay_after_last() -> bool {
  true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProfile {
  pub name: String,
  pub subsidiary: String,
  pub description: String,
  pub server: PlanSelection,
  pub configuration: Vec<ConfigurationEntry>,
  /// Option plan codes, added in order with the server's duration and pricing mode.
  #[serde(default)]
  pub options: Vec<String>,
  #[serde(default)]
  pub checkout_retry: CheckoutRetry,
}

fn default_duration() -> String {
  "P1M".to_string()
}

fn default_pricing_mode() -> String {
  "default".to_string()
}

fn default_quantity() -> u32 {
  1
}

impl OrderProfile {
  pub const BUILTIN_NAMES: &'static [&'static str] = &["rise-vrack", "rise-full"];

  pub fn builtin(name: &str) -> Option<Self> {
    match name {
      "rise-vrack" => Some(Self::rise_vrack()),
      "rise-full" => Some(Self::rise_full()),
      _ => None,
    }
  }

  /// RISE-1 in Hillsboro with the vRack bandwidth option only.
  pub fn rise_vrack() -> Self {
    Self {
      name: "rise-vrack".to_string(),
      subsidiary: "US".to_string(),
      description: "Automated Dedicated Server Order".to_string(),
      server: PlanSelection {
        plan_code: "24rise01-us".to_string(),
        duration: default_duration(),
        pricing_mode: default_pricing_mode(),
        quantity: 1,
      },
      configuration: vec![
        ConfigurationEntry::new("dedicated_os", "none_64_en"),
        ConfigurationEntry::new("region", "united_states"),
        ConfigurationEntry::new("dedicated_datacenter", "hil"),
      ],
      options: vec!["vrack-bandwidth-1000-24rise-us".to_string()],
      checkout_retry: CheckoutRetry::default(),
    }
  }

  /// RISE-1 in Hillsboro with vRack, soft RAID NVMe, 32G RAM and public bandwidth options.
  pub fn rise_full() -> Self {
    let mut profile = Self::rise_vrack();
    profile.name = "rise-full".to_string();
    profile.configuration[0] = ConfigurationEntry::new("dedicated_os", "none_64.en");
    profile.options = [
      "vrack-bandwidth-1000-24rise-us",
      "softraid-2x512nvme-24rise-us",
      "ram-32g-ecc-3200-24rise-us",
      "bandwidth-1000-unguaranteed-24rise-us",
    ]
    .iter()
    .map(|code| code.to_string())
    .collect();
    profile
  }

  pub fn from_json_file(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .map_err(|e| AppError::Config(format!("Cannot read order profile '{}': {}", path.display(), e)))?;
    let profile: OrderProfile = serde_json::from_str(&raw)
      .map_err(|e| AppError::Config(format!("Invalid order profile '{}': {}", path.display(), e)))?;
    profile.validate()?;
    Ok(profile)
  }

  pub fn validate(&self) -> Result<()> {
    let invalid = |msg: String| Err(AppError::Config(format!("Order profile '{}': {}", self.name, msg)));
    if self.subsidiary.trim().is_empty() {
      return invalid("subsidiary is empty".to_string());
    }
    if self.server.plan_code.trim().is_empty() {
      return invalid("server planCode is empty".to_string());
    }
    if self.server.quantity == 0 {
      return invalid("server quantity must be at least 1".to_string());
    }
    if let Some(entry) = self.configuration.iter().find(|e| e.label.trim().is_empty()) {
      return invalid(format!("configuration entry with value '{}' has no label", entry.value));
    }
    if self.options.iter().any(|code| code.trim().is_empty()) {
      return invalid("options contain an empty planCode".to_string());
    }
    if self.checkout_retry.max_attempts == 0 {
      return invalid("checkoutRetry.maxAttempts must be at least 1".to_string());
    }
    Ok(())
  }
}
