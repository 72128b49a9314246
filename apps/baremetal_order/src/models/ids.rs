// baremetal_order/src/models/ids.rs

//! Identifiers threaded between workflow steps.
//!
//! The OVH API is loose about JSON types: numeric identifiers can arrive as
//! numbers or as numeric strings. Each identifier is converted exactly once, when
//! its response is decoded, into one canonical representation.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Cart identifier. Must be a non-blank string; it is spliced into every cart path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CartId(String);

impl CartId {
  pub fn new(id: impl Into<String>) -> Self {
    CartId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn from_json(value: &Value) -> Result<Self, String> {
    match value {
      Value::String(s) if !s.trim().is_empty() => Ok(CartId(s.clone())),
      Value::String(_) => Err("cartId is empty".to_string()),
      other => Err(format!("cartId must be a string, got {}", other)),
    }
  }
}

impl<'de> Deserialize<'de> for CartId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    CartId::from_json(&value).map_err(D::Error::custom)
  }
}

impl fmt::Display for CartId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Cart item identifier. Serialized back as a JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
  pub fn new(id: i64) -> Self {
    ItemId(id)
  }

  pub fn get(self) -> i64 {
    self.0
  }

  /// Accepts a JSON integer or a string holding a base-10 integer.
  pub fn from_json(value: &Value) -> Result<Self, String> {
    match value {
      Value::Number(n) => n
        .as_i64()
        .map(ItemId)
        .ok_or_else(|| format!("itemId {} is not a 64-bit integer", n)),
      Value::String(s) => s
        .parse::<i64>()
        .map(ItemId)
        .map_err(|e| format!("itemId {:?} is not a 64-bit integer: {}", s, e)),
      other => Err(format!("itemId must be an integer or numeric string, got {}", other)),
    }
  }
}

impl<'de> Deserialize<'de> for ItemId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    ItemId::from_json(&value).map_err(D::Error::custom)
  }
}

impl fmt::Display for ItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Order identifier, kept as the string used to build `/me/order/{orderId}/...` paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
  pub fn new(id: impl Into<String>) -> Self {
    OrderId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Stringifies any JSON scalar. Null, arrays, objects and empty strings are rejected.
  pub fn from_json(value: &Value) -> Result<Self, String> {
    let id = match value {
      Value::String(s) => s.clone(),
      Value::Number(n) => n.to_string(),
      Value::Bool(b) => b.to_string(),
      other => return Err(format!("orderId must be a scalar, got {}", other)),
    };
    if id.trim().is_empty() {
      return Err("orderId is empty".to_string());
    }
    Ok(OrderId(id))
  }
}

impl<'de> Deserialize<'de> for OrderId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    OrderId::from_json(&value).map_err(D::Error::custom)
  }
}

impl fmt::Display for OrderId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Payment method identifier.
///
/// Holds the JSON scalar exactly as received (number or string) so the pay call
/// sends it back in the same representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PaymentMethodId(Value);

impl PaymentMethodId {
  pub fn from_json(value: Value) -> Result<Self, String> {
    let usable = match &value {
      Value::Number(_) => true,
      Value::String(s) => !s.is_empty(),
      _ => false,
    };
    if usable {
      Ok(PaymentMethodId(value))
    } else {
      Err(format!("payment method id must be a number or non-empty string, got {}", value))
    }
  }

  pub fn as_json(&self) -> &Value {
    &self.0
  }
}

impl From<i64> for PaymentMethodId {
  fn from(id: i64) -> Self {
    PaymentMethodId(Value::from(id))
  }
}

impl From<&str> for PaymentMethodId {
  fn from(id: &str) -> Self {
    PaymentMethodId(Value::from(id))
  }
}

impl<'de> Deserialize<'de> for PaymentMethodId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    PaymentMethodId::from_json(Value::deserialize(deserializer)?).map_err(D::Error::custom)
  }
}

impl fmt::Display for PaymentMethodId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.0 {
      Value::String(s) => f.write_str(s),
      other => write!(f, "{}", other),
    }
  }
}
