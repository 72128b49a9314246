// baremetal_order/src/models/cart.rs

use super::ids::{CartId, ItemId, OrderId};
use serde::{Deserialize, Serialize};

/// Body of `POST /order/cart`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartRequest {
  pub ovh_subsidiary: String,
  pub description: String,
  pub expire: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCart {
  pub cart_id: CartId,
  #[serde(default)]
  pub expire: Option<String>,
}

/// Body of `POST /order/cart/{cartId}/baremetalServers`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
  pub duration: String,
  pub plan_code: String,
  pub pricing_mode: String,
  pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedItem {
  pub item_id: ItemId,
}

/// Body of `POST /order/cart/{cartId}/baremetalServers/options`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOptionRequest {
  pub duration: String,
  pub item_id: ItemId,
  pub plan_code: String,
  pub pricing_mode: String,
  pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckedOutOrder {
  pub order_id: OrderId,
}
