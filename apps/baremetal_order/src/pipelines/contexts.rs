// baremetal_order/src/pipelines/contexts.rs

//! The data shared by the steps of one order run.
//! Handlers receive it wrapped in `order_flow::ContextData`.

use crate::api::ApiClient;
use crate::errors::{AppError, Result as AppResult};
use crate::models::{CartId, ItemId, OrderId, PaymentMethod};
use crate::profile::OrderProfile;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Underlying data of the order pipeline.
///
/// Identifiers start empty and are filled in by the step that receives them;
/// later steps read them through the `require_*` accessors.
#[derive(Clone)]
pub struct OrderCtxData {
  pub client: Arc<dyn ApiClient>,
  pub profile: Arc<OrderProfile>,
  /// "Now" for this run. The cart expiry is computed from it.
  pub started_at: DateTime<Utc>,

  pub cart_id: Option<CartId>,
  pub item_id: Option<ItemId>,
  pub configured_labels: Vec<String>,
  pub added_options: Vec<String>,
  pub order_id: Option<OrderId>,
  pub payment_methods: Vec<PaymentMethod>,
  pub paid_with: Option<PaymentMethod>,
}

impl OrderCtxData {
  pub fn new(client: Arc<dyn ApiClient>, profile: Arc<OrderProfile>, started_at: DateTime<Utc>) -> Self {
    Self {
      client,
      profile,
      started_at,
      cart_id: None,
      item_id: None,
      configured_labels: Vec::new(),
      added_options: Vec::new(),
      order_id: None,
      payment_methods: Vec::new(),
      paid_with: None,
    }
  }

  pub fn require_cart_id(&self) -> AppResult<CartId> {
    self
      .cart_id
      .clone()
      .ok_or_else(|| AppError::Internal("cart ID not set before a cart operation".to_string()))
  }

  pub fn require_item_id(&self) -> AppResult<ItemId> {
    self
      .item_id
      .ok_or_else(|| AppError::Internal("item ID not set before an item operation".to_string()))
  }

  pub fn require_order_id(&self) -> AppResult<OrderId> {
    self
      .order_id
      .clone()
      .ok_or_else(|| AppError::Internal("order ID not set before an order operation".to_string()))
  }

  /// The result of a fully paid run. `None` until the pay step has succeeded.
  pub fn outcome(&self) -> Option<OrderOutcome> {
    Some(OrderOutcome {
      cart_id: self.cart_id.clone()?,
      item_id: self.item_id?,
      order_id: self.order_id.clone()?,
      payment_method: self.paid_with.clone()?,
      configured_labels: self.configured_labels.clone(),
      options: self.added_options.clone(),
    })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderOutcome {
  pub cart_id: CartId,
  pub item_id: ItemId,
  pub order_id: OrderId,
  pub payment_method: PaymentMethod,
  /// Configuration labels applied to the server item, in call order.
  pub configured_labels: Vec<String>,
  pub options: Vec<String>,
}
