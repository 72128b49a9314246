// baremetal_order/src/pipelines/order_steps.rs

//! One handler per order step.
//!
//! Each handler reads what it needs out of the context, drops the guard, makes its
//! remote call and only then writes the result back. Checkout may run more than
//! once, so nothing is written before a call has succeeded.

use crate::errors::{AppError, OrderStep, Result as AppResult};
use crate::models::{
  AddItemRequest, AddOptionRequest, AddedItem, CheckedOutOrder, CreateCartRequest, CreatedCart, PayRequest,
  PaymentMethod,
};
use crate::pipelines::contexts::OrderCtxData;
use chrono::{DateTime, Months, SecondsFormat, Utc};
use order_flow::{ContextData, PipelineControl};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Decodes a response body, turning a missing or mistyped field into a data-shape error.
pub fn decode<T: DeserializeOwned>(step: OrderStep, body: Value) -> AppResult<T> {
  serde_json::from_value(body).map_err(|e| AppError::DataShape {
    step,
    message: e.to_string(),
  })
}

fn encode<T: Serialize>(body: &T) -> AppResult<Value> {
  serde_json::to_value(body).map_err(|e| AppError::Internal(format!("Cannot encode request body: {}", e)))
}

/// `now` plus one calendar month, RFC 3339 with second precision.
/// Month-end dates are clamped (Jan 31 expires Feb 28/29).
pub fn cart_expiry(now: DateTime<Utc>) -> AppResult<String> {
  now
    .checked_add_months(Months::new(1))
    .map(|expire| expire.to_rfc3339_opts(SecondsFormat::Secs, true))
    .ok_or_else(|| AppError::Internal(format!("Cannot compute cart expiry from {}", now)))
}

/// The workflow always pays with the first method the API offers.
pub fn select_payment_method(methods: &[PaymentMethod]) -> Option<&PaymentMethod> {
  methods.first()
}

#[instrument(name = "order_step::create_cart", skip_all, err(Display))]
pub async fn create_cart(ctx_data: ContextData<OrderCtxData>) -> AppResult<PipelineControl> {
  let (client, request) = {
    let guard = ctx_data.read();
    let request = CreateCartRequest {
      ovh_subsidiary: guard.profile.subsidiary.clone(),
      description: guard.profile.description.clone(),
      expire: cart_expiry(guard.started_at)?,
    };
    (guard.client.clone(), request)
  };
  debug!(expire = %request.expire, "Creating cart.");

  let body = client
    .post("/order/cart", Some(encode(&request)?))
    .await
    .map_err(AppError::api(OrderStep::CreateCart))?;
  let cart: CreatedCart = decode(OrderStep::CreateCart, body)?;

  info!("Created Cart with ID: {}", cart.cart_id);
  ctx_data.write().cart_id = Some(cart.cart_id);
  Ok(PipelineControl::Continue)
}

#[instrument(name = "order_step::assign_cart", skip_all, err(Display))]
pub async fn assign_cart(ctx_data: ContextData<OrderCtxData>) -> AppResult<PipelineControl> {
  let (client, cart_id) = {
    let guard = ctx_data.read();
    (guard.client.clone(), guard.require_cart_id()?)
  };

  client
    .post(&format!("/order/cart/{}/assign", cart_id), None)
    .await
    .map_err(AppError::api(OrderStep::AssignCart))?;

  info!("Assigned cart {} to the logged-in account.", cart_id);
  Ok(PipelineControl::Continue)
}

#[instrument(name = "order_step::add_server_item", skip_all, err(Display))]
pub async fn add_server_item(ctx_data: ContextData<OrderCtxData>) -> AppResult<PipelineControl> {
  let (client, cart_id, request) = {
    let guard = ctx_data.read();
    let server = &guard.profile.server;
    let request = AddItemRequest {
      duration: server.duration.clone(),
      plan_code: server.plan_code.clone(),
      pricing_mode: server.pricing_mode.clone(),
      quantity: server.quantity,
    };
    (guard.client.clone(), guard.require_cart_id()?, request)
  };

  let body = client
    .post(
      &format!("/order/cart/{}/baremetalServers", cart_id),
      Some(encode(&request)?),
    )
    .await
    .map_err(AppError::api(OrderStep::AddServerItem))?;
  let item: AddedItem = decode(OrderStep::AddServerItem, body)?;

  info!("Added Server {} to Cart with Item ID: {}", request.plan_code, item.item_id);
  ctx_data.write().item_id = Some(item.item_id);
  Ok(PipelineControl::Continue)
}

#[instrument(name = "order_step::configure_item", skip_all, err(Display))]
pub async fn configure_item(ctx_data: ContextData<OrderCtxData>) -> AppResult<PipelineControl> {
  let (client, cart_id, item_id, entries) = {
    let guard = ctx_data.read();
    (
      guard.client.clone(),
      guard.require_cart_id()?,
      guard.require_item_id()?,
      guard.profile.configuration.clone(),
    )
  };
  let path = format!("/order/cart/{}/item/{}/configuration", cart_id, item_id);

  for entry in entries {
    client
      .post(&path, Some(encode(&entry)?))
      .await
      .map_err(AppError::api(OrderStep::ConfigureItem {
        label: entry.label.clone(),
      }))?;
    info!("Configured {} with value {}", entry.label, entry.value);
    ctx_data.write().configured_labels.push(entry.label);
  }
  Ok(PipelineControl::Continue)
}

#[instrument(name = "order_step::add_options", skip_all, err(Display))]
pub async fn add_options(ctx_data: ContextData<OrderCtxData>) -> AppResult<PipelineControl> {
  let (client, cart_id, item_id, server, options) = {
    let guard = ctx_data.read();
    (
      guard.client.clone(),
      guard.require_cart_id()?,
      guard.require_item_id()?,
      guard.profile.server.clone(),
      guard.profile.options.clone(),
    )
  };
  let path = format!("/order/cart/{}/baremetalServers/options", cart_id);

  for plan_code in options {
    let request = AddOptionRequest {
      duration: server.duration.clone(),
      item_id,
      plan_code: plan_code.clone(),
      pricing_mode: server.pricing_mode.clone(),
      quantity: server.quantity,
    };
    client
      .post(&path, Some(encode(&request)?))
      .await
      .map_err(AppError::api(OrderStep::AddOption {
        plan_code: plan_code.clone(),
      }))?;
    info!("Added option with planCode {}", plan_code);
    ctx_data.write().added_options.push(plan_code);
  }
  Ok(PipelineControl::Continue)
}

#[instrument(name = "order_step::checkout", skip_all, err(Display))]
pub async fn checkout(ctx_data: ContextData<OrderCtxData>) -> AppResult<PipelineControl> {
  let (client, cart_id) = {
    let guard = ctx_data.read();
    (guard.client.clone(), guard.require_cart_id()?)
  };

  let body = client
    .post(&format!("/order/cart/{}/checkout", cart_id), None)
    .await
    .map_err(AppError::api(OrderStep::Checkout))?;
  let order: CheckedOutOrder = decode(OrderStep::Checkout, body)?;

  info!("Order validated. Order ID: {}", order.order_id);
  ctx_data.write().order_id = Some(order.order_id);
  Ok(PipelineControl::Continue)
}

#[instrument(name = "order_step::fetch_payment_methods", skip_all, err(Display))]
pub async fn fetch_payment_methods(ctx_data: ContextData<OrderCtxData>) -> AppResult<PipelineControl> {
  let (client, order_id) = {
    let guard = ctx_data.read();
    (guard.client.clone(), guard.require_order_id()?)
  };

  let body = client
    .get(&format!("/me/order/{}/availablePaymentMethod", order_id))
    .await
    .map_err(AppError::api(OrderStep::FetchPaymentMethods))?;
  let methods: Vec<PaymentMethod> = decode(OrderStep::FetchPaymentMethods, body)?;

  if methods.is_empty() {
    return Err(AppError::NoPaymentMethods { order_id });
  }
  info!(count = methods.len(), "Available Payment Methods: {:?}", methods);
  ctx_data.write().payment_methods = methods;
  Ok(PipelineControl::Continue)
}

#[instrument(name = "order_step::pay", skip_all, err(Display))]
pub async fn pay(ctx_data: ContextData<OrderCtxData>) -> AppResult<PipelineControl> {
  let (client, order_id, method) = {
    let guard = ctx_data.read();
    let order_id = guard.require_order_id()?;
    let method = select_payment_method(&guard.payment_methods)
      .cloned()
      .ok_or_else(|| AppError::NoPaymentMethods {
        order_id: order_id.clone(),
      })?;
    (guard.client.clone(), order_id, method)
  };
  let request = PayRequest {
    payment_method: method.clone(),
  };

  client
    .post(&format!("/me/order/{}/pay", order_id), Some(encode(&request)?))
    .await
    .map_err(AppError::api(OrderStep::Pay))?;

  info!(payment_method = %method.id, kind = %method.kind, "Order {} has been successfully paid.", order_id);
  ctx_data.write().paid_with = Some(method);
  Ok(PipelineControl::Continue)
}
