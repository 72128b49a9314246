// baremetal_order/src/pipelines/order_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::OrderCtxData;
use crate::pipelines::order_steps;
use crate::profile::OrderProfile;
use order_flow::{ContextData, Pipeline, SkipCondition, Sleeper};
use std::sync::Arc;

pub const STEP_CREATE_CART: &str = "create_cart";
pub const STEP_ASSIGN_CART: &str = "assign_cart";
pub const STEP_ADD_SERVER_ITEM: &str = "add_server_item";
pub const STEP_CONFIGURE_ITEM: &str = "configure_item";
pub const STEP_ADD_OPTIONS: &str = "add_options";
pub const STEP_CHECKOUT: &str = "checkout";
pub const STEP_FETCH_PAYMENT_METHODS: &str = "fetch_payment_methods";
pub const STEP_PAY: &str = "pay";

/// Builds the eight-step order pipeline.
///
/// Only checkout is retried, and only on transport/API errors.
pub fn build_order_pipeline(profile: &OrderProfile, sleeper: Arc<dyn Sleeper>) -> Pipeline<OrderCtxData, AppError> {
  let no_options: SkipCondition<OrderCtxData> =
    Arc::new(|ctx_data: ContextData<OrderCtxData>| ctx_data.with(|d| d.profile.options.is_empty()));

  let mut p = Pipeline::<OrderCtxData, AppError>::new(&[
    (STEP_CREATE_CART, false, None),
    (STEP_ASSIGN_CART, false, None),
    (STEP_ADD_SERVER_ITEM, false, None),
    (STEP_CONFIGURE_ITEM, false, None),
    (STEP_ADD_OPTIONS, false, Some(no_options)),
    (STEP_CHECKOUT, false, None),
    (STEP_FETCH_PAYMENT_METHODS, false, None),
    (STEP_PAY, false, None),
  ]);

  p.on_root(STEP_CREATE_CART, order_steps::create_cart);
  p.on_root(STEP_ASSIGN_CART, order_steps::assign_cart);
  p.on_root(STEP_ADD_SERVER_ITEM, order_steps::add_server_item);
  p.on_root(STEP_CONFIGURE_ITEM, order_steps::configure_item);
  p.on_root(STEP_ADD_OPTIONS, order_steps::add_options);
  p.on_root(STEP_CHECKOUT, order_steps::checkout);
  p.on_root(STEP_FETCH_PAYMENT_METHODS, order_steps::fetch_payment_methods);
  p.on_root(STEP_PAY, order_steps::pay);

  p.set_retry_policy(STEP_CHECKOUT, profile.checkout_retry.policy(), AppError::is_transient);
  p.set_sleeper(sleeper);
  p
}
