// baremetal_order/src/pipelines/mod.rs

//! The bare-metal order workflow, expressed as an `order_flow` pipeline.

pub mod contexts;
pub mod order_pipeline;
pub mod order_steps;

use crate::api::ApiClient;
use crate::errors::{AppError, Result as AppResult};
use crate::profile::OrderProfile;
use chrono::{DateTime, Utc};
use order_flow::{ContextData, PipelineResult, Sleeper};
use std::sync::Arc;
use tracing::{info, instrument};

pub use contexts::{OrderCtxData, OrderOutcome};
pub use order_pipeline::build_order_pipeline;

/// Runs one complete order: cart creation through payment.
///
/// Returns the identifiers of the paid order, or the first error that ended the run.
#[instrument(name = "run_order", skip_all, fields(profile = %profile.name), err(Display))]
pub async fn run_order(
  client: Arc<dyn ApiClient>,
  profile: Arc<OrderProfile>,
  started_at: DateTime<Utc>,
  sleeper: Arc<dyn Sleeper>,
) -> AppResult<OrderOutcome> {
  let pipeline = build_order_pipeline(&profile, sleeper);
  let ctx_data = ContextData::new(OrderCtxData::new(client, profile, started_at));

  match pipeline.run(ctx_data.clone()).await? {
    PipelineResult::Completed => {}
    PipelineResult::Stopped { step } => {
      return Err(AppError::Internal(format!("Order pipeline stopped early at step '{}'", step)));
    }
  }

  let outcome = ctx_data
    .with(OrderCtxData::outcome)
    .ok_or_else(|| AppError::Internal("Order pipeline completed without a paid order".to_string()))?;
  info!(order_id = %outcome.order_id, "Order has been successfully paid.");
  Ok(outcome)
}
