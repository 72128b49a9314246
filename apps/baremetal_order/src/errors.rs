// baremetal_order/src/errors.rs

use crate::api::ApiError;
use crate::models::OrderId;
use order_flow::FlowError;
use std::fmt;
use thiserror::Error;

/// The workflow step a failure is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStep {
  CreateCart,
  AssignCart,
  AddServerItem,
  ConfigureItem { label: String },
  AddOption { plan_code: String },
  Checkout,
  FetchPaymentMethods,
  Pay,
}

impl fmt::Display for OrderStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      OrderStep::CreateCart => f.write_str("create cart"),
      OrderStep::AssignCart => f.write_str("assign cart"),
      OrderStep::AddServerItem => f.write_str("add server item"),
      OrderStep::ConfigureItem { label } => write!(f, "configure item (label '{}')", label),
      OrderStep::AddOption { plan_code } => write!(f, "add option (planCode '{}')", plan_code),
      OrderStep::Checkout => f.write_str("checkout"),
      OrderStep::FetchPaymentMethods => f.write_str("fetch payment methods"),
      OrderStep::Pay => f.write_str("pay order"),
    }
  }
}

#[derive(Debug, Error)]
pub enum AppError {
  /// The remote call failed or was rejected by the API.
  #[error("{step}: {source}")]
  Api {
    step: OrderStep,
    #[source]
    source: ApiError,
  },

  /// The API answered, but a field was missing or not of the expected type.
  #[error("{step}: unexpected response: {message}")]
  DataShape { step: OrderStep, message: String },

  #[error("fetch payment methods: no available payment methods for order {order_id}")]
  NoPaymentMethods { order_id: OrderId },

  #[error("{step}: failed after {attempts} attempts")]
  RetriesExhausted { step: String, attempts: u32 },

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[source]
    source: FlowError,
  },

  #[error("Internal Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Builds the error-mapping closure for a failed remote call of `step`.
  pub fn api(step: OrderStep) -> impl FnOnce(ApiError) -> AppError {
    move |source| AppError::Api { step, source }
  }

  /// Only transport/API failures are worth retrying; a malformed response is not.
  pub fn is_transient(&self) -> bool {
    matches!(self, AppError::Api { .. })
  }

  pub fn step(&self) -> Option<&OrderStep> {
    match self {
      AppError::Api { step, .. } | AppError::DataShape { step, .. } => Some(step),
      _ => None,
    }
  }
}

impl From<FlowError> for AppError {
  fn from(err: FlowError) -> Self {
    match err {
      FlowError::RetriesExhausted { step_name, attempts } => AppError::RetriesExhausted {
        step: step_name,
        attempts,
      },
      other => AppError::Workflow { source: other },
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
