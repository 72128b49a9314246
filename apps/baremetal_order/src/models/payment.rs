// baremetal_order/src/models/payment.rs

use super::ids::PaymentMethodId;
use serde::{Deserialize, Serialize};

/// One entry of `GET /me/order/{orderId}/availablePaymentMethod`.
/// Other fields of the entry are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
  pub id: PaymentMethodId,
  #[serde(rename = "type")]
  pub kind: String,
}

/// Body of `POST /me/order/{orderId}/pay`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRequest {
  pub payment_method: PaymentMethod,
}
