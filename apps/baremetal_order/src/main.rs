// baremetal_order/src/main.rs

use baremetal_order::api::OvhClient;
use baremetal_order::config::AppConfig;
use baremetal_order::run_order;
use chrono::Utc;
use order_flow::TokioSleeper;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))) // RUST_LOG override
    .init();

  let config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      eprintln!("error: {}", e);
      return ExitCode::from(2);
    }
  };

  let client = match OvhClient::new(config.credentials.clone(), config.http_timeout) {
    Ok(client) => client,
    Err(e) => {
      tracing::error!(error = %e, "Failed to create OVH client.");
      eprintln!("error: {}", e);
      return ExitCode::from(2);
    }
  };
  tracing::info!(base_url = client.base_url(), profile = %config.profile.name, "Starting bare-metal order.");

  match run_order(Arc::new(client), config.profile.clone(), Utc::now(), Arc::new(TokioSleeper)).await {
    Ok(outcome) => {
      println!(
        "Order {} has been successfully paid (cart {}, item {}, payment method {}).",
        outcome.order_id, outcome.cart_id, outcome.item_id, outcome.payment_method.id
      );
      ExitCode::SUCCESS
    }
    Err(e) => {
      tracing::error!(error = %e, "Order workflow failed.");
      eprintln!("error: {}", e);
      ExitCode::FAILURE
    }
  }
}
