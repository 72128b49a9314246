// baremetal_order/src/api/signing.rs

use sha1::{Digest, Sha1};

/// Computes the `X-Ovh-Signature` header value:
/// `"$1$" + hex(sha1(secret+consumer+METHOD+url+body+timestamp))`, fields joined by `+`.
pub fn signature(
  application_secret: &str,
  consumer_key: &str,
  method: &str,
  url: &str,
  body: &str,
  timestamp: i64,
) -> String {
  let mut hasher = Sha1::new();
  hasher.update(
    format!(
      "{}+{}+{}+{}+{}+{}",
      application_secret,
      consumer_key,
      method.to_uppercase(),
      url,
      body,
      timestamp
    )
    .as_bytes(),
  );
  format!("$1${}", hex::encode(hasher.finalize()))
}
