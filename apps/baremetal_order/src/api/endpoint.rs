// baremetal_order/src/api/endpoint.rs

use super::ApiError;

const ALIASES: &[(&str, &str)] = &[
  ("ovh-eu", "https://eu.api.ovh.com/1.0"),
  ("ovh-ca", "https://ca.api.ovh.com/1.0"),
  ("ovh-us", "https://api.us.ovhcloud.com/1.0"),
  ("kimsufi-eu", "https://eu.api.kimsufi.com/1.0"),
  ("kimsufi-ca", "https://ca.api.kimsufi.com/1.0"),
  ("soyoustart-eu", "https://eu.api.soyoustart.com/1.0"),
  ("soyoustart-ca", "https://ca.api.soyoustart.com/1.0"),
];

/// Resolves `OVH_ENDPOINT` to a base URL without a trailing slash.
pub fn resolve(endpoint: &str) -> Result<String, ApiError> {
  let endpoint = endpoint.trim();
  if let Some((_, url)) = ALIASES.iter().find(|(alias, _)| alias.eq_ignore_ascii_case(endpoint)) {
    return Ok((*url).to_string());
  }
  if endpoint.starts_with("https://") || endpoint.starts_with("http://") {
    return Ok(endpoint.trim_end_matches('/').to_string());
  }
  Err(ApiError::InvalidEndpoint(endpoint.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn aliases_resolve_to_their_base_url() {
    assert_eq!(resolve("ovh-us").unwrap(), "https://api.us.ovhcloud.com/1.0");
    assert_eq!(resolve(" OVH-EU ").unwrap(), "https://eu.api.ovh.com/1.0");
  }

  #[test]
  fn explicit_urls_lose_their_trailing_slash() {
    assert_eq!(resolve("https://example.test/1.0/").unwrap(), "https://example.test/1.0");
  }

  #[test]
  fn unknown_alias_is_rejected() {
    assert!(matches!(resolve("ovh-mars"), Err(ApiError::InvalidEndpoint(_))));
  }
}
