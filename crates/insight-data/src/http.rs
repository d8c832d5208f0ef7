//! Shared HTTP client setup.

use insight_core::error::DataError;
use reqwest::{Client, Response};
use std::time::Duration;

const USER_AGENT: &str = concat!("crypto-insight/", env!("CARGO_PKG_VERSION"));

/// Build a client with the per-provider timeout.
pub(crate) fn build_client(provider: &str, timeout: Duration) -> Result<Client, DataError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| DataError::upstream(provider, e))
}

/// Turn a non-success response into [`DataError::Status`].
pub(crate) fn ensure_success(provider: &str, resp: Response) -> Result<Response, DataError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(DataError::Status {
            provider: provider.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(resp)
}

pub(crate) fn trim_base(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}
