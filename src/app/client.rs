use reqwest::Client;

use crate::error::{AppError, AppResult};

const USER_AGENT: &str = concat!("urlprobe/", env!("CARGO_PKG_VERSION"));

/// Builds the shared HTTP client for a run. No per-request timeout is set;
/// the run deadline is the only time limit.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialised.
pub fn build_client() -> AppResult<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(AppError::from)
}
