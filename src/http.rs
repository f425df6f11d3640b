use std::time::Duration;

use reqwest::Client;

pub const USER_AGENT: &str = concat!("hookfeed/", env!("CARGO_PKG_VERSION"));

/// Shared client for feed fetches and webhook posts. Every request is bound
/// by `timeout`.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}
