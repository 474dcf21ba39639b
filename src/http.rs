use crate::config::Config;
use crate::error::SyncError;
use std::time::Duration;

const USER_AGENT: &str = concat!("crm-employee-sync/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by every call of one job run.
pub fn build_client(cfg: &Config) -> Result<reqwest::Client, SyncError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(10));
    if let Some(proxy_url) = cfg.proxy.as_ref() {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }
    Ok(builder.build()?)
}
