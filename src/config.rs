use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://consumet3.vercel.app/manga/mangadex";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoints and client settings for one session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the catalog API.
    pub api_base: String,
    /// Base URL of the image passthrough route; covers and pages are
    /// rewritten through it because the origin hosts reject hotlinks.
    pub proxy_base: String,
    pub user_agent: String,
    /// Bound on every fetch, connection time included.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            proxy_base: proxy_base_for(DEFAULT_API_BASE),
            user_agent: concat!("tankobon/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Settings via env with defaults. The proxy base follows the API base
    /// unless overridden on its own.
    pub fn from_env() -> Self {
        let api_base = std::env::var("TANKOBON_API_BASE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let proxy_base = std::env::var("TANKOBON_PROXY_BASE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| proxy_base_for(&api_base));
        let timeout_secs = std::env::var("TANKOBON_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            api_base,
            proxy_base,
            user_agent: concat!("tankobon/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

fn proxy_base_for(api_base: &str) -> String {
    format!("{}/proxy", api_base.trim_end_matches('/'))
}
