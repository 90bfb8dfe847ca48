//! Upstream endpoint and client-impersonation constants.

pub const DEFAULT_BASE_URL: &str = "https://api.tricount.bunq.com";

/// The Tricount backend only serves requests that identify themselves as a
/// known mobile client build. These values are a compatibility requirement of
/// the upstream service, not a tunable.
pub const COMPAT_USER_AGENT: &str = "com.bunq.tricount.android:RELEASE:7.0.7:3174:ANDROID:13:C";

pub const DEFAULT_DEVICE_DESCRIPTION: &str = "Rust";

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub user_agent: String,
    pub device_description: String,
}

impl UpstreamConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            user_agent: COMPAT_USER_AGENT.to_string(),
            device_description: DEFAULT_DEVICE_DESCRIPTION.to_string(),
        }
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}
