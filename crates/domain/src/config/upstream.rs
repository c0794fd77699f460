use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Resolver that receives every query outside the intercept domain.
    #[serde(default = "default_upstream_address")]
    pub address: String,

    /// Per-exchange timeout, applied to both send and receive.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: default_upstream_address(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_upstream_address() -> String {
    "1.1.1.1:53".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}
