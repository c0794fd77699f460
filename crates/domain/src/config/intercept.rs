use serde::{Deserialize, Serialize};

/// Raw intercept settings as read from file or command line.
///
/// Turned into an [`InterceptRule`](crate::InterceptRule) by
/// [`Config::intercept_rule`](crate::Config::intercept_rule).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InterceptConfig {
    #[serde(default)]
    pub local_address: Option<String>,

    #[serde(default)]
    pub domain: Option<String>,
}
