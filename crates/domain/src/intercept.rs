use crate::DomainError;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

/// TTL (seconds) of every synthesized answer.
pub const INTERCEPT_TTL: u32 = 3600;

/// Names ending in `domain` are answered locally with `local_address`.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptRule {
    local_address: IpAddr,
    domain: Arc<str>,
}

impl InterceptRule {
    pub fn new(local_address: &str, domain: &str) -> Result<Self, DomainError> {
        let local_address = local_address.trim();
        if local_address.is_empty() {
            return Err(DomainError::InvalidIpAddress(
                "local address is required".to_string(),
            ));
        }

        let local_address: IpAddr = local_address
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(local_address.to_string()))?;

        let domain = domain.trim();
        let domain = domain.strip_suffix('.').unwrap_or(domain);
        if domain.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "intercept domain is required".to_string(),
            ));
        }

        Ok(Self {
            local_address: local_address.to_canonical(),
            domain: Arc::from(domain.to_ascii_lowercase()),
        })
    }

    pub fn local_address(&self) -> IpAddr {
        self.local_address
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Plain case-insensitive suffix test, no label-boundary handling.
    pub fn matches(&self, name: &str) -> bool {
        name.to_ascii_lowercase().ends_with(&*self.domain)
    }

    /// Address used for synthesized A answers. `None` for a native IPv6 address.
    pub fn a_record_address(&self) -> Option<Ipv4Addr> {
        match self.local_address {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        }
    }
}
