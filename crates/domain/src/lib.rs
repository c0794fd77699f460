//! DNS Intercept Domain Layer
pub mod config;
pub mod errors;
pub mod intercept;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use intercept::{InterceptRule, INTERCEPT_TTL};
