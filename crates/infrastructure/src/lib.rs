//! DNS Intercept Infrastructure Layer
pub mod dns;
