use dns_intercept_domain::config::{ConfigError, UpstreamConfig};
use dns_intercept_domain::{CliOverrides, Config};

fn overrides(local: &str, domain: &str) -> CliOverrides {
    CliOverrides {
        local_address: Some(local.to_string()),
        intercept_domain: Some(domain.to_string()),
        ..CliOverrides::default()
    }
}

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.server.dns_port, 53);
    assert_eq!(config.upstream.address, "1.1.1.1:53");
    assert_eq!(config.upstream.timeout_ms, 2000);
    assert_eq!(config.logging.level, "info");
    assert!(config.intercept.local_address.is_none());
    assert!(config.intercept.domain.is_none());
}

#[test]
fn test_config_deserialization_with_all_fields() {
    let config = Config::from_toml(
        r#"
        [server]
        bind_address = "127.0.0.1"
        dns_port = 5353

        [upstream]
        address = "9.9.9.9:53"
        timeout_ms = 750

        [intercept]
        local_address = "10.0.0.5"
        domain = "test.local"

        [logging]
        level = "debug"
    "#,
    )
    .unwrap();

    assert_eq!(config.server.listen_address(), "127.0.0.1:5353");
    assert_eq!(config.upstream.address, "9.9.9.9:53");
    assert_eq!(config.upstream.timeout_ms, 750);
    assert_eq!(config.logging.level, "debug");
    assert!(config.validate().is_ok());

    let rule = config.intercept_rule().unwrap();
    assert_eq!(rule.domain(), "test.local");
}

#[test]
fn test_config_partial_file_keeps_defaults() {
    let config = Config::from_toml(
        r#"
        [upstream]
        address = "8.8.8.8:53"
    "#,
    )
    .unwrap();

    assert_eq!(config.server.dns_port, 53);
    assert_eq!(config.upstream.timeout_ms, UpstreamConfig::default().timeout_ms);
}

#[test]
fn test_config_invalid_toml_is_parse_error() {
    let result = Config::from_toml("[server\ndns_port = ");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_load_missing_file_is_read_error() {
    let result = Config::load(
        Some("/nonexistent/dns-intercept.toml"),
        CliOverrides::default(),
    );
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}

#[test]
fn test_cli_overrides_win_over_file_values() {
    let mut config = Config::from_toml(
        r#"
        [intercept]
        local_address = "192.168.1.1"
        domain = "old.lan"
    "#,
    )
    .unwrap();

    config.apply_cli_overrides(CliOverrides {
        dns_port: Some(1053),
        upstream: Some("9.9.9.9:53".to_string()),
        ..overrides("10.0.0.5", "test.local")
    });

    assert_eq!(config.server.dns_port, 1053);
    assert_eq!(config.upstream.address, "9.9.9.9:53");
    let rule = config.intercept_rule().unwrap();
    assert_eq!(rule.domain(), "test.local");
    assert_eq!(rule.local_address().to_string(), "10.0.0.5");
}

#[test]
fn test_validate_requires_intercept_settings() {
    let config = Config::default();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Local IP is required"), "{}", err);
}

#[test]
fn test_validate_rejects_invalid_local_ip() {
    let mut config = Config::default();
    config.apply_cli_overrides(overrides("not-an-ip", "test.local"));
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_rejects_zero_port_and_bad_upstream() {
    let mut config = Config::default();
    config.apply_cli_overrides(CliOverrides {
        dns_port: Some(0),
        ..overrides("10.0.0.5", "test.local")
    });
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.apply_cli_overrides(CliOverrides {
        upstream: Some("1.1.1.1".to_string()),
        ..overrides("10.0.0.5", "test.local")
    });
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Invalid upstream address"), "{}", err);
}

#[test]
fn test_ipv6_bind_address_is_bracketed() {
    let mut config = Config::default();
    config.apply_cli_overrides(CliOverrides {
        bind_address: Some("::".to_string()),
        ..overrides("10.0.0.5", "test.local")
    });
    assert_eq!(config.server.listen_address(), "[::]:53");
    assert!(config.validate().is_ok());
}
