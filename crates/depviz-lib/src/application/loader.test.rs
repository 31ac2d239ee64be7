use super::*;
use crate::primitives::ColorIntent;

#[test]
fn test_resolve_applies_cli_values() {
    let cli = AppConfig {
        net_timeout: 10,
        log_level: 2,
        ..AppConfig::default()
    };

    let config = AppConfig::resolve(cli, &EnvironmentConfig::default()).unwrap();
    assert_eq!(config.net_timeout, 10);
    assert_eq!(config.log_level, 2);
    assert_eq!(config.net_retries, 3);
}

#[test]
fn test_resolve_applies_color_environment_last() {
    let cli = AppConfig {
        color: ColorIntent::Always,
        ..AppConfig::default()
    };
    let env_config = EnvironmentConfig {
        ci: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let config = AppConfig::resolve(cli, &env_config).unwrap();
    assert_eq!(config.color, ColorIntent::Never);
}

#[test]
fn test_resolve_validates() {
    let cli = AppConfig {
        log_level: 9,
        ..AppConfig::default()
    };

    let err = AppConfig::resolve(cli, &EnvironmentConfig::default()).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}
