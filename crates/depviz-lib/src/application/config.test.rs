use super::*;

#[test]
fn test_config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.config_file, PathBuf::from("config.xml"));
    assert_eq!(config.log_level, 0);
    assert_eq!(config.net_timeout, 30);
    assert_eq!(config.net_retries, 3);
    assert_eq!(config.dot_command, "dot");
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(config.validate().is_ok());
}

#[test]
fn test_defaults_match_clap_defaults() {
    let parsed = AppConfig::try_parse_from(["depviz"]).unwrap();
    let defaults = AppConfig::default();

    // Environment may override these; only compare when unset
    if std::env::var_os("DEPVIZ_NET_TIMEOUT").is_none() {
        assert_eq!(parsed.net_timeout, defaults.net_timeout);
    }
    if std::env::var_os("DEPVIZ_LOG_FORMAT").is_none() {
        assert_eq!(parsed.log_format, defaults.log_format);
    }
}

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        net_retries: 0,
        dot_command: "/opt/graphviz/bin/dot".to_string(),
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.net_retries, 0);
    assert_eq!(merged.dot_command, "/opt/graphviz/bin/dot");
    assert_eq!(merged.net_timeout, 30);
}

#[test]
fn test_merge_keeps_base_when_other_is_default() {
    let base = AppConfig {
        net_timeout: 5,
        log_format: LogFormat::Json,
        ..AppConfig::default()
    };

    let merged = base.merge_with(AppConfig::default());
    assert_eq!(merged.net_timeout, 5);
    assert_eq!(merged.log_format, LogFormat::Json);
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let config = AppConfig {
        net_timeout: 0,
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_validate_rejects_out_of_range_log_level() {
    let config = AppConfig {
        log_level: 5,
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_registry_options_follow_config() {
    let config = AppConfig {
        net_timeout: 7,
        net_retries: 1,
        ..AppConfig::default()
    };

    let options = config.registry_options();
    assert_eq!(options.timeout, Duration::from_secs(7));
    assert_eq!(options.max_retries, 1);
}

#[test]
fn test_logger_config_follows_config() {
    let config = AppConfig {
        log_level: 3,
        log_format: LogFormat::Json,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let logger_config = config.to_logger_config();
    assert_eq!(logger_config.level, LogLevel::Debug);
    assert_eq!(logger_config.format, LogFormat::Json);
    assert!(!logger_config.color);
}
