use super::*;

#[test]
fn test_default_filter_scopes_http_crates() {
    let filter = default_filter(LogLevel::Debug);
    assert!(filter.starts_with("depviz=debug,depviz_lib=debug"));
    assert!(filter.contains("reqwest=warn"));
    assert!(filter.ends_with(",debug"));
}

#[test]
fn test_logger_initializes_once() {
    // Only test in this binary that installs the global subscriber
    let config = LoggerConfig {
        level: LogLevel::Warning,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        color: false,
    };

    assert!(Logger::init(config.clone()).is_ok());
    assert!(matches!(
        Logger::init(config),
        Err(LoggerError::AlreadyInitialized)
    ));
}
