use super::*;

macro_rules! test_enum_completeness {
    ($enum_type:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            for variant in <$enum_type>::value_variants() {
                let possible_value = variant
                    .to_possible_value()
                    .expect("PossibleValue should exist for all variants");

                let parsed: $enum_type = possible_value
                    .get_name()
                    .parse()
                    .expect("primary name should parse");
                assert_eq!(parsed, *variant, "Round-trip should preserve variant");
            }
        }
    };
}

test_enum_completeness!(LogFormat, test_log_format_completeness);
test_enum_completeness!(LogOutput, test_log_output_completeness);
test_enum_completeness!(ColorIntent, test_color_intent_completeness);

#[test]
fn test_log_format_aliases() {
    assert_eq!("txt".parse::<LogFormat>().unwrap(), LogFormat::Text);
    assert_eq!("plain".parse::<LogFormat>().unwrap(), LogFormat::Text);
    assert_eq!("yml".parse::<LogFormat>().unwrap(), LogFormat::Yaml);
    assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
}

#[test]
fn test_invalid_value_reports_reason() {
    let err = "purple".parse::<ColorIntent>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "purple");
            assert_eq!(reason, "invalid color intent");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_log_level_from_verbosity() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(200), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(1).as_filter(), "warn");
}

#[test]
fn test_forced_color_intents_ignore_terminal() {
    assert!(ColorIntent::Always.enabled());
    assert!(!ColorIntent::Never.enabled());
}
