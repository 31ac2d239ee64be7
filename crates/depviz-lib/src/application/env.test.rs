use super::*;

fn env(
    no_color: Option<&str>,
    force_color: Option<&str>,
    clicolor: Option<&str>,
    ci: Option<&str>,
) -> EnvironmentConfig {
    EnvironmentConfig {
        no_color: no_color.map(String::from),
        force_color: force_color.map(String::from),
        clicolor: clicolor.map(String::from),
        ci: ci.map(String::from),
    }
}

#[test]
fn test_empty_environment_keeps_intent() {
    let env_config = EnvironmentConfig::default();
    assert_eq!(env_config.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
    assert_eq!(
        env_config.apply_color_config(ColorIntent::Always),
        ColorIntent::Always
    );
}

#[test]
fn test_no_color_environment_variable() {
    let color = env(Some("1"), None, None, None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Never);
}

#[test]
fn test_force_color_environment_variable() {
    let color = env(None, Some("1"), None, None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Always);
}

#[test]
fn test_clicolor_zero_disables_color() {
    let color = env(None, None, Some("0"), None).apply_color_config(ColorIntent::Always);
    assert_eq!(color, ColorIntent::Never);
}

#[test]
fn test_environment_variable_precedence() {
    // FORCE_COLOR wins over NO_COLOR and CLICOLOR
    let color = env(Some("1"), Some("1"), Some("0"), None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Always);
}

#[test]
fn test_ci_environment_variable() {
    let color = env(None, Some("1"), None, Some("true")).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let color = env(Some(""), None, None, None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}

#[test]
fn test_invalid_force_color_values_ignored() {
    let color = env(None, Some("invalid"), None, None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}
