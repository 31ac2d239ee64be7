use super::*;

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn test_parses_graph_output_override() {
    let cli = Cli::try_parse_from(["depviz", "graph", "--output", "deps.png"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Graph {
            output: Some(PathBuf::from("deps.png"))
        })
    );
}

#[test]
fn test_parses_global_flags_before_command() {
    let cli = Cli::try_parse_from([
        "depviz",
        "-f",
        "settings.xml",
        "--net-retries",
        "0",
        "--dot-command",
        "mydot",
        "order",
    ])
    .unwrap();

    assert_eq!(cli.config.config_file, PathBuf::from("settings.xml"));
    assert_eq!(cli.config.net_retries, 0);
    assert_eq!(cli.config.dot_command, "mydot");
    assert_eq!(cli.command, Some(Commands::Order));
}

#[test]
fn test_command_is_optional() {
    let cli = Cli::try_parse_from(["depviz"]).unwrap();
    assert_eq!(cli.command, None);
}

#[test]
fn test_rejects_unknown_color_intent() {
    assert!(Cli::try_parse_from(["depviz", "--color", "sometimes", "deps"]).is_err());
}
