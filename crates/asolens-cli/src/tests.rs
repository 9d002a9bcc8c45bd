use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["asolens"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_analyze_with_defaults() {
    let cli = Cli::try_parse_from(["asolens", "analyze", "310633997"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            ref app_id,
            ai_provider: None,
            json: false,
        }) if app_id == "310633997"
    ));
}

#[test]
fn parses_analyze_with_short_provider_flag() {
    let cli = Cli::try_parse_from(["asolens", "analyze", "123", "-p", "claude", "--json"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            ai_provider: Some(ref p),
            json: true,
            ..
        }) if p == "claude"
    ));
}

#[test]
fn analyze_accepts_negative_id_for_validation_downstream() {
    let cli = Cli::try_parse_from(["asolens", "analyze", "-5"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze { ref app_id, .. }) if app_id == "-5"
    ));
}

#[test]
fn analyze_requires_app_id() {
    assert!(Cli::try_parse_from(["asolens", "analyze"]).is_err());
}

#[test]
fn parses_keywords_with_top() {
    let cli = Cli::try_parse_from([
        "asolens",
        "keywords",
        "video call",
        "group chat",
        "--top",
        "3",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Keywords {
            ref keywords,
            top: 3,
            json: false,
        }) if keywords.len() == 2 && keywords[0] == "video call"
    ));
}

#[test]
fn keywords_top_defaults_to_ten() {
    let cli = Cli::try_parse_from(["asolens", "keywords", "chat"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Keywords { top: 10, .. })
    ));
}

#[test]
fn keywords_requires_at_least_one() {
    assert!(Cli::try_parse_from(["asolens", "keywords"]).is_err());
}

#[test]
fn parses_providers_and_config() {
    let cli = Cli::try_parse_from(["asolens", "providers", "--json"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Providers { json: true })));

    let cli = Cli::try_parse_from(["asolens", "config"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Config)));
}
