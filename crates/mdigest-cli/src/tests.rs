use std::path::Path;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["mdigest-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_events_defaults() {
    let cli = Cli::try_parse_from(["mdigest-cli", "events"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Events {
            sources: None,
            dry_run: false
        })
    ));
}

#[test]
fn parses_events_with_sources_and_dry_run() {
    let cli = Cli::try_parse_from([
        "mdigest-cli",
        "events",
        "--sources",
        "config/sources.yaml",
        "--dry-run",
    ])
    .expect("expected valid cli args");
    match cli.command {
        Some(Commands::Events { sources, dry_run }) => {
            assert_eq!(sources.as_deref(), Some(Path::new("config/sources.yaml")));
            assert!(dry_run);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_check_sources() {
    let cli =
        Cli::try_parse_from(["mdigest-cli", "check-sources"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::CheckSources { sources: None })
    ));
}

#[test]
fn rejects_unknown_command() {
    assert!(Cli::try_parse_from(["mdigest-cli", "prices"]).is_err());
}
