use clap::{CommandFactory, Parser};
use schedbot::driver::Action;
use schedbot::tooling::cli::{Cli, CliContext};
use std::fs;
use tempfile::TempDir;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn parse_valid_invocations() {
    let cases: Vec<(Vec<&str>, Action)> = vec![
        (vec!["schedbot", "tweenies", "fetch"], Action::Fetch),
        (vec!["schedbot", "tweenies", "test"], Action::Test),
        (vec!["schedbot", "tweenies", "post", "--setup"], Action::Post),
        (vec!["schedbot", "abovebrum", "weather", "--log-format", "json"], Action::Weather),
        (
            vec!["schedbot", "--config", "/etc/schedbot.toml", "tweenies", "post", "--dry-run"],
            Action::Post,
        ),
    ];
    for (args, action) in cases {
        let cli = Cli::try_parse_from(&args).unwrap_or_else(|e| panic!("{:?}: {}", args, e));
        assert_eq!(cli.action, action);
    }
}

#[test]
fn missing_action_is_rejected() {
    assert!(Cli::try_parse_from(["schedbot", "tweenies"]).is_err());
}

#[test]
fn config_file_agents_are_runnable_from_the_cli() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("data");
    let config_path = temp.path().join("bots.toml");
    fs::write(
        &config_path,
        format!(
            r#"
            data_dir = "{}"

            [[platforms]]
            name = "dry"
            kind = "console"

            [agents.tweenies]
            kind = "broadcast"
            programme = "b006m9ry"
            "#,
            data_dir.display()
        ),
    )
    .unwrap();
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("tweenies-schedule"), "not json").unwrap();

    let context = CliContext::new(Some(&config_path), None).unwrap();
    let cli = Cli::try_parse_from(["schedbot", "tweenies", "test"]).unwrap();
    assert_eq!(context.execute(&cli).unwrap(), "No events.");

    let cli = Cli::try_parse_from(["schedbot", "tweenies", "weather"]).unwrap();
    assert!(context.execute(&cli).is_err());
}
