//! CLI surface tests: flag parsing for each subcommand.

use clap::Parser;
use trak::cli::{Cli, Commands, ConfigCommands, IssueCommands, LabelCommands};

#[test]
fn test_parse_issue_view() {
    let cli = Cli::try_parse_from(["trak", "issue", "view", "ENG-123"]).unwrap();
    match cli.command {
        Commands::Issue {
            command: IssueCommands::View { id, format },
        } => {
            assert_eq!(id, "ENG-123");
            assert_eq!(format, "text");
        }
        _ => panic!("expected issue view"),
    }
}

#[test]
fn test_parse_issue_bulk_update() {
    let cli = Cli::try_parse_from([
        "trak",
        "issue",
        "bulk-update",
        "--ids",
        "ENG-1,ENG-2",
        "--state",
        "Done",
        "--concurrency",
        "4",
        "--format",
        "json",
    ])
    .unwrap();
    match cli.command {
        Commands::Issue {
            command:
                IssueCommands::BulkUpdate {
                    ids,
                    state,
                    assignee,
                    priority,
                    concurrency,
                    format,
                },
        } => {
            assert_eq!(ids, "ENG-1,ENG-2");
            assert_eq!(state.as_deref(), Some("Done"));
            assert!(assignee.is_none());
            assert!(priority.is_none());
            assert_eq!(concurrency, Some(4));
            assert_eq!(format, "json");
        }
        _ => panic!("expected issue bulk-update"),
    }
}

#[test]
fn test_parse_label_bulk() {
    let cli = Cli::try_parse_from([
        "trak", "label", "bulk", "--ids", "ENG-1,ENG-2", "--add", "L1,L2", "--remove", "L3",
    ])
    .unwrap();
    match cli.command {
        Commands::Label {
            command: LabelCommands::Bulk {
                ids, add, remove, ..
            },
        } => {
            assert_eq!(ids, "ENG-1,ENG-2");
            assert_eq!(add.as_deref(), Some("L1,L2"));
            assert_eq!(remove.as_deref(), Some("L3"));
        }
        _ => panic!("expected label bulk"),
    }
}

#[test]
fn test_parse_config_set() {
    let cli = Cli::try_parse_from(["trak", "config", "set", "team", "ENG"]).unwrap();
    match cli.command {
        Commands::Config {
            command: ConfigCommands::Set { key, value },
        } => {
            assert_eq!(key, "team");
            assert_eq!(value, "ENG");
        }
        _ => panic!("expected config set"),
    }
}

#[test]
fn test_parse_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["trak", "teleport"]).is_err());
}

#[test]
fn test_parse_global_flags() {
    let cli = Cli::try_parse_from([
        "trak",
        "--verbose",
        "--log-format",
        "json",
        "config",
        "list",
    ])
    .unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.log_format.as_deref(), Some("json"));
}
