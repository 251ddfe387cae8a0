//! Config command round trips through RunContext with an isolated file.

use tempfile::TempDir;
use trak::cli::{Commands, ConfigCommands, RunContext};

fn set(key: &str, value: &str) -> Commands {
    Commands::Config {
        command: ConfigCommands::Set {
            key: key.to_string(),
            value: value.to_string(),
        },
    }
}

fn get(key: &str) -> Commands {
    Commands::Config {
        command: ConfigCommands::Get {
            key: key.to_string(),
        },
    }
}

#[test]
fn test_config_set_get_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let context = RunContext::new(Some(path.clone())).unwrap();
    context.execute(&set("team", "ENG")).unwrap();
    let output = context.execute(&get("team")).unwrap();
    assert_eq!(output, "ENG");

    // A fresh context reading the same file sees the persisted value
    let reloaded = RunContext::new(Some(path)).unwrap();
    assert_eq!(reloaded.config().api.team.as_deref(), Some("ENG"));
}

#[test]
fn test_config_get_unset_key() {
    let dir = TempDir::new().unwrap();
    let context = RunContext::new(Some(dir.path().join("config.toml"))).unwrap();
    let output = context.execute(&get("team")).unwrap();
    assert_eq!(output, "team is not set");
}

#[test]
fn test_config_list_masks_api_key() {
    let dir = TempDir::new().unwrap();
    let context = RunContext::new(Some(dir.path().join("config.toml"))).unwrap();
    context.execute(&set("api_key", "trak_live_0123456789")).unwrap();

    let output = context
        .execute(&Commands::Config {
            command: ConfigCommands::List,
        })
        .unwrap();
    assert!(output.contains("api_key = ****6789"));
    assert!(!output.contains("trak_live_0123456789"));
}

#[test]
fn test_config_unset_removes_value() {
    let dir = TempDir::new().unwrap();
    let context = RunContext::new(Some(dir.path().join("config.toml"))).unwrap();
    context.execute(&set("team", "ENG")).unwrap();

    let removed = context
        .execute(&Commands::Config {
            command: ConfigCommands::Unset {
                key: "team".to_string(),
            },
        })
        .unwrap();
    assert_eq!(removed, "Removed team.");

    let output = context.execute(&get("team")).unwrap();
    assert_eq!(output, "team is not set");
}

#[test]
fn test_config_write_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let context = RunContext::new(Some(dir.path().join("config.toml"))).unwrap();
    context.execute(&set("endpoint", "https://tracker.example/graphql")).unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["config.toml"]);
}
