//! Integration tests for the Trak CLI client

mod cli_parse;
mod config_commands;
mod issue_ops;
mod resolution;
mod test_utils;
