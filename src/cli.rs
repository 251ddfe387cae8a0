//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to issue operations.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands, IssueCommands, LabelCommands};
pub use presentation::{
    format_config_entries, format_config_value, format_issue, format_label_outcome,
    format_label_summary, format_update_summary, mask_secret,
};
pub use route::RunContext;
