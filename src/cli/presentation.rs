//! Presentation: result formatters for issue, batch, and config output.

mod batch;
mod config;
mod issue;

pub use self::batch::{format_label_summary, format_update_summary};
pub use self::config::{format_config_entries, format_config_value, mask_secret};
pub use self::issue::{format_issue, format_label_outcome};
