//! Batch summary rendering: headline counts plus a per-item table.

use crate::api::IssueView;
use crate::batch::{BatchItemResult, BatchSummary};
use crate::error::ApiError;
use crate::ops::LabelOutcome;
use comfy_table::Table;
use owo_colors::OwoColorize;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::UnknownFailure(format!("Failed to serialize output: {}", e)))
}

fn headline<T>(summary: &BatchSummary<T>) -> String {
    let succeeded = format!("{} succeeded", summary.success_count);
    let failed = format!("{} failed", summary.failed_count);
    format!(
        "{} issues: {}, {}",
        summary.total_requested,
        if summary.success_count > 0 {
            succeeded.green().to_string()
        } else {
            succeeded
        },
        if summary.failed_count > 0 {
            failed.red().to_string()
        } else {
            failed
        },
    )
}

fn status_cell<T>(result: &BatchItemResult<T>) -> &'static str {
    if result.success {
        "ok"
    } else {
        "failed"
    }
}

pub fn format_update_summary(
    summary: &BatchSummary<IssueView>,
    format: &str,
) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(summary);
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Issue", "Status", "State", "Assignee", "Details"]);
    for result in &summary.results {
        let (state, assignee) = match &result.payload {
            Some(issue) => (
                issue.state.clone().unwrap_or_else(|| "-".to_string()),
                issue.assignee.clone().unwrap_or_else(|| "-".to_string()),
            ),
            None => ("-".to_string(), "-".to_string()),
        };
        let details = result.error.clone().unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            result.identifier.clone(),
            status_cell(result).to_string(),
            state,
            assignee,
            details,
        ]);
    }

    Ok(format!("{}\n{}", headline(summary), table))
}

pub fn format_label_summary(
    summary: &BatchSummary<LabelOutcome>,
    format: &str,
) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(summary);
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Issue", "Status", "Added", "Removed", "Details"]);
    for result in &summary.results {
        let (added, removed) = match &result.payload {
            Some(outcome) => (join_or_dash(&outcome.added), join_or_dash(&outcome.removed)),
            None => ("-".to_string(), "-".to_string()),
        };
        let details = result.error.clone().unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            result.identifier.clone(),
            status_cell(result).to_string(),
            added,
            removed,
            details,
        ]);
    }

    Ok(format!("{}\n{}", headline(summary), table))
}

fn join_or_dash(labels: &std::collections::BTreeSet<String>) -> String {
    if labels.is_empty() {
        "-".to_string()
    } else {
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
        labels.join(", ")
    }
}
