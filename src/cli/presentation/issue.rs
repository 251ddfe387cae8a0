//! Single-issue and single-label-outcome rendering.

use crate::api::IssueView;
use crate::error::ApiError;
use crate::ops::LabelOutcome;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::UnknownFailure(format!("Failed to serialize output: {}", e)))
}

pub fn format_issue(issue: &IssueView, format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(issue);
    }
    let mut s = format!("{}  {}", issue.key, issue.title);
    s.push_str(&format!("\n  ID:       {}", issue.id));
    s.push_str(&format!(
        "\n  State:    {}",
        issue.state.as_deref().unwrap_or("-")
    ));
    s.push_str(&format!(
        "\n  Assignee: {}",
        issue.assignee.as_deref().unwrap_or("-")
    ));
    s.push_str(&format!(
        "\n  Priority: {}",
        issue
            .priority
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    if issue.labels.is_empty() {
        s.push_str("\n  Labels:   -");
    } else {
        let labels: Vec<&str> = issue.labels.iter().map(String::as_str).collect();
        s.push_str(&format!("\n  Labels:   {}", labels.join(", ")));
    }
    if let Some(updated_at) = issue.updated_at {
        s.push_str(&format!("\n  Updated:  {}", updated_at.to_rfc3339()));
    }
    Ok(s)
}

pub fn format_label_outcome(
    token: &str,
    outcome: &LabelOutcome,
    format: &str,
) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(outcome);
    }
    if outcome.added.is_empty() && outcome.removed.is_empty() {
        return Ok(format!("{}: labels already up to date", token));
    }
    let mut s = format!("{}:", token);
    if !outcome.added.is_empty() {
        let added: Vec<&str> = outcome.added.iter().map(String::as_str).collect();
        s.push_str(&format!("\n  Added:   {}", added.join(", ")));
    }
    if !outcome.removed.is_empty() {
        let removed: Vec<&str> = outcome.removed.iter().map(String::as_str).collect();
        s.push_str(&format!("\n  Removed: {}", removed.join(", ")));
    }
    let labels: Vec<&str> = outcome.labels.iter().map(String::as_str).collect();
    s.push_str(&format!(
        "\n  Labels:  {}",
        if labels.is_empty() {
            "-".to_string()
        } else {
            labels.join(", ")
        }
    ));
    Ok(s)
}
