//! Config command rendering. Secrets are masked on the way out.

/// Mask all but the last four characters of a secret value.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "********".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

pub fn format_config_value(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) if key == "api_key" => mask_secret(value),
        Some(value) => value.to_string(),
        None => format!("{} is not set", key),
    }
}

pub fn format_config_entries(entries: &[(String, String)]) -> String {
    if entries.is_empty() {
        return "No stored configuration.".to_string();
    }
    let mut lines = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let shown = if key == "api_key" {
            mask_secret(value)
        } else {
            value.clone()
        };
        lines.push(format!("{} = {}", key, shown));
    }
    lines.join("\n")
}
