use crate::equiv::Comparison;

/// Format a comparison result as JSON.
pub fn format_json(comparison: &Comparison<'_>) -> String {
    serde_json::to_string_pretty(comparison).unwrap_or_else(|_| "{}".to_string())
}
