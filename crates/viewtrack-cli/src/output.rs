//! Output formatting utilities.

use serde_json::Value;
use viewtrack_core::{Event, VerificationVerdict};

/// Formats a JSON value for display.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Short label for a verdict.
pub fn verdict_label(verdict: &VerificationVerdict) -> String {
    match verdict {
        VerificationVerdict::Ok => "ok".to_string(),
        VerificationVerdict::NotTokenized => "not-tokenized".to_string(),
        VerificationVerdict::Missing => "missing".to_string(),
        VerificationVerdict::Unexpected => "unexpected".to_string(),
        VerificationVerdict::Mismatch { expected, actual } => {
            format!("mismatch (expected {}, found {})", expected, actual)
        }
        VerificationVerdict::Invalid(reason) => format!("invalid ({})", reason),
    }
}

/// Formats a verification result as a table row.
pub fn format_table_row(event: &Event, verdict: &VerificationVerdict) -> String {
    format!(
        "{:<36} {:<5} {:<12} {}",
        truncate(event.id().as_str(), 36),
        event.event_type().code(),
        event.timestamp().as_secs(),
        verdict_label(verdict)
    )
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!(
        "{:<36} {:<5} {:<12} {}",
        "EVENT_ID", "TYPE", "TIMESTAMP", "VIEW_TOKEN"
    );
    println!("{}", "-".repeat(72));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
