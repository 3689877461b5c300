//! Verify command implementation.

use std::io::{self, Read};

use serde_json::{json, Value};
use viewtrack_core::{verify_view_token, Event};

use super::SaltSource;
use crate::output::{format_json, format_table_row, print_table_header, verdict_label};

pub fn run(
    input: Option<String>,
    json_output: bool,
    source: &SaltSource,
) -> Result<(), Box<dyn std::error::Error>> {
    let tokenizer = source.tokenizer()?;

    let text = match input.as_deref() {
        Some(path) if path != "-" => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?,
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let events = parse_events(&text)?;

    let mut all_ok = true;
    let mut results = Vec::new();
    if !json_output {
        print_table_header();
    }
    for event in &events {
        let verdict = verify_view_token(event, &tokenizer);
        all_ok = all_ok && verdict.is_ok();
        if json_output {
            results.push(json!({
                "id": event.id().as_str(),
                "type": event.event_type().code(),
                "ok": verdict.is_ok(),
                "verdict": verdict_label(&verdict),
            }));
        } else {
            println!("{}", format_table_row(event, &verdict));
        }
    }

    if json_output {
        println!(
            "{}",
            format_json(&json!({ "all_ok": all_ok, "results": results }))
        );
    }

    if !all_ok {
        return Err("one or more events failed view-token verification".into());
    }
    Ok(())
}

/// Accepts a single event object, an array of events, or one event per line.
fn parse_events(text: &str) -> Result<Vec<Event>, Box<dyn std::error::Error>> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return match value {
            Value::Array(items) => items
                .iter()
                .map(|item| -> Result<Event, Box<dyn std::error::Error>> {
                    Ok(Event::from_json(item)?)
                })
                .collect(),
            other => Ok(vec![Event::from_json(&other)?]),
        };
    }

    text.lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, line)| -> Result<Event, Box<dyn std::error::Error>> {
            let value: Value = serde_json::from_str(line)
                .map_err(|e| format!("Invalid JSON on event {}: {}", index + 1, e))?;
            Ok(Event::from_json(&value)?)
        })
        .collect()
}
