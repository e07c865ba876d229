//! Output rendering for sync results.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-action fields and a top-level summary.

use crate::models::{ActionKind, SyncAction};
use crate::utils;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::io::IsTerminal;
use std::path::Path;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Print sync actions in the requested format.
pub fn print_sync(actions: &[SyncAction], output: &str) {
    match output {
        "json" => println!("{:#}", compose_sync_json(actions)),
        _ => {
            let color = use_colors(output);
            for a in actions {
                println!("{}", human_line(a, color));
            }
            let summary = format!(
                "— Summary — created={} copied={} rendered={} skipped={}",
                count(actions, ActionKind::CreatedDir),
                count(actions, ActionKind::Copied),
                count(actions, ActionKind::Rendered),
                count(actions, ActionKind::Skipped),
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

fn human_line(a: &SyncAction, color: bool) -> String {
    let label = match a.kind {
        ActionKind::CreatedDir => "created:",
        ActionKind::Copied => "copied:",
        ActionKind::Rendered => "rendered:",
        ActionKind::Skipped => "skipped:",
    };
    let label = if color {
        match a.kind {
            ActionKind::CreatedDir => label.blue().bold().to_string(),
            ActionKind::Copied | ActionKind::Rendered => label.green().bold().to_string(),
            ActionKind::Skipped => label.yellow().bold().to_string(),
        }
    } else {
        label.to_string()
    };
    let mut line = match &a.source {
        Some(src) => format!("{} {} -> {}", label, utils::rel_to_wd(Path::new(src)), a.target),
        None => format!("{} {}", label, a.target),
    };
    if let Some(reason) = &a.reason {
        line.push_str(&format!(" ({})", reason));
    }
    line
}

fn count(actions: &[SyncAction], kind: ActionKind) -> usize {
    actions.iter().filter(|a| a.kind == kind).count()
}

/// Compose the sync JSON object (pure) for testing purposes.
pub fn compose_sync_json(actions: &[SyncAction]) -> JsonVal {
    let summary = json!({
        "created": count(actions, ActionKind::CreatedDir),
        "copied": count(actions, ActionKind::Copied),
        "rendered": count(actions, ActionKind::Rendered),
        "skipped": count(actions, ActionKind::Skipped),
        "total": actions.len(),
    });
    json!({"results": actions, "summary": summary})
}
