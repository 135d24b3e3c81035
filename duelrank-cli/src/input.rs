//! Item list loading: file, inline flags, or piped stdin.

use std::collections::HashSet;
use std::io::{self, BufRead, IsTerminal};
use std::path::Path;

use crate::bail;

/// Parse a string as either a JSON array of strings or plain text (one item per line).
pub fn parse_items_from_str(content: &str) -> Vec<String> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        // Try JSON array
        let items: Vec<String> = serde_json::from_str(trimmed)
            .unwrap_or_else(|e| bail(format!("Input looks like JSON but failed to parse: {e}")));
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    } else {
        // Plain text, one item per line
        trimmed
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Load items from all sources: --items file, --item inline args, and
/// (when allowed) piped stdin. Enforces at least two items and
/// case-insensitive name uniqueness — ids are the engine's concern, but
/// duplicate names would make two prompts indistinguishable.
pub fn load_items(file: Option<&Path>, inline_items: &[String], allow_stdin: bool) -> Vec<String> {
    let mut items = Vec::new();

    // From file (auto-detects JSON array vs one-per-line)
    if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read items file {}: {e}", path.display())));
        items = parse_items_from_str(&content);
    }

    // From inline --item flags
    items.extend(inline_items.iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()));

    // From stdin (only if nothing else was given and the command is
    // non-interactive — the judging loop needs stdin for itself)
    if items.is_empty() && allow_stdin {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            bail("No items provided. Use --items <file>, --item <name>, or pipe items via stdin.");
        }
        let content: String = stdin
            .lock()
            .lines()
            .map(|l| l.unwrap_or_else(|e| bail(format!("Failed to read from stdin: {e}"))))
            .collect::<Vec<_>>()
            .join("\n");
        items = parse_items_from_str(&content);
    }

    if items.is_empty() {
        bail("No items provided. Use --items <file> or --item <name>.");
    }
    if items.len() < 2 {
        bail(format!("Need at least 2 items to rank, got {}", items.len()));
    }

    let mut seen = HashSet::new();
    for name in &items {
        if !seen.insert(name.to_lowercase()) {
            bail(format!("Duplicate item name: \"{name}\""));
        }
    }

    items
}
