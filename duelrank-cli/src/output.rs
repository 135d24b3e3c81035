//! Output formatting: terminal table and JSON.

use duelrank_core::RankableItem;
use serde::Serialize;

#[derive(Serialize)]
struct JsonRankedItem {
    rank: usize,
    name: String,
    rating: i32,
    comparisons: u32,
}

#[derive(Serialize)]
struct JsonOutput {
    items: Vec<JsonRankedItem>,
    total_comparisons: usize,
    stable: bool,
}

/// Print results as a formatted terminal table.
pub fn print_table(ranked: &[RankableItem], total_comparisons: usize, stable: bool) {
    // Find the widest item name for padding
    let name_width = ranked
        .iter()
        .map(|i| i.name().len())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Item"

    // Header
    println!(" # | {:<name_width$} | Rating | Comparisons", "Item");
    println!("---|-{}-|--------|------------", "-".repeat(name_width));

    // Rows
    for (i, item) in ranked.iter().enumerate() {
        println!(
            "{:>2} | {:<name_width$} | {:>6} | {:>11}",
            i + 1,
            item.name(),
            item.rating(),
            item.comparison_count(),
        );
    }

    println!(
        "\n{} items, {} comparisons ({})",
        ranked.len(),
        total_comparisons,
        if stable { "stable" } else { "not yet stable" },
    );
}

/// Print results as JSON.
pub fn print_json(ranked: &[RankableItem], total_comparisons: usize, stable: bool) {
    let items: Vec<JsonRankedItem> = ranked
        .iter()
        .enumerate()
        .map(|(i, item)| JsonRankedItem {
            rank: i + 1,
            name: item.name().to_string(),
            rating: item.rating(),
            comparisons: item.comparison_count(),
        })
        .collect();

    let output = JsonOutput {
        items,
        total_comparisons,
        stable,
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
