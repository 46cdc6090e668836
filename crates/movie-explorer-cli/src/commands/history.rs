use super::context::AppContext;
use crate::output::Output;
use crate::HistoryCommands;
use chrono::{Local, TimeZone};
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Table};
use movie_explorer_models::SearchHistoryItem;
use serde_json::json;

fn searched_at(timestamp_millis: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn history_table(entries: &[SearchHistoryItem]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Query").add_attribute(Attribute::Bold),
        Cell::new("Results").add_attribute(Attribute::Bold),
        Cell::new("Searched").add_attribute(Attribute::Bold),
    ]);
    for (index, item) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&item.query),
            Cell::new(item.result_count.map(|c| c.to_string()).unwrap_or_default()),
            Cell::new(searched_at(item.timestamp)),
        ]);
    }
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

pub async fn run_history(ctx: &AppContext, cmd: HistoryCommands, output: &Output) -> Result<()> {
    let history = ctx.history();
    match cmd {
        HistoryCommands::List => {
            let entries = history.entries();
            if !output.is_human() {
                output.json(&json!({ "history": entries, "cap": history.cap() }));
                return Ok(());
            }
            if entries.is_empty() {
                output.info("No recent searches");
                return Ok(());
            }
            output.heading(&format!("Recent searches ({} of {})", entries.len(), history.cap()));
            output.println(history_table(&entries).to_string());
        }
        HistoryCommands::Clear => {
            history.clear()?;
            output.success("Search history cleared");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_table_lists_most_recent_first() {
        let entries = vec![
            SearchHistoryItem {
                query: "inception".to_string(),
                timestamp: 1_700_000_000_000,
                poster_path: None,
                result_count: Some(12),
            },
            SearchHistoryItem {
                query: "batman".to_string(),
                timestamp: 1_690_000_000_000,
                poster_path: None,
                result_count: None,
            },
        ];

        let rendered = history_table(&entries).to_string();
        let inception = rendered.find("inception").unwrap();
        let batman = rendered.find("batman").unwrap();
        assert!(inception < batman);
        assert!(rendered.contains("12"));
    }
}
