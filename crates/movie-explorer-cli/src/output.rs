use clap::ValueEnum;
use comfy_table::{presets, modifiers, Attribute, Cell, Color, Table};
use indicatif::{ProgressBar, ProgressStyle};
use movie_explorer_models::format::{format_rating, truncate_text};
use movie_explorer_models::Movie;
use owo_colors::OwoColorize;
use serde_json::json;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

/// Spinner shown while a request is in flight; cleared on drop
pub struct Spinner(Option<ProgressBar>);

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(bar) = self.0.take() {
            bar.finish_and_clear();
        }
    }
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "success",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "error",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "info",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "⚠".yellow(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "warning",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    /// Plain text for human output; dropped in JSON modes where the
    /// structured payload carries the data
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("{}", msg.as_ref());
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }

    /// Prompt text without a newline; prompts stay human-readable in every format
    pub fn print(&self, msg: impl AsRef<str>) -> io::Result<()> {
        print!("{}", msg.as_ref());
        io::stdout().flush()
    }

    /// Section header in human mode
    pub fn heading(&self, title: &str) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("\n{}", title.bright_cyan().bold());
    }

    /// Key/value table with a bold header row
    pub fn key_values(&self, title: &str, rows: &[(&str, String)]) {
        if self.quiet || !self.is_human() {
            return;
        }

        let mut table = Table::new();
        table.set_header(vec![Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)]);
        for (key, value) in rows {
            table.add_row(vec![Cell::new(key), Cell::new(value)]);
        }
        table.load_preset(presets::UTF8_FULL);
        table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
        println!("{}", table);
    }

    /// Movie listing as a table in human mode, an array under `key` otherwise
    pub fn movies(&self, key: &str, movies: &[Movie]) {
        match self.format {
            OutputFormat::Human => {
                if self.quiet {
                    return;
                }
                if movies.is_empty() {
                    println!("{}", "No movies found".bright_black());
                    return;
                }
                println!("{}", movie_table(movies));
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.json(&json!({ key: movies }));
            }
        }
    }

    /// Spinner on stderr, only when a person is watching human output
    pub fn spinner(&self, msg: impl Into<String>) -> Spinner {
        if self.quiet || !self.is_human() || !io::stderr().is_terminal() {
            return Spinner(None);
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        bar.set_message(msg.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Spinner(Some(bar))
    }
}

fn movie_table(movies: &[Movie]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("Overview").add_attribute(Attribute::Bold),
    ]);
    for movie in movies {
        let year = movie.year().map(|y| y.to_string()).unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title).fg(Color::Cyan),
            Cell::new(year),
            Cell::new(format_rating(movie.vote_average)),
            Cell::new(truncate_text(&movie.overview, 60)),
        ]);
    }
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}
