//! Output formatting for CLI

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use llm_lab_core::{format_percentage, SortDirection};
use serde::Serialize;
use std::str::FromStr;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Compact format (single line per item)
    Compact,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// Output writer that handles different formats
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format }
    }

    /// True when the human-readable renderers should be used.
    pub fn is_table(&self) -> bool {
        self.format == OutputFormat::Table
    }

    /// Write a list of items
    pub fn write_list<T: Serialize + TableDisplay>(&self, items: &[T], headers: &[&str]) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                if items.is_empty() {
                    println!("{}", "No items found.".dimmed());
                    return Ok(());
                }

                let mut table = new_table(headers.iter().map(|h| header_cell(h)));
                for item in items {
                    table.add_row(item.to_row());
                }

                println!("{table}");
                println!(
                    "\n{} {} item(s)",
                    "Total:".bold(),
                    items.len().to_string().green()
                );
            }
            OutputFormat::Compact => {
                for item in items {
                    item.display_compact();
                }
            }
            _ => self.write_data(items)?,
        }
        Ok(())
    }

    /// Serialize `value` as JSON or YAML. Table and compact formats fall back to JSON.
    pub fn write_data<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        match self.format {
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(value)?;
                print!("{}", yaml);
            }
            _ => {
                let json = serde_json::to_string_pretty(value)?;
                println!("{}", json);
            }
        }
        Ok(())
    }

    /// Write a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Table => println!("{} {}", "✓".green(), message),
            OutputFormat::Compact => println!("{}", message),
            _ => eprintln!("{}", message),
        }
    }

    /// Write an error message
    pub fn error(&self, message: &str) {
        if self.format == OutputFormat::Table {
            eprintln!("{} {}", "✗".red(), message);
        } else {
            eprintln!("Error: {}", message);
        }
    }

    /// Write an info message
    pub fn info(&self, message: &str) {
        if self.format == OutputFormat::Table {
            println!("{} {}", "ℹ".blue(), message);
        } else {
            eprintln!("{}", message);
        }
    }

    /// Start a spinner for long operations
    pub fn spinner(&self, message: &str) -> Option<indicatif::ProgressBar> {
        if self.format != OutputFormat::Table {
            return None;
        }
        let pb = indicatif::ProgressBar::new_spinner();
        if let Ok(style) = indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(pb)
    }
}

/// Clear a spinner returned by [`OutputWriter::spinner`].
pub fn finish_spinner(spinner: Option<indicatif::ProgressBar>) {
    if let Some(s) = spinner {
        s.finish_and_clear();
    }
}

/// Trait for displaying items in a table
pub trait TableDisplay {
    /// Convert item to a table row
    fn to_row(&self) -> Vec<Cell>;

    /// Display in compact format
    fn display_compact(&self);
}

/// A table with the house style and the given header cells.
pub fn new_table(headers: impl IntoIterator<Item = Cell>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(headers.into_iter().collect::<Vec<_>>());
    table
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan)
}

/// Column header carrying the active sort arrow, if any.
pub fn sortable_header(label: &str, active: Option<SortDirection>) -> Cell {
    match active {
        Some(SortDirection::Asc) => header_cell(&format!("{} ▲", label)),
        Some(SortDirection::Desc) => header_cell(&format!("{} ▼", label)),
        None => header_cell(label),
    }
}

/// Print a key-value pair in detail format
pub fn print_field(key: &str, value: &str) {
    println!("  {}: {}", key.cyan(), value);
}

/// Print an optional key-value pair
pub fn print_optional_field(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        print_field(key, v);
    }
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Score as a percentage, or `N/A` when absent.
pub fn format_score(value: Option<f64>) -> String {
    value.map(format_percentage).unwrap_or_else(|| "N/A".to_string())
}

/// Ten-character bar for a score in [0, 1].
pub fn score_bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 1.0) * 10.0).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

/// Sampling parameters print without trailing zeros (`1`, `0.9`, `0.85`).
pub fn format_param(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Yaml.to_string(), "yaml");
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(Some(0.856)), "85.6%");
        assert_eq!(format_score(None), "N/A");
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(0.0), "░░░░░░░░░░");
        assert_eq!(score_bar(0.5), "█████░░░░░");
        assert_eq!(score_bar(1.7), "██████████");
    }

    #[test]
    fn test_format_param() {
        assert_eq!(format_param(1.0), "1");
        assert_eq!(format_param(0.9), "0.9");
        assert_eq!(format_param(0.85), "0.85");
        assert_eq!(format_param(0.0), "0");
    }
}
