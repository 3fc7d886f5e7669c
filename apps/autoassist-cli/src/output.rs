//! Output formatting utilities

use colored::Colorize;
use serde::Serialize;

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Serialize for the machine-readable formats. `None` for text, which each
/// command renders itself.
pub fn format_structured<T: Serialize>(
    value: &T,
    format: OutputFormat,
) -> anyhow::Result<Option<String>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
        OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(value)?)),
    }
}

/// Print a key-value pair
pub fn key_value(key: &str, value: &str) {
    println!("{}: {}", key.bold(), value);
}

/// Print a dimmed message
pub fn dimmed(message: &str) {
    println!("{}", message.dimmed());
}

/// Print a list item
pub fn list_item(index: usize, message: &str) {
    println!("  {}. {}", index, message);
}

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", title.bold().underline());
}

/// Format a score with two decimals
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}
