//! Response template listing command

use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::BTreeMap;

use autoassist_core::AppConfig;
use autoassist_nlp::{Analyzer, IntentCode, DEFAULT_RESPONSE};

use crate::output::{self, OutputFormat};

pub fn run(config: &AppConfig, format: OutputFormat) -> Result<()> {
    let analyzer = Analyzer::from_config(&config.nlp).context("Failed to load response templates")?;
    let templates = analyzer.templates();

    let tables: BTreeMap<&str, &[String]> = templates
        .iter()
        .map(|(code, replies)| (code.as_str(), replies))
        .collect();

    if let Some(rendered) = output::format_structured(&tables, format)? {
        println!("{}", rendered);
        return Ok(());
    }

    for (code, replies) in templates.iter() {
        output::section(&format!("{} ({})", code.as_str().cyan(), code.description()));
        for (i, reply) in replies.iter().enumerate() {
            output::list_item(i + 1, reply);
        }
    }

    let fallbacks: Vec<&str> = IntentCode::ALL
        .into_iter()
        .filter(|code| templates.get(*code).is_none())
        .map(|code| code.as_str())
        .collect();
    if !fallbacks.is_empty() {
        println!();
        output::dimmed(&format!(
            "{} use the UNKNOWN table, or \"{}\" when it is empty",
            fallbacks.join(", "),
            DEFAULT_RESPONSE
        ));
    }

    Ok(())
}
