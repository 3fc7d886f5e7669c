//! AutoAssist CLI
//!
//! Analyse customer utterances from the command line, either through a
//! CoreNLP server or from files annotated ahead of time.

mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::commands::analyze::Input;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "autoassist",
    version,
    about = "AutoAssist - natural language understanding for auto service desks",
    long_about = "A command-line interface to the AutoAssist NLU pipeline.\n\n\
                  Use this CLI to see how an utterance is understood: entities,\n\
                  customer name, sentiment, intent and the suggested reply."
)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "AUTOASSIST_CONFIG",
        default_value = "config/autoassist.yaml"
    )]
    config: PathBuf,

    /// CoreNLP server URL (overrides the configuration file)
    #[arg(short, long, env = "ANNOTATOR_URL")]
    annotator_url: Option<String>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Seed for response template selection
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a single utterance
    Analyze {
        /// The utterance to analyse
        #[arg(required_unless_present = "annotated", conflicts_with = "annotated")]
        text: Option<String>,

        /// Read an already annotated utterance from a JSON file instead
        #[arg(long, value_name = "FILE")]
        annotated: Option<PathBuf>,

        /// The annotated file is raw CoreNLP server output
        #[arg(long, requires = "annotated")]
        corenlp: bool,
    },

    /// List the response templates in effect
    Templates,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = run(&cli).await;

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            if cli.verbose {
                for cause in e.chain().skip(1) {
                    eprintln!("{}: {}", "Caused by".yellow(), cause);
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = config::load(&cli.config, cli.annotator_url.as_deref(), cli.seed)?;

    match &cli.command {
        Commands::Analyze {
            text,
            annotated,
            corenlp,
        } => {
            let input = match (annotated, text) {
                (Some(path), _) => Input::Annotated {
                    path,
                    corenlp: *corenlp,
                },
                (None, Some(text)) => Input::Text(text),
                (None, None) => anyhow::bail!("Provide an utterance or --annotated <FILE>"),
            };
            commands::analyze::run(&config, input, cli.format).await
        }
        Commands::Templates => commands::templates::run(&config, cli.format),
    }
}
