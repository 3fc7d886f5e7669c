//! Utterance analysis command

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

use autoassist_core::AppConfig;
use autoassist_nlp::{
    parse_corenlp_json, AnnotatedText, Analyzer, Annotator, CoreNlpClient, NluEngine, NluResult,
    PreAnnotated, Sentiment,
};

use crate::output::{self, OutputFormat};

/// Where the utterance comes from.
pub enum Input<'a> {
    /// Raw text, annotated by the configured CoreNLP server
    Text(&'a str),
    /// A file already annotated, in native or CoreNLP JSON
    Annotated { path: &'a Path, corenlp: bool },
}

pub async fn run(config: &AppConfig, input: Input<'_>, format: OutputFormat) -> Result<()> {
    let analyzer = Analyzer::from_config(&config.nlp).context("Failed to load response templates")?;

    let (annotator, text): (Arc<dyn Annotator>, String) = match input {
        Input::Text(text) => {
            let client: Arc<dyn Annotator> = Arc::new(CoreNlpClient::new(&config.annotator)?);
            (client, text.to_string())
        }
        Input::Annotated { path, corenlp } => {
            let document = read_annotated(path, corenlp)?;
            let text = document_text(&document);
            let annotator: Arc<dyn Annotator> = Arc::new(PreAnnotated::new(document));
            (annotator, text)
        }
    };

    let engine = NluEngine::initialize(annotator, analyzer).await;
    if !engine.is_ready() {
        bail!(
            "Annotation server at {} is not ready (status: {})",
            config.annotator.url,
            engine.status()
        );
    }

    let result = engine.analyze(&text).await?;

    match output::format_structured(&result, format)? {
        Some(rendered) => println!("{}", rendered),
        None => print_result(&result),
    }

    Ok(())
}

fn read_annotated(path: &Path, corenlp: bool) -> Result<AnnotatedText> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let document = if corenlp {
        parse_corenlp_json("", &json)?
    } else {
        AnnotatedText::from_json(&json)?
    };
    Ok(document)
}

/// The raw text, or the tokens joined by spaces when the file carries none.
fn document_text(document: &AnnotatedText) -> String {
    if document.text.trim().is_empty() {
        document
            .tokens()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        document.text.clone()
    }
}

fn print_result(result: &NluResult) {
    output::section("Analysis");
    output::key_value(
        "Intent",
        &format!(
            "{} ({})",
            result.intent.as_str().cyan().bold(),
            output::format_score(result.intent_confidence)
        ),
    );

    let sentiment = match result.sentiment {
        Sentiment::Positive => result.sentiment.as_str().green(),
        Sentiment::Neutral => result.sentiment.as_str().normal(),
        Sentiment::Negative => result.sentiment.as_str().red(),
    };
    output::key_value(
        "Sentiment",
        &format!("{} ({})", sentiment, output::format_score(result.sentiment_score)),
    );

    if let Some(name) = &result.customer_name {
        output::key_value("Customer", name);
    }
    output::key_value("Complexity", &output::format_score(result.complexity_score));
    output::key_value("Confidence", &output::format_score(result.overall_confidence));

    if !result.entities.is_empty() {
        output::section("Entities");
        for (key, value) in result.entities.iter() {
            println!("  {}: {}", key.bold(), value);
        }
    }

    output::section("Suggested response");
    println!("  {}", result.suggested_response.green());

    println!();
    output::dimmed(&format!("[processed in {}ms]", result.processing_time.as_millis()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoassist_nlp::Sentence;

    #[test]
    fn test_document_text_falls_back_to_tokens() {
        let document = AnnotatedText::new(
            " ",
            vec![
                Sentence::from_tagged(&[("Hello", "UH", "O"), ("there", "RB", "O")]),
                Sentence::from_tagged(&[("Bye", "UH", "O")]),
            ],
        );
        assert_eq!(document_text(&document), "Hello there Bye");

        let document = AnnotatedText::new("Hello there", vec![]);
        assert_eq!(document_text(&document), "Hello there");
    }

    #[test]
    fn test_read_annotated_formats() {
        let dir = tempfile::tempdir().unwrap();

        let native = dir.path().join("native.json");
        std::fs::write(
            &native,
            r#"{"text": "Hi", "sentences": [{"tokens": [{"text": "Hi", "pos": "UH"}]}]}"#,
        )
        .unwrap();
        assert_eq!(read_annotated(&native, false).unwrap().text, "Hi");

        let corenlp = dir.path().join("corenlp.json");
        std::fs::write(
            &corenlp,
            r#"{"sentences": [{"sentimentValue": "1", "tokens": [{"word": "Ugh", "pos": "UH", "ner": "O"}]}]}"#,
        )
        .unwrap();
        let document = read_annotated(&corenlp, true).unwrap();
        assert_eq!(document.sentences[0].sentiment, Some(1));
        assert_eq!(document_text(&document), "Ugh");

        assert!(read_annotated(&dir.path().join("missing.json"), false).is_err());
    }
}
