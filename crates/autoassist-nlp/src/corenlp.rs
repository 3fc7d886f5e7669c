//! Annotator backed by a Stanford CoreNLP server.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use autoassist_core::AnnotatorConfig;

use crate::annotation::{AnnotatedText, Annotator, Sentence, Token};
use crate::error::{NlpError, Result};

/// HTTP client for a CoreNLP server (`java edu.stanford.nlp.pipeline.StanfordCoreNLPServer`).
#[derive(Debug, Clone)]
pub struct CoreNlpClient {
    client: Client,
    base_url: String,
    properties: String,
}

impl CoreNlpClient {
    pub fn new(config: &AnnotatorConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        let properties = json!({
            "annotators": config.annotators,
            "outputFormat": "json",
            "ner.useSUTime": "false",
            "ner.applyNumericClassifiers": "false",
            "ner.applyFineGrained": "false",
        })
        .to_string();

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            properties,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Annotator for CoreNlpClient {
    #[instrument(skip(self, text), fields(url = %self.base_url))]
    async fn annotate(&self, text: &str) -> Result<AnnotatedText> {
        let response = self
            .client
            .post(format!("{}/", self.base_url))
            .query(&[("properties", self.properties.as_str())])
            .body(text.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NlpError::annotation(format!(
                "CoreNLP server returned {}",
                status
            )));
        }

        let body = response.text().await?;
        let document = parse_corenlp_json(text, &body)?;
        debug!("Annotated {} sentences", document.sentences.len());
        Ok(document)
    }

    async fn ready(&self) -> Result<()> {
        let response = self
            .client
            .get(format!("{}/ready", self.base_url))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(NlpError::annotation(format!(
                "CoreNLP server not ready: {}",
                response.status()
            )))
        }
    }
}

#[derive(Debug, Deserialize)]
struct CoreNlpDocument {
    #[serde(default)]
    sentences: Vec<CoreNlpSentence>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoreNlpSentence {
    #[serde(default)]
    tokens: Vec<CoreNlpToken>,
    #[serde(default)]
    sentiment_value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CoreNlpToken {
    word: String,
    #[serde(default)]
    pos: Option<String>,
    #[serde(default)]
    ner: Option<String>,
}

/// Converts a CoreNLP JSON response into an [`AnnotatedText`] for `text`.
///
/// `sentimentValue` arrives as a digit string; anything else reads as absent.
pub fn parse_corenlp_json(text: &str, json: &str) -> Result<AnnotatedText> {
    let document: CoreNlpDocument = serde_json::from_str(json)?;

    let sentences = document
        .sentences
        .into_iter()
        .map(|sentence| Sentence {
            tokens: sentence
                .tokens
                .into_iter()
                .map(|token| Token {
                    text: token.word,
                    pos: token.pos,
                    ner: token.ner,
                })
                .collect(),
            sentiment: sentence
                .sentiment_value
                .and_then(|value| value.trim().parse::<u8>().ok()),
        })
        .collect();

    Ok(AnnotatedText::new(text, sentences))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HELLO_JSON: &str = r#"{
        "sentences": [{
            "index": 0,
            "sentimentValue": "3",
            "sentiment": "Positive",
            "tokens": [
                {"index": 1, "word": "Hello", "originalText": "Hello", "pos": "UH", "ner": "O"},
                {"index": 2, "word": "John", "originalText": "John", "pos": "NNP", "ner": "PERSON"}
            ]
        }]
    }"#;

    fn client_for(server: &MockServer) -> CoreNlpClient {
        CoreNlpClient::new(&AnnotatorConfig::new(server.uri()).with_timeout_ms(2_000)).unwrap()
    }

    #[test]
    fn test_parse_tokens_and_sentiment() {
        let document = parse_corenlp_json("Hello John", HELLO_JSON).unwrap();

        assert_eq!(document.text, "Hello John");
        assert_eq!(document.sentences.len(), 1);
        assert_eq!(document.sentences[0].sentiment, Some(3));
        assert_eq!(document.sentences[0].tokens[1], Token::tagged("John", "NNP", "PERSON"));
    }

    #[test]
    fn test_parse_unreadable_sentiment_is_absent() {
        let json = r#"{"sentences": [{"sentimentValue": "Positive", "tokens": [{"word": "ok"}]}]}"#;
        let document = parse_corenlp_json("ok", json).unwrap();

        assert_eq!(document.sentences[0].sentiment, None);
        assert_eq!(document.sentences[0].tokens[0].pos, None);
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(matches!(
            parse_corenlp_json("x", "<html>oops</html>"),
            Err(NlpError::MalformedAnnotation(_))
        ));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client =
            CoreNlpClient::new(&AnnotatorConfig::new("http://corenlp:9000/".to_string())).unwrap();
        assert_eq!(client.base_url(), "http://corenlp:9000");
    }

    #[tokio::test]
    async fn test_annotate_against_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(HELLO_JSON))
            .expect(1)
            .mount(&server)
            .await;

        let document = client_for(&server).annotate("Hello John").await.unwrap();
        assert_eq!(document.first_token().unwrap().text, "Hello");
    }

    #[tokio::test]
    async fn test_annotate_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).annotate("Hello").await.unwrap_err();
        assert!(matches!(err, NlpError::Annotation(_)));
    }

    #[tokio::test]
    async fn test_ready_probe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ready"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ready"))
            .mount(&server)
            .await;

        assert!(client_for(&server).ready().await.is_ok());
    }

    #[tokio::test]
    async fn test_ready_probe_unreachable() {
        let config = AnnotatorConfig::new("http://127.0.0.1:1".to_string()).with_timeout_ms(500);
        let client = CoreNlpClient::new(&config).unwrap();
        assert!(matches!(client.ready().await, Err(NlpError::Transport(_))));
    }
}
