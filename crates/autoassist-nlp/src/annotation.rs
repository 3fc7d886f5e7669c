//! Annotated-text model and the seam to the linguistic annotation engine.
//!
//! The analysis core never tokenizes or tags text itself. An [`Annotator`]
//! turns a raw utterance into an [`AnnotatedText`]: ordered sentences of
//! tokens carrying part-of-speech and named-entity tags, plus an optional
//! per-sentence sentiment class.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Named-entity tag meaning "not an entity".
pub const NULL_NER_TAG: &str = "O";

/// A single token with its tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text
    pub text: String,
    /// Part-of-speech tag (Penn Treebank code, e.g. `NNP`)
    #[serde(default)]
    pub pos: Option<String>,
    /// Named-entity tag (e.g. `PERSON`), `O` or absent for none
    #[serde(default)]
    pub ner: Option<String>,
}

impl Token {
    pub fn new(text: impl Into<String>, pos: Option<&str>, ner: Option<&str>) -> Self {
        Self {
            text: text.into(),
            pos: pos.map(str::to_string),
            ner: ner.map(str::to_string),
        }
    }

    /// Token with both tags present.
    pub fn tagged(text: impl Into<String>, pos: &str, ner: &str) -> Self {
        Self::new(text, Some(pos), Some(ner))
    }

    /// The entity tag, unless absent or the null tag.
    pub fn entity_tag(&self) -> Option<&str> {
        self.ner.as_deref().filter(|tag| *tag != NULL_NER_TAG)
    }

    /// The part-of-speech tag, if the annotator produced one.
    pub fn pos(&self) -> Option<&str> {
        self.pos.as_deref()
    }

    /// A missing tag never matches.
    pub fn pos_starts_with(&self, prefix: &str) -> bool {
        self.pos().is_some_and(|pos| pos.starts_with(prefix))
    }

    /// Exact tag comparison; a missing tag never matches.
    pub fn pos_is(&self, tag: &str) -> bool {
        self.pos() == Some(tag)
    }

    /// Whether the first character is an uppercase letter. Digits are not.
    pub fn starts_uppercase(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }
}

/// An ordered run of tokens with an optional sentiment class (0..=4).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub sentiment: Option<u8>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            sentiment: None,
        }
    }

    /// Builds a sentence from `(text, pos, ner)` triples.
    pub fn from_tagged(tokens: &[(&str, &str, &str)]) -> Self {
        Self::new(
            tokens
                .iter()
                .map(|(text, pos, ner)| Token::tagged(*text, pos, ner))
                .collect(),
        )
    }

    pub fn with_sentiment(mut self, class: u8) -> Self {
        self.sentiment = Some(class);
        self
    }
}

/// The annotator's structured view of one utterance.
///
/// The raw text is kept because name extraction and intent classification
/// match against the whole utterance rather than individual tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedText {
    pub text: String,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

impl AnnotatedText {
    pub fn new(text: impl Into<String>, sentences: Vec<Sentence>) -> Self {
        Self {
            text: text.into(),
            sentences,
        }
    }

    /// Parses the native JSON schema (`{"text": ..., "sentences": [...]}`).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn first_sentence(&self) -> Option<&Sentence> {
        self.sentences.first()
    }

    pub fn first_token(&self) -> Option<&Token> {
        self.first_sentence().and_then(|s| s.tokens.first())
    }

    /// All tokens in document order, across sentence boundaries.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|s| s.tokens.iter())
    }
}

/// The linguistic annotation engine, consumed only through this interface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Annotator: Send + Sync {
    /// Tokenizes, tags and scores one utterance.
    async fn annotate(&self, text: &str) -> Result<AnnotatedText>;

    /// Reports whether the engine can take requests.
    async fn ready(&self) -> Result<()> {
        Ok(())
    }
}

/// Annotator serving a document that was annotated ahead of time.
///
/// The requested text is ignored except that it replaces the stored raw text
/// when the stored one is empty.
#[derive(Debug, Clone)]
pub struct PreAnnotated {
    document: AnnotatedText,
}

impl PreAnnotated {
    pub fn new(document: AnnotatedText) -> Self {
        Self { document }
    }
}

#[async_trait]
impl Annotator for PreAnnotated {
    async fn annotate(&self, text: &str) -> Result<AnnotatedText> {
        let mut document = self.document.clone();
        if document.text.trim().is_empty() {
            document.text = text.to_string();
        }
        Ok(document)
    }
}
