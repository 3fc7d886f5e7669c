//! Intent classification module.
//!
//! An ordered rule cascade: keyword patterns over the lower-cased utterance
//! first, then part-of-speech checks on the first token. The first matching
//! rule wins, so the order of [`KEYWORD_RULES`] is significant.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, trace};

use crate::annotation::{AnnotatedText, Token};
use crate::error::{NlpError, Result};

/// Fixed confidence attached to every rule-based classification.
pub const RULE_CONFIDENCE: f64 = 0.7;

/// Coarse purpose of an utterance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentCode {
    /// Greeting (e.g., "Hi, I'm Sarah")
    Greeting,
    /// Question (e.g., "When do you open?")
    Question,
    /// Service request (e.g., "I need an oil change")
    Request,
    /// Complaint (e.g., "I have a problem with my brakes")
    Complaint,
    /// Affirmation (e.g., "Yes, that's correct")
    Affirmation,
    /// Negation (e.g., "No, cancel it")
    Negation,
    /// Plain statement (e.g., "My car is blue")
    Statement,
    /// Unknown intent (fallback when classification fails)
    Unknown,
}

impl IntentCode {
    /// Every code, in declaration order.
    pub const ALL: [IntentCode; 8] = [
        Self::Greeting,
        Self::Question,
        Self::Request,
        Self::Complaint,
        Self::Affirmation,
        Self::Negation,
        Self::Statement,
        Self::Unknown,
    ];

    /// The wire name, e.g. `"GREETING"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "GREETING",
            Self::Question => "QUESTION",
            Self::Request => "REQUEST",
            Self::Complaint => "COMPLAINT",
            Self::Affirmation => "AFFIRMATION",
            Self::Negation => "NEGATION",
            Self::Statement => "STATEMENT",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns a human-readable description of the intent.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Greeting => "Opening pleasantry",
            Self::Question => "Asks for information",
            Self::Request => "Asks for something to be done",
            Self::Complaint => "Reports a problem or dissatisfaction",
            Self::Affirmation => "Agrees or confirms",
            Self::Negation => "Declines, denies or cancels",
            Self::Statement => "Plain statement",
            Self::Unknown => "Could not be classified",
        }
    }
}

impl std::fmt::Display for IntentCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntentCode {
    type Err = NlpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NlpError::component(format!("Unknown intent code: {s}")))
    }
}

/// Represents a classified intent with confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub code: IntentCode,
    pub confidence: f64,
}

impl Intent {
    pub fn new(code: IntentCode, confidence: f64) -> Self {
        Self { code, confidence }
    }

    /// The fallback used when classification fails.
    pub fn unknown() -> Self {
        Self::new(IntentCode::Unknown, RULE_CONFIDENCE)
    }

    /// Per-intent confidences; holds exactly the chosen intent.
    pub fn confidences(&self) -> BTreeMap<IntentCode, f64> {
        BTreeMap::from([(self.code, self.confidence)])
    }
}

/// Keyword pattern tied to an intent.
#[derive(Debug, Clone)]
struct IntentPattern {
    regex: Regex,
    intent: IntentCode,
}

lazy_static! {
    /// Keyword rules, in priority order. Greeting, affirmation and negation
    /// match whole words; complaint keywords match anywhere.
    static ref KEYWORD_RULES: Vec<IntentPattern> = vec![
        IntentPattern {
            regex: Regex::new(r"\b(hello|hi|hey|good morning|good afternoon|good evening|howdy|greetings)\b").unwrap(),
            intent: IntentCode::Greeting,
        },
        IntentPattern {
            regex: Regex::new(r"\b(yes|yeah|yep|sure|ok|okay|right|correct|confirm|absolutely|definitely)\b").unwrap(),
            intent: IntentCode::Affirmation,
        },
        IntentPattern {
            regex: Regex::new(r"\b(no|nope|not|never|wrong|incorrect|cancel)\b").unwrap(),
            intent: IntentCode::Negation,
        },
        IntentPattern {
            regex: Regex::new(r"problem|issue|complaint|terrible|awful|bad").unwrap(),
            intent: IntentCode::Complaint,
        },
    ];
}

/// Leading words that make an utterance a question.
const QUESTION_OPENERS: &[&str] = &[
    "can", "could", "would", "will", "do", "does", "did", "is", "are", "was", "were",
];

/// Phrases that make an utterance a request.
const REQUEST_PHRASES: &[&str] = &["i need", "i want", "i would like", "please"];

/// Classifies the utterance. Fails when the first sentence has no tokens.
pub fn classify_intent(document: &AnnotatedText) -> Result<Intent> {
    let first_token = document
        .first_token()
        .ok_or_else(|| NlpError::component("No tokens in the first sentence"))?;
    let text = document.text.to_lowercase();

    let code = classify(&text, first_token);
    debug!("Classified intent: {}", code);

    Ok(Intent::new(code, RULE_CONFIDENCE))
}

fn classify(text: &str, first_token: &Token) -> IntentCode {
    if let Some(rule) = KEYWORD_RULES.iter().find(|rule| rule.regex.is_match(text)) {
        trace!("Keyword rule matched: {:?}", rule.regex.as_str());
        return rule.intent;
    }

    let first_word = first_token.text.to_lowercase();
    if first_token.pos_starts_with("W") || QUESTION_OPENERS.contains(&first_word.as_str()) {
        return IntentCode::Question;
    }

    if first_token.pos_starts_with("VB") || REQUEST_PHRASES.iter().any(|p| text.contains(p)) {
        return IntentCode::Request;
    }

    IntentCode::Statement
}
