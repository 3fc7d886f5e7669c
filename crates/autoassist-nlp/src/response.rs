//! Templated response synthesis.
//!
//! Each intent owns a table of candidate replies; one is picked per call by a
//! [`TemplateSelector`]. Tables are built once at startup and only read
//! afterwards, so a single [`ResponseTemplates`] can be shared across threads.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

use crate::entity::{keys, EntityMap};
use crate::error::{NlpError, Result};
use crate::intent::IntentCode;
use crate::sentiment::Sentiment;

/// Reply used when neither the intent's table nor the UNKNOWN table has entries.
pub const DEFAULT_RESPONSE: &str = "I'm here to help you.";

/// Chooses an index into a non-empty template list.
pub trait TemplateSelector: Send + Sync {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl TemplateSelector for RandomSelector {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Uniform choice from a seeded RNG; the same seed yields the same sequence.
#[derive(Debug)]
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TemplateSelector for SeededSelector {
    fn pick(&self, len: usize) -> usize {
        self.rng.lock().gen_range(0..len)
    }
}

/// Per-intent reply tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTemplates {
    tables: HashMap<IntentCode, Vec<String>>,
}

impl ResponseTemplates {
    /// The built-in auto-service tables. STATEMENT has none and resolves
    /// through UNKNOWN.
    pub fn builtin() -> Self {
        let tables: [(IntentCode, &[&str]); 7] = [
            (
                IntentCode::Greeting,
                &[
                    "Hello! I'm your auto service assistant. How can I help you today?",
                    "Hi there! Welcome. What can I do for you?",
                    "Good day! How may I assist you with your automotive needs?",
                ],
            ),
            (
                IntentCode::Question,
                &[
                    "That's a good question. What specifically would you like to know?",
                    "I can help with that. What information are you looking for?",
                ],
            ),
            (
                IntentCode::Request,
                &[
                    "I can help with that request. Please tell me more.",
                    "Understood. What exactly do you need assistance with?",
                ],
            ),
            (
                IntentCode::Complaint,
                &[
                    "I understand your concern. Please tell me more about the issue.",
                    "I'm sorry to hear that. How can I help resolve this problem?",
                ],
            ),
            (IntentCode::Affirmation, &["Great!", "Understood.", "Okay."]),
            (
                IntentCode::Negation,
                &[
                    "No problem.",
                    "Understood. Is there anything else I can help with?",
                ],
            ),
            (
                IntentCode::Unknown,
                &[
                    "I'm not sure I understand. Could you rephrase that?",
                    "I'm still learning. Can you provide more details?",
                ],
            ),
        ];

        Self::from_tables(tables.into_iter().map(|(code, replies)| {
            (code, replies.iter().map(|r| r.to_string()).collect())
        }))
    }

    pub fn from_tables(tables: impl IntoIterator<Item = (IntentCode, Vec<String>)>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    /// Parses a YAML mapping of intent code to reply list.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_yaml::from_str(yaml)
            .map_err(|e| NlpError::templates(format!("Invalid template YAML: {e}")))?;

        let tables = raw
            .into_iter()
            .map(|(key, replies)| {
                key.parse::<IntentCode>()
                    .map(|code| (code, replies))
                    .map_err(|_| NlpError::templates(format!("Unknown intent code: {key}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_tables(tables))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            NlpError::templates(format!("Cannot read {}: {e}", path.display()))
        })?;
        let templates = Self::from_yaml(&yaml)?;
        debug!("Loaded {} template tables from {}", templates.tables.len(), path.display());
        Ok(templates)
    }

    /// The non-empty table for `code`, if any.
    pub fn get(&self, code: IntentCode) -> Option<&[String]> {
        self.tables
            .get(&code)
            .map(Vec::as_slice)
            .filter(|replies| !replies.is_empty())
    }

    /// Tables in intent order.
    pub fn iter(&self) -> impl Iterator<Item = (IntentCode, &[String])> {
        IntentCode::ALL
            .into_iter()
            .filter_map(move |code| self.get(code).map(|replies| (code, replies)))
    }

    /// Picks a reply for `code`, falling back to UNKNOWN and then to
    /// [`DEFAULT_RESPONSE`].
    pub fn pick(&self, code: IntentCode, selector: &dyn TemplateSelector) -> String {
        match self.get(code).or_else(|| self.get(IntentCode::Unknown)) {
            Some(replies) => replies[selector.pick(replies.len()) % replies.len()].clone(),
            None => DEFAULT_RESPONSE.to_string(),
        }
    }
}

impl Default for ResponseTemplates {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builds the suggested reply from the intent, entities and sentiment.
pub fn synthesize_response(
    templates: &ResponseTemplates,
    selector: &dyn TemplateSelector,
    intent: IntentCode,
    entities: &EntityMap,
    sentiment: Sentiment,
) -> String {
    match intent {
        IntentCode::Greeting => {
            let greeting = templates.pick(IntentCode::Greeting, selector);
            match entities.get(keys::PERSON_NAME) {
                Some(name) => format!("{greeting} {name}! How can I help you today?"),
                None => greeting,
            }
        }
        IntentCode::Complaint if sentiment == Sentiment::Negative => {
            templates.pick(IntentCode::Complaint, selector)
        }
        other => templates.pick(other, selector),
    }
}
