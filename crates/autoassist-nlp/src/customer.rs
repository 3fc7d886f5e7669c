//! Customer-name extraction.
//!
//! Layered heuristics, first success wins:
//! 1. the NER `person` entity, if it looks like a name;
//! 2. self-introduction phrases ("my name is", "I'm", "I am", "call me");
//! 3. two capitalized leading tokens ("John Doe here");
//! 4. the literal opener `Hi, I'm <name>`.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::annotation::{AnnotatedText, Token};
use crate::entity::{keys, EntityMap};

/// Longest NER person value still accepted as a name, in words.
const MAX_NAME_WORDS: usize = 3;

lazy_static! {
    static ref INTRODUCTION: Regex = Regex::new(
        r"(?i:my name is|i'm|i am|call me)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)"
    )
    .unwrap();
}

/// Extracts the customer's name from the entities and the raw utterance.
pub fn extract_customer_name(document: &AnnotatedText, entities: &EntityMap) -> Option<String> {
    if let Some(name) = entities.get(keys::PERSON).filter(|p| is_plausible_person(p)) {
        debug!("Customer name taken from NER person entity");
        return Some(name.to_string());
    }

    if let Some(name) = from_introduction(&document.text) {
        debug!("Customer name taken from introduction phrase");
        return Some(name);
    }

    from_leading_tokens(document)
}

fn is_plausible_person(person: &str) -> bool {
    person.chars().count() > 1
        && !person.eq_ignore_ascii_case("customer")
        && person.split_whitespace().count() <= MAX_NAME_WORDS
}

fn from_introduction(text: &str) -> Option<String> {
    INTRODUCTION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn from_leading_tokens(document: &AnnotatedText) -> Option<String> {
    let tokens = &document.first_sentence()?.tokens;
    let (first, second) = match tokens.as_slice() {
        [first, second, ..] => (first, second),
        _ => return None,
    };

    let capitalized = |token: &Token| token.starts_uppercase() && token.text.chars().count() > 1;
    let is_opener = first.text.eq_ignore_ascii_case("I") || first.text.eq_ignore_ascii_case("The");
    if capitalized(first) && capitalized(second) && !is_opener {
        return Some(format!("{} {}", first.text, second.text));
    }

    match tokens.as_slice() {
        [hi, im, name, ..]
            if hi.text.eq_ignore_ascii_case("Hi,") && im.text.eq_ignore_ascii_case("I'm") =>
        {
            Some(name.text.clone())
        }
        _ => None,
    }
}
