//! Heuristic complexity and confidence scoring.

use crate::annotation::{AnnotatedText, Sentence};
use crate::entity::EntityMap;

const LENGTH_CAP: f64 = 0.4;
const LEXICAL_CAP: f64 = 0.3;
const ENTITY_DENSITY_CAP: f64 = 0.3;
/// Sentence length at which the length factor saturates before capping.
const LENGTH_NORMALIZER: f64 = 20.0;
/// Part-of-speech prefixes counted as content words.
const CONTENT_POS_PREFIXES: &[&str] = &["VB", "NN", "JJ"];

const BASE_CONFIDENCE: f64 = 0.7;
const CONFIDENCE_STEP: f64 = 0.1;
const STRONG_SENTIMENT: f64 = 0.5;
const HIGH_COMPLEXITY: f64 = 0.7;

/// Mean per-sentence complexity in `[0.0, 1.0]`; `0.0` for an empty document.
pub fn complexity_score(document: &AnnotatedText) -> f64 {
    if document.sentences.is_empty() {
        return 0.0;
    }

    let total: f64 = document.sentences.iter().map(sentence_complexity).sum();
    (total / document.sentences.len() as f64).clamp(0.0, 1.0)
}

fn sentence_complexity(sentence: &Sentence) -> f64 {
    let token_count = sentence.tokens.len();
    if token_count == 0 {
        return 0.0;
    }
    let count = token_count as f64;

    let content_words = sentence
        .tokens
        .iter()
        .filter(|t| CONTENT_POS_PREFIXES.iter().any(|p| t.pos_starts_with(p)))
        .count() as f64;
    let entity_tokens = sentence.tokens.iter().filter(|t| t.entity_tag().is_some()).count() as f64;

    (count / LENGTH_NORMALIZER).min(LENGTH_CAP)
        + (content_words / count).min(LEXICAL_CAP)
        + (entity_tokens / count).min(ENTITY_DENSITY_CAP)
}

/// Overall confidence in `[0.1, 1.0]` from the other analysis results.
pub fn overall_confidence(entities: &EntityMap, sentiment_score: f64, complexity: f64) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    if !entities.is_empty() {
        confidence += CONFIDENCE_STEP;
    }
    if sentiment_score.abs() > STRONG_SENTIMENT {
        confidence += CONFIDENCE_STEP;
    }
    if complexity > HIGH_COMPLEXITY {
        confidence -= CONFIDENCE_STEP;
    }
    confidence.clamp(0.1, 1.0)
}
