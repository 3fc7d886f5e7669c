//! End-to-end tests for the analysis pipeline over annotated input.

use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use autoassist_nlp::{
    keys, AnnotatedText, Analyzer, IntentCode, NluEngine, NluResult, PreAnnotated,
    RandomSelector, ResponseTemplates, SeededSelector, Sentence, Sentiment, Token,
};

const WORDS: &[&str] = &[
    "Hello", "hi", "I", "need", "my", "2019", "Honda", "Civic", "problem", "yes", "no",
    "What", "Sarah", "Connor", "the", "brakes", "please", "Toyota", "1999", ",", "?",
];
const POS_TAGS: &[&str] = &["NNP", "NN", "VB", "VBZ", "JJ", "CD", "WP", "PRP", "DT", "UH"];
const NER_TAGS: &[&str] = &["O", "PERSON", "ORGANIZATION", "DATE", "LOCATION"];

fn token_strategy() -> impl Strategy<Value = Token> {
    (
        prop::sample::select(WORDS),
        prop::option::of(prop::sample::select(POS_TAGS)),
        prop::option::of(prop::sample::select(NER_TAGS)),
    )
        .prop_map(|(text, pos, ner)| Token::new(text, pos, ner))
}

fn sentence_strategy() -> impl Strategy<Value = Sentence> {
    (
        prop::collection::vec(token_strategy(), 0..25),
        prop::option::of(0u8..7),
    )
        .prop_map(|(tokens, sentiment)| Sentence { tokens, sentiment })
}

fn document_strategy() -> impl Strategy<Value = AnnotatedText> {
    prop::collection::vec(sentence_strategy(), 0..5).prop_map(|sentences| {
        let text = sentences
            .iter()
            .flat_map(|s| s.tokens.iter().map(|t| t.text.as_str()))
            .collect::<Vec<_>>()
            .join(" ");
        AnnotatedText::new(text, sentences)
    })
}

fn without_reply(mut result: NluResult) -> NluResult {
    result.suggested_response.clear();
    result.processing_time = Duration::ZERO;
    result
}

/// Property: scores stay within their documented ranges for any input.
#[test]
fn prop_scores_stay_in_range() {
    let analyzer = Analyzer::default();
    proptest!(|(document in document_strategy())| {
        let result = analyzer.analyze(&document);

        prop_assert!((0.0..=1.0).contains(&result.complexity_score));
        prop_assert!((0.1..=1.0).contains(&result.overall_confidence));
        prop_assert!((-1.0..=1.0).contains(&result.sentiment_score));
        prop_assert_eq!(result.intent_confidences.len(), 1);
        prop_assert_eq!(result.intent_confidences.get(&result.intent), Some(&0.7));
    });
}

/// Property: analysing the same input twice only changes the chosen template.
#[test]
fn prop_analysis_is_idempotent() {
    let analyzer = Analyzer::new(ResponseTemplates::builtin(), Arc::new(RandomSelector));
    let templates = ResponseTemplates::builtin();
    proptest!(|(document in document_strategy())| {
        let first = analyzer.analyze(&document);
        let second = analyzer.analyze(&document);

        let reply = second.suggested_response.clone();
        prop_assert_eq!(without_reply(first), without_reply(second.clone()));

        let table = templates
            .get(second.intent)
            .or_else(|| templates.get(IntentCode::Unknown))
            .unwrap();
        prop_assert!(
            table.iter().any(|t| reply.starts_with(t.as_str())),
            "reply {:?} not from the {} table", reply, second.intent
        );
    });
}

/// Property: the same seed gives the same reply.
#[test]
fn prop_seeded_selection_is_reproducible() {
    proptest!(|(document in document_strategy(), seed in any::<u64>())| {
        let a = Analyzer::new(ResponseTemplates::builtin(), Arc::new(SeededSelector::new(seed)));
        let b = Analyzer::new(ResponseTemplates::builtin(), Arc::new(SeededSelector::new(seed)));

        prop_assert_eq!(
            a.analyze(&document).suggested_response,
            b.analyze(&document).suggested_response
        );
    });
}

#[test]
fn test_person_span_is_merged() {
    let document = AnnotatedText::new(
        "John Smith is here",
        vec![Sentence::from_tagged(&[
            ("John", "NNP", "PERSON"),
            ("Smith", "NNP", "PERSON"),
            ("is", "VBZ", "O"),
            ("here", "RB", "O"),
        ])],
    );

    let result = Analyzer::default().analyze(&document);
    assert_eq!(result.entities.get(keys::PERSON), Some("John Smith"));
    assert_eq!(result.customer_name.as_deref(), Some("John Smith"));
}

#[test]
fn test_introduction_without_person_entity() {
    let document = AnnotatedText::new(
        "My name is Sarah Connor",
        vec![Sentence::from_tagged(&[
            ("My", "PRP$", "O"),
            ("name", "NN", "O"),
            ("is", "VBZ", "O"),
            ("Sarah", "NNP", "O"),
            ("Connor", "NNP", "O"),
        ])],
    );

    let result = Analyzer::default().analyze(&document);
    assert_eq!(result.customer_name.as_deref(), Some("Sarah Connor"));
    assert_eq!(result.entities.get(keys::PERSON_NAME), Some("Sarah Connor"));
}

#[test]
fn test_vehicle_across_sentences_keeps_first_year() {
    let document = AnnotatedText::new(
        "I have a 2019 Honda Civic. It replaced a 2008 model.",
        vec![
            Sentence::from_tagged(&[
                ("I", "PRP", "O"),
                ("have", "VBP", "O"),
                ("a", "DT", "O"),
                ("2019", "CD", "DATE"),
                ("Honda", "NNP", "ORGANIZATION"),
                ("Civic", "NNP", "O"),
                (".", ".", "O"),
            ]),
            Sentence::from_tagged(&[
                ("It", "PRP", "O"),
                ("replaced", "VBD", "O"),
                ("a", "DT", "O"),
                ("2008", "CD", "DATE"),
                ("model", "NN", "O"),
                (".", ".", "O"),
            ]),
        ],
    );

    let result = Analyzer::default().analyze(&document);
    assert_eq!(result.entities.get(keys::VEHICLE_YEAR), Some("2019"));
    assert_eq!(result.entities.get(keys::VEHICLE_MAKE), Some("Honda"));
    assert_eq!(result.entities.get(keys::VEHICLE_MODEL), Some("Civic"));
    // span merging is last-write-wins
    assert_eq!(result.entities.get("date"), Some("2008"));
}

#[test]
fn test_negative_complaint_gets_complaint_reply() {
    let document = AnnotatedText::new(
        "I have a problem with my car",
        vec![Sentence::from_tagged(&[
            ("I", "PRP", "O"),
            ("have", "VBP", "O"),
            ("a", "DT", "O"),
            ("problem", "NN", "O"),
            ("with", "IN", "O"),
            ("my", "PRP$", "O"),
            ("car", "NN", "O"),
        ])
        .with_sentiment(1)],
    );

    let result = Analyzer::default().analyze(&document);
    assert_eq!(result.intent, IntentCode::Complaint);
    assert_eq!(result.sentiment, Sentiment::Negative);
    assert_eq!(result.sentiment_score, -0.5);
    assert!(ResponseTemplates::builtin()
        .get(IntentCode::Complaint)
        .unwrap()
        .contains(&result.suggested_response));
}

#[tokio::test]
async fn test_engine_with_pre_annotated_input() {
    let document = AnnotatedText::new(
        "",
        vec![Sentence::from_tagged(&[
            ("Can", "MD", "O"),
            ("you", "PRP", "O"),
            ("help", "VB", "O"),
            ("me", "PRP", "O"),
            ("?", ".", "O"),
        ])],
    );
    let engine = NluEngine::initialize(
        Arc::new(PreAnnotated::new(document)),
        Analyzer::default(),
    )
    .await;

    let result = engine.analyze("Can you help me?").await.unwrap();
    assert_eq!(result.intent, IntentCode::Question);

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["processingTime"].as_str().unwrap().ends_with("ms"));
}
