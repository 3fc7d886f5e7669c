//! # AutoAssist NLP
//!
//! Natural language understanding for the AutoAssist service desk.
//!
//! This crate turns one customer utterance, already tokenized and tagged by an
//! [`Annotator`], into an [`NluResult`]: entities, customer name, sentiment,
//! intent, complexity and confidence scores, and a suggested reply.
//!
//! ## Features
//!
//! - **Entity Merging**: Collapses contiguous same-tag tokens into entity spans
//! - **Customer and Vehicle Extraction**: Names, model years, makes and models
//! - **Intent Classification**: Ordered keyword and part-of-speech rule cascade
//! - **Response Synthesis**: Intent-aware templates with an injectable selector
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use autoassist_core::AnnotatorConfig;
//! use autoassist_nlp::{Analyzer, CoreNlpClient, NluEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let annotator = CoreNlpClient::new(&AnnotatorConfig::default())?;
//!     let engine = NluEngine::initialize(Arc::new(annotator), Analyzer::default()).await;
//!
//!     let result = engine.analyze("Hi, I'm Sarah. My 2019 Honda Civic won't start.").await?;
//!     println!("Intent: {}, reply: {}", result.intent, result.suggested_response);
//!
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod annotation;
pub mod corenlp;
pub mod customer;
pub mod engine;
pub mod entity;
pub mod error;
pub mod intent;
pub mod response;
pub mod scoring;
pub mod sentiment;
pub mod vehicle;

pub use analyzer::{Analyzer, NluResult};
pub use annotation::{AnnotatedText, Annotator, PreAnnotated, Sentence, Token};
pub use corenlp::{parse_corenlp_json, CoreNlpClient};
pub use customer::extract_customer_name;
pub use engine::{EngineStatus, NluEngine};
pub use entity::{keys, merge_entities, EntityMap, WriteMode};
pub use error::{NlpError, Result};
pub use intent::{classify_intent, Intent, IntentCode};
pub use response::{
    synthesize_response, RandomSelector, ResponseTemplates, SeededSelector, TemplateSelector,
    DEFAULT_RESPONSE,
};
pub use scoring::{complexity_score, overall_confidence};
pub use sentiment::{map_sentiment, Sentiment, SentimentReading};
pub use vehicle::extract_vehicle_entities;
