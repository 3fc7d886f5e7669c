//! The analysis pipeline over an already annotated utterance.
//!
//! Merging, extraction, sentiment, intent, scoring and response synthesis run
//! in a fixed order. A component that fails is logged and replaced by its
//! default so one bad sentence never aborts the whole analysis.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use autoassist_core::NlpConfig;

use crate::annotation::AnnotatedText;
use crate::customer::extract_customer_name;
use crate::entity::{keys, merge_entities, EntityMap, WriteMode};
use crate::error::Result;
use crate::intent::{classify_intent, Intent, IntentCode};
use crate::response::{
    synthesize_response, RandomSelector, ResponseTemplates, SeededSelector, TemplateSelector,
};
use crate::scoring::{complexity_score, overall_confidence};
use crate::sentiment::{map_sentiment, Sentiment};
use crate::vehicle::extract_vehicle_entities;

/// Structured understanding of one utterance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NluResult {
    pub entities: EntityMap,
    pub customer_name: Option<String>,
    pub sentiment: Sentiment,
    /// In `[-1.0, 1.0]`
    pub sentiment_score: f64,
    pub intent: IntentCode,
    pub intent_confidence: f64,
    /// Exactly one entry, the chosen intent
    pub intent_confidences: BTreeMap<IntentCode, f64>,
    /// In `[0.0, 1.0]`
    pub complexity_score: f64,
    /// In `[0.1, 1.0]`
    pub overall_confidence: f64,
    pub suggested_response: String,
    /// Wall-clock time spent, informational only
    #[serde(serialize_with = "serialize_millis")]
    pub processing_time: Duration,
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{}ms", duration.as_millis()))
}

/// Runs the pipeline with shared, read-only templates and selector.
#[derive(Clone)]
pub struct Analyzer {
    templates: Arc<ResponseTemplates>,
    selector: Arc<dyn TemplateSelector>,
}

impl Analyzer {
    pub fn new(templates: ResponseTemplates, selector: Arc<dyn TemplateSelector>) -> Self {
        Self {
            templates: Arc::new(templates),
            selector,
        }
    }

    /// Built-in templates picked at random.
    pub fn with_defaults() -> Self {
        Self::new(ResponseTemplates::builtin(), Arc::new(RandomSelector))
    }

    /// Loads templates from `templates_path` when set and seeds the selector
    /// when `template_seed` is set.
    pub fn from_config(config: &NlpConfig) -> Result<Self> {
        let templates = match &config.templates_path {
            Some(path) => ResponseTemplates::load(path)?,
            None => ResponseTemplates::builtin(),
        };
        let selector: Arc<dyn TemplateSelector> = match config.template_seed {
            Some(seed) => Arc::new(SeededSelector::new(seed)),
            None => Arc::new(RandomSelector),
        };
        Ok(Self::new(templates, selector))
    }

    pub fn templates(&self) -> &ResponseTemplates {
        &self.templates
    }

    pub fn analyze(&self, document: &AnnotatedText) -> NluResult {
        let started = Instant::now();

        let mut entities = merge_entities(document);
        extract_vehicle_entities(document, &mut entities);

        let customer_name = extract_customer_name(document, &entities);
        if let Some(name) = &customer_name {
            entities.write(keys::PERSON_NAME, name.as_str(), WriteMode::SetIfAbsent);
        }
        for (key, value) in entities.iter() {
            debug!(key, value, "Entity extracted");
        }

        let sentiment = map_sentiment(document);

        let intent = classify_intent(document).unwrap_or_else(|e| {
            warn!("Intent classification failed, using UNKNOWN: {}", e);
            Intent::unknown()
        });

        let complexity = complexity_score(document);
        let confidence = overall_confidence(&entities, sentiment.score, complexity);

        let suggested_response = synthesize_response(
            &self.templates,
            self.selector.as_ref(),
            intent.code,
            &entities,
            sentiment.label,
        );

        NluResult {
            customer_name,
            sentiment: sentiment.label,
            sentiment_score: sentiment.score,
            intent: intent.code,
            intent_confidence: intent.confidence,
            intent_confidences: intent.confidences(),
            complexity_score: complexity,
            overall_confidence: confidence,
            suggested_response,
            entities,
            processing_time: started.elapsed(),
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}
