//! Sentiment-class mapping.
//!
//! The annotator scores each sentence on a five-point scale
//! (0 = very negative .. 4 = very positive). Only the first sentence is
//! consulted; later sentences do not move the label.

use serde::{Deserialize, Serialize};

use crate::annotation::AnnotatedText;

/// Coarse sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label plus score in `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub label: Sentiment,
    pub score: f64,
}

impl SentimentReading {
    pub const NEUTRAL: Self = Self {
        label: Sentiment::Neutral,
        score: 0.0,
    };

    /// Maps a five-point class; anything outside `0..=4` reads as neutral.
    pub fn from_class(class: Option<u8>) -> Self {
        let (label, score) = match class {
            Some(0) => (Sentiment::Negative, -1.0),
            Some(1) => (Sentiment::Negative, -0.5),
            Some(3) => (Sentiment::Positive, 0.5),
            Some(4) => (Sentiment::Positive, 1.0),
            _ => return Self::NEUTRAL,
        };
        Self { label, score }
    }
}

impl Default for SentimentReading {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Sentiment of the first sentence, neutral when there is none.
pub fn map_sentiment(document: &AnnotatedText) -> SentimentReading {
    SentimentReading::from_class(document.first_sentence().and_then(|s| s.sentiment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Sentence;

    #[test]
    fn test_class_table() {
        let expected = [
            (0, Sentiment::Negative, -1.0),
            (1, Sentiment::Negative, -0.5),
            (2, Sentiment::Neutral, 0.0),
            (3, Sentiment::Positive, 0.5),
            (4, Sentiment::Positive, 1.0),
        ];
        for (class, label, score) in expected {
            let reading = SentimentReading::from_class(Some(class));
            assert_eq!(reading.label, label, "class {class}");
            assert_eq!(reading.score, score, "class {class}");
        }
    }

    #[test]
    fn test_missing_or_invalid_class_is_neutral() {
        assert_eq!(SentimentReading::from_class(None), SentimentReading::NEUTRAL);
        assert_eq!(SentimentReading::from_class(Some(5)), SentimentReading::NEUTRAL);
        assert_eq!(map_sentiment(&AnnotatedText::default()), SentimentReading::NEUTRAL);
    }

    #[test]
    fn test_only_first_sentence_counts() {
        let document = AnnotatedText::new(
            "Great service. Terrible coffee.",
            vec![
                Sentence::from_tagged(&[("Great", "JJ", "O")]).with_sentiment(4),
                Sentence::from_tagged(&[("Terrible", "JJ", "O")]).with_sentiment(0),
            ],
        );

        let reading = map_sentiment(&document);
        assert_eq!(reading.label, Sentiment::Positive);
        assert_eq!(reading.score, 1.0);
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(serde_json::to_string(&Sentiment::Negative).unwrap(), "\"negative\"");
        assert_eq!(Sentiment::Positive.to_string(), "positive");
    }
}
