//! Entity map and entity-span merging.
//!
//! Contiguous tokens sharing the same named-entity tag are collapsed into a
//! single span and stored under the lower-cased tag.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

use crate::annotation::{AnnotatedText, Sentence};

/// Well-known keys written by the extractors.
pub mod keys {
    pub const PERSON: &str = "person";
    pub const PERSON_NAME: &str = "person_name";
    pub const VEHICLE_YEAR: &str = "vehicle_year";
    pub const VEHICLE_MAKE: &str = "vehicle_make";
    pub const VEHICLE_MODEL: &str = "vehicle_model";
}

/// How a write treats an existing value under the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Last write wins (span merging).
    Overwrite,
    /// First write wins (vehicle and name extraction).
    SetIfAbsent,
}

/// Mapping from lower-case entity type to a single value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityMap(BTreeMap<String, String>);

impl EntityMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `value` under the lower-cased `key`. Returns whether the map changed.
    pub fn write(&mut self, key: &str, value: impl Into<String>, mode: WriteMode) -> bool {
        let key = key.to_lowercase();
        match mode {
            WriteMode::Overwrite => {
                self.0.insert(key, value.into());
                true
            }
            WriteMode::SetIfAbsent => {
                if self.0.contains_key(&key) {
                    false
                } else {
                    self.0.insert(key, value.into());
                    true
                }
            }
        }
    }

    /// Looks up a value by its lower-case key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for EntityMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = EntityMap::new();
        for (key, value) in iter {
            map.write(key.as_ref(), value, WriteMode::Overwrite);
        }
        map
    }
}

/// Collapses contiguous same-tag token runs into entity spans.
///
/// Later spans overwrite earlier ones of the same type, across sentences too.
pub fn merge_entities(document: &AnnotatedText) -> EntityMap {
    let mut entities = EntityMap::new();
    for sentence in &document.sentences {
        merge_sentence(sentence, &mut entities);
    }
    entities
}

fn merge_sentence(sentence: &Sentence, entities: &mut EntityMap) {
    let mut current: Option<(&str, Vec<&str>)> = None;

    for token in &sentence.tokens {
        let Some(tag) = token.entity_tag() else {
            flush(current.take(), entities);
            continue;
        };

        let continues_span = matches!(&current, Some((current_tag, _)) if *current_tag == tag);
        if continues_span {
            if let Some((_, words)) = current.as_mut() {
                words.push(token.text.as_str());
            }
        } else {
            flush(current.take(), entities);
            current = Some((tag, vec![token.text.as_str()]));
        }
    }

    flush(current, entities);
}

fn flush(span: Option<(&str, Vec<&str>)>, entities: &mut EntityMap) {
    let Some((tag, words)) = span else {
        return;
    };
    let value = words.join(" ");
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    trace!(tag, value, "Merged entity span");
    entities.write(tag, value, WriteMode::Overwrite);
}
