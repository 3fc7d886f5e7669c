//! Vehicle year/make/model extraction.
//!
//! Two patterns are recognized: `YEAR Make Model` (e.g. "2019 Honda Civic")
//! and `Make Model` for a known make. The first value found for each key wins.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::annotation::{AnnotatedText, Token};
use crate::entity::{keys, EntityMap, WriteMode};

/// Makes recognized without a preceding model year.
pub const KNOWN_MAKES: &[&str] = &[
    "Honda",
    "Toyota",
    "Ford",
    "Chevrolet",
    "Nissan",
    "BMW",
    "Mercedes",
    "Audi",
    "Volkswagen",
    "Hyundai",
    "Kia",
    "Subaru",
    "Mazda",
    "Jeep",
    "Tesla",
];

lazy_static! {
    static ref MODEL_YEAR: Regex = Regex::new(r"^(19|20)[0-9]{2}$").unwrap();
}

/// Adds `vehicle_year`, `vehicle_make` and `vehicle_model` entries without
/// overwriting any that are already present.
pub fn extract_vehicle_entities(document: &AnnotatedText, entities: &mut EntityMap) {
    for sentence in &document.sentences {
        let tokens = sentence.tokens.as_slice();
        for (i, token) in tokens.iter().enumerate() {
            if is_model_year(token) {
                set(entities, keys::VEHICLE_YEAR, token);
                if let Some(make) = tokens.get(i + 1).filter(|t| is_proper_name(t)) {
                    set(entities, keys::VEHICLE_MAKE, make);
                    if let Some(model) = tokens.get(i + 2).filter(|t| is_proper_name(t)) {
                        set(entities, keys::VEHICLE_MODEL, model);
                    }
                }
            } else if is_proper_name(token) && KNOWN_MAKES.contains(&token.text.as_str()) {
                set(entities, keys::VEHICLE_MAKE, token);
                if let Some(model) = tokens.get(i + 1).filter(|t| is_proper_name(t)) {
                    set(entities, keys::VEHICLE_MODEL, model);
                }
            }
        }
    }
}

fn is_model_year(token: &Token) -> bool {
    (token.pos_is("CD") || token.pos_is("NNP")) && MODEL_YEAR.is_match(&token.text)
}

fn is_proper_name(token: &Token) -> bool {
    token.pos_is("NNP") && token.starts_uppercase()
}

fn set(entities: &mut EntityMap, key: &str, token: &Token) {
    if entities.write(key, token.text.as_str(), WriteMode::SetIfAbsent) {
        trace!(key, value = %token.text, "Vehicle entity extracted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Sentence;

    fn extract(sentences: Vec<Sentence>) -> EntityMap {
        let mut entities = EntityMap::new();
        extract_vehicle_entities(&AnnotatedText::new("", sentences), &mut entities);
        entities
    }

    #[test]
    fn test_year_make_model() {
        let entities = extract(vec![Sentence::from_tagged(&[
            ("I", "PRP", "O"),
            ("have", "VBP", "O"),
            ("a", "DT", "O"),
            ("2019", "CD", "DATE"),
            ("Honda", "NNP", "ORGANIZATION"),
            ("Civic", "NNP", "O"),
        ])]);

        assert_eq!(entities.get(keys::VEHICLE_YEAR), Some("2019"));
        assert_eq!(entities.get(keys::VEHICLE_MAKE), Some("Honda"));
        assert_eq!(entities.get(keys::VEHICLE_MODEL), Some("Civic"));
    }

    #[test]
    fn test_first_year_wins() {
        let entities = extract(vec![
            Sentence::from_tagged(&[
                ("My", "PRP$", "O"),
                ("2019", "CD", "DATE"),
                ("car", "NN", "O"),
            ]),
            Sentence::from_tagged(&[
                ("Not", "RB", "O"),
                ("the", "DT", "O"),
                ("2008", "CD", "DATE"),
            ]),
        ]);

        assert_eq!(entities.get(keys::VEHICLE_YEAR), Some("2019"));
        assert!(!entities.contains_key(keys::VEHICLE_MAKE));
    }

    #[test]
    fn test_known_make_without_year() {
        let entities = extract(vec![Sentence::from_tagged(&[
            ("my", "PRP$", "O"),
            ("Toyota", "NNP", "ORGANIZATION"),
            ("Camry", "NNP", "O"),
            ("stalls", "VBZ", "O"),
        ])]);

        assert_eq!(entities.get(keys::VEHICLE_MAKE), Some("Toyota"));
        assert_eq!(entities.get(keys::VEHICLE_MODEL), Some("Camry"));
        assert!(!entities.contains_key(keys::VEHICLE_YEAR));
    }

    #[test]
    fn test_unknown_make_without_year_is_ignored() {
        let entities = extract(vec![Sentence::from_tagged(&[
            ("Lada", "NNP", "O"),
            ("Niva", "NNP", "O"),
        ])]);

        assert!(entities.is_empty());
    }

    #[test]
    fn test_year_requires_numeric_pos_or_proper_noun() {
        let entities = extract(vec![Sentence::from_tagged(&[
            ("2019", "NN", "O"),
            ("Honda", "NNP", "O"),
        ])]);

        assert!(!entities.contains_key(keys::VEHICLE_YEAR));
        // The make is still picked up by the make-first pattern.
        assert_eq!(entities.get(keys::VEHICLE_MAKE), Some("Honda"));
    }

    #[test]
    fn test_year_tagged_as_proper_noun() {
        let entities = extract(vec![Sentence::from_tagged(&[
            ("2019", "NNP", "O"),
            ("Subaru", "NNP", "O"),
            ("Outback", "NNP", "O"),
        ])]);

        assert_eq!(entities.get(keys::VEHICLE_YEAR), Some("2019"));
        assert_eq!(entities.get(keys::VEHICLE_MAKE), Some("Subaru"));
        assert_eq!(entities.get(keys::VEHICLE_MODEL), Some("Outback"));
    }

    #[test]
    fn test_lowercase_proper_noun_after_year_is_not_a_make() {
        let entities = extract(vec![Sentence::from_tagged(&[
            ("2019", "CD", "DATE"),
            ("honda", "NNP", "O"),
            ("Civic", "NNP", "O"),
        ])]);

        assert_eq!(entities.get(keys::VEHICLE_YEAR), Some("2019"));
        assert!(!entities.contains_key(keys::VEHICLE_MAKE));
        // The model is only looked for after an accepted make.
        assert!(!entities.contains_key(keys::VEHICLE_MODEL));
    }

    #[test]
    fn test_out_of_range_year() {
        let entities = extract(vec![Sentence::from_tagged(&[
            ("1899", "CD", "DATE"),
            ("20190", "CD", "NUMBER"),
        ])]);

        assert!(entities.is_empty());
    }

    #[test]
    fn test_existing_entries_are_not_overwritten() {
        let mut entities = EntityMap::new();
        entities.write(keys::VEHICLE_MAKE, "Ford", WriteMode::Overwrite);
        let document = AnnotatedText::new(
            "",
            vec![Sentence::from_tagged(&[("Kia", "NNP", "O"), ("Soul", "NNP", "O")])],
        );

        extract_vehicle_entities(&document, &mut entities);

        assert_eq!(entities.get(keys::VEHICLE_MAKE), Some("Ford"));
        assert_eq!(entities.get(keys::VEHICLE_MODEL), Some("Soul"));
    }

    #[test]
    fn test_make_list_is_case_sensitive() {
        let entities = extract(vec![Sentence::from_tagged(&[("HONDA", "NNP", "O")])]);
        assert!(entities.is_empty());
    }
}
