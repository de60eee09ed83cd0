use std::collections::HashMap;

use super::{Translate, TranslateError};

const SPANISH: &[(&str, &str)] = &[
    ("Hello", "Hola"),
    ("Goodbye", "Adiós"),
    ("Welcome", "Bienvenido"),
    ("Yes", "Sí"),
    ("No", "No"),
    ("Thank you", "Gracias"),
    ("Please", "Por favor"),
    ("Save", "Guardar"),
    ("Cancel", "Cancelar"),
    ("Submit", "Enviar"),
];

const HINDI: &[(&str, &str)] = &[
    ("Hello", "नमस्ते"),
    ("Goodbye", "अलविदा"),
    ("Welcome", "स्वागत है"),
    ("Yes", "हाँ"),
    ("No", "नहीं"),
    ("Thank you", "धन्यवाद"),
    ("Please", "कृपया"),
    ("Save", "सहेजें"),
    ("Cancel", "रद्द करें"),
    ("Submit", "जमा करें"),
];

const FRENCH: &[(&str, &str)] = &[
    ("Hello", "Bonjour"),
    ("Goodbye", "Au revoir"),
    ("Welcome", "Bienvenue"),
    ("Yes", "Oui"),
    ("No", "Non"),
    ("Thank you", "Merci"),
    ("Please", "S'il vous plaît"),
    ("Save", "Enregistrer"),
    ("Cancel", "Annuler"),
    ("Submit", "Soumettre"),
];

const GERMAN: &[(&str, &str)] = &[
    ("Hello", "Hallo"),
    ("Goodbye", "Auf Wiedersehen"),
    ("Welcome", "Willkommen"),
    ("Yes", "Ja"),
    ("No", "Nein"),
    ("Thank you", "Danke"),
    ("Please", "Bitte"),
    ("Save", "Speichern"),
    ("Cancel", "Abbrechen"),
    ("Submit", "Absenden"),
];

/// Known phrase translations for a handful of languages.
///
/// Lookups are exact on the trimmed phrase.
#[derive(Debug, Clone, Default)]
pub struct FallbackDictionary {
    phrases: HashMap<String, HashMap<String, String>>,
}

impl FallbackDictionary {
    /// Empty dictionary: every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut dictionary = Self::default();
        for (language, table) in [("es", SPANISH), ("hi", HINDI), ("fr", FRENCH), ("de", GERMAN)] {
            for (phrase, translation) in table {
                dictionary.insert(language, phrase, translation);
            }
        }
        dictionary
    }

    pub fn insert(&mut self, language: &str, phrase: &str, translation: &str) {
        self.phrases
            .entry(language.to_string())
            .or_default()
            .insert(phrase.to_string(), translation.to_string());
    }

    pub fn lookup(&self, text: &str, language: &str) -> Option<&str> {
        self.phrases
            .get(language)
            .and_then(|table| table.get(text.trim()))
            .map(String::as_str)
    }
}

impl Translate for FallbackDictionary {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        self.lookup(text, target_language)
            .map(str::to_string)
            .ok_or_else(|| TranslateError::Unavailable {
                text: text.to_string(),
                language: target_language.to_string(),
            })
    }
}
