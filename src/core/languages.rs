//! Target language list (`languages.json`).

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::locale;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageEntry {
    #[serde(rename = "Language Code")]
    pub code: String,
    #[serde(rename = "Language")]
    pub name: String,
}

impl LanguageEntry {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

pub fn default_languages() -> Vec<LanguageEntry> {
    vec![
        LanguageEntry::new("en", "English"),
        LanguageEntry::new("es", "Spanish"),
        LanguageEntry::new("hi", "Hindi"),
    ]
}

/// Load the language list, writing the defaults first if the file is missing.
pub fn load_or_create(path: &Path) -> Result<Vec<LanguageEntry>> {
    if !path.exists() {
        warn!("{} not found, creating it with default values", path.display());
        write_languages(path, &default_languages())?;
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read languages file: {}", path.display()))?;
    let languages: Vec<LanguageEntry> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse languages file: {}", path.display()))?;

    for language in &languages {
        if locale::language_name(&language.code).is_none() {
            warn!(
                "language code \"{}\" ({}) is not a known translation language",
                language.code, language.name
            );
        }
    }
    info!("loaded {} language(s) from {}", languages.len(), path.display());
    Ok(languages)
}

pub fn write_languages(path: &Path, languages: &[LanguageEntry]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(languages).context("Failed to serialize languages")?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("Failed to write languages file: {}", path.display()))
}

/// Resolve a user-supplied target to an ISO code.
///
/// Accepts a code from the list, a language name from the list, or any code
/// or name from the ISO table.
pub fn resolve_code(languages: &[LanguageEntry], target: &str) -> Option<String> {
    languages
        .iter()
        .find(|l| l.code == target || l.name.eq_ignore_ascii_case(target))
        .map(|l| l.code.clone())
        .or_else(|| locale::language_name(target).map(|_| target.to_string()))
        .or_else(|| locale::language_code(target).map(str::to_string))
}
