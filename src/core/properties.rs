//! Java-properties-like files: `# comments`, blank lines and `key=value` pairs.
//!
//! The first `=` on a line is the delimiter and nothing is escaped. Reading
//! pairs is best effort: lines without `=` are kept as raw lines but never
//! produce an entry.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use indexmap::IndexMap;

use super::scanner::MessageMap;

/// One line of a property file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyLine {
    Blank(String),
    Comment(String),
    Pair { key: String, value: String },
    /// Any other line (no `=` or an empty key), kept verbatim.
    Other(String),
}

impl PropertyLine {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return PropertyLine::Blank(line.to_string());
        }
        if trimmed.starts_with('#') {
            return PropertyLine::Comment(line.to_string());
        }
        match split_pair(trimmed) {
            Some((key, value)) => PropertyLine::Pair {
                key: key.to_string(),
                value: value.to_string(),
            },
            None => PropertyLine::Other(line.to_string()),
        }
    }
}

/// Split `key=value` on the first `=`, trimming both sides.
///
/// Returns `None` when there is no `=` or the key is empty.
pub fn split_pair(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// An ordered sequence of property lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFile {
    pub lines: Vec<PropertyLine>,
}

impl PropertyFile {
    pub fn parse(content: &str) -> Self {
        let mut lines: Vec<PropertyLine> = content.split('\n').map(PropertyLine::parse).collect();
        // A trailing newline does not start another line.
        if content.ends_with('\n') {
            lines.pop();
        }
        Self { lines }
    }

    /// Read a property file, or `None` if it does not exist.
    pub fn read_if_exists(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read properties file: {}", path.display()))?;
        Ok(Some(Self::parse(&content)))
    }

    /// All `key=value` pairs in file order. A repeated key keeps its first
    /// position and its last value.
    pub fn entries(&self) -> MessageMap {
        let mut entries = IndexMap::new();
        for line in &self.lines {
            if let PropertyLine::Pair { key, value } = line {
                entries.insert(key.clone(), value.clone());
            }
        }
        entries
    }

    /// Render with one line per entry and a trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                PropertyLine::Blank(raw) | PropertyLine::Comment(raw) | PropertyLine::Other(raw) => {
                    out.push_str(raw)
                }
                PropertyLine::Pair { key, value } => {
                    out.push_str(key);
                    out.push('=');
                    out.push_str(value);
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Overlay `incoming` on `existing`: incoming values win, keys present only
/// in `existing` are kept in their original position, new keys are appended.
pub fn merge_entries(existing: &MessageMap, incoming: &MessageMap) -> MessageMap {
    let mut merged = existing.clone();
    for (key, value) in incoming {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
