//! Duplicate key detection and re-indexing.
//!
//! A key that appears in more than one marker span collapses to a single map
//! slot while scanning. Re-indexing gives every occurrence its own key
//! (`KEY_0`, `KEY_1`, ...) in both the document and the message map. Suffixes
//! already used by another key in the document are skipped.
//!
//! All generated keys receive the one text the collapsed map slot held. The
//! map cannot know what the earlier occurrences said; callers that need
//! per-occurrence text must scan the re-indexed document again.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::scanner::{Extraction, MessageMap, OPEN_MARKER};

/// `old_key -> [old_key_0, old_key_1, ...]`, one new key per occurrence.
pub type KeyUpdateMap = IndexMap<String, Vec<String>>;

/// Document and messages after re-indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reindexed {
    pub document: String,
    pub messages: MessageMap,
    pub updates: KeyUpdateMap,
}

/// Keys that occurred more than once in the raw scan, in first-appearance order.
pub fn find_duplicates(extraction: &Extraction) -> Vec<String> {
    extraction
        .occurrences
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(key, _)| key.clone())
        .collect()
}

/// Rewrite every occurrence of each duplicate key to a unique suffixed key.
pub fn resolve(document: &str, messages: &MessageMap, duplicate_keys: &[String]) -> Reindexed {
    let mut document = document.to_string();
    let mut updates = KeyUpdateMap::new();
    let mut taken: HashSet<String> = messages.keys().cloned().collect();

    for key in duplicate_keys {
        let (rewritten, new_keys) = reindex_key(&document, key, &mut taken);
        if !new_keys.is_empty() {
            document = rewritten;
            updates.insert(key.clone(), new_keys);
        }
    }

    let messages = apply_updates(messages, &updates);
    Reindexed {
        document,
        messages,
        updates,
    }
}

fn reindex_key(document: &str, key: &str, taken: &mut HashSet<String>) -> (String, Vec<String>) {
    let tag = format!("{OPEN_MARKER}{key}]");
    let mut rewritten = String::with_capacity(document.len() + 8);
    let mut new_keys = Vec::new();
    let mut rest = document;
    let mut index = 0;

    while let Some(pos) = rest.find(&tag) {
        let new_key = loop {
            let candidate = format!("{key}_{index}");
            index += 1;
            if taken.insert(candidate.clone()) {
                break candidate;
            }
        };
        rewritten.push_str(&rest[..pos]);
        rewritten.push_str(OPEN_MARKER);
        rewritten.push_str(&new_key);
        rewritten.push(']');
        rest = &rest[pos + tag.len()..];
        new_keys.push(new_key);
    }
    rewritten.push_str(rest);

    (rewritten, new_keys)
}

/// Replace each re-indexed key in place by its generated keys.
fn apply_updates(messages: &MessageMap, updates: &KeyUpdateMap) -> MessageMap {
    let mut result = MessageMap::with_capacity(messages.len());
    for (key, text) in messages {
        match updates.get(key) {
            Some(new_keys) => {
                for new_key in new_keys {
                    result.insert(new_key.clone(), text.clone());
                }
            }
            None => {
                result.insert(key.clone(), text.clone());
            }
        }
    }
    result
}
