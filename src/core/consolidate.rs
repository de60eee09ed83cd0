//! Value consolidation: keys with identical text collapse onto one key.
//!
//! The first key to own a text names the consolidated key,
//! `<first_key>_multi`. Every owner of that text, the first one included, is
//! remapped to it, so exactly one key holds the text afterwards. A third or
//! later owner collapses onto the same `_multi` key rather than chaining.
//! When `<first_key>_multi` already names a key with other text, the next free
//! `<first_key>_multi_<n>` is used instead.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use regex::{Captures, Regex};

use super::scanner::{MessageMap, OPEN_MARKER};

pub const MULTI_SUFFIX: &str = "_multi";

/// `old_key -> new_key` for every remapped key.
pub type ConsolidationMap = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consolidated {
    pub messages: MessageMap,
    pub document: String,
    pub remapped: ConsolidationMap,
}

/// Build the remapping for all texts owned by more than one key.
pub fn consolidation_map(messages: &MessageMap) -> ConsolidationMap {
    let mut owners: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for (key, text) in messages {
        owners.entry(text.as_str()).or_default().push(key.as_str());
    }

    let mut taken: HashSet<String> = messages.keys().cloned().collect();
    let mut targets: HashMap<&str, String> = HashMap::new();
    for (text, keys) in owners.iter().filter(|(_, keys)| keys.len() > 1) {
        let target = multi_key(keys, &mut taken);
        targets.insert(*text, target);
    }

    messages
        .iter()
        .filter_map(|(key, text)| {
            let target = targets.get(text.as_str())?;
            Some((key.clone(), target.clone()))
        })
        .collect()
}

/// `<first>_multi`, or the first `<first>_multi_<n>` not used by another key.
fn multi_key(owners: &[&str], taken: &mut HashSet<String>) -> String {
    let base = format!("{}{MULTI_SUFFIX}", owners[0]);
    let mut candidate = base.clone();
    let mut n = 0;
    while taken.contains(&candidate) && !owners.contains(&candidate.as_str()) {
        n += 1;
        candidate = format!("{base}_{n}");
    }
    taken.insert(candidate.clone());
    candidate
}

/// Merge keys sharing identical text and rewrite the document's tag references.
pub fn consolidate(messages: &MessageMap, document: &str) -> Result<Consolidated> {
    let remapped = consolidation_map(messages);

    let mut consolidated = MessageMap::with_capacity(messages.len());
    for (key, text) in messages {
        let key = remapped.get(key).unwrap_or(key);
        if !consolidated.contains_key(key) {
            consolidated.insert(key.clone(), text.clone());
        }
    }

    let document = replace_tag_references(document, &remapped)?;

    Ok(Consolidated {
        messages: consolidated,
        document,
        remapped,
    })
}

/// Replace every `[msg:old]` with `[msg:new]` for each remapped key, in one pass.
pub fn replace_tag_references(document: &str, remapped: &ConsolidationMap) -> Result<String> {
    if remapped.is_empty() {
        return Ok(document.to_string());
    }

    let alternatives: Vec<String> = remapped.keys().map(|key| regex::escape(key)).collect();
    let pattern = format!(r"{}({})\]", regex::escape(OPEN_MARKER), alternatives.join("|"));
    let re = Regex::new(&pattern).context("Failed to build tag reference pattern")?;

    Ok(re
        .replace_all(document, |caps: &Captures<'_>| {
            let old = &caps[1];
            let new = remapped.get(old).map(String::as_str).unwrap_or(old);
            format!("{OPEN_MARKER}{new}]")
        })
        .into_owned())
}
