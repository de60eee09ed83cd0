//! Key extraction pipeline for one source document.
//!
//! scan -> duplicate re-indexing (if confirmed) -> consolidation -> materialize.
//!
//! Everything here works on in-memory text. Nothing touches the file system,
//! so a declined final confirmation leaves every file as it was.

use anyhow::Result;
use tracing::{debug, info, warn};

use super::{
    confirm::Confirmer,
    consolidate::{ConsolidationMap, consolidate},
    duplicates::{KeyUpdateMap, find_duplicates, resolve},
    materialize::materialize,
    scanner::{MessageMap, scan},
};

pub const REINDEX_PROMPT: &str = "Duplicate keys found. Do you want to re-index the file?";

/// Messages and rewritten document ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedKeys {
    /// Final `key -> text` map for the key file.
    pub messages: MessageMap,
    /// Source document with `[msg:...]` tags re-indexed and consolidated,
    /// not yet materialized.
    pub document: String,
    /// Keys found more than once in the raw scan.
    pub duplicates: Vec<String>,
    /// Set when duplicates were re-indexed.
    pub reindexed: Option<KeyUpdateMap>,
    pub consolidated: ConsolidationMap,
}

impl PreparedKeys {
    /// The document with every span replaced by its `~[text:KEY]` reference.
    pub fn materialized_document(&self) -> String {
        materialize(&self.document)
    }

    pub fn document_changed(&self, original: &str) -> bool {
        self.document != original
    }
}

pub fn prepare_keys(document: &str, confirmer: &mut dyn Confirmer) -> Result<PreparedKeys> {
    let mut extraction = scan(document);
    let mut document = document.to_string();
    debug!("extracted {} message key(s)", extraction.len());

    let duplicates = find_duplicates(&extraction);
    let mut reindexed = None;

    if !duplicates.is_empty() {
        warn!("duplicate keys found: {}", duplicates.join(", "));
        if confirmer.confirm(REINDEX_PROMPT) {
            let result = resolve(&document, &extraction.messages, &duplicates);
            document = result.document;
            // Scan again so every generated key carries its own occurrence's text.
            extraction = scan(&document);
            info!("re-indexed {} duplicate key(s)", result.updates.len());
            reindexed = Some(result.updates);
        } else {
            info!("re-indexing declined, continuing with duplicated keys");
        }
    }

    let consolidated = consolidate(&extraction.messages, &document)?;
    if !consolidated.remapped.is_empty() {
        info!(
            "consolidated {} key(s) sharing identical text",
            consolidated.remapped.len()
        );
    }

    Ok(PreparedKeys {
        messages: consolidated.messages,
        document: consolidated.document,
        duplicates,
        reindexed,
        consolidated: consolidated.remapped,
    })
}
