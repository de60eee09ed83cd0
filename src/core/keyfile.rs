//! Source-locale key file writer.
//!
//! A key file is named `<source base name>.<locale>.properties`. It starts with
//! a two-line header and holds one `key=value` line per message. Writing merges
//! into whatever the file already contains, so keys from earlier runs are
//! never lost.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::debug;

use super::{
    locale::Locale,
    plugin::PluginInfo,
    properties::{PropertyFile, PropertyLine, merge_entries},
    scanner::MessageMap,
};

/// Outcome of writing one key file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFileStats {
    /// Keys written in total.
    pub written: usize,
    /// Keys kept from the previous file that the new extraction did not have.
    pub retained: usize,
    /// Keys that did not exist in the previous file.
    pub added: usize,
}

pub fn key_file_name(source_base_name: &str, locale: &Locale) -> String {
    format!("{source_base_name}.{locale}.properties")
}

pub fn key_file_path(dir: &Path, source_base_name: &str, locale: &Locale) -> PathBuf {
    dir.join(key_file_name(source_base_name, locale))
}

/// Base name of a source document without its extension.
pub fn source_base_name(source: &Path) -> String {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn header_lines(plugin: &PluginInfo, source_base_name: &str, locale: &Locale) -> [String; 2] {
    [
        format!("# {} - Version: {}", plugin.name, plugin.version),
        format!("# MessageKeys for: {source_base_name} ({locale})"),
    ]
}

/// Build the key file content from already-merged entries.
pub fn render_key_file(
    plugin: &PluginInfo,
    source_base_name: &str,
    locale: &Locale,
    entries: &MessageMap,
) -> String {
    let mut lines: Vec<PropertyLine> = header_lines(plugin, source_base_name, locale)
        .into_iter()
        .map(PropertyLine::Comment)
        .collect();
    lines.push(PropertyLine::Blank(String::new()));
    lines.extend(entries.iter().map(|(key, value)| PropertyLine::Pair {
        key: key.clone(),
        value: value.clone(),
    }));
    PropertyFile { lines }.render()
}

pub struct KeyFileWriter<'a> {
    plugin: &'a PluginInfo,
}

impl<'a> KeyFileWriter<'a> {
    pub fn new(plugin: &'a PluginInfo) -> Self {
        Self { plugin }
    }

    /// Merge `messages` into the key file at `destination` and rewrite it.
    pub fn write(
        &self,
        destination: &Path,
        source_base_name: &str,
        locale: &Locale,
        messages: &MessageMap,
    ) -> Result<KeyFileStats> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let existing = PropertyFile::read_if_exists(destination)?
            .map(|file| file.entries())
            .unwrap_or_default();
        let merged = merge_entries(&existing, messages);

        let stats = KeyFileStats {
            written: merged.len(),
            retained: existing.keys().filter(|k| !messages.contains_key(*k)).count(),
            added: messages.keys().filter(|k| !existing.contains_key(*k)).count(),
        };
        debug!(
            destination = %destination.display(),
            written = stats.written,
            retained = stats.retained,
            added = stats.added,
            "writing key file"
        );

        let content = render_key_file(self.plugin, source_base_name, locale, &merged);
        fs::write(destination, content)
            .with_context(|| format!("Failed to write file: {}", destination.display()))?;

        Ok(stats)
    }
}
