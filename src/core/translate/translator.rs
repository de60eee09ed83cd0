use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, info, warn};

use super::{FallbackDictionary, Translate, TranslateError};
use crate::core::{
    locale::Locale,
    progress::ProgressTracker,
    properties::{PropertyFile, PropertyLine},
};

/// Randomized pause between successive translation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestDelay {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for RequestDelay {
    fn default() -> Self {
        Self {
            min_ms: 1000,
            max_ms: 3000,
        }
    }
}

impl RequestDelay {
    pub fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    pub fn sample(&self) -> Duration {
        let ms = if self.max_ms > self.min_ms {
            fastrand::u64(self.min_ms..=self.max_ms)
        } else {
            self.min_ms
        };
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone)]
pub struct TranslatorOptions {
    /// Translate only the first entry of each file and never sleep.
    pub testing_mode: bool,
    pub delay: RequestDelay,
    /// Extra attempts for transient service errors.
    pub max_retries: u32,
    /// First retry pause; doubles on every further attempt.
    pub retry_base_delay: Duration,
    /// Append ` - <RFC 3339 timestamp>` to every translated value.
    pub timestamp_suffix: bool,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            testing_mode: false,
            delay: RequestDelay::default(),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(500),
            timestamp_suffix: false,
        }
    }
}

/// Counts for one translated file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    pub target_path: PathBuf,
    /// Entries in the source file.
    pub total: usize,
    /// Entries translated by the service.
    pub translated: usize,
    /// Entries translated from the fallback dictionary.
    pub fallback: usize,
    /// Entries written without translation.
    pub untranslated: usize,
    /// Keys carried over from the existing target file.
    pub retained: usize,
}

enum Outcome {
    Translated(String),
    Fallback(String),
    Untranslated,
}

/// `home.US_en.properties` -> `home.US_es.properties` in the same directory.
pub fn target_file_path(source: &Path, source_locale: &Locale, target_locale: &Locale) -> PathBuf {
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let renamed = file_name.replacen(
        &source_locale.file_segment(),
        &target_locale.file_segment(),
        1,
    );
    source.with_file_name(renamed)
}

/// Translates property files line by line into one target locale at a time.
pub struct LocaleTranslator<'a> {
    service: &'a dyn Translate,
    fallback: FallbackDictionary,
    options: TranslatorOptions,
    /// Service requests made for the current file.
    requests: usize,
    /// Service requests made over the translator's lifetime.
    calls_made: usize,
}

impl<'a> LocaleTranslator<'a> {
    pub fn new(
        service: &'a dyn Translate,
        fallback: FallbackDictionary,
        options: TranslatorOptions,
    ) -> Self {
        Self {
            service,
            fallback,
            options,
            requests: 0,
            calls_made: 0,
        }
    }

    /// Translate `source` into `target_locale`, merging into `target_path`.
    ///
    /// Comments, blank lines and lines without `=` are copied unchanged. A key
    /// repeated in the source is written once, at its first position with its
    /// last value. Keys that only exist in the current target file are
    /// appended at the end.
    pub fn translate_file(
        &mut self,
        source: &Path,
        target_locale: &Locale,
        target_path: &Path,
        progress: &mut ProgressTracker,
    ) -> Result<FileReport> {
        let content = fs::read_to_string(source)
            .with_context(|| format!("Failed to read properties file: {}", source.display()))?;
        let source_file = PropertyFile::parse(&content);
        let source_entries = source_file.entries();
        let existing = PropertyFile::read_if_exists(target_path)?
            .map(|file| file.entries())
            .unwrap_or_default();

        let label = progress_label(source, target_locale);
        let language = target_locale.language();
        let mut report = FileReport {
            target_path: target_path.to_path_buf(),
            total: source_entries.len(),
            ..FileReport::default()
        };
        progress.record_progress(&label, 0, report.total);
        info!(
            "translating {} to {} ({} entries)",
            source.display(),
            target_locale,
            report.total
        );

        let mut lines = Vec::with_capacity(source_file.lines.len());
        let mut seen: HashSet<String> = HashSet::new();
        let mut processed = 0;
        self.requests = 0;

        for line in source_file.lines {
            let key = match line {
                PropertyLine::Pair { key, .. } => key,
                other => {
                    lines.push(other);
                    continue;
                }
            };
            if !seen.insert(key.clone()) {
                debug!("skipping repeated key {} in {}", key, source.display());
                continue;
            }
            let value = source_entries.get(&key).cloned().unwrap_or_default();

            let outcome = if self.options.testing_mode && self.requests >= 1 {
                Outcome::Untranslated
            } else {
                self.translate_value(&value, language)
            };

            let value = match outcome {
                Outcome::Translated(text) => {
                    report.translated += 1;
                    self.with_suffix(text)
                }
                Outcome::Fallback(text) => {
                    report.fallback += 1;
                    self.with_suffix(text)
                }
                Outcome::Untranslated => {
                    report.untranslated += 1;
                    existing.get(&key).cloned().unwrap_or(value)
                }
            };

            lines.push(PropertyLine::Pair { key, value });
            processed += 1;
            progress.record_progress(&label, processed, report.total);
        }

        for (key, value) in &existing {
            if !seen.contains(key) {
                lines.push(PropertyLine::Pair {
                    key: key.clone(),
                    value: value.clone(),
                });
                report.retained += 1;
            }
        }

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(target_path, PropertyFile { lines }.render())
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        info!(
            "translated file saved as {} ({} translated, {} fallback, {} untranslated, {} retained)",
            target_path.display(),
            report.translated,
            report.fallback,
            report.untranslated,
            report.retained
        );
        Ok(report)
    }

    fn translate_value(&mut self, value: &str, language: &str) -> Outcome {
        if value.is_empty() {
            return Outcome::Untranslated;
        }

        if self.calls_made > 0 && !self.options.testing_mode {
            thread::sleep(self.options.delay.sample());
        }
        self.requests += 1;
        self.calls_made += 1;

        match self.request_with_retry(value, language) {
            Ok(text) => Outcome::Translated(text.trim().to_string()),
            Err(err) => match self.fallback.translate(value, language) {
                Ok(text) => {
                    warn!("translation of \"{}\" failed ({}), using fallback", value, err);
                    Outcome::Fallback(text)
                }
                Err(miss) => {
                    warn!("translation of \"{}\" failed ({}), keeping original", value, err);
                    debug!("{}", miss);
                    Outcome::Untranslated
                }
            },
        }
    }

    fn request_with_retry(&self, value: &str, language: &str) -> Result<String, TranslateError> {
        let retries = if self.options.testing_mode {
            0
        } else {
            self.options.max_retries
        };

        let mut attempt = 0;
        loop {
            match self.service.translate(value, language) {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && attempt < retries => {
                    let pause = self.options.retry_base_delay * 2u32.saturating_pow(attempt);
                    debug!("attempt {} failed ({}), retrying in {:?}", attempt + 1, err, pause);
                    thread::sleep(pause);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn with_suffix(&self, text: String) -> String {
        if !self.options.timestamp_suffix {
            return text;
        }
        match OffsetDateTime::now_utc().format(&Rfc3339) {
            Ok(stamp) => format!("{text} - {stamp}"),
            Err(_) => text,
        }
    }
}

/// Progress row label, e.g. `home (US_es)`.
fn progress_label(source: &Path, target_locale: &Locale) -> String {
    let name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = name.split('.').next().unwrap_or_default();
    format!("{base} ({target_locale})")
}
