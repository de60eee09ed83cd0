use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use tracing::{error, info, warn};
use walkdir::WalkDir;

use super::super::{args::TranslateCommand, exit_status::ExitStatus, report};
use super::{ProjectContext, create_keys::CANCELLED_MESSAGE};
use crate::core::{
    Confirmer, Locale, ProgressTracker, StdinConfirmer,
    languages::{self, LanguageEntry},
    translate::{FallbackDictionary, HttpTranslator, LocaleTranslator, target_file_path},
};

pub const UPDATE_PROMPT: &str = "Existing translation files will be updated. Proceed?";

pub fn translate(cmd: TranslateCommand) -> Result<ExitStatus> {
    let mut project = ProjectContext::load(cmd.common.message_keys_dir.as_deref())?;
    if let Some(locale) = &cmd.source_locale {
        project.config.source_locale = locale.clone();
    }
    if cmd.test_mode {
        project.config.testing_mode = true;
    }
    let config = &project.config;
    let source_locale = config.source_locale()?;

    let languages = languages::load_or_create(&project.path(&config.languages_file))?;
    let targets = target_locales(&source_locale, &languages, &cmd.targets)?;

    let keys_dir = project.message_keys_dir();
    let files = discover_source_files(&keys_dir, &source_locale);
    let mut stdout = io::stdout();

    if files.is_empty() {
        report::print_failure_to(
            &format!(
                "No *.{}.properties files found in {}",
                source_locale,
                keys_dir.display()
            ),
            &mut stdout,
        );
        return Ok(ExitStatus::Failure);
    }
    if targets.is_empty() {
        report::print_failure_to("No target languages to translate to", &mut stdout);
        return Ok(ExitStatus::Failure);
    }

    let updates_existing = files.iter().any(|file| {
        targets
            .iter()
            .any(|target| target_file_path(file, &source_locale, target).exists())
    });
    if updates_existing && !cmd.common.yes && !StdinConfirmer::stdin().confirm(UPDATE_PROMPT) {
        println!("{}", CANCELLED_MESSAGE);
        return Ok(ExitStatus::Success);
    }

    if config.testing_mode {
        info!("testing mode: only the first entry of each file is translated");
    }
    let service = HttpTranslator::new(config.translate_endpoint.as_str(), config.request_timeout())?;
    let mut translator = LocaleTranslator::new(
        &service,
        FallbackDictionary::builtin(),
        config.translator_options(),
    );
    let mut progress = ProgressTracker::new();
    let mut failed = 0;

    for file in &files {
        for target in &targets {
            let target_path = target_file_path(file, &source_locale, target);
            if let Err(err) = translator.translate_file(file, target, &target_path, &mut progress) {
                error!("{:#}", err);
                report::print_failure_to(
                    &format!("Failed to translate {} to {}: {:#}", file.display(), target, err),
                    &mut stdout,
                );
                failed += 1;
            }
        }
    }

    report::print_progress(&progress);

    let attempted = files.len() * targets.len();
    if failed > 0 {
        report::print_failure_to(
            &format!("{} of {} translation(s) failed", failed, attempted),
            &mut stdout,
        );
        return Ok(ExitStatus::Failure);
    }

    report::print_success_to(
        &format!(
            "Translated {} file(s) into {} language(s)",
            files.len(),
            targets.len()
        ),
        &mut stdout,
    );
    Ok(ExitStatus::Success)
}

/// Target locales in the source locale's region.
///
/// Explicit targets may be codes or language names; without them every entry
/// of the languages file is used. The source language itself is skipped.
fn target_locales(
    source_locale: &Locale,
    languages: &[LanguageEntry],
    requested: &[String],
) -> Result<Vec<Locale>> {
    let codes: Vec<String> = if requested.is_empty() {
        languages.iter().map(|l| l.code.clone()).collect()
    } else {
        let mut codes = Vec::with_capacity(requested.len());
        for target in requested {
            match languages::resolve_code(languages, target) {
                Some(code) => codes.push(code),
                None => bail!("Unknown target language: \"{}\"", target),
            }
        }
        codes
    };

    let mut targets: Vec<Locale> = Vec::new();
    for code in codes {
        if code == source_locale.language() {
            info!("skipping source language {}", code);
            continue;
        }
        let locale = source_locale.with_language(&code);
        if !targets.contains(&locale) {
            targets.push(locale);
        }
    }
    Ok(targets)
}

/// Key files for `source_locale` directly inside `dir`, sorted by name.
fn discover_source_files(dir: &Path, source_locale: &Locale) -> Vec<PathBuf> {
    if !dir.is_dir() {
        warn!("message keys directory not found: {}", dir.display());
        return Vec::new();
    }

    let suffix = format!("{}properties", source_locale.file_segment());
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("cannot access path: {}", e);
                continue;
            }
        };
        let matches = entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(&suffix);
        if matches {
            files.push(entry.into_path());
        }
    }
    files
}
