use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};

use super::super::{args::CreateKeysCommand, exit_status::ExitStatus, report};
use super::ProjectContext;
use crate::core::{
    Confirmer, Locale, PresetConfirmer, StdinConfirmer,
    backup::Backup,
    keyfile::{KeyFileStats, KeyFileWriter, key_file_path, source_base_name},
    pipeline::prepare_keys,
    plugin::PluginInfo,
};

pub const MODIFY_PROMPT: &str =
    "Warning: This operation will modify both the source and destination files. Proceed?";

pub const CANCELLED_MESSAGE: &str = "Operation cancelled by user.";

/// Where one source's keys ended up.
struct Extracted {
    destination: PathBuf,
    stats: KeyFileStats,
}

pub fn create_keys(cmd: CreateKeysCommand) -> Result<ExitStatus> {
    let project = ProjectContext::load(cmd.common.message_keys_dir.as_deref())?;
    let locale: Locale = cmd.locale.parse()?;
    let plugin = PluginInfo::load(&project.path(&project.config.plugin_manifest))?;
    let sources = expand_sources(&cmd.sources)?;

    let mut confirmer: Box<dyn Confirmer> = if cmd.common.yes {
        Box::new(PresetConfirmer(true))
    } else {
        Box::new(StdinConfirmer::stdin())
    };
    let backup = Backup::new(project.path(&project.config.backup_dir));
    let writer = KeyFileWriter::new(&plugin);
    let keys_dir = project.message_keys_dir();
    debug!(
        keys_dir = %keys_dir.display(),
        backup_dir = %backup.dir().display(),
        "creating keys for {} file(s)",
        sources.len()
    );

    for source in &sources {
        let extracted =
            extract_file(source, &locale, &keys_dir, &writer, &backup, confirmer.as_mut())?;
        let Some(extracted) = extracted else {
            println!("{}", CANCELLED_MESSAGE);
            return Ok(ExitStatus::Success);
        };

        report::print_keys_created_to(
            &source.display().to_string(),
            &extracted.destination.display().to_string(),
            &extracted.stats,
            &mut io::stdout().lock(),
        );
    }

    Ok(ExitStatus::Success)
}

/// Run the extraction pipeline on one source and write the results.
///
/// Returns `None` when the user declines the final confirmation; in that
/// case no file has been touched.
fn extract_file(
    source: &Path,
    locale: &Locale,
    keys_dir: &Path,
    writer: &KeyFileWriter<'_>,
    backup: &Backup,
    confirmer: &mut dyn Confirmer,
) -> Result<Option<Extracted>> {
    let document = fs::read_to_string(source)
        .with_context(|| format!("Failed to read source file: {}", source.display()))?;

    let prepared = prepare_keys(&document, confirmer)?;
    if prepared.messages.is_empty() {
        warn!("no [msg:KEY] tags found in {}", source.display());
    }

    let base_name = source_base_name(source);
    let destination = key_file_path(keys_dir, &base_name, locale);

    if !confirmer.confirm(MODIFY_PROMPT) {
        return Ok(None);
    }

    backup.save(&[source, destination.as_path()]);
    let stats = writer.write(&destination, &base_name, locale, &prepared.messages)?;

    fs::write(source, prepared.materialized_document())
        .with_context(|| format!("Failed to write file: {}", source.display()))?;
    info!(
        "rewrote {} with {} text reference(s)",
        source.display(),
        prepared.messages.len()
    );

    Ok(Some(Extracted { destination, stats }))
}

/// Expand glob patterns; plain paths must exist.
fn expand_sources(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut sources: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let matched: Vec<PathBuf> = if is_glob(pattern) {
            glob::glob(pattern)
                .with_context(|| format!("Invalid glob pattern: \"{}\"", pattern))?
                .filter_map(|entry| match entry {
                    Ok(path) => Some(path),
                    Err(err) => {
                        warn!("skipping unreadable path: {}", err);
                        None
                    }
                })
                .filter(|path| path.is_file())
                .collect()
        } else {
            let path = PathBuf::from(pattern);
            if !path.is_file() {
                bail!("Source file not found: {}", path.display());
            }
            vec![path]
        };

        if matched.is_empty() {
            bail!("No files match pattern: \"{}\"", pattern);
        }
        for path in matched {
            if !sources.contains(&path) {
                sources.push(path);
            }
        }
    }

    Ok(sources)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::properties::PropertyFile;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_extract_file_writes_key_file_and_materializes() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("home.html");
        fs::write(
            &source,
            "<h1>[msg:K1]Hello[/msg]</h1><p>[msg:K2]Hello[/msg]</p><p>[msg:K3]Bye[/msg]</p>",
        )
        .unwrap();

        let plugin = PluginInfo::new("Portal", "1.0.0");
        let writer = KeyFileWriter::new(&plugin);
        let backup = Backup::new(dir.path().join("backup"));
        let keys_dir = dir.path().join("keys");

        let extracted = extract_file(
            &source,
            &"US_en".parse::<Locale>().unwrap(),
            &keys_dir,
            &writer,
            &backup,
            &mut PresetConfirmer(true),
        )
        .unwrap()
        .unwrap();

        assert_eq!(extracted.destination, keys_dir.join("home.US_en.properties"));
        assert_eq!(
            fs::read_to_string(&source).unwrap(),
            "<h1>~[text:K1_multi]</h1><p>~[text:K1_multi]</p><p>~[text:K3]</p>"
        );
        let entries = PropertyFile::parse(&fs::read_to_string(&extracted.destination).unwrap())
            .entries();
        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["K1_multi", "K3"]);
        assert!(dir.path().join("backup").join("home.html").exists());
    }

    #[test]
    fn test_extract_file_declined_touches_nothing() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("home.html");
        let original = "[msg:A]one[/msg][msg:A]two[/msg]";
        fs::write(&source, original).unwrap();

        let plugin = PluginInfo::new("Portal", "1.0.0");
        let writer = KeyFileWriter::new(&plugin);
        let backup = Backup::new(dir.path().join("backup"));

        let extracted = extract_file(
            &source,
            &"US_en".parse::<Locale>().unwrap(),
            &dir.path().join("keys"),
            &writer,
            &backup,
            &mut PresetConfirmer(false),
        )
        .unwrap();

        assert!(extracted.is_none());
        assert_eq!(fs::read_to_string(&source).unwrap(), original);
        assert!(!dir.path().join("keys").exists());
        assert!(!dir.path().join("backup").exists());
    }

    #[test]
    fn test_expand_sources() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.html"), "").unwrap();
        fs::write(dir.path().join("b.html"), "").unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();

        let pattern = format!("{}/*.html", dir.path().display());
        let plain = dir.path().join("a.html").display().to_string();
        let sources = expand_sources(&[pattern, plain]).unwrap();

        assert_eq!(
            sources,
            vec![dir.path().join("a.html"), dir.path().join("b.html")]
        );
    }

    #[test]
    fn test_expand_sources_missing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.html").display().to_string();
        let err = expand_sources(&[missing]).unwrap_err();
        assert!(err.to_string().contains("Source file not found"));

        let pattern = format!("{}/*.html", dir.path().display());
        let err = expand_sources(&[pattern]).unwrap_err();
        assert!(err.to_string().contains("No files match pattern"));
    }
}
