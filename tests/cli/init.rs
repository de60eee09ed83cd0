use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["messageKeysDir", "sourceLocale", "backupDir", "requestDelay"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["sourceLocale"], "US_en");
    assert_eq!(parsed["requestDelay"]["maxMs"], 3000);

    Ok(())
}

#[test]
fn test_init_creates_config_and_languages() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created .ps-i18nrc.json"));

    let content = test.read_file(".ps-i18nrc.json")?;
    assert_config_content(&content)?;

    let languages: Value = serde_json::from_str(&test.read_file("languages.json")?)?;
    assert_eq!(languages[1]["Language Code"], "es");
    assert_eq!(languages[1]["Language"], "Spanish");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".ps-i18nrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".ps-i18nrc.json already exists"));
    assert_eq!(test.read_file(".ps-i18nrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_keeps_existing_languages_file() -> Result<()> {
    let test = CliTest::new()?;
    let languages = r#"[{ "Language Code": "fr", "Language": "French" }]"#;
    test.write_file("languages.json", languages)?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("languages.json")?, languages);

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;

    // No key files yet: the command runs and reports that there is nothing to do.
    let output = test.translate_command().arg("-Y").output()?;
    assert_eq!(
        output.status.code(),
        Some(1),
        "stderr: {}",
        stderr(&output)
    );

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("create-keys"));
    assert!(test.root().read_dir()?.count() == 1);

    Ok(())
}
