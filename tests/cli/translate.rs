use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const KEYS_DIR: &str = "src/powerschool/MessageKeys";

fn key_file(test: &CliTest, name: &str, content: &str) -> Result<()> {
    test.write_file(&format!("{KEYS_DIR}/{name}"), content)
}

fn read_key_file(test: &CliTest, name: &str) -> Result<String> {
    test.read_file(&format!("{KEYS_DIR}/{name}"))
}

#[test]
fn test_translate_all_languages_with_fallback() -> Result<()> {
    let test = CliTest::with_plugin()?;
    key_file(
        &test,
        "home.US_en.properties",
        "# Portal Plugin - Version: 2.1.0\n# MessageKeys for: home (US_en)\n\nk1=Hello\nk2=Goodbye\n",
    )?;

    let output = test.translate_command().arg("-Y").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        read_key_file(&test, "home.US_es.properties")?,
        "# Portal Plugin - Version: 2.1.0\n# MessageKeys for: home (US_en)\n\nk1=Hola\nk2=Adiós\n"
    );
    assert!(read_key_file(&test, "home.US_hi.properties")?.ends_with("\nk1=नमस्ते\nk2=अलविदा\n"));
    // Source language is never a target.
    assert_eq!(
        read_key_file(&test, "home.US_en.properties")?,
        "# Portal Plugin - Version: 2.1.0\n# MessageKeys for: home (US_en)\n\nk1=Hello\nk2=Goodbye\n"
    );
    assert!(test.exists("languages.json"));

    let out = stdout(&output);
    assert!(out.contains("home (US_es)"), "stdout: {out}");
    assert!(out.contains("Translated 1 file(s) into 2 language(s)"), "stdout: {out}");

    Ok(())
}

#[test]
fn test_translate_selected_language_by_name() -> Result<()> {
    let test = CliTest::with_plugin()?;
    key_file(&test, "home.US_en.properties", "k1=Hello\n")?;

    let output = test
        .translate_command()
        .args(["US_en", "--to", "French", "-Y"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(read_key_file(&test, "home.US_fr.properties")?, "k1=Bonjour\n");
    assert!(!test.exists(&format!("{KEYS_DIR}/home.US_es.properties")));

    Ok(())
}

#[test]
fn test_translate_keeps_existing_translations() -> Result<()> {
    let test = CliTest::with_plugin()?;
    key_file(&test, "test.US_en.properties", "\nkey1=Hello\nkey2=Good night\n")?;
    key_file(&test, "test.US_es.properties", "\nkey2=Buenas noches\nkey3=Adiós\n")?;

    let output = test
        .translate_command()
        .args(["--to", "es", "-Y"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        read_key_file(&test, "test.US_es.properties")?,
        "\nkey1=Hola\nkey2=Buenas noches\nkey3=Adiós\n"
    );

    Ok(())
}

#[test]
fn test_translate_test_mode_translates_first_entry_only() -> Result<()> {
    let test = CliTest::with_plugin()?;
    key_file(&test, "home.US_en.properties", "k1=Hello\nk2=Goodbye\n")?;

    let output = test
        .translate_command()
        .args(["--to", "es", "--test-mode", "-Y"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        read_key_file(&test, "home.US_es.properties")?,
        "k1=Hola\nk2=Goodbye\n"
    );

    Ok(())
}

#[test]
fn test_translate_test_mode_from_env() -> Result<()> {
    let test = CliTest::with_plugin()?;
    key_file(&test, "home.US_en.properties", "k1=Hello\nk2=Goodbye\n")?;

    let output = test
        .translate_command()
        .args(["--to", "es", "-Y"])
        .env("PS_I18N_TEST_MODE", "1")
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        read_key_file(&test, "home.US_es.properties")?,
        "k1=Hola\nk2=Goodbye\n"
    );

    Ok(())
}

#[test]
fn test_translate_test_mode_env_falsey_value() -> Result<()> {
    let test = CliTest::with_plugin()?;
    key_file(&test, "home.US_en.properties", "k1=Hello\nk2=Goodbye\n")?;

    let output = test
        .translate_command()
        .args(["--to", "es", "-Y"])
        .env("PS_I18N_TEST_MODE", "0")
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        read_key_file(&test, "home.US_es.properties")?,
        "k1=Hola\nk2=Adiós\n"
    );

    Ok(())
}

#[test]
fn test_translate_existing_target_declined() -> Result<()> {
    let test = CliTest::with_plugin()?;
    key_file(&test, "home.US_en.properties", "k1=Hello\n")?;
    key_file(&test, "home.US_es.properties", "k1=Saludos\n")?;

    let output = test.translate_command().args(["--to", "es"]).output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Operation cancelled by user."));
    assert_eq!(read_key_file(&test, "home.US_es.properties")?, "k1=Saludos\n");

    Ok(())
}

#[test]
fn test_translate_without_files_fails() -> Result<()> {
    let test = CliTest::with_plugin()?;

    let output = test.translate_command().arg("-Y").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("No *.US_en.properties files found"));

    Ok(())
}

#[test]
fn test_translate_unknown_language_is_error() -> Result<()> {
    let test = CliTest::with_plugin()?;
    key_file(&test, "home.US_en.properties", "k1=Hello\n")?;

    let output = test
        .translate_command()
        .args(["--to", "Klingon", "-Y"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown target language"));

    Ok(())
}
