use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run_with_input, stderr, stdout};

const KEY_FILE: &str = "src/powerschool/MessageKeys/home.US_en.properties";

#[test]
fn test_create_keys_consolidates_and_materializes() -> Result<()> {
    let test = CliTest::with_plugin()?;
    let template = "<h1>[msg:K1]Hello[/msg]</h1>\n<p>[msg:K2]Hello[/msg]</p>\n";
    test.write_file("home.html", template)?;

    let output = test
        .create_keys_command()
        .args(["home.html", "US_en", "-Y"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_file(KEY_FILE)?,
        "# Portal Plugin - Version: 2.1.0\n# MessageKeys for: home (US_en)\n\nK1_multi=Hello\n"
    );
    assert_eq!(
        test.read_file("home.html")?,
        "<h1>~[text:K1_multi]</h1>\n<p>~[text:K1_multi]</p>\n"
    );
    assert_eq!(test.read_file("original_files_backup/home.html")?, template);
    assert!(stdout(&output).contains("Wrote 1 key(s) from home.html"));

    Ok(())
}

#[test]
fn test_create_keys_declined_leaves_files_untouched() -> Result<()> {
    let test = CliTest::with_plugin()?;
    let template = "<h1>[msg:title]Welcome[/msg]</h1>";
    test.write_file("home.html", template)?;

    let output = test
        .create_keys_command()
        .args(["home.html", "US_en"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Operation cancelled by user."));
    assert_eq!(test.read_file("home.html")?, template);
    assert!(!test.exists(KEY_FILE));
    assert!(!test.exists("original_files_backup"));

    Ok(())
}

#[test]
fn test_create_keys_reindexes_duplicates_when_confirmed() -> Result<()> {
    let test = CliTest::with_plugin()?;
    test.write_file("home.html", "<p>[msg:A]one[/msg]</p><p>[msg:A]two[/msg]</p>")?;

    let output = run_with_input(
        {
            let mut cmd = test.create_keys_command();
            cmd.args(["home.html", "US_en"]);
            cmd
        },
        "yes\nyes\n",
    )?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Do you want to re-index the file?"));

    let key_file = test.read_file(KEY_FILE)?;
    assert!(key_file.ends_with("\nA_0=one\nA_1=two\n"), "got {key_file}");
    assert_eq!(
        test.read_file("home.html")?,
        "<p>~[text:A_0]</p><p>~[text:A_1]</p>"
    );

    Ok(())
}

#[test]
fn test_create_keys_merges_existing_key_file() -> Result<()> {
    let test = CliTest::with_plugin()?;
    test.write_file(KEY_FILE, "# old header\n\nlegacy=Kept\nK1=Old\n")?;
    test.write_file("home.html", "[msg:K1]New[/msg][msg:K2]Other[/msg]")?;

    let output = test
        .create_keys_command()
        .args(["home.html", "US_en", "-Y"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_file(KEY_FILE)?,
        "# Portal Plugin - Version: 2.1.0\n# MessageKeys for: home (US_en)\n\nlegacy=Kept\nK1=New\nK2=Other\n"
    );
    assert_eq!(
        test.read_file("original_files_backup/home.US_en.properties")?,
        "# old header\n\nlegacy=Kept\nK1=Old\n"
    );

    Ok(())
}

#[test]
fn test_create_keys_glob_pattern() -> Result<()> {
    let test = CliTest::with_plugin()?;
    test.write_file("pages/a.html", "[msg:a]Alpha[/msg]")?;
    test.write_file("pages/b.html", "[msg:b]Beta[/msg]")?;

    let output = test
        .create_keys_command()
        .args(["pages/*.html", "US_en", "-Y"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(
        test.read_file("src/powerschool/MessageKeys/a.US_en.properties")?
            .ends_with("\na=Alpha\n")
    );
    assert!(
        test.read_file("src/powerschool/MessageKeys/b.US_en.properties")?
            .ends_with("\nb=Beta\n")
    );
    assert_eq!(test.read_file("pages/b.html")?, "~[text:b]");

    Ok(())
}

#[test]
fn test_create_keys_message_keys_dir_override() -> Result<()> {
    let test = CliTest::with_plugin()?;
    test.write_file("home.html", "[msg:a]Alpha[/msg]")?;

    let output = test
        .create_keys_command()
        .args(["home.html", "US_en", "-Y", "--message-keys-dir", "keys"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.exists("keys/home.US_en.properties"));

    Ok(())
}

#[test]
fn test_create_keys_missing_manifest_is_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("home.html", "[msg:a]Alpha[/msg]")?;

    let output = test
        .create_keys_command()
        .args(["home.html", "US_en", "-Y"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Failed to read plugin manifest"));
    assert_eq!(test.read_file("home.html")?, "[msg:a]Alpha[/msg]");

    Ok(())
}

#[test]
fn test_create_keys_invalid_locale_is_error() -> Result<()> {
    let test = CliTest::with_plugin()?;
    test.write_file("home.html", "[msg:a]Alpha[/msg]")?;

    let output = test
        .create_keys_command()
        .args(["home.html", "en", "-Y"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid locale"));

    Ok(())
}
