use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["factoryName"], "minErr");
    assert_eq!(parsed["suffix"], "MinErr");
    assert_eq!(parsed["messagesOutput"], "errors.json");
    assert!(parsed.get("replacement").is_none());

    // Pretty-printed with 2-space indentation
    assert!(content.contains("\n  \"factoryName\""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .minerrrc.json

    ----- stderr -----
    ");
    assert!(test.root().join(".minerrrc.json").exists());

    let content = test.read_file(".minerrrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".minerrrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");

    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    ✘ .minerrrc.json already exists
    ");
    assert_eq!(test.read_file(".minerrrc.json")?, "{}");

    Ok(())
}
