//! `den config` subcommands

use crate::common::TestProject;
use crate::den;
use anyhow::Result;
use std::fs;

#[test]
fn test_config_example_is_valid() -> Result<()> {
    let project = TestProject::new("module")?;

    let result = den!(project.root(), "config", "example").assert_success()?;
    assert!(result.contains_stdout("[profile.dev]"));

    // The printed example must load back through `config show`
    fs::write(project.config_path(), &result.stdout)?;
    let shown = den!(project.root(), "config", "show").assert_success()?;
    assert!(shown.contains_stdout("my-module"));
    assert!(shown.contains_stdout("Packs (2)"));
    Ok(())
}

#[test]
fn test_config_show_lists_packs() -> Result<()> {
    let project = TestProject::new("module")?
        .with_format("json")
        .with_pack("packs/items", "Items", "Item")?;
    project.write_config()?;

    let result = den!(project.root(), "config", "show").assert_success()?;
    assert!(result.contains_stdout("[profile.dev]"));
    assert!(result.contains_stdout("format = json"));
    assert!(result.contains_stdout("Items packs/items [Item]"));
    Ok(())
}

#[test]
fn test_config_show_rejects_invalid_file() -> Result<()> {
    let project = TestProject::new("module")?;
    fs::write(project.config_path(), "[[packs]]\npath = \"../escape\"\nlabel = \"Bad\"\n")?;

    let result = den!(project.root(), "config", "show").assert_failure()?;
    assert!(result.contains_stderr("Invalid"));
    Ok(())
}
