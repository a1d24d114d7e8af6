//! `den build` over a den.toml with several packs

use crate::common::{DenCommand, TestProject};
use crate::den;
use anyhow::Result;
use std::fs;

fn two_pack_project() -> Result<TestProject> {
    let project = TestProject::new("my-module")?
        .with_pack("packs/items", "Items", "Item")?
        .with_pack("packs/actors", "Actors", "Actor")?;
    project.write_doc("packs/items", "sword.yml", "_key: \"!items!s1\"\nname: Sword\n_id: s1\n")?;
    project.write_doc("packs/items", "axe.yml", "_key: \"!items!a1\"\nname: Axe\n_id: a1\n")?;
    project.write_doc("packs/actors", "goblin.json", r#"{"_key": "!actors!g1", "name": "Goblin", "_id": "g1"}"#)?;
    project.write_config()?;
    Ok(project)
}

#[test]
fn test_build_packs_every_pack() -> Result<()> {
    let project = two_pack_project()?;

    let result = den!(project.root(), "build").assert_success()?;
    assert!(result.contains_stdout("my-module:dev"));
    assert_eq!(result.parse_summary(), Some((2, 0, 0)));

    assert!(project.store_dir("packs/items").join("db").exists());
    assert!(project.store_dir("packs/actors").join("db").exists());
    Ok(())
}

#[test]
fn test_build_from_nested_directory_finds_config() -> Result<()> {
    let project = two_pack_project()?;

    let result = DenCommand::new(project.pack_dir("packs/items"))
        .args(&["build", "--profile", "dev"])
        .assert_success()?;
    assert_eq!(result.parse_summary(), Some((2, 0, 0)));
    Ok(())
}

#[test]
fn test_build_skips_missing_pack_folder() -> Result<()> {
    let project = TestProject::new("my-module")?.with_pack("packs/items", "Items", "Item")?;
    project.write_doc("packs/items", "a.yml", "_key: k1\n")?;
    let project = project.with_pack("packs/ghosts", "Ghosts", "Actor")?;
    fs::remove_dir(project.pack_dir("packs/ghosts"))?;
    project.write_config()?;

    // A missing folder is recoverable: the build still succeeds.
    let result = den!(project.root(), "build").assert_success()?;
    assert_eq!(result.parse_summary(), Some((1, 1, 0)));
    assert!(result.contains_stdout("skipped"));
    assert!(project.store_dir("packs/items").join("db").exists());
    Ok(())
}

#[test]
fn test_build_fails_on_bad_document() -> Result<()> {
    let project = two_pack_project()?;
    project.write_doc("packs/actors", "nokey.json", r#"{"name": "Orc"}"#)?;

    let result = den!(project.root(), "build").assert_failure()?;
    assert_eq!(result.parse_summary(), Some((1, 0, 1)));
    // The sibling pack was still built.
    assert!(project.store_dir("packs/items").join("db").exists());
    Ok(())
}

#[test]
fn test_build_unpack_round_trip() -> Result<()> {
    let project = two_pack_project()?;
    den!(project.root(), "build").assert_success()?;

    let items = project.pack_dir("packs/items");
    fs::remove_dir_all(&items)?;

    let result = den!(project.root(), "build", "--unpack", "--format", "json").assert_success()?;
    assert_eq!(result.parse_summary(), Some((2, 0, 0)));
    assert_eq!(
        TestProject::list_files(&items)?,
        vec!["Axe_a1.json".to_string(), "Sword_s1.json".to_string()]
    );

    // actors now holds goblin.json and Goblin_g1.json with the same key
    assert_eq!(
        TestProject::list_files(&project.pack_dir("packs/actors"))?,
        vec!["Goblin_g1.json".to_string(), "goblin.json".to_string()]
    );
    let result = den!(project.root(), "build").assert_success()?;
    assert_eq!(result.parse_summary(), Some((2, 0, 0)));
    Ok(())
}

#[test]
fn test_build_unpack_uses_profile_format() -> Result<()> {
    let project = TestProject::new("my-module")?
        .with_format("json")
        .with_pack("packs/items", "Items", "Item")?;
    project.write_doc("packs/items", "a.yml", "_key: k1\nname: Rope\n")?;
    project.write_config()?;
    den!(project.root(), "build").assert_success()?;

    fs::remove_file(project.pack_dir("packs/items").join("a.yml"))?;
    den!(project.root(), "build", "--unpack").assert_success()?;

    assert_eq!(
        TestProject::list_files(&project.pack_dir("packs/items"))?,
        vec!["Rope_k1.json".to_string()]
    );
    Ok(())
}

#[test]
fn test_build_without_config_fails() -> Result<()> {
    let project = TestProject::new("my-module")?;

    let result = den!(project.root(), "build").assert_failure()?;
    assert!(result.contains_stderr("den.toml"));
    Ok(())
}

#[test]
fn test_build_unknown_profile_fails() -> Result<()> {
    let project = two_pack_project()?;

    let result = den!(project.root(), "build", "--profile", "release").assert_failure()?;
    assert!(result.contains_stderr("Unknown profile"));
    Ok(())
}
