//! `den pack` / `den unpack` round trips through the binary

use crate::common::{DenCommand, TestProject};
use crate::den;
use anyhow::Result;
use std::fs;

#[test]
fn test_pack_then_unpack_json() -> Result<()> {
    let project = TestProject::new("module")?.with_pack("packs/items", "Items", "Item")?;
    project.write_doc("packs/items", "sword.yml", "_key: \"!items!a\"\nname: Sword\n_id: a\n")?;
    project.write_doc("packs/items", "shield.json", r#"{"_key": "!items!b", "name": "Shield", "_id": "b"}"#)?;

    let store = project.root().join("out/items");
    let result = DenCommand::new(project.root())
        .args(&["pack", "packs/items", "out/items"])
        .assert_success()?;
    assert!(result.contains_stdout("Packed"));
    assert!(result.contains_stdout("2 written"));
    assert!(store.join("db").exists());

    let unpacked = project.root().join("unpacked");
    let result = DenCommand::new(project.root())
        .args(&["unpack", "out/items", "unpacked", "--format", "json"])
        .assert_success()?;
    assert!(result.contains_stdout("2 files written"));

    assert_eq!(
        TestProject::list_files(&unpacked)?,
        vec!["Shield_b.json".to_string(), "Sword_a.json".to_string()]
    );
    let sword = fs::read_to_string(unpacked.join("Sword_a.json"))?;
    assert!(sword.contains("\"_key\": \"!items!a\""));

    Ok(())
}

#[test]
fn test_unpack_defaults_to_yml() -> Result<()> {
    let project = TestProject::new("module")?.with_pack("packs/items", "Items", "Item")?;
    project.write_doc("packs/items", "a.json", r#"{"_key": "k1", "name": "Potion"}"#)?;

    den!(project.root(), "pack", "packs/items", "store").assert_success()?;
    den!(project.root(), "unpack", "store", "yml-out").assert_success()?;

    assert_eq!(
        TestProject::list_files(&project.root().join("yml-out"))?,
        vec!["Potion_k1.yml".to_string()]
    );
    Ok(())
}

#[test]
fn test_repack_prunes_removed_documents() -> Result<()> {
    let project = TestProject::new("module")?.with_pack("packs/items", "Items", "Item")?;
    project.write_doc("packs/items", "a.yml", "_key: k1\nname: A\n")?;
    let stale = project.write_doc("packs/items", "b.yml", "_key: k2\nname: B\n")?;

    den!(project.root(), "pack", "packs/items", "store").assert_success()?;

    fs::remove_file(stale)?;
    let result = den!(project.root(), "pack", "packs/items", "store").assert_success()?;
    assert!(result.contains_stdout("1 written"));
    assert!(result.contains_stdout("1 removed"));

    den!(project.root(), "unpack", "store", "out").assert_success()?;
    assert_eq!(
        TestProject::list_files(&project.root().join("out"))?,
        vec!["A_k1.yml".to_string()]
    );
    Ok(())
}

#[test]
fn test_pack_missing_source_fails() -> Result<()> {
    let project = TestProject::new("module")?;

    let result = den!(project.root(), "pack", "nowhere", "store").assert_failure()?;
    assert!(result.contains_stderr("could not locate input data folder"));
    assert!(!project.root().join("store").exists());
    Ok(())
}

#[test]
fn test_pack_parse_error_reports_file() -> Result<()> {
    let project = TestProject::new("module")?.with_pack("packs/items", "Items", "Item")?;
    project.write_doc("packs/items", "broken.json", "{ not json")?;

    let result = den!(project.root(), "pack", "packs/items", "store").assert_failure()?;
    assert!(result.contains_stderr("broken.json"));
    Ok(())
}

#[test]
fn test_unpack_rejects_unknown_format() -> Result<()> {
    let project = TestProject::new("module")?.with_pack("packs/items", "Items", "Item")?;
    project.write_doc("packs/items", "a.yml", "_key: k1\n")?;
    den!(project.root(), "pack", "packs/items", "store").assert_success()?;

    let result = den!(project.root(), "unpack", "store", "out", "--format", "xml").assert_failure()?;
    assert!(result.contains_stderr("unsupported output format"));
    assert!(!project.root().join("out").exists());
    Ok(())
}

#[test]
fn test_unpack_missing_store_fails() -> Result<()> {
    let project = TestProject::new("module")?;

    let result = den!(project.root(), "unpack", "no-store", "out").assert_failure()?;
    assert!(result.contains_stderr("could not locate input store"));
    Ok(())
}
