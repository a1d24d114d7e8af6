//! Test projects: a module directory with den.toml and pack folders

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct PackEntry {
    path: String,
    label: String,
    kind: String,
}

/// Module directory living in a temp dir
///
/// Layout:
/// ```text
/// <tmp>/<id>/den.toml
/// <tmp>/<id>/<pack path>/...
/// <tmp>/dist/            (dest of the "dev" profile)
/// ```
pub struct TestProject {
    _temp_dir: TempDir,
    id: String,
    root: PathBuf,
    dist: PathBuf,
    packs: Vec<PackEntry>,
    format: Option<String>,
}

impl TestProject {
    /// Create an empty module named `id`
    pub fn new(id: &str) -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        let root = temp_dir.path().join(id);
        let dist = temp_dir.path().join("dist");
        fs::create_dir_all(&root)?;
        fs::create_dir_all(&dist)?;

        Ok(Self {
            _temp_dir: temp_dir,
            id: id.to_string(),
            root,
            dist,
            packs: Vec::new(),
            format: None,
        })
    }

    /// Module root (holds den.toml)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of den.toml
    pub fn config_path(&self) -> PathBuf {
        self.root.join("den.toml")
    }

    /// Where a pack's store lands after `den build`
    pub fn store_dir(&self, pack_path: &str) -> PathBuf {
        self.dist.join(&self.id).join(pack_path)
    }

    /// Folder holding a pack's source documents
    pub fn pack_dir(&self, pack_path: &str) -> PathBuf {
        self.root.join(pack_path)
    }

    /// Set the dev profile's unpack format
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Register a pack and create its folder
    pub fn with_pack(mut self, path: &str, label: &str, kind: &str) -> Result<Self> {
        fs::create_dir_all(self.pack_dir(path))?;
        self.packs.push(PackEntry {
            path: path.to_string(),
            label: label.to_string(),
            kind: kind.to_string(),
        });
        Ok(self)
    }

    /// Write a document file into a pack folder
    pub fn write_doc(&self, pack_path: &str, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.pack_dir(pack_path).join(file_name);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write den.toml from the registered packs
    pub fn write_config(&self) -> Result<()> {
        let mut text = format!("id = \"{}\"\n\n[profile.dev]\ndest = \"../dist\"\n", self.id);
        if let Some(format) = &self.format {
            writeln!(text, "format = \"{}\"", format)?;
        }
        for pack in &self.packs {
            write!(
                text,
                "\n[[packs]]\npath = \"{}\"\nlabel = \"{}\"\ntype = \"{}\"\n",
                pack.path, pack.label, pack.kind
            )?;
        }

        fs::write(self.config_path(), text)?;
        Ok(())
    }

    /// Names of the files in a folder, sorted
    pub fn list_files(dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
