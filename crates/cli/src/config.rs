//! Project configuration (`den.toml`)
//!
//! The configuration file sits at the module root, which is also the source
//! root every pack path is resolved against. A profile names where built
//! stores go; the effective destination is `<profile.dest>/<id>`.

use anyhow::{Context, Result};
use den_engine::{OutputFormat, PackDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Component, Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "den.toml";

/// Parsed `den.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DenConfig {
    /// Package id (defaults to the config directory's name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Build profiles by name
    #[serde(default)]
    pub profile: BTreeMap<String, Profile>,

    /// Pack descriptors
    #[serde(default)]
    pub packs: Vec<PackDescriptor>,
}

/// Build target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Destination parent directory (relative to the config file)
    pub dest: PathBuf,

    /// Unpack format for this profile (json, yml, yaml)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Configuration resolved against the filesystem for one profile
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub profile: String,
    /// Module root (directory holding den.toml)
    pub src_root: PathBuf,
    /// `<profile.dest>/<id>`
    pub dest_root: PathBuf,
    pub format: OutputFormat,
    pub packs: Vec<PackDescriptor>,
}

/// Load and validate a configuration file
pub fn load(path: &Path) -> Result<DenConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: DenConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    Ok(config)
}

/// Find `den.toml` by walking up from `start`
pub fn find_config(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => anyhow::bail!(
                "No {} found in {} or any parent directory",
                CONFIG_FILE_NAME,
                start.display()
            ),
        }
    }
}

impl DenConfig {
    /// Check everything that does not need the filesystem
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = &self.id {
            if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
                anyhow::bail!("Invalid id '{}': must be a single path segment", id);
            }
        }

        for (name, profile) in &self.profile {
            if profile.dest.as_os_str().is_empty() {
                anyhow::bail!("Profile '{}' has an empty dest", name);
            }
            if let Some(format) = &profile.format {
                format
                    .parse::<OutputFormat>()
                    .with_context(|| format!("Profile '{}' has an invalid format", name))?;
            }
        }

        let mut seen = HashSet::new();
        for pack in &self.packs {
            validate_pack_path(&pack.path)
                .with_context(|| format!("Invalid path for pack '{}'", pack.label))?;

            let normalized: PathBuf = pack.path.components().collect();
            if !seen.insert(normalized) {
                anyhow::bail!("Pack path '{}' is listed more than once", pack.path.display());
            }
        }

        Ok(())
    }

    /// Resolve a profile into concrete source and destination roots
    ///
    /// With no profile name, a configuration holding exactly one profile
    /// uses it.
    pub fn resolve(&self, config_path: &Path, profile: Option<&str>) -> Result<Project> {
        let src_root = match config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (profile_name, profile) = match profile {
            Some(name) => {
                let profile = self.profile.get(name).with_context(|| {
                    format!(
                        "Unknown profile '{}' (available: {})",
                        name,
                        self.profile_names()
                    )
                })?;
                (name.to_string(), profile)
            }
            None => match self.profile.len() {
                1 => {
                    let (name, profile) = self.profile.iter().next().context("No profiles")?;
                    (name.clone(), profile)
                }
                0 => anyhow::bail!("No build profiles defined (add a [profile.<name>] table)"),
                _ => anyhow::bail!(
                    "Several profiles defined, pick one with --profile ({})",
                    self.profile_names()
                ),
            },
        };

        let id = match &self.id {
            Some(id) => id.clone(),
            None => default_id(&src_root)?,
        };

        let dest = if profile.dest.is_absolute() {
            profile.dest.clone()
        } else {
            src_root.join(&profile.dest)
        };

        if !dest.is_dir() {
            anyhow::bail!(
                "{}:{} destination path does not exist: {}",
                id,
                profile_name,
                dest.display()
            );
        }

        let format = match &profile.format {
            Some(format) => format.parse()?,
            None => OutputFormat::default(),
        };

        Ok(Project {
            dest_root: dest.join(&id),
            id,
            profile: profile_name,
            src_root,
            format,
            packs: self.packs.clone(),
        })
    }

    fn profile_names(&self) -> String {
        self.profile.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn validate_pack_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        anyhow::bail!("path is empty");
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => anyhow::bail!(
                "'{}' must be relative and stay inside the module",
                path.display()
            ),
        }
    }
    Ok(())
}

fn default_id(src_root: &Path) -> Result<String> {
    let root = src_root
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", src_root.display()))?;

    root.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .context("Cannot derive an id from the module directory; set `id` in den.toml")
}

/// Example configuration
pub fn example_config() -> &'static str {
    r#"# den.toml - compendium pack configuration
#
# Sits at the module root; pack paths are relative to this file.

# Package id. Built stores land in <profile.dest>/<id>/<pack path>.
# Defaults to the name of this directory.
id = "my-module"

# Build profiles. `dest` must already exist.
[profile.dev]
dest = "../dist"

[profile.release]
dest = "/srv/foundry/Data/modules"
format = "json"   # unpack format: json, yml (default) or yaml

[[packs]]
path = "packs/items"
label = "Items"
type = "Item"

[[packs]]
path = "packs/actors"
label = "Actors"
type = "Actor"
"#
}
