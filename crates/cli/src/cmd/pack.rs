//! Pack a folder of documents into a store

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

pub async fn run(source: &Path, store: &Path) -> Result<()> {
    let (source_dir, store_dir) = (source.to_path_buf(), store.to_path_buf());

    let report = tokio::task::spawn_blocking(move || den_engine::pack(&source_dir, &store_dir))
        .await
        .context("Pack task failed")?
        .with_context(|| format!("Failed to pack {}", source.display()))?;

    println!(
        "{} {} -> {}",
        "Packed".green().bold(),
        source.display(),
        store.display()
    );
    println!("  {}", util::describe_pack(&report));
    println!(
        "  {} {}",
        "Store size:".dimmed(),
        util::format_size(util::calculate_dir_size(store)?)
    );

    Ok(())
}
