//! Unpack a store into one file per document

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

pub async fn run(store: &Path, output: &Path, format: &str) -> Result<()> {
    let (store_dir, output_dir, format_name) =
        (store.to_path_buf(), output.to_path_buf(), format.to_string());

    let report = tokio::task::spawn_blocking(move || {
        den_engine::unpack(&store_dir, &output_dir, &format_name)
    })
    .await
    .context("Unpack task failed")?
    .with_context(|| format!("Failed to unpack {}", store.display()))?;

    println!(
        "{} {} -> {}",
        "Unpacked".green().bold(),
        store.display(),
        output.display()
    );
    println!("  {}", util::describe_unpack(&report));

    Ok(())
}
