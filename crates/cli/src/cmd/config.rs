//! Configuration inspection command

use crate::config;
use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;

/// Show the parsed configuration
pub async fn run_show(config_path: &Path) -> Result<()> {
    let config = config::load(config_path)?;

    println!("{}", "Den Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    match &config.id {
        Some(id) => println!("  {} = {}", "id".cyan(), id),
        None => println!(
            "  {} = {}",
            "id".cyan(),
            "(directory name)".dimmed()
        ),
    }

    for (name, profile) in &config.profile {
        println!("\n{}", format!("[profile.{}]", name).yellow());
        println!("  {} = {}", "dest".cyan(), profile.dest.display());
        println!(
            "  {} = {}",
            "format".cyan(),
            profile.format.as_deref().unwrap_or("yml")
        );
    }

    println!("\n{} ({})", "Packs".yellow(), config.packs.len());
    for pack in &config.packs {
        let kind = if pack.kind.is_empty() { "-" } else { pack.kind.as_str() };
        println!(
            "  {} {} {}",
            pack.label.bold(),
            pack.path.display(),
            format!("[{}]", kind).dimmed()
        );
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    println!("{}", config::example_config());
    Ok(())
}
