//! Pack (or unpack) every pack listed in den.toml

use crate::config;
use crate::util;
use anyhow::{Context, Result};
use den_engine::{run_batch, Direction, OutputFormat, PackJob};
use owo_colors::OwoColorize;
use std::path::Path;

pub async fn run(
    config_path: &Path,
    profile: Option<&str>,
    unpack: bool,
    format: Option<&str>,
) -> Result<()> {
    let config = config::load(config_path)?;
    let project = config
        .resolve(config_path, profile)
        .context("Failed to resolve build profile")?;

    let direction = if unpack {
        let format = match format {
            Some(format) => format.parse::<OutputFormat>()?,
            None => project.format,
        };
        Direction::Unpack(format)
    } else {
        Direction::Pack
    };

    println!(
        "{} {}:{}",
        "Den build".bold(),
        project.id.cyan(),
        project.profile.cyan()
    );
    println!("  {} {}", "Source:".dimmed(), project.src_root.display());
    println!("  {} {}", "Target:".dimmed(), project.dest_root.display());
    println!();

    if project.packs.is_empty() {
        println!("{}", "No packs configured - nothing to do".dimmed());
        return Ok(());
    }

    let jobs: Vec<PackJob> = project
        .packs
        .iter()
        .cloned()
        .map(|descriptor| PackJob::resolve(descriptor, &project.src_root, &project.dest_root))
        .collect();
    let total = jobs.len();

    let outcomes = run_batch(jobs, direction).await;

    let mut skipped = 0usize;
    let mut failed = 0usize;
    for outcome in &outcomes {
        let name = format!("{} ({})", outcome.descriptor.label, outcome.descriptor.path.display());
        match &outcome.result {
            Ok(report) => println!("  {} {}: {}", "✓".green(), name, util::describe_job(report)),
            Err(e) => {
                if e.is_recoverable() {
                    skipped += 1;
                } else {
                    failed += 1;
                }
                println!("  {} {} [{}]: {}", "✗".red(), name, util::failure_marker(e), e);
            }
        }
    }

    println!();
    let done = total - skipped - failed;
    println!(
        "{} {} done, {} skipped, {} failed",
        "Summary:".bold(),
        done.to_string().green(),
        skipped.to_string().yellow(),
        failed.to_string().red()
    );

    if failed > 0 {
        anyhow::bail!("{} of {} packs failed", failed, total);
    }

    Ok(())
}
