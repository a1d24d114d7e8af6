//! Shared utilities for CLI commands

use anyhow::Result;
use den_engine::{EngineError, JobReport, PackReport, UnpackReport};
use owo_colors::OwoColorize;
use std::path::Path;

/// Format file size in human-readable format
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Calculate directory size recursively
pub fn calculate_dir_size(dir: &Path) -> Result<u64> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut total = 0u64;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            total += entry.metadata()?.len();
        } else if path.is_dir() {
            total += calculate_dir_size(&path)?;
        }
    }

    Ok(total)
}

/// One-line summary of a pack
pub fn describe_pack(report: &PackReport) -> String {
    let mut line = format!(
        "{} written, {} removed",
        report.puts.to_string().green(),
        report.deletes.to_string().yellow()
    );
    if let Some(compaction) = &report.compaction {
        line.push_str(&format!(", {} compacted", compaction.rewritten).dimmed().to_string());
    }
    line
}

/// One-line summary of an unpack
pub fn describe_unpack(report: &UnpackReport) -> String {
    format!("{} files written", report.files.len().to_string().green())
}

pub fn describe_job(report: &JobReport) -> String {
    match report {
        JobReport::Packed(report) => describe_pack(report),
        JobReport::Unpacked(report) => describe_unpack(report),
    }
}

/// Status marker for a failed job
pub fn failure_marker(err: &EngineError) -> String {
    if err.is_recoverable() {
        "skipped".yellow().to_string()
    } else {
        "failed".red().to_string()
    }
}
