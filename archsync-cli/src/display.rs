//! Terminal output helpers.

use archsync_core::ArchiveEntry;
use console::style;

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Prints an informational message.
pub fn info(message: &str) {
    println!("{} {}", style("→").cyan(), message);
}

/// Prints a warning to stderr.
pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

/// Prints archive entries, one per line.
pub fn display_archive_entries(entries: &[ArchiveEntry]) {
    println!(
        "  {:<10} {:<24} {}",
        style("ID").bold(),
        style("ARCHIVED (UTC)").bold(),
        style("FILE").bold()
    );
    for entry in entries {
        let file_name = entry
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!(
            "  {:<10} {:<24} {}",
            entry.workspace_id,
            entry.archived_at.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            file_name
        );
    }
}
