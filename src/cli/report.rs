//! Output formatting for command results.
//!
//! Everything prints to a caller-supplied writer so the library can be used
//! without a terminal.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::core::{
    keyfile::KeyFileStats,
    progress::{FileProgress, ProgressStatus, ProgressTracker},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const BAR_WIDTH: usize = 10;

/// Print the progress table to stdout.
pub fn print_progress(tracker: &ProgressTracker) {
    print_progress_to(tracker, &mut io::stdout().lock());
}

/// Render the progress table to a custom writer.
pub fn print_progress_to<W: Write>(tracker: &ProgressTracker, writer: &mut W) {
    if tracker.is_empty() {
        return;
    }

    let file_width = tracker
        .rows()
        .map(|(file, _)| file.width())
        .max()
        .unwrap_or(0)
        .max("File".len());

    let header = format!(
        "{}  {:>9}  {:>5}  {:<15}  {}",
        pad("File", file_width),
        "Processed",
        "Total",
        "Progress",
        "Status"
    );
    let _ = writeln!(writer, "{}", header.bold());

    for (file, progress) in tracker.rows() {
        let _ = writeln!(
            writer,
            "{}  {:>9}  {:>5}  {}  {}",
            pad(file, file_width).cyan(),
            progress.processed,
            progress.total,
            progress_bar(progress),
            status_label(progress.status())
        );
    }

    let overall = tracker.overall();
    let _ = writeln!(writer);
    let _ = writeln!(
        writer,
        "{} {}% ({}/{} entries), {} of {} file(s) completed",
        "Overall progress:".bold(),
        overall.percent(),
        overall.processed,
        overall.total,
        tracker.completed_files(),
        tracker.rows().count()
    );
}

fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

/// `██████░░░░  60%`, colored by completion.
fn progress_bar(progress: FileProgress) -> String {
    if progress.total == 0 {
        return format!("{:<15}", "-").dimmed().to_string();
    }

    let percent = progress.percent();
    let filled = percent * BAR_WIDTH / 100;
    let bar = format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(BAR_WIDTH - filled)
    );
    let bar = if percent > 66 {
        bar.green()
    } else if percent > 33 {
        bar.yellow()
    } else {
        bar.red()
    };
    format!("{} {:>3}%", bar, percent)
}

fn status_label(status: ProgressStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        ProgressStatus::Completed => label.green(),
        ProgressStatus::InProgress => label.yellow(),
        ProgressStatus::Pending => label.red(),
        ProgressStatus::Skipped => label.dimmed(),
    }
}

/// Print the result of one create-keys run.
pub fn print_keys_created_to<W: Write>(
    source: &str,
    destination: &str,
    stats: &KeyFileStats,
    writer: &mut W,
) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} key(s) from {} to {} ({} new, {} kept)",
            stats.written, source, destination, stats.added, stats.retained
        )
        .green()
    );
}

/// Print a success line.
pub fn print_success_to<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
}

/// Print a failure line.
pub fn print_failure_to<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), message.red());
}
