//! Per-file translation progress.
//!
//! The tracker is an explicit value handed to each file-processing call; the
//! CLI reads it back to render the progress table.

use std::fmt;

use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileProgress {
    pub processed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Pending,
    InProgress,
    Completed,
    /// Nothing to translate in this file.
    Skipped,
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressStatus::Pending => write!(f, "pending"),
            ProgressStatus::InProgress => write!(f, "in progress"),
            ProgressStatus::Completed => write!(f, "completed"),
            ProgressStatus::Skipped => write!(f, "skipped"),
        }
    }
}

impl FileProgress {
    pub fn status(&self) -> ProgressStatus {
        if self.total == 0 {
            ProgressStatus::Skipped
        } else if self.processed == 0 {
            ProgressStatus::Pending
        } else if self.processed < self.total {
            ProgressStatus::InProgress
        } else {
            ProgressStatus::Completed
        }
    }

    /// Completion in whole percent.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            (self.processed.min(self.total) * 100) / self.total
        }
    }
}

/// Progress rows keyed by file label, in first-recorded order.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    files: IndexMap<String, FileProgress>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_progress(&mut self, file: &str, processed: usize, total: usize) {
        self.files
            .insert(file.to_string(), FileProgress { processed, total });
    }

    pub fn get(&self, file: &str) -> Option<FileProgress> {
        self.files.get(file).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, FileProgress)> {
        self.files.iter().map(|(file, progress)| (file.as_str(), *progress))
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum over all files.
    pub fn overall(&self) -> FileProgress {
        self.files.values().fold(FileProgress::default(), |acc, p| FileProgress {
            processed: acc.processed + p.processed,
            total: acc.total + p.total,
        })
    }

    pub fn completed_files(&self) -> usize {
        self.files
            .values()
            .filter(|p| p.status() == ProgressStatus::Completed)
            .count()
    }
}
