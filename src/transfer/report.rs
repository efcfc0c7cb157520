// 下载结果
use crate::utils::error::TransferError;
use std::path::PathBuf;

/// Result of a single-file download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was written to this local path.
    Downloaded(PathBuf),
    /// The remote name is missing or not a regular file; nothing was written.
    Skipped,
}

impl DownloadOutcome {
    pub fn is_downloaded(&self) -> bool {
        matches!(self, DownloadOutcome::Downloaded(_))
    }
}

/// Per-entry results of a working-directory download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub downloaded: Vec<PathBuf>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, TransferError)>,
}

impl BatchReport {
    pub fn record(&mut self, name: &str, result: Result<DownloadOutcome, TransferError>) {
        match result {
            Ok(DownloadOutcome::Downloaded(path)) => self.downloaded.push(path),
            Ok(DownloadOutcome::Skipped) => self.skipped.push(name.to_string()),
            Err(e) => self.failed.push((name.to_string(), e)),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.downloaded.len() + self.skipped.len() + self.failed.len()
    }
}
