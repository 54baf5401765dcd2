//! Delivery of exported files.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::SparkleResult;

/// Fixed name of every exported file.
pub const EXPORT_FILENAME: &str = "screenshot-sparkle.png";

/// An exported image, ready to be saved.
#[derive(Clone, Debug, PartialEq)]
pub struct Download {
    /// Suggested file name.
    pub filename: String,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
    /// `data:image/png;base64,...` of `png`.
    pub data_uri: String,
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
}

/// Receives finished exports.
pub trait DownloadSink {
    fn deliver(&mut self, download: Download) -> SparkleResult<()>;
}

/// Keeps deliveries in memory, for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct InMemoryDownloads {
    pub(crate) downloads: Vec<Download>,
}

impl InMemoryDownloads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliveries in order.
    pub fn downloads(&self) -> &[Download] {
        &self.downloads
    }

    pub fn last(&self) -> Option<&Download> {
        self.downloads.last()
    }
}

impl DownloadSink for InMemoryDownloads {
    fn deliver(&mut self, download: Download) -> SparkleResult<()> {
        self.downloads.push(download);
        Ok(())
    }
}

/// Writes each delivery to a file.
///
/// A directory target receives the download's own file name.
#[derive(Debug, Clone)]
pub struct FileDownloads {
    target: PathBuf,
    written: Vec<PathBuf>,
}

impl FileDownloads {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn path_for(&self, download: &Download) -> PathBuf {
        if self.target.is_dir() {
            self.target.join(&download.filename)
        } else {
            self.target.clone()
        }
    }
}

impl DownloadSink for FileDownloads {
    fn deliver(&mut self, download: Download) -> SparkleResult<()> {
        let path = self.path_for(&download);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        write_file(&path, &download.png)?;
        tracing::debug!(path = %path.display(), bytes = download.png.len(), "wrote export");
        self.written.push(path);
        Ok(())
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> SparkleResult<()> {
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/download.rs"]
mod tests;
