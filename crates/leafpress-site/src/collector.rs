//! Content collection.
//!
//! Walks the content directory, parses every record file and builds the
//! [`ContentRegistry`]. A file that fails to parse fails the whole
//! collection: malformed content must never be published.

use std::{
    fs,
    path::{Path, PathBuf},
};

use leafpress_core::{ContentRecord, CoreError, RecordFormat, ValidationError};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::registry::ContentRegistry;

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO error while walking the content directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record file could not be read or parsed.
    #[error(transparent)]
    Record(#[from] CoreError),

    /// A record broke the content schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Content directory is missing.
    #[error("content directory not found: {0}")]
    MissingDir(PathBuf),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Content collector that walks directories and parses record files.
#[derive(Debug)]
pub struct ContentCollector {
    content_dir: PathBuf,
}

impl ContentCollector {
    /// Create a new content collector.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// Parse every record file, sorted by path.
    pub fn collect(&self) -> Result<Vec<ContentRecord>> {
        info!(dir = %self.content_dir.display(), "collecting content");

        if !self.content_dir.is_dir() {
            return Err(CollectorError::MissingDir(self.content_dir.clone()));
        }

        let mut files = self.find_record_files()?;
        files.sort();
        info!(count = files.len(), "found record files");

        let records = files
            .par_iter()
            .map(|path| {
                debug!(path = %path.display(), "parsing record");
                ContentRecord::load(path)
            })
            .collect::<std::result::Result<Vec<_>, CoreError>>()?;

        Ok(records)
    }

    /// Collect and index all content.
    pub fn load_registry(&self, include_drafts: bool) -> Result<ContentRegistry> {
        let records = self.collect()?;
        Ok(ContentRegistry::new(records, include_drafts)?)
    }

    /// Find all record files recursively.
    pub fn find_record_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        walk_dir(&self.content_dir, &mut files)?;
        Ok(files)
    }
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        let hidden = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with('.'));
        if hidden {
            continue;
        }

        if path.is_dir() {
            walk_dir(&path, files)?;
        } else if path.is_file() && RecordFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }

    Ok(())
}
