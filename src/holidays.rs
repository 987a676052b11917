//! Holiday data cache
//!
//! Holiday records ship as one JSON array per year in a data directory. They
//! are read once, concatenated in file-name order, and kept for the life of
//! the process.

use anyhow::Context;
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// A single calendar entry; the shape is owned by the data files
pub type HolidayRecord = Value;

/// File extension of holiday data files
const DATA_EXTENSION: &str = "json";

/// Where holiday records come from
pub trait HolidaySource: Send + Sync {
    /// Read every record from the source
    fn read_all(&self) -> anyhow::Result<Vec<HolidayRecord>>;

    /// Human-readable location for logs
    fn describe(&self) -> String;
}

/// Reads every `*.json` array in a directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Create a source over `dir`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl HolidaySource for DirectorySource {
    fn read_all(&self) -> anyhow::Result<Vec<HolidayRecord>> {
        let mut files = std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read directory {}", self.dir.display()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        files.retain(|path| {
            path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(DATA_EXTENSION)
        });
        files.sort();

        let mut records = Vec::new();
        for path in files {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let yearly: Vec<HolidayRecord> = serde_json::from_str(&json)
                .with_context(|| format!("Malformed holiday file {}", path.display()))?;
            records.extend(yearly);
        }
        Ok(records)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Once-loaded, then immutable, holiday records
pub struct HolidayCache {
    source: Box<dyn HolidaySource>,
    records: OnceCell<Arc<Vec<HolidayRecord>>>,
}

impl HolidayCache {
    /// Create a cache over any source; nothing is read until [`load`](Self::load)
    pub fn new(source: Box<dyn HolidaySource>) -> Self {
        Self {
            source,
            records: OnceCell::new(),
        }
    }

    /// Create a cache over a holiday data directory
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(Box::new(DirectorySource::new(dir)))
    }

    /// Return the cached records, reading the source on first call
    ///
    /// Fails open: a read or parse failure is logged and cached as an empty
    /// list, so callers cannot tell "unavailable" from "no holidays".
    pub fn load(&self) -> Arc<Vec<HolidayRecord>> {
        self.records
            .get_or_init(|| match self.source.read_all() {
                Ok(records) => {
                    info!(
                        "Loaded {} holiday records from {}",
                        records.len(),
                        self.source.describe()
                    );
                    Arc::new(records)
                }
                Err(e) => {
                    warn!(
                        "Holiday data unavailable from {}: {:#}",
                        self.source.describe(),
                        e
                    );
                    Arc::new(Vec::new())
                }
            })
            .clone()
    }

    /// Whether the source has been read yet
    pub fn is_loaded(&self) -> bool {
        self.records.get().is_some()
    }
}
