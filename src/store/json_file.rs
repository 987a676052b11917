// JSON file document store
// Keeps the state document in a single versioned JSON file on disk

use super::{DocumentStore, StoreError, STATE_DOCUMENT_ID};
use crate::state::AppState;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Current version of the on-disk envelope
const FORMAT_VERSION: u32 = 1;

/// Serializable envelope around the state document
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateFileData {
    /// Version of the file format (for future migration support)
    version: u32,
    /// Singleton document identifier
    id: String,
    /// The state document itself
    state: AppState,
}

/// File-backed state document store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open a store at `path`, creating the parent directory if needed
    ///
    /// The file itself is only created on the first write.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            }
        }
        info!("Using JSON state file at: {}", path.display());
        Ok(Self { path })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn get(&self) -> Result<Option<AppState>, StoreError> {
        if !fs::try_exists(&self.path)
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?
        {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;
        let data: StateFileData = serde_json::from_str(&json)?;

        // Validate version (for future migration support)
        if data.version != FORMAT_VERSION {
            return Err(StoreError::InvalidData(format!(
                "Unsupported state file version: {}",
                data.version
            )));
        }

        Ok(Some(data.state))
    }

    async fn put(&self, state: &AppState) -> Result<(), StoreError> {
        let data = StateFileData {
            version: FORMAT_VERSION,
            id: STATE_DOCUMENT_ID.to_string(),
            state: state.clone(),
        };
        let json = serde_json::to_string_pretty(&data)?;

        // Write beside the target then rename so readers never see a torn file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
