//! State store
//!
//! The application keeps all of its data in one singleton document. Backends
//! implement [`DocumentStore`] (read the document, replace the document) and
//! [`StateStore`] layers read-or-initialize semantics on top.
//!
//! There is no locking or versioning: two concurrent read-modify-write cycles
//! race and the last `put` wins.

mod error;
pub mod json_file;
pub mod memory;
pub mod sqlite;

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::state::AppState;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Fixed identifier of the singleton state document
pub const STATE_DOCUMENT_ID: &str = "app-state";

/// Storage port for the singleton state document
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the document, `None` if it has never been written
    async fn get(&self) -> Result<Option<AppState>, StoreError>;

    /// Replace the document wholesale, creating it if absent
    async fn put(&self, state: &AppState) -> Result<(), StoreError>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Adapter over a [`DocumentStore`] used by the service layer
#[derive(Clone)]
pub struct StateStore {
    backend: Arc<dyn DocumentStore>,
}

impl StateStore {
    /// Wrap a backend
    pub fn new(backend: Arc<dyn DocumentStore>) -> Self {
        Self { backend }
    }

    /// Name of the underlying backend
    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    /// Return the singleton state, creating and persisting the default if absent
    ///
    /// A stored document that lost its default profile or points at a missing
    /// active profile is repaired and written back.
    pub async fn get_state(&self) -> Result<AppState, StoreError> {
        match self.backend.get().await? {
            Some(mut state) => {
                if state.normalize() {
                    debug!("Repaired stored state document");
                    self.backend.put(&state).await?;
                }
                Ok(state)
            }
            None => {
                let state = AppState::new();
                self.backend.put(&state).await?;
                info!("Initialized default state document");
                Ok(state)
            }
        }
    }

    /// Replace the persisted singleton wholesale
    pub async fn write_state(&self, state: &AppState) -> Result<(), StoreError> {
        self.backend.put(state).await
    }
}

/// Open a store from a connection string
///
/// The scheme picks the backend:
/// * `sqlite:<path>` - SQLite database (see [`SqliteStore`])
/// * `file:<path>` - JSON file (see [`JsonFileStore`])
/// * `memory:` - in-process store, lost on exit
pub async fn connect(connection_string: &str) -> Result<StateStore, StoreError> {
    let backend: Arc<dyn DocumentStore> = if connection_string.starts_with("sqlite:") {
        Arc::new(SqliteStore::connect(connection_string).await?)
    } else if let Some(path) = connection_string.strip_prefix("file:") {
        let path = path.strip_prefix("//").unwrap_or(path);
        Arc::new(JsonFileStore::open(path).await?)
    } else if connection_string.starts_with("memory:") {
        Arc::new(MemoryStore::new())
    } else {
        let scheme = connection_string
            .split(':')
            .next()
            .unwrap_or(connection_string);
        return Err(StoreError::UnsupportedBackend(scheme.to_string()));
    };

    Ok(StateStore::new(backend))
}
