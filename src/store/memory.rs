//! In-process document store

use super::{DocumentStore, StoreError};
use crate::state::AppState;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Keeps the state document in memory; contents are lost on exit
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<Option<AppState>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a document
    pub fn with_state(state: AppState) -> Self {
        Self {
            document: RwLock::new(Some(state)),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self) -> Result<Option<AppState>, StoreError> {
        Ok(self.document.read().await.clone())
    }

    async fn put(&self, state: &AppState) -> Result<(), StoreError> {
        *self.document.write().await = Some(state.clone());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
