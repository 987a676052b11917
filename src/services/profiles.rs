//! Profile and schedule service
//!
//! Every write follows the same cycle: read the whole state document, apply
//! one mutation to the in-memory copy, write the whole document back. No lock
//! is held across the cycle, so concurrent writers race and the last one wins.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::StateStore;
use serde_json::Value;
use tracing::{debug, info};

/// Business operations over profiles and the active profile's schedules
#[derive(Clone)]
pub struct ProfileService {
    store: StateStore,
}

impl ProfileService {
    /// Create a service over a connected store
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    /// Read-modify-write cycle shared by every mutation
    ///
    /// The mutation runs on a copy; nothing is written if it fails.
    async fn mutate<T, F>(&self, apply: F) -> Result<(AppState, T), AppError>
    where
        F: FnOnce(&mut AppState) -> Result<T, AppError>,
    {
        let mut state = self.store.get_state().await?;
        let outcome = apply(&mut state)?;
        self.store.write_state(&state).await?;
        Ok((state, outcome))
    }

    /// Full application state
    pub async fn state(&self) -> Result<AppState, AppError> {
        Ok(self.store.get_state().await?)
    }

    /// Create an empty profile and make it active
    pub async fn create_profile(&self, name: &str) -> Result<AppState, AppError> {
        let (state, ()) = self.mutate(|state| state.create_profile(name)).await?;
        info!(profile = %name, "Created profile");
        Ok(state)
    }

    /// Rename a profile, keeping it active if it was
    pub async fn rename_profile(&self, old_name: &str, new_name: &str) -> Result<AppState, AppError> {
        let (state, ()) = self
            .mutate(|state| state.rename_profile(old_name, new_name))
            .await?;
        info!(from = %old_name, to = %new_name, "Renamed profile");
        Ok(state)
    }

    /// Delete a profile other than the default
    pub async fn delete_profile(&self, name: &str) -> Result<AppState, AppError> {
        let (state, _removed) = self.mutate(|state| state.delete_profile(name)).await?;
        info!(profile = %name, "Deleted profile");
        Ok(state)
    }

    /// Create a profile from exported settings and make it active
    pub async fn import_profile(
        &self,
        name: &str,
        settings: Option<Value>,
    ) -> Result<AppState, AppError> {
        let (state, ()) = self
            .mutate(|state| state.import_profile(name, settings))
            .await?;
        info!(profile = %name, "Imported profile");
        Ok(state)
    }

    /// Switch the active profile
    pub async fn set_active_profile(&self, name: &str) -> Result<AppState, AppError> {
        let (state, ()) = self
            .mutate(|state| state.set_active_profile(name))
            .await?;
        debug!(profile = %name, "Activated profile");
        Ok(state)
    }

    /// Replace the active profile's settings
    pub async fn save_settings(&self, settings: Value) -> Result<AppState, AppError> {
        let (state, ()) = self
            .mutate(|state| {
                state.save_settings(settings);
                Ok(())
            })
            .await?;
        debug!(profile = %state.active_profile, "Saved settings");
        Ok(state)
    }

    /// Fetch a schedule from the active profile
    pub async fn get_schedule(&self, name: &str) -> Result<Value, AppError> {
        let state = self.store.get_state().await?;
        state.schedule(name).cloned()
    }

    /// Store a schedule in the active profile, overwriting any previous one
    pub async fn save_schedule(&self, name: &str, data: Option<Value>) -> Result<AppState, AppError> {
        let (state, ()) = self
            .mutate(|state| state.save_schedule(name, data))
            .await?;
        debug!(schedule = %name, profile = %state.active_profile, "Saved schedule");
        Ok(state)
    }

    /// Remove a schedule from the active profile
    pub async fn delete_schedule(&self, name: &str) -> Result<AppState, AppError> {
        let (state, _removed) = self.mutate(|state| state.delete_schedule(name)).await?;
        debug!(schedule = %name, profile = %state.active_profile, "Deleted schedule");
        Ok(state)
    }
}
