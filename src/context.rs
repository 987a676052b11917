//! Process-scoped context shared by all request handlers

use crate::error::AppError;
use crate::holidays::HolidayCache;
use crate::services::ProfileService;
use crate::store::StateStore;
use std::sync::Arc;

/// Everything a handler needs, injected through axum `State`
///
/// `store` is `None` when no connection could be established at startup; the
/// API then answers every request with 503.
#[derive(Clone)]
pub struct AppContext {
    store: Option<StateStore>,
    holidays: Arc<HolidayCache>,
}

impl AppContext {
    /// Build the context from a (possibly absent) store and the holiday cache
    pub fn new(store: Option<StateStore>, holidays: Arc<HolidayCache>) -> Self {
        Self { store, holidays }
    }

    /// Whether the store connection is established
    pub fn is_store_connected(&self) -> bool {
        self.store.is_some()
    }

    /// The connected store, or `StoreUnavailable`
    pub fn store(&self) -> Result<&StateStore, AppError> {
        self.store.as_ref().ok_or(AppError::StoreUnavailable)
    }

    /// Profile service over the connected store
    pub fn profiles(&self) -> Result<ProfileService, AppError> {
        self.store().cloned().map(ProfileService::new)
    }

    /// The holiday cache
    pub fn holidays(&self) -> &HolidayCache {
        &self.holidays
    }
}
