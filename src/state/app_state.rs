// Application state document
// The singleton holding every profile, its settings and its schedules

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Name of the reserved profile that always exists and cannot be deleted
pub const DEFAULT_PROFILE: &str = "default";

/// Name of a profile, used as its key
pub type ProfileName = String;

/// Name of a schedule within a profile
pub type ScheduleName = String;

/// A named bundle of settings and schedules
///
/// Both payloads are owned by the client and stored as opaque JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Client settings, replaced wholesale on save
    #[serde(default = "empty_object")]
    pub settings: Value,
    /// Schedule documents keyed by schedule name
    #[serde(default)]
    pub schedules: BTreeMap<ScheduleName, Value>,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            settings: empty_object(),
            schedules: BTreeMap::new(),
        }
    }
}

impl Profile {
    /// Create an empty profile carrying the given settings
    pub fn with_settings(settings: Value) -> Self {
        Self {
            settings,
            schedules: BTreeMap::new(),
        }
    }
}

/// The singleton application state document
///
/// Every write operation loads this whole document, mutates it in memory and
/// writes it back. `profiles` always holds [`DEFAULT_PROFILE`] and
/// `active_profile` always names an existing profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Name of the currently selected profile
    pub active_profile: ProfileName,
    /// Registry of all profiles (name -> Profile)
    pub profiles: BTreeMap<ProfileName, Profile>,
}

impl Default for AppState {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(DEFAULT_PROFILE.to_string(), Profile::default());
        Self {
            active_profile: DEFAULT_PROFILE.to_string(),
            profiles,
        }
    }
}

/// Return the field value, or `MissingField` when it is absent or blank
pub fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::MissingField(field.to_string())),
    }
}

impl AppState {
    /// Create the initial state: only the default profile, active and empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the document invariants on a state read from storage
    ///
    /// Re-creates a missing default profile and points a dangling active
    /// profile back at the default. Returns true if anything changed.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;
        if !self.profiles.contains_key(DEFAULT_PROFILE) {
            self.profiles
                .insert(DEFAULT_PROFILE.to_string(), Profile::default());
            changed = true;
        }
        if !self.profiles.contains_key(&self.active_profile) {
            self.active_profile = DEFAULT_PROFILE.to_string();
            changed = true;
        }
        changed
    }

    /// Get the active profile
    pub fn active(&self) -> Option<&Profile> {
        self.profiles.get(&self.active_profile)
    }

    fn active_mut(&mut self) -> &mut Profile {
        self.normalize();
        self.profiles
            .entry(self.active_profile.clone())
            .or_default()
    }

    /// Add an empty profile and make it active
    pub fn create_profile(&mut self, name: &str) -> Result<(), AppError> {
        self.insert_profile(name, Profile::default())
    }

    /// Add a profile with the given settings and make it active
    ///
    /// `settings` of `None` means the field was absent; an empty object is a
    /// valid payload.
    pub fn import_profile(&mut self, name: &str, settings: Option<Value>) -> Result<(), AppError> {
        let name = required(Some(name), "name")?;
        let settings = settings.ok_or_else(|| AppError::MissingField("settings".to_string()))?;
        self.insert_profile(name, Profile::with_settings(settings))
    }

    fn insert_profile(&mut self, name: &str, profile: Profile) -> Result<(), AppError> {
        let name = required(Some(name), "name")?;
        if self.profiles.contains_key(name) {
            return Err(AppError::ProfileExists(name.to_string()));
        }
        self.profiles.insert(name.to_string(), profile);
        self.active_profile = name.to_string();
        Ok(())
    }

    /// Move a profile to a new name, following it with the active pointer
    pub fn rename_profile(&mut self, old_name: &str, new_name: &str) -> Result<(), AppError> {
        let old_name = required(Some(old_name), "oldName")?;
        let new_name = required(Some(new_name), "newName")?;

        if !self.profiles.contains_key(old_name) {
            return Err(AppError::ProfileNotFound(old_name.to_string()));
        }
        if self.profiles.contains_key(new_name) {
            return Err(AppError::ProfileExists(new_name.to_string()));
        }

        let profile = self
            .profiles
            .remove(old_name)
            .ok_or_else(|| AppError::ProfileNotFound(old_name.to_string()))?;
        self.profiles.insert(new_name.to_string(), profile);

        if self.active_profile == old_name {
            self.active_profile = new_name.to_string();
        }
        // Renaming the default away leaves the reserved slot empty
        self.normalize();
        Ok(())
    }

    /// Remove a profile
    ///
    /// The default profile is protected. If the removed profile was active,
    /// the default becomes active.
    pub fn delete_profile(&mut self, name: &str) -> Result<Profile, AppError> {
        let name = required(Some(name), "name")?;
        if name == DEFAULT_PROFILE {
            return Err(AppError::DefaultProfileProtected);
        }
        let removed = self
            .profiles
            .remove(name)
            .ok_or_else(|| AppError::ProfileNotFound(name.to_string()))?;

        if self.active_profile == name {
            self.active_profile = DEFAULT_PROFILE.to_string();
        }
        Ok(removed)
    }

    /// Select the active profile
    pub fn set_active_profile(&mut self, name: &str) -> Result<(), AppError> {
        let name = required(Some(name), "name")?;
        if !self.profiles.contains_key(name) {
            return Err(AppError::ProfileNotFound(name.to_string()));
        }
        self.active_profile = name.to_string();
        Ok(())
    }

    /// Replace the active profile's settings wholesale
    pub fn save_settings(&mut self, settings: Value) {
        self.active_mut().settings = settings;
    }

    /// Look up a schedule in the active profile
    pub fn schedule(&self, name: &str) -> Result<&Value, AppError> {
        self.active()
            .and_then(|profile| profile.schedules.get(name))
            .ok_or_else(|| AppError::ScheduleNotFound(name.to_string()))
    }

    /// Insert or overwrite a schedule in the active profile
    pub fn save_schedule(&mut self, name: &str, data: Option<Value>) -> Result<(), AppError> {
        let name = required(Some(name), "name")?;
        let data = data.ok_or_else(|| AppError::MissingField("data".to_string()))?;
        self.active_mut().schedules.insert(name.to_string(), data);
        Ok(())
    }

    /// Remove a schedule from the active profile
    pub fn delete_schedule(&mut self, name: &str) -> Result<Value, AppError> {
        self.active_mut()
            .schedules
            .remove(name)
            .ok_or_else(|| AppError::ScheduleNotFound(name.to_string()))
    }
}
