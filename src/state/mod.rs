// State management module
// Holds the application state document and its profile/schedule mutations

pub mod app_state;

pub use app_state::{required, AppState, Profile, ProfileName, ScheduleName, DEFAULT_PROFILE};
