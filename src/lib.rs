//! Shift Planner Backend Library
//!
//! Persists settings profiles and named schedules for the shift planner
//! front-end, and serves static holiday data.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod holidays;
pub mod services;
/// Application state document
///
/// Profiles, their settings and schedules, and the active-profile pointer.
pub mod state;
pub mod store;
