//! Services module
//!
//! Business logic that sits between the HTTP handlers and the state store.

pub mod profiles;

pub use profiles::ProfileService;
