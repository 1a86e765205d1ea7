//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns form state and route-scoped orchestration; rules live in
//! `util` and backend calls in `services`. Service calls only run in the
//! browser build.

pub mod login;
pub mod preferences;
pub mod settings;
