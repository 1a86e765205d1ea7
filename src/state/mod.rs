//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` is the reactive session view the shell provides as context;
//! `preferences` defines the persisted blobs the settings panels edit.

pub mod auth;
pub mod preferences;
