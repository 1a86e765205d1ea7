//! Utility helpers shared across the settings UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep pure rules (guarding, validation, theming) out of the
//! page components so they can be tested without a browser.

pub mod color;
pub mod forms;
pub mod guard;
pub mod password;
pub mod theme;
