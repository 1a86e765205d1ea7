//! # account-settings
//!
//! Leptos + WASM account-settings client: login/registration, profile and
//! password management, notification/privacy/theme preference panels, and
//! client-side persistence of session and UI preferences.
//!
//! The session/preference core (`storage`, `net`, `services`, `util`) is plain
//! Rust with storage and HTTP behind traits, so it runs natively under the
//! `native` feature and in the browser under `hydrate`. `app` and `pages`
//! hold the Leptos view layer.

pub mod app;
pub mod config;
pub mod logging;
pub mod net;
pub mod pages;
pub mod services;
pub mod state;
pub mod storage;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    logging::init();
    leptos::mount::hydrate_body(app::App);
}
