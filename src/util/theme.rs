//! Theme restoration and application.
//!
//! SYSTEM CONTEXT
//! ==============
//! The theme panel and the startup path both render a `ThemePreferences`
//! blob onto the document: two classes on `<body>` and three CSS custom
//! properties on `<html>`. Stylesheets read only those, so every theme change
//! goes through `apply`.
//!
//! DESIGN
//! ======
//! `resolve` computes the complete style from a blob; `apply` writes every
//! part of it, so reapplying the same blob converges on the same document
//! state. `StyleTarget` isolates the DOM so the logic runs in native tests.
//!
//! The stored blob is keyed by owner. A tab opened with a persisted token
//! knows the user id only after the profile fetch, so the shell calls
//! `restore_for` whenever the signed-in id changes.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::state::preferences::{FontFamily, ThemeMode, ThemePreferences};
use crate::storage::keys::{PreferenceKind, preference_key};
use crate::storage::{KeyValueStore, load_json};
use crate::util::color::normalize_accent;

pub const DARK_CLASS: &str = "theme-dark";
pub const HIGH_CONTRAST_CLASS: &str = "high-contrast";
pub const FONT_SIZE_VAR: &str = "--app-font-size";
pub const FONT_FAMILY_VAR: &str = "--app-font-family";
pub const ACCENT_COLOR_VAR: &str = "--app-accent-color";

/// Fully resolved document style for a theme blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeStyle {
    pub dark: bool,
    pub high_contrast: bool,
    pub font_size: String,
    pub font_family: &'static str,
    pub accent_color: String,
}

/// Where the style is written. Implemented by the document in the browser.
pub trait StyleTarget {
    fn set_class(&self, class: &str, enabled: bool);
    fn set_property(&self, name: &str, value: &str);
}

pub fn font_stack(family: FontFamily) -> &'static str {
    match family {
        FontFamily::Default => "Roboto, sans-serif",
        FontFamily::Sans => "Arial, sans-serif",
        FontFamily::Serif => "Georgia, serif",
        FontFamily::Mono => "'Courier New', monospace",
    }
}

/// Compute the style; `auto` follows `system_prefers_dark`.
pub fn resolve(prefs: &ThemePreferences, system_prefers_dark: bool) -> ThemeStyle {
    let dark = match prefs.theme_mode {
        ThemeMode::Light => false,
        ThemeMode::Dark => true,
        ThemeMode::Auto => system_prefers_dark,
    };
    ThemeStyle {
        dark,
        high_contrast: prefs.high_contrast,
        font_size: format!("{}px", prefs.clamped_font_size()),
        font_family: font_stack(prefs.font_family),
        accent_color: normalize_accent(&prefs.accent_color),
    }
}

/// Write the full style for `prefs` to `target`.
pub fn apply<T: StyleTarget + ?Sized>(prefs: &ThemePreferences, system_prefers_dark: bool, target: &T) -> ThemeStyle {
    let style = resolve(prefs, system_prefers_dark);
    target.set_class(DARK_CLASS, style.dark);
    target.set_class(HIGH_CONTRAST_CLASS, style.high_contrast);
    target.set_property(FONT_SIZE_VAR, &style.font_size);
    target.set_property(FONT_FAMILY_VAR, style.font_family);
    target.set_property(ACCENT_COLOR_VAR, &style.accent_color);
    style
}

/// The stored theme for `user_id` (or the guest), falling back to defaults.
pub fn stored_theme<S: KeyValueStore>(store: &S, user_id: Option<&str>) -> ThemePreferences {
    load_json(store, &preference_key(PreferenceKind::Theme, user_id)).unwrap_or_default()
}

/// Startup path: read the stored theme and apply it.
pub fn restore<S, T>(store: &S, user_id: Option<&str>, system_prefers_dark: bool, target: &T) -> ThemePreferences
where
    S: KeyValueStore,
    T: StyleTarget + ?Sized,
{
    let prefs = stored_theme(store, user_id);
    let style = apply(&prefs, system_prefers_dark, target);
    tracing::debug!(dark = style.dark, font_size = %style.font_size, "theme restored");
    prefs
}

/// Re-apply the stored theme when the owner changes from `previous` to
/// `user_id` (guest to user after a profile fetch, user to guest on sign-out).
/// Returns `None` when the owner is unchanged so live edits are left alone.
pub fn restore_for<S, T>(
    store: &S,
    previous: Option<Option<&str>>,
    user_id: Option<&str>,
    system_prefers_dark: bool,
    target: &T,
) -> Option<ThemePreferences>
where
    S: KeyValueStore,
    T: StyleTarget + ?Sized,
{
    if previous == Some(user_id) {
        return None;
    }
    Some(restore(store, user_id, system_prefers_dark, target))
}

#[cfg(feature = "hydrate")]
pub use browser::{DocumentTarget, system_prefers_dark};

#[cfg(feature = "hydrate")]
mod browser {
    use wasm_bindgen::JsCast;

    use super::StyleTarget;

    /// Classes on `<body>`, custom properties on `<html>`.
    pub struct DocumentTarget {
        document: web_sys::Document,
    }

    impl DocumentTarget {
        pub fn current() -> Option<Self> {
            let document = web_sys::window()?.document()?;
            Some(Self { document })
        }
    }

    impl StyleTarget for DocumentTarget {
        fn set_class(&self, class: &str, enabled: bool) {
            let Some(body) = self.document.body() else {
                return;
            };
            let classes = body.class_list();
            let result = if enabled { classes.add_1(class) } else { classes.remove_1(class) };
            if let Err(err) = result {
                tracing::warn!(class, ?err, "could not update body class");
            }
        }

        fn set_property(&self, name: &str, value: &str) {
            let Some(root) = self
                .document
                .document_element()
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
            else {
                return;
            };
            if let Err(err) = root.style().set_property(name, value) {
                tracing::warn!(name, ?err, "could not set css property");
            }
        }
    }

    pub fn system_prefers_dark() -> bool {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
}
