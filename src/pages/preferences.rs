//! Notification, privacy and theme panels.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each panel loads its blob once (backend, then local copy, then defaults)
//! and autosaves every edit to the signed-in user's local copy. The explicit
//! Save button pushes the blob to the backend. The theme panel applies every
//! edit to the document immediately and never talks to the backend.
//!
//! The privacy panel also hosts the account deletion form.

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::preferences::{
    FontFamily, MAX_FONT_SIZE, MIN_FONT_SIZE, NotificationPreferences, PrivacySettings, ThemeMode, ThemePreferences,
};
use crate::util::forms::{DELETE_CONFIRMATION, validate_account_deletion};

pub const FREQUENCIES: [(&str, &str); 3] =
    [("instant", "Instant (as they happen)"), ("daily", "Daily notifications"), ("dnd", "Do not disturb")];
pub const SOUNDS: [(&str, &str); 4] = [("chime", "Chime"), ("bell", "Bell"), ("pop", "Pop"), ("arcade", "Arcade")];
pub const ACCOUNT_PRIVACY: [(&str, &str); 2] = [("public", "Public"), ("private", "Private")];
pub const TWO_FACTOR_METHODS: [(&str, &str); 2] = [("mobile", "Mobile app"), ("email", "Email")];
pub const THEME_MODES: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::Auto];

fn checkbox<B>(blob: RwSignal<B>, label: &'static str, get: fn(&B) -> bool, set: fn(&mut B, bool)) -> impl IntoView
where
    B: Send + Sync + 'static,
{
    view! {
        <label class="settings-toggle">
            <input
                type="checkbox"
                prop:checked=move || blob.with(get)
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    blob.update(|b| set(b, checked));
                }
            />
            <span>{label}</span>
        </label>
    }
}

fn select<B>(
    blob: RwSignal<B>,
    label: &'static str,
    options: &'static [(&'static str, &'static str)],
    get: fn(&B) -> String,
    set: fn(&mut B, String),
) -> impl IntoView
where
    B: Send + Sync + 'static,
{
    view! {
        <label class="settings-field">
            <span>{label}</span>
            <select
                prop:value=move || blob.with(get)
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    blob.update(|b| set(b, value));
                }
            >
                {options
                    .iter()
                    .map(|(value, text)| view! { <option value=*value>{*text}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

#[component]
pub fn NotificationsPanel() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let prefs = RwSignal::new(NotificationPreferences::default());
    let info = RwSignal::new(String::new());
    let loaded = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        let user_id = auth.get_untracked().user_id().map(str::to_owned);
        leptos::task::spawn_local(async move {
            let result = crate::app::browser_client().notifications.load(user_id.as_deref()).await;
            if result.source == crate::services::preferences::Source::Default {
                info.set("Using default settings".to_owned());
            }
            prefs.set(result.blob);
            loaded.set(true);
        });

        Effect::new(move || {
            let current = prefs.get();
            if !loaded.get_untracked() {
                return;
            }
            if let Err(e) = crate::app::browser_client().auth.update_notification_preferences(&current) {
                info.set(e.to_string());
            }
        });
    }

    let on_save = move |_| {
        info.set("Saving...".to_owned());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let user_id = auth.get_untracked().user_id().map(str::to_owned);
            let blob = prefs.get_untracked();
            match crate::app::browser_client().notifications.save(user_id.as_deref(), &blob).await {
                Ok(()) => info.set("Settings saved".to_owned()),
                Err(e) => info.set(format!("Save failed: {e}")),
            }
        });
    };

    let on_reset = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let user_id = auth.get_untracked().user_id().map(str::to_owned);
            prefs.set(crate::app::browser_client().notifications.reset(user_id.as_deref()));
        }
        #[cfg(not(feature = "hydrate"))]
        prefs.set(NotificationPreferences::default());
        info.set("Settings reset".to_owned());
    };

    view! {
        <div class="settings-form">
            <h2>"Email"</h2>
            {checkbox(prefs, "Email notifications", |p| p.email_enabled, |p, v| p.email_enabled = v)}
            {checkbox(prefs, "Security alerts", |p| p.security_alerts, |p, v| p.security_alerts = v)}
            {checkbox(prefs, "System notifications", |p| p.system_notif, |p, v| p.system_notif = v)}
            {checkbox(prefs, "Messages", |p| p.messages, |p, v| p.messages = v)}
            {checkbox(prefs, "Post updates", |p| p.post_updates, |p, v| p.post_updates = v)}
            {select(prefs, "Frequency", &FREQUENCIES, |p| p.frequency.clone(), |p, v| p.frequency = v)}
            <h2>"Sound"</h2>
            {checkbox(prefs, "Play sound", |p| p.sound_enabled, |p, v| p.sound_enabled = v)}
            {select(prefs, "Sound", &SOUNDS, |p| p.sound_file.clone(), |p, v| p.sound_file = v)}
            <label class="settings-field">
                <span>{move || format!("Volume: {}%", prefs.with(|p| p.volume))}</span>
                <input
                    type="range"
                    min="0"
                    max="100"
                    prop:value=move || prefs.with(|p| p.volume.to_string())
                    on:input=move |ev| {
                        if let Ok(volume) = event_target_value(&ev).parse::<u8>() {
                            prefs.update(|p| p.volume = volume.min(100));
                        }
                    }
                />
            </label>
            <div class="settings-actions">
                <button class="settings-button" on:click=on_save>"Save"</button>
                <button class="settings-button settings-button--secondary" on:click=on_reset>"Reset"</button>
            </div>
            <Show when=move || !info.get().is_empty()>
                <p class="settings-message">{move || info.get()}</p>
            </Show>
        </div>
    }
}

#[component]
pub fn PrivacyPanel() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let settings = RwSignal::new(PrivacySettings::default());
    let info = RwSignal::new(String::new());
    let loaded = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        let user_id = auth.get_untracked().user_id().map(str::to_owned);
        leptos::task::spawn_local(async move {
            use crate::services::preferences::Source;
            let result = crate::app::browser_client().privacy.load(user_id.as_deref()).await;
            info.set(
                match result.source {
                    Source::Remote => "Settings fetched from server.",
                    Source::Local => "Settings loaded from browser session.",
                    Source::Default => "Could not load settings from server. Using defaults.",
                }
                .to_owned(),
            );
            settings.set(result.blob);
            loaded.set(true);
        });

        Effect::new(move || {
            let current = settings.get();
            if !loaded.get_untracked() {
                return;
            }
            if let Err(e) = crate::app::browser_client().auth.update_privacy_settings(&current) {
                info.set(e.to_string());
            }
        });
    }

    let on_save = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let user_id = auth.get_untracked().user_id().map(str::to_owned);
            let blob = settings.get_untracked();
            match crate::app::browser_client().privacy.save(user_id.as_deref(), &blob).await {
                Ok(()) => info.set("Saved permanently & session updated!".to_owned()),
                Err(e) => info.set(format!("Failed to save settings to server: {e}")),
            }
        });
    };

    let on_reset = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let user_id = auth.get_untracked().user_id().map(str::to_owned);
            settings.set(crate::app::browser_client().privacy.reset(user_id.as_deref()));
        }
        #[cfg(not(feature = "hydrate"))]
        settings.set(PrivacySettings::default());
        info.set("Privacy settings reset to default".to_owned());
    };

    view! {
        <div class="settings-form">
            <h2>"Privacy"</h2>
            {select(settings, "Account privacy", &ACCOUNT_PRIVACY, |s| s.account_privacy.clone(), |s, v| s.account_privacy = v)}
            {checkbox(settings, "Show activity status", |s| s.show_activity, |s, v| s.show_activity = v)}
            {checkbox(settings, "Personalized recommendations", |s| s.personalized_recommendations, |s, v| s.personalized_recommendations = v)}
            <h2>"Security"</h2>
            {checkbox(settings, "Two-factor authentication", |s| s.two_factor, |s, v| s.two_factor = v)}
            <Show when=move || settings.with(|s| s.two_factor)>
                {select(settings, "Two-factor method", &TWO_FACTOR_METHODS, |s| s.two_factor_method.clone(), |s, v| s.two_factor_method = v)}
            </Show>
            <div class="settings-actions">
                <button class="settings-button" on:click=on_save>"Save"</button>
                <button class="settings-button settings-button--secondary" on:click=on_reset>"Reset"</button>
            </div>
            <Show when=move || !info.get().is_empty()>
                <p class="settings-message">{move || info.get()}</p>
            </Show>
            <DeleteAccount/>
        </div>
    }
}

#[component]
fn DeleteAccount() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (pw, confirm) = (password.get(), confirmation.get());
        if let Err(msg) = validate_account_deletion(&pw, &confirm) {
            info.set(msg.to_owned());
            return;
        }
        busy.set(true);
        info.set("Deleting account...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::app::browser_client().auth.delete_account(&pw, confirm.trim()).await {
                Ok(_) => {
                    auth.set(AuthState::signed_out());
                    if let Some(window) = web_sys::window() {
                        if let Err(err) = window.location().set_href(crate::util::guard::LOGIN_PATH) {
                            tracing::warn!(?err, "navigation after account deletion failed");
                        }
                    }
                }
                Err(e) => {
                    info.set(e.to_string());
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <form class="settings-form settings-danger" on:submit=on_submit>
            <h2>"Delete Account"</h2>
            <p>"This permanently removes your account and all stored settings."</p>
            <input
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder=format!("Type {DELETE_CONFIRMATION} to confirm")
                prop:value=move || confirmation.get()
                on:input=move |ev| confirmation.set(event_target_value(&ev))
            />
            <button class="settings-button settings-button--danger" type="submit" disabled=move || busy.get()>
                "Delete Account"
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="settings-message">{move || info.get()}</p>
            </Show>
        </form>
    }
}

#[component]
pub fn ThemePanel() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let theme = RwSignal::new(ThemePreferences::default());
    let info = RwSignal::new(String::new());

    #[cfg(feature = "hydrate")]
    {
        let user_id = auth.get_untracked().user_id().map(str::to_owned);
        let client = crate::app::browser_client();
        theme.set(client.theme.stored(user_id.as_deref()).unwrap_or_default());

        Effect::new(move |previous: Option<ThemePreferences>| {
            let current = theme.get();
            if let Some(target) = crate::util::theme::DocumentTarget::current() {
                crate::util::theme::apply(&current, crate::util::theme::system_prefers_dark(), &target);
            }
            if previous.is_some_and(|p| p != current) {
                let user_id = user_id.clone();
                let blob = current.clone();
                leptos::task::spawn_local(async move {
                    if let Err(e) = crate::app::browser_client().theme.save(user_id.as_deref(), &blob).await {
                        tracing::warn!(error = %e, "theme autosave failed");
                    }
                });
            }
            current
        });
    }

    let on_reset = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let user_id = auth.get_untracked().user_id().map(str::to_owned);
            theme.set(crate::app::browser_client().theme.reset(user_id.as_deref()));
        }
        #[cfg(not(feature = "hydrate"))]
        theme.set(ThemePreferences::default());
        info.set("Restored default theme".to_owned());
    };

    view! {
        <div class="settings-form">
            <h2>"Appearance"</h2>
            <div class="settings-segmented">
                {THEME_MODES
                    .into_iter()
                    .map(|mode| {
                        view! {
                            <label>
                                <input
                                    type="radio"
                                    name="theme-mode"
                                    prop:checked=move || theme.with(|t| t.theme_mode == mode)
                                    on:change=move |_| theme.update(|t| t.theme_mode = mode)
                                />
                                <span>{mode_label(mode)}</span>
                            </label>
                        }
                    })
                    .collect_view()}
            </div>
            <label class="settings-field">
                <span>{move || format!("Font size: {}px", theme.with(ThemePreferences::clamped_font_size))}</span>
                <input
                    type="range"
                    min=MIN_FONT_SIZE.to_string()
                    max=MAX_FONT_SIZE.to_string()
                    prop:value=move || theme.with(|t| t.clamped_font_size().to_string())
                    on:input=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<u8>() {
                            theme.update(|t| t.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE));
                        }
                    }
                />
            </label>
            <label class="settings-field">
                <span>"Font family"</span>
                <select
                    prop:value=move || theme.with(|t| t.font_family.as_str())
                    on:change=move |ev| {
                        let family = FontFamily::parse(&event_target_value(&ev));
                        theme.update(|t| t.font_family = family);
                    }
                >
                    {FontFamily::ALL
                        .into_iter()
                        .map(|f| view! { <option value=f.as_str()>{f.label()}</option> })
                        .collect_view()}
                </select>
            </label>
            <label class="settings-field">
                <span>"Accent color"</span>
                <input
                    type="color"
                    prop:value=move || theme.with(|t| t.accent_color.clone())
                    on:input=move |ev| {
                        let color = event_target_value(&ev);
                        theme.update(|t| t.accent_color = color);
                    }
                />
            </label>
            {checkbox(theme, "High contrast", |t| t.high_contrast, |t, v| t.high_contrast = v)}
            <div class="settings-actions">
                <button class="settings-button settings-button--secondary" on:click=on_reset>"Reset"</button>
            </div>
            <Show when=move || !info.get().is_empty()>
                <p class="settings-message">{move || info.get()}</p>
            </Show>
        </div>
    }
}

pub fn mode_label(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "Light",
        ThemeMode::Dark => "Dark",
        ThemeMode::Auto => "System",
    }
}
