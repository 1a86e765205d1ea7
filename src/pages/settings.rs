//! Settings page: tab navigation plus the account and password panels.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. The left rail switches between
//! panels; preference panels live in `pages::preferences`. Sign-out clears
//! the session through the auth service and returns to `/login`.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use leptos::prelude::*;

use crate::net::types::{ProfileUpdate, User};
use crate::pages::preferences::{NotificationsPanel, PrivacyPanel, ThemePanel};
use crate::state::auth::AuthState;
use crate::util::forms::{validate_password_change, validate_profile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsTab {
    Account,
    Password,
    Notifications,
    Privacy,
    Theme,
}

impl SettingsTab {
    pub const ALL: [Self; 5] = [Self::Account, Self::Password, Self::Notifications, Self::Privacy, Self::Theme];

    pub fn label(self) -> &'static str {
        match self {
            Self::Account => "Account",
            Self::Password => "Password",
            Self::Notifications => "Notifications",
            Self::Privacy => "Privacy & Security",
            Self::Theme => "Theme",
        }
    }
}

/// Editable copy of the profile fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub country: String,
    pub phone: String,
    pub date_of_birth: String,
    pub gender: String,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            country: user.country.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            date_of_birth: user.date_of_birth.clone().unwrap_or_default(),
            gender: user.gender.clone().unwrap_or_default(),
        }
    }

    /// Validated update carrying only the fields that differ from `original`.
    pub fn changes_from(&self, original: &User) -> Result<ProfileUpdate, &'static str> {
        let (full_name, email) = validate_profile(&self.full_name, &self.email)?;
        let before = Self::from_user(original);
        let changed = |new: &str, old: &str| (new.trim() != old).then(|| new.trim().to_owned());
        Ok(ProfileUpdate {
            full_name: changed(&full_name, &before.full_name),
            email: changed(&email, &before.email),
            country: changed(&self.country, &before.country),
            country_code: None,
            phone: changed(&self.phone, &before.phone),
            date_of_birth: changed(&self.date_of_birth, &before.date_of_birth),
            gender: changed(&self.gender, &before.gender),
        })
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let tab = RwSignal::new(SettingsTab::Account);

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::app::browser_client().auth.logout().await;
            auth.set(AuthState::signed_out());
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.location().set_href(crate::util::guard::LOGIN_PATH) {
                    tracing::warn!(?err, "navigation after logout failed");
                }
            }
        });
    };

    view! {
        <div class="settings-page">
            <header class="settings-header">
                <span class="settings-header__user">{move || auth.get().greeting()}</span>
                <button class="settings-button" on:click=on_logout>"Sign out"</button>
            </header>
            <nav class="settings-tabs">
                {SettingsTab::ALL
                    .into_iter()
                    .map(|t| {
                        view! {
                            <button
                                class=move || {
                                    if tab.get() == t { "settings-tab settings-tab--active" } else { "settings-tab" }
                                }
                                on:click=move |_| tab.set(t)
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <section class="settings-panel">
                {move || match tab.get() {
                    SettingsTab::Account => view! { <AccountPanel/> }.into_any(),
                    SettingsTab::Password => view! { <PasswordPanel/> }.into_any(),
                    SettingsTab::Notifications => view! { <NotificationsPanel/> }.into_any(),
                    SettingsTab::Privacy => view! { <PrivacyPanel/> }.into_any(),
                    SettingsTab::Theme => view! { <ThemePanel/> }.into_any(),
                }}
            </section>
        </div>
    }
}

#[component]
fn AccountPanel() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let form = RwSignal::new(auth.get_untracked().user.as_ref().map(ProfileForm::from_user).unwrap_or_default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::app::browser_client().auth.fetch_profile().await {
            Ok(user) => {
                form.set(ProfileForm::from_user(&user));
                auth.set(AuthState::signed_in(user));
            }
            Err(e) => tracing::debug!(error = %e, "profile refresh failed; using cached user"),
        }
    });

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(original) = auth.get().user else {
            info.set("Not authenticated".to_owned());
            return;
        };
        let updates = match form.get().changes_from(&original) {
            Ok(updates) => updates,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        if updates.is_empty() {
            info.set("Nothing to save.".to_owned());
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::app::browser_client().auth.update_profile(&updates).await {
                Ok(user) => {
                    form.set(ProfileForm::from_user(&user));
                    auth.set(AuthState::signed_in(user));
                    info.set("Profile updated successfully!".to_owned());
                }
                Err(e) => info.set(e.to_string()),
            }
            busy.set(false);
        });
    };

    let on_avatar = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Blob sizes are whole byte counts held in an f64.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let size = file.size() as u64;
            if let Err(msg) = crate::util::forms::validate_avatar(&file.name(), size) {
                info.set(msg.to_owned());
                input.set_value("");
                return;
            }
            busy.set(true);
            leptos::task::spawn_local(async move {
                let name = file.name();
                let bytes = match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
                    Ok(buffer) => js_sys::Uint8Array::new(&buffer).to_vec(),
                    Err(err) => {
                        tracing::warn!(?err, "could not read avatar file");
                        info.set("Could not read the selected file.".to_owned());
                        busy.set(false);
                        return;
                    }
                };
                let client = crate::app::browser_client();
                match client.auth.upload_avatar(&name, bytes).await {
                    Ok(_) => {
                        if let Some(user) = client.auth.get_current_user() {
                            auth.set(AuthState::signed_in(user));
                        }
                        info.set("Avatar updated.".to_owned());
                    }
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        ev.prevent_default();
    };

    let field = move |label: &'static str, kind: &'static str, get: fn(&ProfileForm) -> String, set: fn(&mut ProfileForm, String)| {
        view! {
            <label class="settings-field">
                <span>{label}</span>
                <input
                    type=kind
                    prop:value=move || form.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <form class="settings-form" on:submit=on_save>
            <div class="settings-avatar">
                {move || {
                    auth.get()
                        .user
                        .and_then(|u| u.avatar_url)
                        .map(|src| view! { <img class="settings-avatar__image" src=src alt="avatar"/> })
                }}
                <input type="file" accept=crate::util::forms::AVATAR_ACCEPT on:change=on_avatar/>
                <span class="settings-hint">"Allowed: JPG, GIF or PNG. Max size of 800K"</span>
            </div>
            {field("Full Name", "text", |f| f.full_name.clone(), |f, v| f.full_name = v)}
            {field("Email Address", "email", |f| f.email.clone(), |f, v| f.email = v)}
            {field("Country", "text", |f| f.country.clone(), |f, v| f.country = v)}
            {field("Phone", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
            {field("Date of Birth", "date", |f| f.date_of_birth.clone(), |f, v| f.date_of_birth = v)}
            {field("Gender", "text", |f| f.gender.clone(), |f, v| f.gender = v)}
            <button class="settings-button" type="submit" disabled=move || busy.get()>"Save Changes"</button>
            <Show when=move || !info.get().is_empty()>
                <p class="settings-message">{move || info.get()}</p>
            </Show>
        </form>
    }
}

#[component]
fn PasswordPanel() -> impl IntoView {
    let current = RwSignal::new(String::new());
    let new = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (cur, next, conf) = (current.get(), new.get(), confirm.get());
        if let Err(msg) = validate_password_change(&cur, &next, &conf) {
            info.set(msg.to_owned());
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::app::browser_client().auth.change_password(&cur, &next, &conf).await {
                Ok(message) => {
                    current.set(String::new());
                    new.set(String::new());
                    confirm.set(String::new());
                    info.set(message.unwrap_or_else(|| "Password changed.".to_owned()));
                }
                Err(e) => info.set(e.to_string()),
            }
            busy.set(false);
        });
    };

    view! {
        <form class="settings-form" on:submit=on_submit>
            <label class="settings-field">
                <span>"Current Password"</span>
                <input type="password" prop:value=move || current.get() on:input=move |ev| current.set(event_target_value(&ev))/>
            </label>
            <label class="settings-field">
                <span>"New Password"</span>
                <input type="password" prop:value=move || new.get() on:input=move |ev| new.set(event_target_value(&ev))/>
            </label>
            <label class="settings-field">
                <span>"Confirm Password"</span>
                <input type="password" prop:value=move || confirm.get() on:input=move |ev| confirm.set(event_target_value(&ev))/>
            </label>
            <button class="settings-button" type="submit" disabled=move || busy.get()>"Change Password"</button>
            <Show when=move || !info.get().is_empty()>
                <p class="settings-message">{move || info.get()}</p>
            </Show>
        </form>
    }
}
