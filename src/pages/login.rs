//! Login and registration page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only route reachable without a token. A toggle switches between the
//! sign-in form and the registration form; registration shows a live
//! password-strength meter and refuses weak passwords before calling the
//! backend.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::util::forms::{validate_login, validate_registration};
use crate::util::password::{requirements, strength};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    SignIn,
    Register,
}

impl Mode {
    pub fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::Register => "Create Account",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::SignIn => "Don't have an account? Register",
            Self::Register => "Already have an account? Sign in",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::Register,
            Self::Register => Self::SignIn,
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let mode = RwSignal::new(Mode::SignIn);
    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        match mode.get() {
            Mode::SignIn => {
                let creds = match validate_login(&email.get(), &password.get()) {
                    Ok(creds) => creds,
                    Err(msg) => {
                        info.set(msg.to_owned());
                        return;
                    }
                };
                busy.set(true);
                info.set("Signing in...".to_owned());

                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(async move {
                    let client = crate::app::browser_client();
                    match client.auth.login(&creds.email, &creds.password).await {
                        Ok(user) => finish_sign_in(auth, user),
                        Err(e) => {
                            info.set(e.to_string());
                            busy.set(false);
                        }
                    }
                });
            }
            Mode::Register => {
                let form = match validate_registration(&full_name.get(), &email.get(), &password.get(), &confirm.get()) {
                    Ok(form) => form,
                    Err(msg) => {
                        info.set(msg.to_owned());
                        return;
                    }
                };
                busy.set(true);
                info.set("Creating account...".to_owned());

                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(async move {
                    let client = crate::app::browser_client();
                    match client.auth.register(&form.full_name, &form.email, &form.password).await {
                        Ok(user) => finish_sign_in(auth, user),
                        Err(e) => {
                            info.set(e.to_string());
                            busy.set(false);
                        }
                    }
                });
            }
        }
    };

    let meter = move || strength(&password.get());

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{move || mode.get().title()}</h1>
                <form class="login-form" on:submit=on_submit>
                    <Show when=move || mode.get() == Mode::Register>
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Full name"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=move || mode.get() == Mode::Register>
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Confirm password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                        <div class="strength-container">
                            <div class=move || format!("strength-text {}", meter().css_class())>
                                {move || meter().label()}
                            </div>
                            <div class=move || format!("strength-bar {}", meter().css_class())></div>
                            <ul class="strength-requirements">
                                {move || {
                                    requirements(&password.get())
                                        .into_iter()
                                        .map(|req| {
                                            let class = if req.met { "requirement met" } else { "requirement" };
                                            view! { <li class=class>{req.label}</li> }
                                        })
                                        .collect_view()
                                }}
                            </ul>
                        </div>
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || mode.get().title()}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <button
                    class="login-link"
                    type="button"
                    on:click=move |_| {
                        mode.update(|m| *m = m.toggled());
                        info.set(String::new());
                    }
                >
                    {move || mode.get().toggle_label()}
                </button>
            </div>
        </div>
    }
}

/// Publish the signed-in user and leave the login route.
#[cfg(feature = "hydrate")]
fn finish_sign_in(auth: RwSignal<AuthState>, user: crate::net::types::User) {
    auth.set(AuthState::signed_in(user));
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href("/settings") {
            tracing::warn!(?err, "navigation after sign-in failed");
        }
    }
}
