//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The shell owns the process-wide pieces of the client: the account client
//! singleton (browser only), the reactive `AuthState` context, the route
//! guard, and theme restoration on startup and whenever the signed-in user
//! changes.
//!
//! DESIGN
//! ======
//! Leptos contexts must be `Send + Sync`, which the `Rc`-based services are
//! not. The browser client is therefore a thread-local singleton reached via
//! `browser_client()`; pages mirror its state into the `AuthState` signal.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_navigate,
};

use crate::pages::{login::LoginPage, settings::SettingsPage};
use crate::state::auth::AuthState;
use crate::util::guard::install_route_guard;

#[cfg(feature = "hydrate")]
pub use browser::{BrowserClient, browser_client};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState { user: None, loading: true });
    provide_context(auth);

    #[cfg(feature = "hydrate")]
    {
        let user = browser_client().auth.get_current_user();
        auth.set(user.map_or_else(AuthState::signed_out, AuthState::signed_in));

        // The id may only arrive with the profile fetch; re-apply on change.
        Effect::new(move |previous: Option<Option<String>>| {
            let user_id = auth.with(|state| state.user_id().map(str::to_owned));
            if let Some(target) = crate::util::theme::DocumentTarget::current() {
                crate::util::theme::restore_for(
                    &crate::storage::BrowserStore::local(),
                    previous.as_ref().map(Option::as_deref),
                    user_id.as_deref(),
                    crate::util::theme::system_prefers_dark(),
                    &target,
                );
            }
            user_id
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/account-settings.css"/>
        <Title text="Account Settings"/>

        <Router>
            <RouteGuard/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("settings") view=SettingsPage/>
                <Route path=StaticSegment("") view=SettingsPage/>
            </Routes>
        </Router>
    }
}

/// Redirects to `/login` whenever the current route needs a token and none is stored.
#[component]
fn RouteGuard() -> impl IntoView {
    install_route_guard(use_navigate(), current_access_token);
}

/// Access token from the browser token store; always `None` during SSR.
pub fn current_access_token() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        browser_client().auth.api().tokens().access_token()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use std::rc::Rc;

    use crate::config::ApiConfig;
    use crate::net::fetch::FetchTransport;
    use crate::net::http::ApiClient;
    use crate::net::tokens::TokenStore;
    use crate::services::AccountClient;
    use crate::storage::keys::SESSION_USER_KEY;
    use crate::storage::{BrowserStore, KeyValueStore};
    use crate::util::guard::LOGIN_PATH;

    pub type BrowserClient = AccountClient<FetchTransport, BrowserStore>;

    thread_local! {
        static CLIENT: Rc<BrowserClient> = Rc::new(build());
    }

    /// The page-wide account client.
    pub fn browser_client() -> Rc<BrowserClient> {
        CLIENT.with(Rc::clone)
    }

    fn build() -> BrowserClient {
        let config = ApiConfig::from_build_env();
        tracing::info!(base_url = %config.base_url, "account client ready");
        let local = BrowserStore::local();
        let session = BrowserStore::session();
        let api = ApiClient::new(FetchTransport, config, TokenStore::new(local))
            .with_unauthorized_hook(on_unauthorized);
        AccountClient::new(api, local, session)
    }

    /// Tokens are already cleared by the API client; drop the cached user and
    /// force a full reload onto the login view.
    fn on_unauthorized() {
        BrowserStore::session().remove_item(SESSION_USER_KEY);
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.location().set_href(LOGIN_PATH) {
            tracing::warn!(?err, "redirect to login failed");
        }
    }
}
