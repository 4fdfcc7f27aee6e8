//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::notice::Notice;
use crate::components::toolbar::Toolbar;
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::http::BrowserTransport;
use crate::pages::{
    login::LoginPage, me::MePage, not_found::NotFoundPage, register::RegisterPage,
    session_detail::SessionDetailPage, session_form::SessionFormPage, sessions::SessionsPage,
};
use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::state::ui::UiState;
use crate::util::auth::{RequireAuth, RequireGuest};
use crate::util::storage::BrowserStorage;

/// API client used by every page.
pub type BrowserApi = ApiClient<BrowserTransport>;

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
///
/// Builds the session store over browser storage and the API client on top
/// of it, then provides both plus the render-side mirrors through context.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let session = SessionStore::new(Arc::new(BrowserStorage));
    let api: BrowserApi = ApiClient::new(BrowserTransport, session.clone(), config.api_base_url.clone());

    let auth = RwSignal::new(AuthState::from_store(&session));
    let ui = RwSignal::new(UiState::default());

    let mirror = session.clone();
    let login_watch = session.is_logged().subscribe(move |_| auth.set(AuthState::from_store(&mirror)));
    on_cleanup(move || login_watch.unsubscribe());

    provide_context(config);
    provide_context(session);
    provide_context(api);
    provide_context(auth);
    provide_context(ui);

    view! {
        <Stylesheet id="leptos" href="/pkg/yoga-client.css"/>
        <Title text="Yoga app"/>

        <Router>
            <Toolbar/>
            <Notice/>
            <main>
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path="/sessions"/> }/>
                    <Route
                        path=StaticSegment("login")
                        view=|| view! { <RequireGuest><LoginPage/></RequireGuest> }
                    />
                    <Route
                        path=StaticSegment("register")
                        view=|| view! { <RequireGuest><RegisterPage/></RequireGuest> }
                    />
                    <Route
                        path=StaticSegment("sessions")
                        view=|| view! { <RequireAuth><SessionsPage/></RequireAuth> }
                    />
                    <Route
                        path=(StaticSegment("sessions"), StaticSegment("detail"), ParamSegment("id"))
                        view=|| view! { <RequireAuth><SessionDetailPage/></RequireAuth> }
                    />
                    <Route
                        path=(StaticSegment("sessions"), StaticSegment("create"))
                        view=|| view! { <RequireAuth><SessionFormPage/></RequireAuth> }
                    />
                    <Route
                        path=(StaticSegment("sessions"), StaticSegment("update"), ParamSegment("id"))
                        view=|| view! { <RequireAuth><SessionFormPage update=true/></RequireAuth> }
                    />
                    <Route path=StaticSegment("me") view=|| view! { <RequireAuth><MePage/></RequireAuth> }/>
                    <Route path=StaticSegment("404") view=NotFoundPage/>
                </Routes>
            </main>
        </Router>
    }
}
