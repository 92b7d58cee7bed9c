//! Task Board Frontend App
//!
//! Restores the session, provides shared state and routes between the login
//! screen and the dashboard.

use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;
use taskboard_core::{ApiClient, ClientConfig, Session};

use crate::components::{Dashboard, LoginPage};
use crate::context::{use_app_context, AppContext};
use crate::storage::BrowserStorage;
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_env();
    log::info!("task board starting against {}", config.base_url);

    // Provide context to all children
    provide_context(AppContext::new(Session::restore(BrowserStorage), ApiClient::new(config)));
    provide_context(Store::new(AppState::new()));

    view! {
        <Router>
            <Routes fallback=|| view! { <Redirect path="/" /> }>
                <Route path=path!("/") view=HomeRedirect />
                <Route path=path!("/login") view=LoginRoute />
                <Route path=path!("/dashboard") view=DashboardRoute />
            </Routes>
        </Router>
    }
}

/// `/` goes wherever the session says
#[component]
fn HomeRedirect() -> impl IntoView {
    let ctx = use_app_context();
    let target = if ctx.session.with_untracked(|s| s.is_authenticated()) { "/dashboard" } else { "/login" };
    view! { <Redirect path=target /> }
}

#[component]
fn LoginRoute() -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <Show when=move || !ctx.is_authenticated() fallback=|| view! { <Redirect path="/dashboard" /> }>
            <LoginPage />
        </Show>
    }
}

#[component]
fn DashboardRoute() -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <Show when=move || ctx.is_authenticated() fallback=|| view! { <Redirect path="/login" /> }>
            <Dashboard />
        </Show>
    }
}
