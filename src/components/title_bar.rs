//! Title Bar Component
//!
//! Top bar with the signed-in email and the logout button.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::context::use_app_context;
use crate::store::{store_reset, use_app_store};

#[component]
pub fn TitleBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let navigate = use_navigate();

    let logout = move |_| {
        ctx.logout();
        store_reset(&store);
        navigate("/login", Default::default());
    };

    view! {
        <header class="title-bar">
            <span class="title-bar-title">"Mis Tareas"</span>
            <span class="title-bar-user">
                {move || ctx.user().map(|u| u.email).unwrap_or_default()}
            </span>
            <button class="btn ghost" on:click=logout>"⎋ Salir"</button>
        </header>
    }
}
