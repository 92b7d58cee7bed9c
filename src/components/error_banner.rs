//! Error Banner Component
//!
//! Shows the latest mutation or validation error until dismissed or expired.

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let store = use_app_store();
    let notice = move || store.dashboard().read().notice.clone();

    view! {
        {move || notice().map(|message| view! {
            <div class="alert error banner" role="alert">
                <span>{message}</span>
                <button
                    class="icon-btn"
                    title="Cerrar"
                    on:click=move |_| store.dashboard().write().dismiss_notice()
                >
                    "×"
                </button>
            </div>
        })}
    }
}
