//! Dashboard Component
//!
//! The signed-in user's tasks, read from the query cache, plus the
//! new-task dialog.

use leptos::prelude::*;
use taskboard_core::{QueryKey, Task};

use crate::components::{ErrorBanner, NewTaskModal, TaskCard, TitleBar};
use crate::context::use_app_context;
use crate::query_driver::drive_task_query;
use crate::store::{use_app_store, AppStateStoreFields};

const LOAD_FAILED: &str = "No se pudieron cargar las tareas";

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    drive_task_query(ctx, store);

    let key = move || ctx.user_id().map(QueryKey::tasks);
    let tasks = move || -> Vec<Task> {
        let Some(key) = key() else { return Vec::new() };
        let data = store.cache().read().data(&key).cloned();
        data.unwrap_or_default()
    };
    let task_ids = move || tasks().iter().filter_map(|t| t.id).collect::<Vec<_>>();
    let is_loading = move || {
        let Some(key) = key() else { return false };
        let loading = store.cache().read().is_loading(&key);
        loading
    };
    let load_error = move || {
        let key = key()?;
        let message = store.cache().read().error(&key).map(|e| e.user_message(LOAD_FAILED));
        message
    };
    let is_empty = move || {
        let Some(key) = key() else { return false };
        let empty = store.cache().read().is_empty_result(&key);
        empty
    };
    let retry = move |_| {
        if let Some(key) = key() {
            store.cache().write().invalidate(&key);
        }
    };

    view! {
        <TitleBar />
        <ErrorBanner />

        <Show
            when=move || !is_loading()
            fallback=|| view! { <div class="spinner-page"><div class="spinner"></div></div> }
        >
            <main class="task-list">
                {move || load_error().map(|message| view! {
                    <div class="alert error">
                        <span>{message}</span>
                        <button class="btn ghost" on:click=retry>"Reintentar"</button>
                    </div>
                })}

                <Show when=is_empty>
                    <p class="empty-state">"No tienes tareas. Crea una nueva con el botón +"</p>
                </Show>

                <For
                    each=task_ids
                    key=|id| *id
                    children=move |id| {
                        let task = Signal::derive(move || tasks().into_iter().find(|t| t.id == Some(id)));
                        view! { <TaskCard task=task /> }
                    }
                />
            </main>
        </Show>

        <button
            class="fab"
            aria-label="add"
            on:click=move |_| store.dashboard().write().open_modal()
        >
            "+"
        </button>

        <NewTaskModal />
    }
}
