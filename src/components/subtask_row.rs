//! Subtask Row Component
//!
//! Clicking the row toggles completion. The rename and delete controls stop
//! propagation so they never toggle as well.

use leptos::ev::{KeyboardEvent, MouseEvent};
use leptos::prelude::*;
use taskboard_core::handlers::DashboardState;
use taskboard_core::{MutationKind, SubTask};

use crate::context::use_app_context;
use crate::store::{run_mutation, use_app_store, AppStateStoreFields};

#[component]
pub fn SubtaskRow(#[prop(into)] subtask: Signal<Option<SubTask>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let editing = RwSignal::new(false);
    let draft = RwSignal::new(String::new());

    let completed = move || subtask.with(|s| s.as_ref().is_some_and(|s| s.is_completed));
    let deleting = move || store.mutations().read().is_pending(MutationKind::DeleteSubtask);

    let toggle = move |_: MouseEvent| {
        if editing.get_untracked() {
            return;
        }
        if let Some(mutation) = subtask.with_untracked(|s| s.as_ref().and_then(DashboardState::toggle_subtask)) {
            run_mutation(ctx, store, mutation);
        }
    };

    let start_edit = move |ev: MouseEvent| {
        ev.stop_propagation();
        draft.set(subtask.with_untracked(|s| s.as_ref().map(|s| s.title.clone()).unwrap_or_default()));
        editing.set(true);
    };

    let commit_edit = move || {
        if !editing.get_untracked() {
            return;
        }
        editing.set(false);
        let title = draft.get_untracked();
        if let Some(mutation) =
            subtask.with_untracked(|s| s.as_ref().and_then(|s| DashboardState::rename_subtask(s, &title)))
        {
            run_mutation(ctx, store, mutation);
        }
    };

    let on_key = move |ev: KeyboardEvent| match ev.key().as_str() {
        "Enter" => commit_edit(),
        "Escape" => editing.set(false),
        _ => {}
    };

    let delete = move |ev: MouseEvent| {
        ev.stop_propagation();
        if let Some(mutation) = subtask.with_untracked(|s| s.as_ref().and_then(DashboardState::delete_subtask)) {
            run_mutation(ctx, store, mutation);
        }
    };

    view! {
        <li
            class=move || if completed() { "subtask-row completed" } else { "subtask-row" }
            on:click=toggle
        >
            <input type="checkbox" tabindex="-1" prop:checked=completed />

            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <span class="subtask-title">
                        {move || subtask.with(|s| s.as_ref().map(|s| s.title.clone()).unwrap_or_default())}
                    </span>
                }
            >
                <input
                    type="text"
                    class="subtask-edit"
                    prop:value=move || draft.get()
                    on:click=|ev| ev.stop_propagation()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    on:keydown=on_key
                    on:blur=move |_| commit_edit()
                />
            </Show>

            <button class="icon-btn" title="Renombrar" on:click=start_edit>"✎"</button>
            <button
                class="icon-btn danger"
                title="Eliminar"
                aria-label="delete"
                disabled=deleting
                on:click=delete
            >
                "×"
            </button>
        </li>
    }
}
