//! New Task Modal Component
//!
//! Dialog for creating a task. Subtasks are generated by the backend once
//! the task exists.

use leptos::prelude::*;
use taskboard_core::{MutationKind, TaskCategory, TaskStatus};

use crate::context::use_app_context;
use crate::store::{run_mutation, store_show_notice, use_app_store, AppStateStoreFields};

#[component]
pub fn NewTaskModal() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let creating = move || store.mutations().read().is_pending(MutationKind::CreateTask);
    let can_submit = move || {
        let creating = creating();
        store.dashboard().read().form.can_submit(creating)
    };

    let close = move |_| store.dashboard().write().close_modal();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !can_submit() {
            return;
        }
        let Some(user) = ctx.user() else { return };
        let request = store.dashboard().read().submit(&user);
        match request {
            Ok(mutation) => run_mutation(ctx, store, mutation),
            Err(e) => store_show_notice(&store, e.to_string()),
        }
    };

    view! {
        <Show when=move || store.dashboard().read().modal_open>
            <div class="modal-backdrop" on:click=close>
                <form
                    class="modal card"
                    on:click=|ev| ev.stop_propagation()
                    on:submit=submit
                >
                    <h2>"Nueva Tarea"</h2>

                    <label class="field">
                        <span>"Título"</span>
                        <input
                            type="text"
                            required
                            prop:value=move || store.dashboard().read().form.title.clone()
                            on:input=move |ev| store.dashboard().write().form.title = event_target_value(&ev)
                        />
                    </label>

                    <label class="field">
                        <span>"Descripción"</span>
                        <textarea
                            rows="4"
                            required
                            prop:value=move || store.dashboard().read().form.description.clone()
                            on:input=move |ev| store.dashboard().write().form.description = event_target_value(&ev)
                        ></textarea>
                    </label>

                    <label class="field">
                        <span>"Estado"</span>
                        <select
                            prop:value=move || store.dashboard().read().form.status.as_str()
                            on:change=move |ev| {
                                store.dashboard().write().form.status = TaskStatus::from_str(&event_target_value(&ev));
                            }
                        >
                            {TaskStatus::ALL.iter().map(|status| view! {
                                <option value=status.as_str()>{status.label()}</option>
                            }).collect_view()}
                        </select>
                    </label>

                    <label class="field">
                        <span>"Categoría"</span>
                        <select
                            prop:value=move || store.dashboard().read().form.category.as_str()
                            on:change=move |ev| {
                                store.dashboard().write().form.category = TaskCategory::from_str(&event_target_value(&ev));
                            }
                        >
                            {TaskCategory::ALL.iter().map(|category| view! {
                                <option value=category.as_str()>{category.label()}</option>
                            }).collect_view()}
                        </select>
                    </label>

                    <div class="modal-actions">
                        <button type="button" class="btn ghost" on:click=close>"Cancelar"</button>
                        <button type="submit" class="btn primary" disabled=move || !can_submit()>
                            {move || if creating() { "Creando..." } else { "Crear Tarea" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
