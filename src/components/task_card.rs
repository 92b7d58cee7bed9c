//! Task Card Component
//!
//! Collapsible card: title, description and chips in the header, the
//! AI-generated subtasks in the body.

use leptos::prelude::*;
use taskboard_core::handlers::DashboardState;
use taskboard_core::{MutationKind, Task};

use crate::components::SubtaskRow;
use crate::context::use_app_context;
use crate::store::{run_mutation, use_app_store, AppStateStoreFields};

#[component]
pub fn TaskCard(#[prop(into)] task: Signal<Option<Task>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (expanded, set_expanded) = signal(false);

    let field = move |f: fn(&Task) -> String| move || task.with(|t| t.as_ref().map(f).unwrap_or_default());
    let deleting = move || store.mutations().read().is_pending(MutationKind::DeleteTask);

    let subtask_ids = move || {
        task.with(|t| {
            t.as_ref()
                .map(|t| t.subtasks.iter().filter_map(|s| s.id).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };

    let delete = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        if let Some(mutation) = task.with_untracked(|t| t.as_ref().and_then(DashboardState::delete_task)) {
            run_mutation(ctx, store, mutation);
        }
    };

    view! {
        <section class="card task-card">
            <div class="task-header" on:click=move |_| set_expanded.update(|v| *v = !*v)>
                <div class="task-summary">
                    <h3>{field(|t| t.title.clone())}</h3>
                    <p class="task-description">{field(|t| t.description.clone())}</p>
                    <div class="chips">
                        {move || task.with(|t| t.as_ref().map(|t| {
                            let progress = t.progress().map(|(done, total)| view! {
                                <span class="chip outlined">{format!("{done}/{total} subtareas")}</span>
                            });
                            view! {
                                <span class=format!("chip {}", t.category.tone())>{t.category.as_str()}</span>
                                <span class=format!("chip {}", t.status.tone())>{t.status.label()}</span>
                                {progress}
                            }
                        }))}
                    </div>
                </div>
                <button class="icon-btn danger" title="Eliminar tarea" disabled=deleting on:click=delete>
                    "🗑"
                </button>
                <span class="expand-icon">{move || if expanded.get() { "▲" } else { "▼" }}</span>
            </div>

            <Show when=move || expanded.get()>
                <div class="task-body">
                    <Show
                        when=move || !subtask_ids().is_empty()
                        fallback=|| view! {
                            <p class="muted centered">"Esta tarea no tiene subtareas generadas"</p>
                        }
                    >
                        <h4>"Subtareas (generadas por IA)"</h4>
                        <ul class="subtask-list">
                            <For
                                each=subtask_ids
                                key=|id| *id
                                children=move |id| {
                                    let subtask = Signal::derive(move || {
                                        task.with(|t| {
                                            t.as_ref().and_then(|t| t.subtasks.iter().find(|s| s.id == Some(id)).cloned())
                                        })
                                    });
                                    view! { <SubtaskRow subtask=subtask /> }
                                }
                            />
                        </ul>
                    </Show>
                </div>
            </Show>
        </section>
    }
}
