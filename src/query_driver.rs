//! Task Query Driver
//!
//! Keeps the current user's task list fetched: whenever the cache entry needs
//! a fetch, start one and record its result.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use taskboard_core::{QueryKey, TaskApi};

use crate::context::AppContext;
use crate::store::{AppStateStoreFields, AppStore};

pub fn drive_task_query(ctx: AppContext, store: AppStore) {
    Effect::new(move |_| {
        let Some(user_id) = ctx.user_id() else {
            return;
        };
        let key = QueryKey::tasks(user_id);
        if !store.cache().read().needs_fetch(&key) {
            return;
        }
        let Some(ticket) = store.cache().write().begin_fetch(key) else {
            return;
        };

        let api = ctx.api();
        spawn_local(async move {
            let result = api.list_tasks(user_id).await;
            if let Err(e) = &result {
                warn!("loading tasks for user {user_id} failed: {e}");
            }
            store.cache().write().complete_fetch(ticket, result);
        });
    });
}
