//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. View code never
//! edits cached tasks; it runs mutations whose settled effects invalidate
//! the cache.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use taskboard_core::handlers::DashboardState;
use taskboard_core::{settle, Effect, Mutation, MutationTracker, QueryCache, Task};

use crate::context::AppContext;

/// How long a mutation error stays on screen
const NOTICE_MS: u32 = 6_000;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Fetched task lists, keyed by user
    pub cache: QueryCache<Vec<Task>>,
    /// In-flight mutations per kind
    pub mutations: MutationTracker,
    /// Dialog, form and error banner
    pub dashboard: DashboardState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Run `mutation` for the logged-in user and apply its settled effects
pub fn run_mutation(ctx: AppContext, store: AppStore, mutation: Mutation) {
    let Some(user_id) = ctx.session.with_untracked(|s| s.user_id()) else {
        return;
    };
    let kind = mutation.kind();
    store.mutations().write().begin(kind);
    let api = ctx.api();

    spawn_local(async move {
        let result = mutation.execute(&api).await;
        store.mutations().write().finish(kind);

        for effect in settle(&mutation, user_id, &result) {
            if let Effect::Invalidate(key) = &effect {
                store.cache().write().invalidate(key);
            }
            store.dashboard().write().apply(&effect);
            if let Effect::ShowError(message) = effect {
                expire_notice(store, message);
            }
        }
    });
}

/// Show a validation or other local error in the banner
pub fn store_show_notice(store: &AppStore, message: String) {
    store.dashboard().write().notice = Some(message.clone());
    expire_notice(*store, message);
}

/// Clear the banner after a while, unless a newer message replaced it
fn expire_notice(store: AppStore, message: String) {
    spawn_local(async move {
        TimeoutFuture::new(NOTICE_MS).await;
        let still_shown = store.dashboard().read().notice.as_deref() == Some(message.as_str());
        if still_shown {
            store.dashboard().write().dismiss_notice();
        }
    });
}

/// Forget all cached data and dashboard state (on logout)
pub fn store_reset(store: &AppStore) {
    store.cache().write().clear();
    store.dashboard().write().close_modal();
    store.dashboard().write().dismiss_notice();
}
