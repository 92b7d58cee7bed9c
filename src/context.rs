//! Application Context
//!
//! Session and API client, provided via Leptos Context API.

use leptos::prelude::*;
use log::warn;
use taskboard_core::{ApiClient, Session, User};

use crate::storage::BrowserStorage;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Logged-in user, persisted in localStorage
    pub session: RwSignal<Session<BrowserStorage>>,
    api: StoredValue<ApiClient>,
}

impl AppContext {
    pub fn new(session: Session<BrowserStorage>, api: ApiClient) -> Self {
        Self {
            session: RwSignal::new(session),
            api: StoredValue::new(api),
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.current_user().cloned())
    }

    pub fn user_id(&self) -> Option<u32> {
        self.session.with(|s| s.user_id())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(|s| s.is_authenticated())
    }

    pub fn login(&self, user: User) {
        self.session.update(|s| {
            if let Err(e) = s.login(user) {
                warn!("session will not survive reload: {e}");
            }
        });
    }

    pub fn logout(&self) {
        self.session.update(|s| s.logout());
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
