//! Login Page Component
//!
//! Single email field. On success the user goes into the session and the
//! app navigates to the dashboard.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use taskboard_core::handlers::{LoginOutcome, LoginState};
use taskboard_core::TaskApi;

use crate::context::use_app_context;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();
    let state = RwSignal::new(LoginState::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(email) = state.try_update(|s| s.begin_submit()) else {
            return;
        };
        let api = ctx.api();
        let navigate = navigate.clone();

        spawn_local(async move {
            let result = api.login(&email).await;
            if let Some(LoginOutcome::Navigate(user)) = state.try_update(|s| s.finish(result)) {
                ctx.login(user);
                navigate("/dashboard", Default::default());
            }
        });
    };

    view! {
        <div class="login-layout">
            <div class="card login-card">
                <h1>"Iniciar Sesión"</h1>
                <p class="subtitle">"Ingresa tu email para continuar"</p>

                {move || state.with(|s| s.error.clone()).map(|error| view! {
                    <div class="alert error">{error}</div>
                })}

                <form on:submit=on_submit>
                    <label class="field">
                        <span>"Email"</span>
                        <input
                            type="email"
                            required
                            prop:value=move || state.with(|s| s.email.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.email = value);
                            }
                        />
                    </label>

                    <button
                        type="submit"
                        class="btn primary wide"
                        disabled=move || state.with(|s| s.loading)
                    >
                        {move || if state.with(|s| s.loading) { "Ingresando..." } else { "Ingresar" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
