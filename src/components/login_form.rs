//! Login Form Component
//!
//! Modal dialog opened from the footer or after the session expired.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::app::finish_sign_in;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn LoginForm() -> impl IntoView {
    let store = use_app_store();
    let api = use_api();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<&'static str>);

    let close = move || store.show_login().set(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() { return; }
        set_loading.set(true);
        set_error.set(None);

        let api = api.clone();
        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            let result = match api.login(&email, &password).await {
                Ok(resp) => finish_sign_in(&api, store, &resp.access_token).await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                log::warn!("[AUTH] login failed: {}", e);
                set_error.try_set(Some("ログインに失敗しました"));
            }
            set_loading.try_set(false);
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| close()>
            <div class="login-modal" on:click=|ev| ev.stop_propagation()>
                <div class="login-modal-header">
                    <h2>"管理者ログイン"</h2>
                    <button class="close-btn" on:click=move |_| close()>"×"</button>
                </div>
                <form on:submit=submit>
                    <div>
                        <label>"メールアドレス:"</label>
                        <input
                            type="email"
                            required
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label>"パスワード:"</label>
                        <input
                            type="password"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    {move || error.get().map(|msg| view! { <div class="error">{msg}</div> })}
                    <div class="form-buttons">
                        <button type="submit" disabled=move || loading.get()>
                            {move || if loading.get() { "ログイン中..." } else { "ログイン" }}
                        </button>
                        <button type="button" on:click=move |_| close()>"キャンセル"</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
