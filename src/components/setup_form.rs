//! Setup Form Component
//!
//! First-run creation of the administrator account.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::app::finish_sign_in;
use crate::store::use_app_store;
use crate::validation::check_new_password;

#[component]
pub fn SetupForm() -> impl IntoView {
    let store = use_app_store();
    let api = use_api();

    let (email, set_email) = signal(String::new());
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<&'static str>);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Err(e) = check_new_password(&password.get_untracked(), &confirm.get_untracked()) {
            set_error.set(Some(e.message()));
            return;
        }
        set_loading.set(true);
        set_error.set(None);

        let api = api.clone();
        let (email, username, password) = (email.get_untracked(), username.get_untracked(), password.get_untracked());
        spawn_local(async move {
            let result = match api.initial_setup(&email, &username, &password).await {
                Ok(resp) => finish_sign_in(&api, store, &resp.access_token).await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                log::error!("[SETUP] initial setup failed: {}", e);
                set_error.try_set(Some("初期セットアップに失敗しました"));
            }
            set_loading.try_set(false);
        });
    };

    view! {
        <div class="setup-form">
            <div class="setup-header">
                <h1>"mav 初期セットアップ"</h1>
                <p>"管理者アカウントを作成してください"</p>
            </div>
            <form on:submit=submit>
                <div>
                    <label>"メールアドレス:"</label>
                    <input type="email" required
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev)) />
                </div>
                <div>
                    <label>"ユーザー名:"</label>
                    <input type="text" required
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev)) />
                </div>
                <div>
                    <label>"パスワード:"</label>
                    <input type="password" required minlength="6"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev)) />
                </div>
                <div>
                    <label>"パスワード（確認）:"</label>
                    <input type="password" required minlength="6"
                        prop:value=move || confirm.get()
                        on:input=move |ev| set_confirm.set(event_target_value(&ev)) />
                </div>
                {move || error.get().map(|msg| view! { <div class="error">{msg}</div> })}
                <div class="form-buttons">
                    <button type="submit" class="btn-primary" disabled=move || loading.get()>
                        {move || if loading.get() { "セットアップ中..." } else { "セットアップ完了" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
