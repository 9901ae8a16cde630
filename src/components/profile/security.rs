//! Profile Security
//!
//! Password change behind a 変更 toggle.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::use_toasts;
use crate::models::PasswordChange;
use crate::validation::check_new_password;

#[component]
pub fn ProfileSecurity() -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();

    let (current, set_current) = signal(String::new());
    let (next, set_next) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (editing, set_editing) = signal(false);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let clear = move || {
        set_current.try_set(String::new());
        set_next.try_set(String::new());
        set_confirm.try_set(String::new());
        set_error.try_set(None);
        set_editing.try_set(false);
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() { return; }
        let new_password = next.get_untracked();
        if let Err(e) = check_new_password(&new_password, &confirm.get_untracked()) {
            set_error.set(Some(e.message().to_string()));
            return;
        }
        set_saving.set(true);
        set_error.set(None);
        let change = PasswordChange {
            current_password: current.get_untracked(),
            new_password,
        };
        let api = api.clone();
        spawn_local(async move {
            match api.change_password(&change).await {
                Ok(()) => {
                    log::info!("[PROFILE] password changed");
                    toasts.success("パスワードを変更しました");
                    clear();
                }
                Err(e) => {
                    log::warn!("[PROFILE] password change failed: {}", e);
                    set_error.try_set(Some(e.user_message("パスワード変更に失敗しました")));
                }
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <div class="content-form">
            <h3>"セキュリティ"</h3>
            {move || error.get().map(|msg| view! { <div class="error">{msg}</div> })}
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <div class="profile-display">
                        <div class="profile-field">
                            <label>"パスワード"</label>
                            <div class="profile-value">"••••••••"</div>
                        </div>
                    </div>
                    <div class="form-buttons">
                        <button type="button" on:click=move |_| set_editing.set(true)>"変更"</button>
                    </div>
                }
            >
                <form on:submit=submit.clone()>
                    <div>
                        <label>"現在のパスワード"</label>
                        <input
                            type="password"
                            required
                            placeholder="現在のパスワードを入力"
                            prop:value=move || current.get()
                            on:input=move |ev| set_current.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label>"新しいパスワード"</label>
                        <input
                            type="password"
                            required
                            placeholder="6文字以上で入力してください"
                            prop:value=move || next.get()
                            on:input=move |ev| set_next.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label>"新しいパスワード（確認）"</label>
                        <input
                            type="password"
                            required
                            placeholder="確認のため再入力してください"
                            prop:value=move || confirm.get()
                            on:input=move |ev| set_confirm.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-buttons">
                        <button type="button" on:click=move |_| clear()>"キャンセル"</button>
                        <button type="submit" disabled=move || saving.get()>
                            {move || if saving.get() { "変更中..." } else { "保存" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
