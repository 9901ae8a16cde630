//! Profile Basic Info
//!
//! Username, email, introduction and timezone, with a searchable timezone
//! picker driven by mouse or keyboard.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::use_toasts;
use crate::models::{ProfileUpdate, User};
use crate::session;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::timezone;

/// Move the keyboard highlight one row, clamped to the list.
fn step_highlight(current: Option<usize>, len: usize, down: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match (current, down) {
        (None, true) => Some(0),
        (None, false) => None,
        (Some(i), true) => Some((i + 1).min(len - 1)),
        (Some(i), false) => Some(i.saturating_sub(1)),
    }
}

fn label_for(options: &[(u32, String)], id: u32) -> String {
    options
        .iter()
        .find(|(tz, _)| *tz == id)
        .map(|(_, label)| label.clone())
        .unwrap_or_default()
}

#[component]
pub fn ProfileBasicInfo(user: User) -> impl IntoView {
    let api = use_api();
    let store = use_app_store();
    let toasts = use_toasts();

    let options = StoredValue::new(timezone::options(chrono::Utc::now()));
    let original = StoredValue::new(user.clone());

    let (username, set_username) = signal(user.username.clone());
    let (email, set_email) = signal(user.email.clone().unwrap_or_default());
    let (profile, set_profile) = signal(user.profile.clone().unwrap_or_default());
    let (tz, set_tz) = signal(user.timezone);
    let (query, set_query) = signal(options.with_value(|o| label_for(o, user.timezone)));
    let (dropdown, set_dropdown) = signal(false);
    let (highlight, set_highlight) = signal(None::<usize>);
    let (editing, set_editing) = signal(false);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let matches = Memo::new(move |_| {
        let q = query.get();
        options.with_value(|o| timezone::search(o, &q).into_iter().cloned().collect::<Vec<_>>())
    });

    let pick_timezone = move |id: u32, label: String| {
        set_tz.set(id);
        set_query.set(label);
        set_dropdown.set(false);
        set_highlight.set(None);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if !dropdown.get_untracked() { return; }
        let len = matches.with_untracked(|m| m.len());
        match ev.key().as_str() {
            "ArrowDown" => {
                ev.prevent_default();
                set_highlight.update(|h| *h = step_highlight(*h, len, true));
            }
            "ArrowUp" => {
                ev.prevent_default();
                set_highlight.update(|h| *h = step_highlight(*h, len, false));
            }
            "Enter" => {
                ev.prevent_default();
                let chosen = highlight.get_untracked()
                    .and_then(|i| matches.with_untracked(|m| m.get(i).cloned()));
                if let Some((id, label)) = chosen {
                    pick_timezone(id, label);
                }
            }
            "Escape" => {
                set_dropdown.set(false);
                set_highlight.set(None);
            }
            _ => {}
        }
    };

    // Back to the stored values
    let reset = move || {
        let user = original.get_value();
        set_username.try_set(user.username.clone());
        set_email.try_set(user.email.clone().unwrap_or_default());
        set_profile.try_set(user.profile.clone().unwrap_or_default());
        set_tz.try_set(user.timezone);
        set_query.try_set(options.with_value(|o| label_for(o, user.timezone)));
        set_error.try_set(None);
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() { return; }
        set_saving.set(true);
        set_error.set(None);
        let update = ProfileUpdate::from_edit(
            &original.get_value(),
            &username.get_untracked(),
            &email.get_untracked(),
            &profile.get_untracked(),
            tz.get_untracked(),
        );
        let api = api.clone();
        spawn_local(async move {
            match api.update_profile(&update).await {
                Ok(updated) => {
                    if let Some(token) = &updated.access_token {
                        session::set_token(token);
                    }
                    log::info!("[PROFILE] updated user {}", updated.user.id);
                    original.try_set_value(updated.user.clone());
                    store.user().set(Some(updated.user));
                    reset();
                    set_editing.try_set(false);
                    toasts.success("基本情報を更新しました");
                }
                Err(e) => {
                    log::error!("[PROFILE] update failed: {}", e);
                    set_error.try_set(Some(e.user_message("基本情報の更新に失敗しました")));
                }
            }
            set_saving.try_set(false);
        });
    };

    let or_unset = |value: String| if value.is_empty() { "未設定".to_string() } else { value };

    view! {
        <div class="content-form">
            <h3>"基本情報"</h3>
            {move || error.get().map(|msg| view! { <div class="error">{msg}</div> })}
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <div class="profile-display">
                        <div class="profile-field">
                            <label>"ユーザー名"</label>
                            <div class="profile-value">{move || or_unset(username.get())}</div>
                        </div>
                        <div class="profile-field">
                            <label>"メールアドレス"</label>
                            <div class="profile-value">{move || or_unset(email.get())}</div>
                        </div>
                        <div class="profile-field">
                            <label>"プロフィール紹介文"</label>
                            <div class="profile-value pre-wrap">{move || or_unset(profile.get())}</div>
                        </div>
                        <div class="profile-field">
                            <label>"タイムゾーン"</label>
                            <div class="profile-value">
                                {move || {
                                    let id = tz.get();
                                    format!("{} (UTC{})", timezone::display_name(id), timezone::offset_label(id, chrono::Utc::now()))
                                }}
                            </div>
                        </div>
                    </div>
                    <div class="form-buttons">
                        <button type="button" on:click=move |_| set_editing.set(true)>"変更"</button>
                    </div>
                }
            >
                <form on:submit=submit.clone()>
                    <div>
                        <label>"ユーザー名"</label>
                        <input
                            type="text"
                            required
                            placeholder="表示される名前を入力してください"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label>"メールアドレス"</label>
                        <input
                            type="email"
                            required
                            placeholder="メールアドレスを入力してください"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label>"プロフィール紹介文"</label>
                        <textarea
                            rows=4
                            placeholder="自己紹介を入力してください"
                            prop:value=move || profile.get()
                            on:input=move |ev| set_profile.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div class="timezone-picker">
                        <label>"タイムゾーン"</label>
                        <input
                            type="text"
                            placeholder="タイムゾーンを検索..."
                            prop:value=move || query.get()
                            on:input=move |ev| {
                                set_query.set(event_target_value(&ev));
                                set_dropdown.set(true);
                                set_highlight.set(None);
                            }
                            on:focus=move |_| set_dropdown.set(true)
                            on:blur=move |_| set_dropdown.set(false)
                            on:keydown=on_keydown
                        />
                        <Show when=move || dropdown.get()>
                            <ul class="timezone-dropdown">
                                {move || {
                                    let current = tz.get();
                                    let lit = highlight.get();
                                    let found = matches.get();
                                    if found.is_empty() {
                                        return view! { <li class="timezone-empty">"該当するタイムゾーンがありません"</li> }.into_any();
                                    }
                                    found.into_iter().enumerate().map(|(i, (id, label))| {
                                        let mut class = String::from("timezone-option");
                                        if id == current { class.push_str(" selected"); }
                                        if lit == Some(i) { class.push_str(" highlighted"); }
                                        let text = label.clone();
                                        view! {
                                            // mousedown fires before the input's blur closes the list
                                            <li class=class on:mousedown=move |ev| {
                                                ev.prevent_default();
                                                pick_timezone(id, label.clone());
                                            }>{text}</li>
                                        }
                                    }).collect_view().into_any()
                                }}
                            </ul>
                        </Show>
                    </div>
                    <div class="form-buttons">
                        <button type="submit" disabled=move || saving.get()>
                            {move || if saving.get() { "保存中..." } else { "保存" }}
                        </button>
                        <button type="button" on:click=move |_| {
                            reset();
                            set_editing.set(false);
                        }>"キャンセル"</button>
                    </div>
                </form>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_moves_within_bounds() {
        assert_eq!(step_highlight(None, 3, true), Some(0));
        assert_eq!(step_highlight(Some(0), 3, true), Some(1));
        assert_eq!(step_highlight(Some(2), 3, true), Some(2));
        assert_eq!(step_highlight(Some(0), 3, false), Some(0));
        assert_eq!(step_highlight(None, 3, false), None);
        assert_eq!(step_highlight(Some(1), 0, true), None);
    }

    #[test]
    fn test_label_lookup() {
        let options = vec![(1, "UTC (UTC+00:00)".to_string()), (13, "Tokyo (UTC+09:00)".to_string())];
        assert_eq!(label_for(&options, 13), "Tokyo (UTC+09:00)");
        assert_eq!(label_for(&options, 99), "");
    }
}
