//! User Management
//!
//! Admin-only list of accounts. The last administrator can neither be
//! deleted nor demoted, and nobody edits their own account here.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::{use_toasts, ConfirmModal, ConfirmRequest};
use crate::models::{ManagedUser, Role, UserPayload};
use crate::store::{store_timezone, use_app_store, AppStateStoreFields};
use crate::timezone::format_timestamp;

/// `user` is the only remaining administrator
pub fn is_last_admin(users: &[ManagedUser], user: &ManagedUser) -> bool {
    user.role == Role::Admin && users.iter().filter(|u| u.role == Role::Admin).count() <= 1
}

/// Rows open the editor for everyone but the signed-in user
pub fn can_edit(current_user_id: Option<u32>, user: &ManagedUser) -> bool {
    current_user_id.is_some_and(|id| id != user.id)
}

/// Form contents before submission
#[derive(Clone, Debug, Default, PartialEq)]
struct UserDraft {
    username: String,
    email: String,
    password: String,
    role: Role,
}

impl UserDraft {
    fn from_user(user: &ManagedUser) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone().unwrap_or_default(),
            password: String::new(),
            role: user.role,
        }
    }

    /// A blank password on update leaves the stored one untouched.
    fn into_payload(self) -> UserPayload {
        UserPayload {
            username: self.username,
            email: self.email,
            password: (!self.password.is_empty()).then_some(self.password),
            role: self.role,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Editor {
    Closed,
    New,
    Edit(ManagedUser),
}

#[component]
pub fn UserManagement() -> impl IntoView {
    let api = use_api();
    let store = use_app_store();
    let toasts = use_toasts();

    let (users, set_users) = signal(Vec::<ManagedUser>::new());
    let (reload, set_reload) = signal(0u32);
    let editor = RwSignal::new(Editor::Closed);
    let confirm = RwSignal::new(None::<ConfirmRequest>);

    let api_list = api.clone();
    Effect::new(move |_| {
        let _ = reload.get();
        let api = api_list.clone();
        spawn_local(async move {
            match api.list_users().await {
                Ok(loaded) => { set_users.try_set(loaded); }
                Err(e) => log::error!("[USERS] load failed: {}", e),
            }
        });
    });

    let current_user_id = move || store.user().with(|u| u.as_ref().map(|u| u.id));
    let timezone = move || store_timezone(&store);

    let api_delete = StoredValue::new(api.clone());
    let ask_delete = move |id: u32, username: String| {
        let request = ConfirmRequest::delete(
            "ユーザー削除",
            format!("「{}」を削除しますか？", username),
            move || {
                let api = api_delete.get_value();
                spawn_local(async move {
                    match api.delete_user(id).await {
                        Ok(()) => { set_reload.try_update(|n| *n += 1); }
                        Err(e) => {
                            log::error!("[USERS] delete {} failed: {}", id, e);
                            toasts.error(format!("ユーザー削除エラー: {}", e.user_message(&e.to_string())));
                        }
                    }
                });
            },
        );
        confirm.set(Some(request));
    };

    let on_saved = move |_: ()| {
        editor.set(Editor::Closed);
        set_reload.update(|n| *n += 1);
    };

    view! {
        <div class="user-management">
            {move || match editor.get() {
                Editor::Closed => view! {
                    <div class="content-list">
                        <div class="content-list-header">
                            <h3>"ユーザー一覧"</h3>
                            <button class="btn-primary" on:click=move |_| editor.set(Editor::New)>
                                "新規ユーザー作成"
                            </button>
                        </div>
                        <table class="admin-content-table">
                            <thead>
                                <tr>
                                    <th>"ユーザー名"</th>
                                    <th>"メールアドレス"</th>
                                    <th>"ロール"</th>
                                    <th>"作成日"</th>
                                    <th>"最終更新"</th>
                                    <th>"操作"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    let all = users.get();
                                    let me = current_user_id();
                                    let tz = timezone();
                                    all.iter().map(|user| {
                                        let editable = can_edit(me, user);
                                        let last_admin = is_last_admin(&all, user);
                                        let id = user.id;
                                        let username = user.username.clone();
                                        let row = user.clone();
                                        view! {
                                            <tr
                                                class=if editable { "clickable-row" } else { "" }
                                                on:click=move |_| if editable { editor.set(Editor::Edit(row.clone())) }
                                            >
                                                <td><div class="content-title">{user.username.clone()}</div></td>
                                                <td>{user.email.clone().unwrap_or_default()}</td>
                                                <td>{user.role.label()}</td>
                                                <td>{format_timestamp(&user.created_at, tz)}</td>
                                                <td>{user.updated_at.as_deref().map(|t| format_timestamp(t, tz)).unwrap_or_default()}</td>
                                                <td>
                                                    <div class="content-actions">
                                                        <button
                                                            disabled=last_admin
                                                            title=if last_admin { "最後の管理者は削除できません" } else { "" }
                                                            on:click=move |ev| {
                                                                ev.stop_propagation();
                                                                ask_delete(id, username.clone());
                                                            }
                                                        >"削除"</button>
                                                    </div>
                                                </td>
                                            </tr>
                                        }
                                    }).collect_view()
                                }}
                            </tbody>
                        </table>
                    </div>
                }.into_any(),
                Editor::New => view! {
                    <UserForm user=None users=users on_saved=on_saved on_cancel=move |_| editor.set(Editor::Closed) />
                }.into_any(),
                Editor::Edit(user) => view! {
                    <UserForm user=Some(user) users=users on_saved=on_saved on_cancel=move |_| editor.set(Editor::Closed) />
                }.into_any(),
            }}
            <ConfirmModal request=confirm />
        </div>
    }
}

#[component]
fn UserForm(
    user: Option<ManagedUser>,
    users: ReadSignal<Vec<ManagedUser>>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();

    let editing_id = user.as_ref().map(|u| u.id);
    let locked_role = user.as_ref().is_some_and(|u| users.with_untracked(|all| is_last_admin(all, u)));
    let draft = RwSignal::new(user.as_ref().map(UserDraft::from_user).unwrap_or_default());
    let (saving, set_saving) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() { return; }
        set_saving.set(true);
        let payload = draft.get_untracked().into_payload();
        let api = api.clone();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => api.update_user(id, &payload).await,
                None => api.create_user(&payload).await,
            };
            match result {
                Ok(()) => on_saved.run(()),
                Err(e) => {
                    log::error!("[USERS] save failed: {}", e);
                    toasts.error(format!("ユーザー保存エラー: {}", e.user_message(&e.to_string())));
                    set_saving.try_set(false);
                }
            }
        });
    };

    let on_role = move |ev: web_sys::Event| {
        let role = if event_target_value(&ev) == Role::Admin.as_str() { Role::Admin } else { Role::Member };
        draft.update(|d| d.role = role);
    };

    view! {
        <div class="content-form">
            <h3>{if editing_id.is_some() { "ユーザー編集" } else { "新規ユーザー作成" }}</h3>
            <form on:submit=submit>
                <div>
                    <label>"ユーザー名"</label>
                    <input
                        type="text"
                        required
                        prop:value=move || draft.with(|d| d.username.clone())
                        on:input=move |ev| draft.update(|d| d.username = event_target_value(&ev))
                    />
                </div>
                <div>
                    <label>"メールアドレス"</label>
                    <input
                        type="email"
                        required
                        prop:value=move || draft.with(|d| d.email.clone())
                        on:input=move |ev| draft.update(|d| d.email = event_target_value(&ev))
                    />
                </div>
                <div>
                    <label>
                        "パスワード"
                        {editing_id.is_some().then_some(" （変更する場合のみ入力）")}
                    </label>
                    <input
                        type="password"
                        required=editing_id.is_none()
                        prop:value=move || draft.with(|d| d.password.clone())
                        on:input=move |ev| draft.update(|d| d.password = event_target_value(&ev))
                    />
                </div>
                <div>
                    <label>"ロール"</label>
                    <select
                        disabled=locked_role
                        prop:value=move || draft.with(|d| d.role.as_str())
                        on:change=on_role
                    >
                        <option value="member">{Role::Member.label()}</option>
                        <option value="admin">{Role::Admin.label()}</option>
                    </select>
                    {locked_role.then(|| view! {
                        <small class="form-note">"最後の管理者はロールを変更できません"</small>
                    })}
                </div>
                <div class="form-buttons">
                    <button type="submit" disabled=move || saving.get()>
                        {if editing_id.is_some() { "更新" } else { "作成" }}
                    </button>
                    <button type="button" on:click=move |_| on_cancel.run(())>"キャンセル"</button>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u32, role: Role) -> ManagedUser {
        ManagedUser {
            id,
            username: format!("user{}", id),
            email: Some(format!("user{}@example.com", id)),
            role,
            created_at: "2024-01-01T00:00:00".into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_single_admin_is_last() {
        let users = vec![user(1, Role::Admin), user(2, Role::Member)];
        assert!(is_last_admin(&users, &users[0]));
        assert!(!is_last_admin(&users, &users[1]));
    }

    #[test]
    fn test_two_admins_are_not_last() {
        let users = vec![user(1, Role::Admin), user(2, Role::Admin)];
        assert!(!is_last_admin(&users, &users[0]));
    }

    #[test]
    fn test_cannot_edit_self() {
        let other = user(2, Role::Member);
        assert!(can_edit(Some(1), &other));
        assert!(!can_edit(Some(2), &other));
        assert!(!can_edit(None, &other));
    }

    #[test]
    fn test_blank_password_is_omitted() {
        let payload = UserDraft::from_user(&user(3, Role::Member)).into_payload();
        assert_eq!(payload.password, None);
        assert_eq!(payload.email, "user3@example.com");

        let draft = UserDraft { password: "secret1".into(), ..Default::default() };
        assert_eq!(draft.into_payload().password.as_deref(), Some("secret1"));
    }
}
