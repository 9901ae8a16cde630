//! Profile Avatar
//!
//! Shows the current avatar; in edit mode a file can be picked or dropped,
//! previewed, uploaded or the avatar deleted.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::DragEvent;

use crate::api::use_api;
use crate::components::{use_toasts, ConfirmModal, ConfirmRequest};
use crate::context::use_app_context;
use crate::thumbnail::resolve_asset_url;
use crate::validation::check_avatar_file;

/// Object URLs made for local previews; server URLs are left alone.
fn is_object_url(url: &str) -> bool {
    url.starts_with("blob:")
}

fn release_preview(url: Option<String>) {
    if let Some(url) = url.filter(|u| is_object_url(u)) {
        if let Err(e) = web_sys::Url::revoke_object_url(&url) {
            log::warn!("[AVATAR] revoke failed: {:?}", e);
        }
    }
}

#[component]
pub fn ProfileAvatar(user_id: u32) -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let toasts = use_toasts();

    let (avatar_url, set_avatar_url) = signal(None::<String>);
    let (preview, set_preview) = signal(None::<String>);
    let chosen = StoredValue::new_local(None::<web_sys::File>);
    let (editing, set_editing) = signal(false);
    let (busy, set_busy) = signal(false);
    let (drag_active, set_drag_active) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let confirm = RwSignal::new(None::<ConfirmRequest>);

    let api_fetch = api.clone();
    Effect::new(move |_| {
        let _ = ctx.avatar_version.get();
        let api = api_fetch.clone();
        spawn_local(async move {
            let url = match api.avatar(user_id).await {
                Ok(info) => info.avatar_url.map(|url| resolve_asset_url(api.base_url(), &url)),
                Err(e) => {
                    log::warn!("[AVATAR] fetch failed: {}", e);
                    None
                }
            };
            set_avatar_url.try_set(url.clone());
            release_preview(preview.try_get_untracked().flatten());
            set_preview.try_set(url);
        });
    });

    let choose = move |file: web_sys::File| {
        if let Err(e) = check_avatar_file(file.size(), &file.type_()) {
            set_error.set(Some(e.message().to_string()));
            return;
        }
        let url = match web_sys::Url::create_object_url_with_blob(&file) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("[AVATAR] preview unavailable: {:?}", e);
                None
            }
        };
        release_preview(preview.get_untracked());
        set_preview.set(url);
        chosen.set_value(Some(file));
        set_error.set(None);
    };

    let on_pick = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else { return; };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            choose(file);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_active.set(true);
    };
    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_active.set(false);
    };
    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_active.set(false);
        let file = ev.data_transfer().and_then(|dt| dt.files()).and_then(|files| files.get(0));
        if let Some(file) = file {
            choose(file);
        }
    };

    on_cleanup(move || release_preview(preview.try_get_untracked().flatten()));

    let finish = move || {
        set_editing.try_set(false);
        chosen.try_set_value(None);
        set_error.try_set(None);
    };

    let cancel = move |_| {
        finish();
        release_preview(preview.get_untracked());
        set_preview.set(avatar_url.get_untracked());
    };

    let api_save = api.clone();
    let save = move |_| {
        let Some(file) = chosen.get_value() else {
            set_error.set(Some("画像を選択してください".to_string()));
            return;
        };
        set_busy.set(true);
        set_error.set(None);
        let api = api_save.clone();
        spawn_local(async move {
            match api.upload_avatar(&file).await {
                Ok(uploaded) => {
                    log::info!("[AVATAR] uploaded {}", uploaded.url);
                    toasts.success("プロフィール画像を更新しました");
                    finish();
                    ctx.avatar_changed();
                }
                Err(e) => {
                    log::error!("[AVATAR] upload failed: {}", e);
                    set_error.try_set(Some(e.user_message("アバターのアップロードに失敗しました")));
                }
            }
            set_busy.try_set(false);
        });
    };

    let api_delete = StoredValue::new(api.clone());
    let delete_avatar = move || {
        set_busy.set(true);
        let api = api_delete.get_value();
        spawn_local(async move {
            match api.delete_avatar().await {
                Ok(()) => {
                    toasts.success("プロフィール画像を削除しました");
                    finish();
                    set_avatar_url.try_set(None);
                    release_preview(preview.try_get_untracked().flatten());
                    set_preview.try_set(None);
                    ctx.avatar_changed();
                }
                Err(e) => {
                    log::error!("[AVATAR] delete failed: {}", e);
                    set_error.try_set(Some("アバターの削除に失敗しました".to_string()));
                }
            }
            set_busy.try_set(false);
        });
    };

    let ask_delete = move |_| {
        if avatar_url.get_untracked().is_none() && preview.get_untracked().is_none() {
            set_error.set(Some("削除するアバターがありません".to_string()));
            return;
        }
        confirm.set(Some(ConfirmRequest::delete(
            "アバター画像を削除",
            "プロフィール画像を削除しますか？この操作は元に戻せません。",
            delete_avatar,
        )));
    };

    let avatar_image = move |src: Option<String>, alt: &'static str| match src {
        Some(src) => view! { <img class="profile-avatar-image" src=src alt=alt /> }.into_any(),
        None => view! { <div class="profile-avatar-empty">"未設定"</div> }.into_any(),
    };

    view! {
        <div class="profile-avatar-section">
            {move || error.get().map(|msg| view! { <div class="error">{msg}</div> })}
            <div class="avatar-info">
                <h4>"プロフィール画像"</h4>
            </div>
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <div class="avatar-display">{move || avatar_image(avatar_url.get(), "アバター")}</div>
                    <div class="form-buttons">
                        <button type="button" on:click=move |_| set_editing.set(true)>"変更"</button>
                    </div>
                }
            >
                <div
                    class=move || if drag_active.get() { "avatar-display drag-active" } else { "avatar-display" }
                    title="画像をドラッグ＆ドロップでアップロードできます"
                    on:dragover=on_dragover
                    on:dragleave=on_dragleave
                    on:drop=on_drop
                >
                    {move || avatar_image(preview.get(), "アバタープレビュー")}
                    <input type="file" accept="image/*" id="avatar-upload" style="display: none" on:change=on_pick />
                    <label for="avatar-upload" class="btn-secondary">"画像を選択"</label>
                    <div class="avatar-hint">"JPEG、PNG、GIF、WebP形式（最大10MB）" <br /> "または画像をドラッグ＆ドロップ"</div>
                </div>
                <div class="form-buttons">
                    <button type="button" on:click=cancel>"キャンセル"</button>
                    <button type="button" class="btn-primary" disabled=move || busy.get() on:click=save.clone()>
                        {move || if busy.get() { "保存中..." } else { "保存" }}
                    </button>
                    <Show when=move || avatar_url.get().is_some() || preview.get().is_some()>
                        <button type="button" class="btn-danger" disabled=move || busy.get() on:click=ask_delete>"削除"</button>
                    </Show>
                </div>
            </Show>
            <ConfirmModal request=confirm />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_local_previews_are_released() {
        assert!(is_object_url("blob:http://localhost:8080/3f2a"));
        assert!(!is_object_url("http://localhost:8000/uploads/avatars/1.png"));
        assert!(!is_object_url("/uploads/avatars/1.png"));
    }
}
