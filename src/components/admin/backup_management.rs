//! Backup Management
//!
//! Shows what a backup would contain, downloads it as a ZIP and restores
//! from one after an explicit overwrite confirmation.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::{JsCast, JsValue};

use crate::api::{format_file_size, is_restorable, use_api, BackupArchive};
use crate::components::{ConfirmModal, ConfirmRequest};
use crate::models::BackupInfo;

const RESTORE_WARNING: &str =
    "復元を実行すると、現在のデータはすべて上書きされます。\nこの操作は元に戻すことができません。\n\n続行しますか？";

/// Inline result banner
#[derive(Clone, Debug, PartialEq)]
enum Notice {
    Success(String),
    Error(String),
}

#[component]
pub fn BackupManagement() -> impl IntoView {
    let api = use_api();

    let (info, set_info) = signal(None::<BackupInfo>);
    let (reload, set_reload) = signal(0u32);
    let (notice, set_notice) = signal(None::<Notice>);
    let (downloading, set_downloading) = signal(false);
    let (restoring, set_restoring) = signal(false);
    let confirm = RwSignal::new(None::<ConfirmRequest>);
    let pending = StoredValue::new_local(None::<web_sys::File>);

    let api_info = api.clone();
    Effect::new(move |_| {
        let _ = reload.get();
        let api = api_info.clone();
        spawn_local(async move {
            match api.backup_info().await {
                Ok(loaded) => { set_info.try_set(Some(loaded)); }
                Err(e) => {
                    log::warn!("[BACKUP] info: {}", e);
                    set_notice.try_set(Some(Notice::Error("バックアップ情報の取得に失敗しました".into())));
                }
            }
        });
    });

    let api_download = api.clone();
    let download = move |_| {
        if downloading.get_untracked() { return; }
        set_downloading.set(true);
        set_notice.set(None);
        let api = api_download.clone();
        spawn_local(async move {
            let result = match api.download_backup().await {
                Ok(archive) => save_archive(&archive).map_err(|e| format!("{:?}", e)),
                Err(e) => Err(e.to_string()),
            };
            match result {
                Ok(()) => {
                    log::info!("[BACKUP] downloaded");
                    set_notice.try_set(Some(Notice::Success("バックアップのダウンロードが完了しました".into())));
                }
                Err(e) => {
                    log::error!("[BACKUP] download failed: {}", e);
                    set_notice.try_set(Some(Notice::Error("バックアップのダウンロードに失敗しました".into())));
                }
            }
            set_downloading.try_set(false);
        });
    };

    let api_restore = StoredValue::new(api.clone());
    let restore = move || {
        let Some(file) = pending.try_update_value(|f| f.take()).flatten() else { return; };
        set_restoring.set(true);
        set_notice.set(None);
        let api = api_restore.get_value();
        spawn_local(async move {
            match api.restore_backup(&file).await {
                Ok(()) => {
                    log::info!("[BACKUP] restored from {}", file.name());
                    set_notice.try_set(Some(Notice::Success("バックアップからの復元が完了しました".into())));
                    set_reload.try_update(|n| *n += 1);
                }
                Err(e) => {
                    log::error!("[BACKUP] restore failed: {}", e);
                    set_notice.try_set(Some(Notice::Error(e.user_message("復元に失敗しました"))));
                }
            }
            set_restoring.try_set(false);
        });
    };

    let on_pick = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else { return; };
        let Some(file) = input.files().and_then(|files| files.get(0)) else { return; };
        // Clear so picking the same file again fires change
        input.set_value("");
        if !is_restorable(&file.name()) {
            set_notice.set(Some(Notice::Error("ZIPファイルを選択してください".into())));
            return;
        }
        pending.set_value(Some(file));
        let request = ConfirmRequest::delete("バックアップの復元", RESTORE_WARNING, restore).with_label("上書き");
        confirm.set(Some(request));
    };

    view! {
        <div class="backup-management">
            <div class="content-list-header">
                <h3>"バックアップ管理"</h3>
            </div>

            {move || notice.get().map(|n| match n {
                Notice::Success(msg) => view! { <div class="success">{msg}</div> }.into_any(),
                Notice::Error(msg) => view! { <div class="error">{msg}</div> }.into_any(),
            })}

            {move || info.get().map(|info| view! {
                <div class="backup-info">
                    <h3>"現在のデータ状況"</h3>
                    <div class="info-grid">
                        <div class="info-section">
                            <h4>"データベース"</h4>
                            <ul>
                                <li>"ユーザー: " {info.database.users} "件"</li>
                                <li>"カテゴリ: " {info.database.categories} "件"</li>
                                <li>"コンテンツ: " {info.database.contents} "件"</li>
                            </ul>
                        </div>
                        <div class="info-section">
                            <h4>"アップロードファイル"</h4>
                            <ul>
                                <li>"ファイル数: " {info.files.count} "個"</li>
                                <li>"合計サイズ: " {format_file_size(info.files.total_size)}</li>
                            </ul>
                        </div>
                    </div>
                </div>
            })}

            <div class="backup-actions">
                <div class="action-section">
                    <h3>"バックアップの作成"</h3>
                    <p>"データベースとアップロードファイルを含む完全なバックアップを作成します。"</p>
                    <button class="btn-primary" disabled=move || downloading.get() on:click=download>
                        {move || if downloading.get() { "ダウンロード中..." } else { "バックアップをダウンロード" }}
                    </button>
                </div>
                <div class="action-section restore-section">
                    <h3>"バックアップからの復元"</h3>
                    <div class="warning">
                        <strong>"警告:"</strong>
                        " 復元を実行すると、現在のすべてのデータが上書きされます。この操作は元に戻すことができません。"
                    </div>
                    <div class="file-upload">
                        <input
                            type="file"
                            accept=".zip"
                            id="backup-file"
                            disabled=move || restoring.get()
                            on:change=on_pick
                        />
                        <label for="backup-file" class="btn-secondary">
                            {move || if restoring.get() { "復元中..." } else { "バックアップファイルを選択" }}
                        </label>
                    </div>
                </div>
            </div>
            <ConfirmModal request=confirm />
        </div>
    }
}

/// Hand the archive to the browser as a file download.
fn save_archive(archive: &BackupArchive) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let bytes = js_sys::Uint8Array::from(archive.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/zip");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let link: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&url);
    link.set_download(&archive.filename);
    body.append_child(&link)?;
    link.click();
    link.remove();
    web_sys::Url::revoke_object_url(&url)?;
    Ok(())
}
