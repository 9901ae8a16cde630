//! File Management
//!
//! Uploaded files with previews, multi-file upload, copy-as-markdown and
//! delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::api::{format_file_size, markdown_image, use_api};
use crate::components::{use_toasts, ConfirmModal, ConfirmRequest, PaginationBar, ThumbnailImage};
use crate::config::use_config;
use crate::models::UploadedFile;
use crate::store::{store_timezone, use_app_store};
use crate::thumbnail::{resolve_asset_url, ThumbnailSize};
use crate::timezone::format_date;
use crate::view_state::{Applied, ViewState};

const COPIED: &str = "マークダウン形式でクリップボードにコピーしました";

#[component]
pub fn FileManagement() -> impl IntoView {
    let api = use_api();
    let config = use_config();
    let store = use_app_store();
    let toasts = use_toasts();

    let state = RwSignal::new(ViewState::new(config.file_page_size));
    let (reload, set_reload) = signal(0u32);
    let (files, set_files) = signal(Vec::<UploadedFile>::new());
    let (loading, set_loading) = signal(true);
    let (uploading, set_uploading) = signal(false);
    let confirm = RwSignal::new(None::<ConfirmRequest>);

    let page = Memo::new(move |_| state.with(|s| s.page));
    let api_list = api.clone();
    Effect::new(move |_| {
        let _ = reload.get();
        let _ = page.get();
        let Some(ticket) = state.try_update_untracked(|s| s.begin_fetch()) else { return; };
        let api = api_list.clone();
        spawn_local(async move {
            match api.list_files().await {
                Ok(items) => match state.try_update(|s| s.apply_results(ticket, &items)) {
                    Some(Applied::Show(visible)) => { set_files.try_set(visible); }
                    Some(Applied::Reset) | Some(Applied::Stale) | None => {}
                },
                Err(e) => log::warn!("[FILES] load failed: {}", e),
            }
            set_loading.try_set(false);
        });
    });

    let api_upload = api.clone();
    let on_upload = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else { return; };
        let Some(list) = input.files() else { return; };
        let picked: Vec<web_sys::File> = (0..list.length()).filter_map(|i| list.get(i)).collect();
        if picked.is_empty() { return; }
        set_uploading.set(true);
        let api = api_upload.clone();
        spawn_local(async move {
            // One failure does not stop the rest of the batch
            for file in picked {
                if let Err(e) = api.upload_file(&file).await {
                    log::error!("[FILES] upload {} failed: {}", file.name(), e);
                    toasts.error(format!(
                        "ファイル「{}」のアップロードに失敗しました: {}",
                        file.name(),
                        e.user_message(&e.to_string()),
                    ));
                }
            }
            input.set_value("");
            set_uploading.try_set(false);
            set_reload.try_update(|n| *n += 1);
        });
    };

    let copy = move |url: String| {
        let text = markdown_image("画像", &url);
        spawn_local(async move {
            match copy_to_clipboard(&text).await {
                Ok(()) => toasts.success(COPIED),
                Err(e) => {
                    log::warn!("[FILES] clipboard: {:?}", e);
                    toasts.error(format!("コピーに失敗しました。手動でコピーしてください: {}", text));
                }
            }
        });
    };

    let api_delete = StoredValue::new(api.clone());
    let ask_delete = move |filename: String, original: String| {
        let request = ConfirmRequest::delete(
            "ファイル削除",
            format!("「{}」を削除しますか？", original),
            move || {
                let api = api_delete.get_value();
                let filename = filename.clone();
                spawn_local(async move {
                    match api.delete_file(&filename).await {
                        Ok(()) => { set_reload.try_update(|n| *n += 1); }
                        Err(e) => {
                            log::error!("[FILES] delete {} failed: {}", filename, e);
                            toasts.error("ファイル削除に失敗しました");
                        }
                    }
                });
            },
        );
        confirm.set(Some(request));
    };

    let base_url = StoredValue::new(api.base_url().to_string());
    let timezone = move || store_timezone(&store);

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <div class="loading">"読み込み中..."</div> }>
            <div class="content-list">
                <div class="content-list-header">
                    <h3>"ファイル管理"</h3>
                    <div class="file-upload-section">
                        <label class=move || if uploading.get() { "btn-primary upload-btn disabled" } else { "btn-primary upload-btn" }>
                            {move || if uploading.get() { "アップロード中..." } else { "ファイルをアップロード" }}
                            <input
                                type="file"
                                multiple
                                accept="image/*"
                                style="display: none"
                                disabled=move || uploading.get()
                                on:change=on_upload.clone()
                            />
                        </label>
                    </div>
                </div>
                <Show
                    when=move || !files.with(|f| f.is_empty())
                    fallback=|| view! { <p>"アップロードされたファイルはありません。"</p> }
                >
                    <table class="admin-content-table">
                        <thead>
                            <tr>
                                <th>"プレビュー"</th>
                                <th>"ファイル名"</th>
                                <th>"サイズ"</th>
                                <th>"操作者"</th>
                                <th>"作成日"</th>
                                <th>"操作"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || files.get()
                                key=|f| f.id
                                children=move |file| {
                                    let url = file.url.clone();
                                    let filename = file.filename.clone();
                                    let original = file.original_filename.clone();
                                    let preview = file.is_image().then(|| resolve_asset_url(&base_url.get_value(), &file.url));
                                    view! {
                                        <tr>
                                            <td>
                                                <div class="admin-thumbnail">
                                                    {match preview {
                                                        Some(src) => view! {
                                                            <ThumbnailImage
                                                                src=src
                                                                size=ThumbnailSize::Small
                                                                alt=file.original_filename.clone()
                                                                class="admin-thumb-image"
                                                            />
                                                        }.into_any(),
                                                        None => view! { <div class="file-preview-placeholder">"📄"</div> }.into_any(),
                                                    }}
                                                </div>
                                            </td>
                                            <td>
                                                <div class="file-info">
                                                    <div class="original-filename">{file.original_filename.clone()}</div>
                                                    <div class="filename">{file.filename.clone()}</div>
                                                </div>
                                            </td>
                                            <td>{format_file_size(file.file_size)}</td>
                                            <td>{file.uploader.clone().unwrap_or_default()}</td>
                                            <td>{format_date(&file.created_at, timezone())}</td>
                                            <td>
                                                <div class="content-actions">
                                                    <button on:click=move |_| copy(url.clone())>"コピー"</button>
                                                    <button on:click=move |_| ask_delete(filename.clone(), original.clone())>"削除"</button>
                                                </div>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <PaginationBar
                        page=Signal::derive(move || state.with(|s| s.page))
                        total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                        on_change=move |page: usize| state.update(|s| s.set_page(page))
                    />
                </Show>
            </div>
        </Show>
        <ConfirmModal request=confirm />
    }
}

/// `navigator.clipboard.writeText(text)`, falling back to a hidden textarea
/// and `document.execCommand("copy")` where the async API is unavailable.
async fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clipboard = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    if !clipboard.is_undefined() && !clipboard.is_null() {
        let write: js_sys::Function = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into()?;
        let promise: js_sys::Promise = write.call1(&clipboard, &JsValue::from_str(text))?.dyn_into()?;
        if JsFuture::from(promise).await.is_ok() {
            return Ok(());
        }
    }
    copy_with_textarea(&window, text)
}

fn copy_with_textarea(window: &web_sys::Window, text: &str) -> Result<(), JsValue> {
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let textarea: web_sys::HtmlTextAreaElement = document.create_element("textarea")?.dyn_into()?;
    textarea.set_value(text);
    textarea.set_attribute("readonly", "")?;
    textarea.set_attribute("style", "position: fixed; top: 0; left: 0; opacity: 0")?;
    body.append_child(&textarea)?;
    textarea.select();

    let exec: js_sys::Function = js_sys::Reflect::get(&document, &JsValue::from_str("execCommand"))?.dyn_into()?;
    let copied = exec.call1(&document, &JsValue::from_str("copy"));
    let _ = body.remove_child(&textarea);
    match copied?.as_bool() {
        Some(true) => Ok(()),
        _ => Err(JsValue::from_str("execCommand copy refused")),
    }
}
