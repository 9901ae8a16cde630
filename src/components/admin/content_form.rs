//! Content Editor
//!
//! Markdown editor with preview, image upload into the text at the cursor
//! and category checkboxes.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::{markdown_image, use_api};
use crate::components::use_toasts;
use crate::markdown::render_markdown;
use crate::models::{Category, Content, ContentPayload};

/// Ids of the categories whose names are attached to a content.
fn selected_category_ids(available: &[Category], names: &[String]) -> Vec<u32> {
    available
        .iter()
        .filter(|c| names.contains(&c.name))
        .map(|c| c.id)
        .collect()
}

/// Byte index of a UTF-16 offset (what `selectionStart` reports).
fn utf16_to_byte(text: &str, offset: u32) -> usize {
    let mut units = 0u32;
    for (index, ch) in text.char_indices() {
        if units >= offset {
            return index;
        }
        units += ch.len_utf16() as u32;
    }
    text.len()
}

/// Replace the UTF-16 range `start..end` with `insert`.
/// Returns the new text and the cursor placed after the insertion.
fn splice_utf16(text: &str, start: u32, end: u32, insert: &str) -> (String, u32) {
    let (start, end) = (start.min(end), start.max(end));
    let (from, to) = (utf16_to_byte(text, start), utf16_to_byte(text, end));
    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..from]);
    out.push_str(insert);
    out.push_str(&text[to..]);
    (out, start + insert.encode_utf16().count() as u32)
}

#[component]
pub fn ContentForm(
    content: Option<Content>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();

    let editing_id = content.as_ref().map(|c| c.id);
    let attached = content.as_ref().map(|c| c.categories.clone()).unwrap_or_default();

    let (title, set_title) = signal(content.as_ref().map(|c| c.title.clone()).unwrap_or_default());
    let (body, set_body) = signal(content.as_ref().map(|c| c.body.clone()).unwrap_or_default());
    let (published, set_published) = signal(content.as_ref().is_some_and(|c| c.is_published));
    let (categories, set_categories) = signal(Vec::<Category>::new());
    let selected = RwSignal::new(Vec::<u32>::new());
    let (preview, set_preview) = signal(false);
    let (uploading, set_uploading) = signal(false);
    let (saving, set_saving) = signal(false);
    let textarea_ref = NodeRef::<leptos::html::Textarea>::new();

    let api_cats = api.clone();
    Effect::new(move |_| {
        let api = api_cats.clone();
        let attached = attached.clone();
        spawn_local(async move {
            match api.list_categories().await {
                Ok(loaded) => {
                    selected.try_set(selected_category_ids(&loaded, &attached));
                    set_categories.try_set(loaded);
                }
                Err(e) => log::warn!("[EDITOR] categories: {}", e),
            }
        });
    });

    let toggle_category = move |id: u32| {
        selected.update(|ids| match ids.iter().position(|x| *x == id) {
            Some(pos) => { ids.remove(pos); }
            None => ids.push(id),
        });
    };

    let api_upload = api.clone();
    let on_image = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else { return; };
        let Some(file) = input.files().and_then(|files| files.get(0)) else { return; };
        set_uploading.set(true);
        let api = api_upload.clone();
        spawn_local(async move {
            match api.upload_file(&file).await {
                Ok(uploaded) => {
                    let snippet = markdown_image(&uploaded.original_filename, &uploaded.url);
                    insert_at_cursor(textarea_ref, body, set_body, &snippet).await;
                }
                Err(e) => {
                    log::error!("[EDITOR] image upload failed: {}", e);
                    toasts.error("画像のアップロードに失敗しました");
                }
            }
            set_uploading.try_set(false);
            input.set_value("");
        });
    };

    let api_save = api.clone();
    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() { return; }
        set_saving.set(true);
        let payload = ContentPayload {
            title: title.get_untracked(),
            body: body.get_untracked(),
            category_ids: selected.get_untracked(),
            is_published: published.get_untracked(),
        };
        let api = api_save.clone();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => api.update_content(id, &payload).await,
                None => api.create_content(&payload).await,
            };
            match result {
                Ok(()) => {
                    log::info!("[EDITOR] saved content {:?}", editing_id);
                    on_saved.run(());
                }
                Err(e) => {
                    log::error!("[EDITOR] save failed: {}", e);
                    toasts.error(format!("保存に失敗しました: {}", e.user_message(&e.to_string())));
                    set_saving.try_set(false);
                }
            }
        });
    };

    let base_url = StoredValue::new(api.base_url().to_string());
    let preview_html = move || {
        let text = body.get();
        let text = if text.is_empty() { "内容を入力してください...".to_string() } else { text };
        render_markdown(&text, &base_url.get_value())
    };

    view! {
        <div class="content-form">
            <h3>{if editing_id.is_some() { "コンテンツ編集" } else { "新規コンテンツ作成" }}</h3>
            <form on:submit=submit>
                <div class="title-publish-row">
                    <div class="title-section">
                        <label>"タイトル:"</label>
                        <input
                            type="text"
                            required
                            prop:value=move || title.get()
                            on:input=move |ev| set_title.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="publish-section">
                        <div class="publish-toggle">
                            <label class="switch">
                                <input
                                    type="checkbox"
                                    prop:checked=move || published.get()
                                    on:change=move |ev| set_published.set(event_target_checked(&ev))
                                />
                                <span class="slider"></span>
                            </label>
                            <span class="publish-status">{move || if published.get() { "公開" } else { "非公開" }}</span>
                        </div>
                    </div>
                </div>
                <div class="content-input-container">
                    <div class="editor-header">
                        <label>"内容:"</label>
                        <div class="editor-tabs">
                            <button
                                type="button"
                                class=move || if preview.get() { "tab-btn" } else { "tab-btn active" }
                                on:click=move |_| set_preview.set(false)
                            >"エディタ"</button>
                            <button
                                type="button"
                                class=move || if preview.get() { "tab-btn active" } else { "tab-btn" }
                                on:click=move |_| set_preview.set(true)
                            >"プレビュー"</button>
                        </div>
                    </div>
                    <div class="editor-container">
                        <Show
                            when=move || preview.get()
                            fallback=move || view! {
                                <textarea
                                    name="content"
                                    rows=15
                                    required
                                    placeholder="マークダウン形式で入力してください..."
                                    node_ref=textarea_ref
                                    prop:value=move || body.get()
                                    on:input=move |ev| set_body.set(event_target_value(&ev))
                                ></textarea>
                            }
                        >
                            <div class="markdown-preview" inner_html=preview_html></div>
                        </Show>
                    </div>
                    <div class="image-upload-section">
                        <label class="image-upload-btn">
                            {move || if uploading.get() { "画像アップロード中..." } else { "画像を挿入" }}
                            <input
                                type="file"
                                accept="image/*"
                                style="display: none"
                                disabled=move || uploading.get()
                                on:change=on_image
                            />
                        </label>
                        <small>"JPG, PNG, GIF, WebP対応（最大10MB）"</small>
                    </div>
                    <div class="category-section">
                        <label>"カテゴリ:"</label>
                        <div class="category-checkboxes">
                            <For
                                each=move || categories.get()
                                key=|c| c.id
                                children=move |cat| {
                                    let id = cat.id;
                                    let dom_id = format!("category-{}", id);
                                    view! {
                                        <div class="checkbox-item">
                                            <input
                                                type="checkbox"
                                                id=dom_id.clone()
                                                prop:checked=move || selected.with(|ids| ids.contains(&id))
                                                on:change=move |_| toggle_category(id)
                                            />
                                            <label for=dom_id>{cat.name}</label>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    </div>
                </div>
                <div class="form-buttons">
                    <button type="submit" disabled=move || saving.get()>"保存"</button>
                    <button type="button" on:click=move |_| on_cancel.run(())>"キャンセル"</button>
                </div>
            </form>
        </div>
    }
}

/// Insert `snippet` at the textarea's selection, or append it on a new line
/// when the editor is hidden behind the preview.
async fn insert_at_cursor(
    textarea_ref: NodeRef<leptos::html::Textarea>,
    body: ReadSignal<String>,
    set_body: WriteSignal<String>,
    snippet: &str,
) {
    let Some(textarea) = textarea_ref.get_untracked() else {
        set_body.update(|text| {
            text.push('\n');
            text.push_str(snippet);
        });
        return;
    };
    let start = textarea.selection_start().ok().flatten().unwrap_or(0);
    let end = textarea.selection_end().ok().flatten().unwrap_or(start);
    let (next, cursor) = splice_utf16(&body.get_untracked(), start, end, snippet);
    set_body.set(next);

    // Let the new value reach the DOM before moving the caret
    TimeoutFuture::new(0).await;
    let _ = textarea.focus();
    let _ = textarea.set_selection_range(cursor, cursor);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_matched_by_name() {
        let available = vec![
            Category { id: 1, name: "news".into(), description: None, sort_order: 1 },
            Category { id: 2, name: "tech".into(), description: None, sort_order: 2 },
        ];
        assert_eq!(selected_category_ids(&available, &["tech".into(), "gone".into()]), vec![2]);
        assert!(selected_category_ids(&available, &[]).is_empty());
    }

    #[test]
    fn test_splice_at_cursor() {
        let (text, cursor) = splice_utf16("ab", 1, 1, "X");
        assert_eq!(text, "aXb");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_splice_replaces_selection() {
        let (text, cursor) = splice_utf16("hello world", 6, 11, "there");
        assert_eq!(text, "hello there");
        assert_eq!(cursor, 11);
    }

    #[test]
    fn test_splice_counts_utf16_units() {
        // "日本" is two UTF-16 units but six bytes
        let (text, cursor) = splice_utf16("日本語", 2, 2, "![a](b)");
        assert_eq!(text, "日本![a](b)語");
        assert_eq!(cursor, 9);

        // Astral characters take two units each
        let (text, _) = splice_utf16("😀x", 2, 2, "-");
        assert_eq!(text, "😀-x");
    }

    #[test]
    fn test_splice_past_end_appends() {
        let (text, _) = splice_utf16("abc", 10, 10, "!");
        assert_eq!(text, "abc!");
    }
}
