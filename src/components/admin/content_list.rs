//! Admin Content List
//!
//! Every content including drafts, ten per page. Clicking a row opens the
//! editor; the list is hidden while the editor is open.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::{use_toasts, ConfirmModal, ConfirmRequest, PaginationBar, ThumbnailImage};
use crate::config::use_config;
use crate::markdown::{excerpt, extract_first_image};
use crate::models::Content;
use crate::navigation::scroll_to_top;
use crate::store::{store_timezone, use_app_store};
use crate::thumbnail::{resolve_asset_url, ThumbnailSize};
use crate::timezone::format_date;
use crate::view_state::{Applied, ViewState};

use super::content_form::ContentForm;

const ADMIN_EXCERPT_CHARS: usize = 120;

/// Which editor, if any, replaces the list
#[derive(Clone, Debug, PartialEq)]
enum Editor {
    Closed,
    New,
    Edit(Content),
}

#[component]
pub fn ContentList() -> impl IntoView {
    let api = use_api();
    let config = use_config();
    let store = use_app_store();
    let toasts = use_toasts();

    let state = RwSignal::new(ViewState::new(config.admin_page_size));
    let (reload, set_reload) = signal(0u32);
    let (contents, set_contents) = signal(Vec::<Content>::new());
    let editor = RwSignal::new(Editor::Closed);
    let confirm = RwSignal::new(None::<ConfirmRequest>);

    let refresh_from_first = move || {
        state.update(|s| s.set_page(1));
        set_reload.update(|n| *n += 1);
    };

    let page = Memo::new(move |_| state.with(|s| s.page));
    let api_list = api.clone();
    Effect::new(move |_| {
        let _ = reload.get();
        let _ = page.get();
        let Some(ticket) = state.try_update_untracked(|s| s.begin_fetch()) else { return; };
        let api = api_list.clone();
        spawn_local(async move {
            let items = match api.list_admin_contents().await {
                Ok(items) => items,
                Err(e) => {
                    log::warn!("[ADMIN] contents: {}", e);
                    return;
                }
            };
            match state.try_update(|s| s.apply_results(ticket, &items)) {
                Some(Applied::Show(visible)) => { set_contents.try_set(visible); }
                Some(Applied::Reset) => log::info!("[ADMIN] page out of range, back to page 1"),
                Some(Applied::Stale) | None => {}
            }
        });
    });

    let open_editor = move |next: Editor| {
        editor.set(next);
        scroll_to_top();
    };

    let api_delete = StoredValue::new(api.clone());
    let ask_delete = move |id: u32, title: String| {
        let request = ConfirmRequest::delete(
            "コンテンツ削除",
            format!("「{}」を削除しますか？", title),
            move || {
                let api = api_delete.get_value();
                spawn_local(async move {
                    match api.delete_content(id).await {
                        Ok(()) => {
                            log::info!("[ADMIN] deleted content {}", id);
                            refresh_from_first();
                        }
                        Err(e) => {
                            log::error!("[ADMIN] delete content {}: {}", id, e);
                            toasts.error(e.user_message("削除に失敗しました"));
                        }
                    }
                });
            },
        );
        confirm.set(Some(request));
    };

    let on_saved = move |_: ()| {
        editor.set(Editor::Closed);
        refresh_from_first();
    };

    let base_url = StoredValue::new(api.base_url().to_string());
    let timezone = move || store_timezone(&store);

    view! {
        {move || match editor.get() {
            Editor::Closed => view! {
                <div class="content-list">
                    <div class="content-list-header">
                        <h3>"コンテンツ一覧"</h3>
                        <button class="btn-primary" on:click=move |_| open_editor(Editor::New)>
                            "新規コンテンツ作成"
                        </button>
                    </div>
                    <table class="admin-content-table">
                        <thead>
                            <tr>
                                <th>"タイトル"</th>
                                <th>"内容"</th>
                                <th>"カテゴリ"</th>
                                <th>"公開状態"</th>
                                <th>"作成日"</th>
                                <th>"操作"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || contents.get()
                                key=|c| (c.id, c.updated_at.clone())
                                children=move |content| {
                                    let id = content.id;
                                    let title = content.title.clone();
                                    let delete_title = title.clone();
                                    let thumb = extract_first_image(&content.body)
                                        .map(|url| resolve_asset_url(&base_url.get_value(), url));
                                    let text = excerpt(&content.body, ADMIN_EXCERPT_CHARS);
                                    let created = format_date(&content.created_at, timezone());
                                    let published = content.is_published;
                                    let categories = content.categories.clone();
                                    let row = content.clone();
                                    view! {
                                        <tr class="clickable-row" on:click=move |_| open_editor(Editor::Edit(row.clone()))>
                                            <td>
                                                <div class="admin-title-cell">
                                                    {thumb.map(|src| view! {
                                                        <div class="admin-thumbnail">
                                                            <ThumbnailImage
                                                                src=src
                                                                size=ThumbnailSize::Small
                                                                alt="サムネイル"
                                                                class="admin-thumb-image"
                                                                placeholder="リンク切れ"
                                                            />
                                                        </div>
                                                    })}
                                                    <div class="content-title">{title}</div>
                                                </div>
                                            </td>
                                            <td><div class="content-excerpt">{text}</div></td>
                                            <td>
                                                <div class="content-categories">
                                                    {if categories.is_empty() {
                                                        view! { <span class="admin-category-tag">"未分類"</span> }.into_any()
                                                    } else {
                                                        categories.into_iter()
                                                            .map(|cat| view! { <span class="admin-category-tag">{cat}</span> })
                                                            .collect_view()
                                                            .into_any()
                                                    }}
                                                </div>
                                            </td>
                                            <td>
                                                <span class=if published { "publish-status published" } else { "publish-status unpublished" }>
                                                    {if published { "公開" } else { "非公開" }}
                                                </span>
                                            </td>
                                            <td>{created}</td>
                                            <td>
                                                <div class="content-actions">
                                                    <button on:click=move |ev| {
                                                        ev.stop_propagation();
                                                        ask_delete(id, delete_title.clone());
                                                    }>"削除"</button>
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
                </div>
            }.into_any(),
            Editor::New => view! {
                <ContentForm content=None on_saved=on_saved on_cancel=move |_| editor.set(Editor::Closed) />
            }.into_any(),
            Editor::Edit(content) => view! {
                <ContentForm content=Some(content) on_saved=on_saved on_cancel=move |_| editor.set(Editor::Closed) />
            }.into_any(),
        }}
        <ConfirmModal request=confirm />
    }
}
