//! Admin Category List
//!
//! Categories in display order. Rows are reordered by dragging; the new
//! order is shown at once and rolled back if the server rejects it.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;

use crate::api::use_api;
use crate::components::{use_toasts, ConfirmModal, ConfirmRequest};
use crate::context::use_app_context;
use crate::models::Category;
use crate::reorder::ReorderSession;

use super::category_form::CategoryForm;

const ROW_PREFIX: &str = "category-row-";

#[derive(Clone, Debug, PartialEq)]
enum Editor {
    Closed,
    New,
    Edit(Category),
}

#[component]
pub fn CategoryList() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let toasts = use_toasts();

    let session = RwSignal::new(ReorderSession::default());
    let (reload, set_reload) = signal(0u32);
    let editor = RwSignal::new(Editor::Closed);
    let confirm = RwSignal::new(None::<ConfirmRequest>);

    let api_load = api.clone();
    Effect::new(move |_| {
        let _ = ctx.categories_version.get();
        let _ = reload.get();
        let api = api_load.clone();
        spawn_local(async move {
            match api.list_categories().await {
                Ok(loaded) => { session.try_update(|s| s.replace(loaded)); }
                Err(e) => log::warn!("[CATEGORY] load failed: {}", e),
            }
        });
    });

    // DnD
    let dnd = create_dnd_signals();
    let locate = move |dragged: u32, pointer_y: f64| {
        let ids: Vec<u32> = session
            .try_with_untracked(|s| s.visible().iter().map(|c| c.id).collect())
            .unwrap_or_default();
        insertion_target(&measure_rows(&ids, ROW_PREFIX), dragged, pointer_y)
    };
    let api_order = api.clone();
    bind_global_mouseup(dnd, locate, move |dragged, target| {
        let Some(Some(entries)) = session.try_update(|s| s.propose(dragged, target)) else { return; };
        log::debug!("[CATEGORY] reorder: dragged={} target={:?}", dragged, target);
        let api = api_order.clone();
        spawn_local(async move {
            match api.update_category_order(&entries).await {
                Ok(()) => {
                    session.try_update(|s| s.confirm());
                    ctx.categories_changed();
                }
                Err(e) => {
                    log::error!("[CATEGORY] reorder rejected: {}", e);
                    session.try_update(|s| s.rollback());
                    toasts.error(format!("並び順の更新に失敗しました: {}", e.user_message(&e.to_string())));
                    set_reload.try_update(|n| *n += 1);
                }
            }
        });
    });

    let api_delete = StoredValue::new(api.clone());
    let ask_delete = move |id: u32, name: String| {
        let request = ConfirmRequest::delete(
            "カテゴリ削除",
            format!("「{}」カテゴリを削除しますか？\nこのカテゴリの記事は「未分類」になります。", name),
            move || {
                let api = api_delete.get_value();
                spawn_local(async move {
                    match api.delete_category(id).await {
                        Ok(()) => {
                            log::info!("[CATEGORY] deleted {}", id);
                            ctx.categories_changed();
                        }
                        Err(e) => {
                            log::error!("[CATEGORY] delete {}: {}", id, e);
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
        ctx.categories_changed();
    };

    let dropping_at_end = move || dnd.drop_target_read.get() == Some(DropTarget::End);

    view! {
        {move || match editor.get() {
            Editor::Closed => view! {
                <div class="content-list">
                    <div class="content-list-header">
                        <h3>"カテゴリ一覧"</h3>
                        <button class="btn-primary" on:click=move |_| editor.set(Editor::New)>
                            "新規カテゴリ作成"
                        </button>
                    </div>
                    <p class="hint">"ドラッグ&ドロップで並び順を変更できます"</p>
                    <table class=move || if dropping_at_end() {
                        "admin-content-table category-table drop-at-end"
                    } else {
                        "admin-content-table category-table"
                    }>
                        <thead>
                            <tr>
                                <th>"カテゴリ名"</th>
                                <th>"説明"</th>
                                <th>"操作"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || session.with(|s| s.visible().to_vec())
                                key=|c| (c.id, c.name.clone(), c.description.clone())
                                children=move |category| {
                                    let id = category.id;
                                    let name = category.name.clone();
                                    let row = category.clone();
                                    let row_class = move || {
                                        let mut c = String::from("category-row");
                                        if dnd.dragging_id_read.get() == Some(id) { c.push_str(" dragging"); }
                                        if dnd.drop_target_read.get() == Some(DropTarget::Before(id)) { c.push_str(" drop-before"); }
                                        c
                                    };
                                    view! {
                                        <tr
                                            id=format!("{}{}", ROW_PREFIX, id)
                                            class=row_class
                                            on:mousedown=make_on_mousedown(dnd, id)
                                            on:click=move |_| {
                                                // The click that ends a drag is not an edit
                                                if dnd.drag_just_ended_read.get_untracked() { return; }
                                                editor.set(Editor::Edit(row.clone()));
                                            }
                                        >
                                            <td><div class="content-title">{category.name}</div></td>
                                            <td>
                                                <div class="content-excerpt">
                                                    {category.description.filter(|d| !d.is_empty()).unwrap_or_else(|| "説明なし".to_string())}
                                                </div>
                                            </td>
                                            <td>
                                                <div class="content-actions">
                                                    <button on:click=move |ev| {
                                                        ev.stop_propagation();
                                                        ask_delete(id, name.clone());
                                                    }>"削除"</button>
                                                </div>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            }.into_any(),
            Editor::New => view! {
                <CategoryForm category=None on_saved=on_saved on_cancel=move |_| editor.set(Editor::Closed) />
            }.into_any(),
            Editor::Edit(category) => view! {
                <CategoryForm category=Some(category) on_saved=on_saved on_cancel=move |_| editor.set(Editor::Closed) />
            }.into_any(),
        }}
        <ConfirmModal request=confirm />
    }
}
