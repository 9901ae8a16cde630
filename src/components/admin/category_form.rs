//! Category Editor

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::use_toasts;
use crate::models::{Category, CategoryPayload};
use crate::validation::non_blank;

#[component]
pub fn CategoryForm(
    category: Option<Category>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();

    let editing_id = category.as_ref().map(|c| c.id);
    let (name, set_name) = signal(category.as_ref().map(|c| c.name.clone()).unwrap_or_default());
    let (description, set_description) = signal(
        category.as_ref().and_then(|c| c.description.clone()).unwrap_or_default(),
    );
    let (saving, set_saving) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() { return; }
        set_saving.set(true);
        let payload = CategoryPayload {
            name: name.get_untracked(),
            description: non_blank(&description.get_untracked()),
        };
        let api = api.clone();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => api.update_category(id, &payload).await,
                None => api.create_category(&payload).await,
            };
            match result {
                Ok(()) => on_saved.run(()),
                Err(e) => {
                    log::error!("[CATEGORY] save failed: {}", e);
                    toasts.error(e.user_message("保存に失敗しました"));
                    set_saving.try_set(false);
                }
            }
        });
    };

    view! {
        <div class="content-form">
            <h3>{if editing_id.is_some() { "カテゴリ編集" } else { "新規カテゴリ作成" }}</h3>
            <form on:submit=submit>
                <div>
                    <label>"カテゴリ名:"</label>
                    <input
                        type="text"
                        required
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label>"説明:"</label>
                    <textarea
                        rows=3
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <div class="form-buttons">
                    <button type="submit" disabled=move || saving.get()>"保存"</button>
                    <button type="button" on:click=move |_| on_cancel.run(())>"キャンセル"</button>
                </div>
            </form>
        </div>
    }
}
