//! Header Component
//!
//! Site title (home) and the signed-in user's menu.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::ThumbnailImage;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields, AppView};
use crate::thumbnail::{resolve_asset_url, ThumbnailSize};

#[component]
pub fn Header(
    #[prop(into)] on_home: Callback<()>,
    #[prop(into)] on_show: Callback<AppView>,
    #[prop(into)] on_logout: Callback<()>,
) -> impl IntoView {
    let store = use_app_store();
    let api = use_api();
    let ctx = use_app_context();
    let (menu_open, set_menu_open) = signal(false);
    let (avatar_url, set_avatar_url) = signal(None::<String>);

    // Refetch the avatar whenever the signed-in user or their avatar changes
    Effect::new(move |_| {
        let _ = ctx.avatar_version.get();
        let user_id = store.user().with(|u| u.as_ref().map(|u| u.id));
        let api = api.clone();
        match user_id {
            Some(id) => spawn_local(async move {
                let url = api.avatar(id).await.ok()
                    .and_then(|info| info.avatar_url)
                    .map(|url| resolve_asset_url(api.base_url(), &url));
                set_avatar_url.try_set(url);
            }),
            None => set_avatar_url.set(None),
        }
    });

    let pick = move |view: AppView| {
        set_menu_open.set(false);
        on_show.run(view);
    };

    view! {
        <header class="header">
            <div class="header-container">
                <h1 class="header-title" on:click=move |_| on_home.run(())>
                    "mav"
                </h1>
                <div class="auth-section">
                    {move || store.user().get().map(|user| view! {
                        <div class="user-menu">
                            <button class="user-button" on:click=move |_| set_menu_open.update(|v| *v = !*v)>
                                <span>{user.username.clone()}</span>
                                {move || avatar_url.get().map(|url| view! {
                                    <ThumbnailImage src=url size=ThumbnailSize::Small alt="アバター" class="header-avatar" />
                                })}
                            </button>
                            <Show when=move || menu_open.get()>
                                <div class="dropdown-menu">
                                    <button class="dropdown-item" on:click=move |_| pick(AppView::Admin)>"管理画面"</button>
                                    <button class="dropdown-item" on:click=move |_| pick(AppView::Profile)>"プロフィール"</button>
                                    <button class="dropdown-item" on:click=move |_| {
                                        set_menu_open.set(false);
                                        on_logout.run(());
                                    }>"ログアウト"</button>
                                </div>
                            </Show>
                        </div>
                    })}
                </div>
            </div>
        </header>
    }
}
