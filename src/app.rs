//! Mav Frontend App
//!
//! Root component: provides config, API client, store and topics, runs the
//! startup auth check and switches between the top-level views.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::{ApiClient, ApiError};
use crate::components::{AdminPanel, Footer, Header, LoginForm, ProfileView, PublicView, SetupForm, ToastHost, Toasts};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::navigation;
use crate::session;
use crate::store::{
    store_session_expired, store_show, store_sign_in, store_sign_out, AppState, AppStateStoreFields, AppStore, AppView,
};

/// Store a freshly issued token and load the account it belongs to.
/// On failure the token is discarded again.
pub async fn finish_sign_in(api: &ApiClient, store: AppStore, token: &str) -> Result<(), ApiError> {
    session::set_token(token);
    match api.me().await {
        Ok(user) => {
            log::info!("[AUTH] signed in as {}", user.username);
            store_sign_in(&store, user);
            Ok(())
        }
        Err(e) => {
            session::clear_token();
            Err(e)
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();
    provide_context(config.clone());
    provide_context(Toasts::new());

    let store: AppStore = Store::new(AppState::new());
    provide_context(store);

    let ctx = AppContext::new(
        signal(0),
        signal(0),
        signal(0),
        signal(navigation::parse_content_id(&navigation::current_path())),
    );
    provide_context(ctx);

    let api = ApiClient::new(config.api_base_url.clone())
        .with_unauthorized_handler(Callback::new(move |_| {
            log::warn!("[AUTH] session rejected, signing out");
            store_session_expired(&store);
        }));
    provide_context(api.clone());

    navigation::bind_popstate(move |id| ctx.sync_content_id(id));

    // Startup: restore the session, or detect a fresh install
    spawn_local(async move {
        if session::token().is_some() {
            // An expired token just means a signed-out visitor: no login prompt
            match api.without_unauthorized_handler().me().await {
                Ok(user) => {
                    log::info!("[APP] session restored for {}", user.username);
                    store.user().set(Some(user));
                }
                Err(e) => {
                    log::warn!("[APP] stored token rejected: {}", e);
                    session::clear_token();
                    store.show_login().set(false);
                }
            }
        } else {
            match api.setup_status().await {
                Ok(status) if status.needs_setup => {
                    log::info!("[APP] no admin account yet, showing setup");
                    store.needs_setup().set(true);
                    store.view().set(AppView::Setup);
                }
                Ok(_) => {}
                Err(e) => log::error!("[APP] setup status check failed: {}", e),
            }
        }
        store.loading().set(false);
    });

    let on_home = move |_: ()| {
        store.view().set(AppView::Public);
        ctx.go_home();
    };
    let on_show = move |view: AppView| store_show(&store, view);
    let on_logout = move |_: ()| {
        log::info!("[AUTH] signed out");
        store_sign_out(&store);
    };

    let main_view = move || {
        let signed_in = store.user().with(|u| u.is_some());
        match store.view().get() {
            AppView::Setup => view! { <SetupForm /> }.into_any(),
            AppView::Admin if signed_in => view! { <AdminPanel /> }.into_any(),
            AppView::Profile if signed_in => view! { <ProfileView /> }.into_any(),
            _ if store.needs_setup().get() => view! { <SetupForm /> }.into_any(),
            _ => view! { <PublicView /> }.into_any(),
        }
    };

    view! {
        <Show
            when=move || !store.loading().get()
            fallback=|| view! { <div class="loading">"読み込み中..."</div> }
        >
            <div class="app">
                <Header on_home=on_home on_show=on_show on_logout=on_logout />
                <main class="main-content">{main_view}</main>
                <Footer on_show=on_show />
                <Show when=move || store.show_login().get()>
                    <LoginForm />
                </Show>
            </div>
        </Show>
        <ToastHost />
    }
}
