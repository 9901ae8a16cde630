//! Footer Component

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields, AppView};

#[component]
pub fn Footer(#[prop(into)] on_show: Callback<AppView>) -> impl IntoView {
    let store = use_app_store();

    // Signed in: straight to the panel. Otherwise store_show opens login.
    let on_admin = move |_| on_show.run(AppView::Admin);

    view! {
        <footer class="footer">
            <div class="footer-container">
                <div class="footer-content">
                    <p>"© 2025 Medjed Studio. All rights reserved."</p>
                    <Show when=move || !store.needs_setup().get()>
                        <button class="admin-login-link" on:click=on_admin>"Admin"</button>
                    </Show>
                </div>
            </div>
        </footer>
    }
}
