//! Global Application State Store
//!
//! Session and top-level view, using Leptos reactive_stores.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::User;
use crate::session;

/// Top-level screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppView {
    #[default]
    Public,
    Admin,
    Profile,
    Setup,
}

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user
    pub user: Option<User>,
    pub view: AppView,
    /// No admin account exists yet
    pub needs_setup: bool,
    pub show_login: bool,
    /// Startup auth check still running
    pub loading: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }
}

pub type AppStore = Store<AppState>;

pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Landing view for a freshly authenticated user
pub fn view_for(user: &User) -> AppView {
    if user.is_admin() { AppView::Admin } else { AppView::Public }
}

pub fn store_sign_in(store: &AppStore, user: User) {
    let view = view_for(&user);
    store.user().set(Some(user));
    store.needs_setup().set(false);
    store.show_login().set(false);
    store.view().set(view);
}

/// Explicit logout
pub fn store_sign_out(store: &AppStore) {
    session::clear_token();
    store.user().set(None);
    store.view().set(AppView::Public);
}

/// Session rejected by the server: log out and ask for credentials again
pub fn store_session_expired(store: &AppStore) {
    store_sign_out(store);
    store.show_login().set(true);
}

/// Current user's timezone id (UTC when signed out)
pub fn store_timezone(store: &AppStore) -> u32 {
    store.user().with(|u| u.as_ref().map(|u| u.timezone).unwrap_or(crate::timezone::UTC_ID))
}

/// Switch view; signed-out users get the login modal instead of private views.
pub fn store_show(store: &AppStore, view: AppView) {
    let signed_in = store.user().with_untracked(|u| u.is_some());
    match view {
        AppView::Admin | AppView::Profile if !signed_in => store.show_login().set(true),
        _ => store.view().set(view),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user(role: Role) -> User {
        User { id: 1, username: "u".into(), email: None, role, profile: None, timezone: 1 }
    }

    #[test]
    fn test_landing_view_by_role() {
        assert_eq!(view_for(&user(Role::Admin)), AppView::Admin);
        assert_eq!(view_for(&user(Role::Member)), AppView::Public);
    }
}
