//! Profile View
//!
//! The signed-in user's own account: avatar, basic info and password.

mod avatar;
mod basic_info;
mod security;

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

use avatar::ProfileAvatar;
use basic_info::ProfileBasicInfo;
use security::ProfileSecurity;

#[component]
pub fn ProfileView() -> impl IntoView {
    let store = use_app_store();
    let user_id = Memo::new(move |_| store.user().with(|u| u.as_ref().map(|u| u.id)));

    view! {
        <div class="profile-view">
            <div class="profile-content">
                // Rebuilt only when a different account signs in
                {move || user_id.get().map(|id| {
                    let user = store.user().get_untracked();
                    view! {
                        <div class="profile-edit">
                            <ProfileAvatar user_id=id />
                            <div class="profile-forms">
                                {user.map(|user| view! { <ProfileBasicInfo user=user /> })}
                                <ProfileSecurity />
                            </div>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
