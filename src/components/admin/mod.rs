//! Admin Panel
//!
//! Sidebar-driven management screens. Members only see Contents and Files.

mod content_list;
mod content_form;
mod category_list;
mod category_form;
mod file_management;
mod backup_management;
mod user_management;

use leptos::prelude::*;

use crate::models::Role;
use crate::store::{use_app_store, AppStateStoreFields};

use content_list::ContentList;
use category_list::CategoryList;
use file_management::FileManagement;
use backup_management::BackupManagement;
use user_management::UserManagement;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdminSection {
    #[default]
    Contents,
    Files,
    Categories,
    Users,
    Backup,
}

impl AdminSection {
    pub const ALL: [AdminSection; 5] = [
        AdminSection::Contents,
        AdminSection::Files,
        AdminSection::Categories,
        AdminSection::Users,
        AdminSection::Backup,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AdminSection::Contents => "コンテンツ管理",
            AdminSection::Files => "ファイル管理",
            AdminSection::Categories => "カテゴリ管理",
            AdminSection::Users => "ユーザー管理",
            AdminSection::Backup => "バックアップ管理",
        }
    }

    pub fn admin_only(self) -> bool {
        !matches!(self, AdminSection::Contents | AdminSection::Files)
    }

    pub fn allowed_for(self, role: Role) -> bool {
        role == Role::Admin || !self.admin_only()
    }
}

#[component]
pub fn AdminPanel() -> impl IntoView {
    let store = use_app_store();
    let (section, set_section) = signal(AdminSection::Contents);

    let role = move || store.user().with(|u| u.as_ref().map(|u| u.role));

    // Requests for sections the role cannot see are ignored
    let change_section = move |next: AdminSection| {
        let Some(role) = store.user().with_untracked(|u| u.as_ref().map(|u| u.role)) else { return; };
        if next.allowed_for(role) {
            set_section.set(next);
        }
    };

    view! {
        <div class="admin-panel">
            <div class="admin-sidebar">
                <h2>"管理メニュー"</h2>
                <nav class="admin-nav">
                    {move || {
                        let role = role();
                        AdminSection::ALL
                            .into_iter()
                            .filter(|s| role.is_some_and(|r| s.allowed_for(r)))
                            .map(|s| view! {
                                <button
                                    class=move || if section.get() == s { "active" } else { "" }
                                    on:click=move |_| change_section(s)
                                >
                                    {s.label()}
                                </button>
                            })
                            .collect_view()
                    }}
                </nav>
            </div>
            <div class="admin-main">
                // Each section owns its form state; switching unmounts it
                {move || match section.get() {
                    AdminSection::Contents => view! { <ContentList /> }.into_any(),
                    AdminSection::Files => view! { <FileManagement /> }.into_any(),
                    AdminSection::Categories => view! { <CategoryList /> }.into_any(),
                    AdminSection::Users => view! { <UserManagement /> }.into_any(),
                    AdminSection::Backup => view! { <BackupManagement /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_sections() {
        let visible: Vec<_> = AdminSection::ALL
            .into_iter()
            .filter(|s| s.allowed_for(Role::Member))
            .collect();
        assert_eq!(visible, vec![AdminSection::Contents, AdminSection::Files]);
    }

    #[test]
    fn test_admin_sees_everything() {
        assert!(AdminSection::ALL.iter().all(|s| s.allowed_for(Role::Admin)));
    }
}
