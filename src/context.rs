//! Application Context
//!
//! Cross-component topics provided via Leptos Context API. Each topic is a
//! version counter; subscribers re-run when it moves.

use leptos::prelude::*;

use crate::navigation;

#[derive(Clone, Copy)]
pub struct AppContext {
    /// Bumped after any category create/update/delete/reorder - read
    pub categories_version: ReadSignal<u32>,
    /// Bumped after any category create/update/delete/reorder - write
    set_categories_version: WriteSignal<u32>,
    /// Bumped when the user clicks the site title - read
    pub home_version: ReadSignal<u32>,
    /// Bumped when the user clicks the site title - write
    set_home_version: WriteSignal<u32>,
    /// Bumped after the signed-in user's avatar changed - read
    pub avatar_version: ReadSignal<u32>,
    /// Bumped after the signed-in user's avatar changed - write
    set_avatar_version: WriteSignal<u32>,
    /// Article selected through the URL - read
    pub content_id: ReadSignal<Option<u32>>,
    /// Article selected through the URL - write
    set_content_id: WriteSignal<Option<u32>>,
}

impl AppContext {
    pub fn new(
        categories_version: (ReadSignal<u32>, WriteSignal<u32>),
        home_version: (ReadSignal<u32>, WriteSignal<u32>),
        avatar_version: (ReadSignal<u32>, WriteSignal<u32>),
        content_id: (ReadSignal<Option<u32>>, WriteSignal<Option<u32>>),
    ) -> Self {
        Self {
            categories_version: categories_version.0,
            set_categories_version: categories_version.1,
            home_version: home_version.0,
            set_home_version: home_version.1,
            avatar_version: avatar_version.0,
            set_avatar_version: avatar_version.1,
            content_id: content_id.0,
            set_content_id: content_id.1,
        }
    }

    /// Tell every category consumer to refetch
    pub fn categories_changed(&self) {
        self.set_categories_version.update(|v| *v += 1);
    }

    pub fn avatar_changed(&self) {
        self.set_avatar_version.update(|v| *v += 1);
    }

    /// Back to the unfiltered first page of the list
    pub fn go_home(&self) {
        self.set_content_id.set(None);
        navigation::push_url(None);
        self.set_home_version.update(|v| *v += 1);
    }

    /// Open (or close, with None) an article and record it in history
    pub fn open_content(&self, id: Option<u32>) {
        self.set_content_id.set(id);
        navigation::push_url(id);
        if id.is_some() {
            navigation::scroll_to_top();
        }
    }

    /// Adopt the id from a back/forward navigation without pushing history
    pub fn sync_content_id(&self, id: Option<u32>) {
        self.set_content_id.try_set(id);
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
