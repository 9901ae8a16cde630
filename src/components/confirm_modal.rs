//! Confirm Modal Component
//!
//! Blocking confirmation for destructive actions. The pending request is
//! cleared on both confirm and cancel.

use leptos::prelude::*;

/// A destructive action waiting for the user's answer
#[derive(Clone)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub on_confirm: Callback<()>,
}

impl ConfirmRequest {
    pub fn delete(title: impl Into<String>, message: impl Into<String>, on_confirm: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "削除".to_string(),
            on_confirm: Callback::new(move |_| on_confirm()),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }
}

/// Renders `request` while it is Some
#[component]
pub fn ConfirmModal(request: RwSignal<Option<ConfirmRequest>>) -> impl IntoView {
    let confirm = move |_| {
        // Take first so a re-entrant request from the callback survives
        if let Some(req) = request.try_update(|r| r.take()).flatten() {
            req.on_confirm.run(());
        }
    };
    let cancel = move |_| request.set(None);

    view! {
        {move || request.get().map(|req| view! {
            <div class="modal-overlay">
                <div class="modal-content">
                    <h3>{req.title}</h3>
                    <p class="modal-message">{req.message}</p>
                    <div class="modal-actions">
                        <button class="btn-danger" on:click=confirm>{req.confirm_label}</button>
                        <button on:click=cancel>"キャンセル"</button>
                    </div>
                </div>
            </div>
        })}
    }
}
