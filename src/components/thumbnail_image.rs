//! Thumbnail Image Component
//!
//! `<img>` that starts at a size variant and falls back to the original
//! once. After that it gives up: either it disappears or shows a
//! placeholder.

use leptos::prelude::*;

use crate::thumbnail::{FallbackStep, ImageFallback, ThumbnailSize};

#[component]
pub fn ThumbnailImage(
    /// Absolute URL of the original upload
    #[prop(into)] src: String,
    size: ThumbnailSize,
    #[prop(into, optional)] alt: String,
    #[prop(into, optional)] class: String,
    /// Text shown once every candidate failed; nothing is shown when None
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    let state = RwSignal::new(ImageFallback::new(src, size));
    let (failed, set_failed) = signal(false);

    let on_error = move |_| {
        let step = state.try_update(|s| s.on_error());
        if let Some(FallbackStep::GiveUp) = step {
            set_failed.set(true);
        }
    };

    view! {
        {move || if failed.get() {
            match placeholder {
                Some(text) => view! { <div class="image-placeholder">{text}</div> }.into_any(),
                None => ().into_any(),
            }
        } else {
            view! {
                <img
                    class=class.clone()
                    src=move || state.with(|s| s.src().to_string())
                    alt=alt.clone()
                    loading="lazy"
                    on:error=on_error
                />
            }.into_any()
        }}
    }
}
