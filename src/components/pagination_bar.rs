//! Pagination Bar Component

use leptos::prelude::*;

use crate::pagination::{page_window, PageLink};

/// First/previous, windowed page numbers, next/last. Hidden for a single page.
#[component]
pub fn PaginationBar(
    #[prop(into)] page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] on_change: Callback<usize>,
) -> impl IntoView {
    let at_first = move || page.get() <= 1;
    let at_last = move || page.get() >= total_pages.get();

    view! {
        <Show when=move || { total_pages.get() > 1 }>
            <div class="pagination">
                <button class="pagination-btn" disabled=at_first on:click=move |_| on_change.run(1)>"≪"</button>
                <button class="pagination-btn" disabled=at_first on:click=move |_| on_change.run(page.get().saturating_sub(1).max(1))>"＜"</button>
                {move || {
                    let current = page.get();
                    page_window(current, total_pages.get())
                        .into_iter()
                        .map(|link| match link {
                            PageLink::Page(n) => view! {
                                <button
                                    class=if n == current { "pagination-btn active" } else { "pagination-btn" }
                                    on:click=move |_| on_change.run(n)
                                >
                                    {n}
                                </button>
                            }.into_any(),
                            PageLink::Ellipsis => view! { <span class="pagination-dots">"..."</span> }.into_any(),
                        })
                        .collect_view()
                }}
                <button class="pagination-btn" disabled=at_last on:click=move |_| on_change.run(page.get() + 1)>"＞"</button>
                <button class="pagination-btn" disabled=at_last on:click=move |_| on_change.run(total_pages.get())>"≫"</button>
            </div>
        </Show>
    }
}
