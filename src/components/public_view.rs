//! Public View Component
//!
//! Timeline of published articles with a category sidebar, and the article
//! detail page addressed by `/content/{id}`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::{PaginationBar, ThumbnailImage};
use crate::config::use_config;
use crate::context::use_app_context;
use crate::markdown::{excerpt, extract_first_image, render_markdown};
use crate::models::{Category, Content};
use crate::store::{store_timezone, use_app_store};
use crate::thumbnail::{resolve_asset_url, ThumbnailSize};
use crate::timezone::{format_date, format_timestamp};
use crate::view_state::{Applied, Mode, ViewState};

#[component]
pub fn PublicView() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let config = use_config();
    let store = use_app_store();

    let state = RwSignal::new(ViewState::new(config.public_page_size));
    let (categories, set_categories) = signal(Vec::<Category>::new());
    let (contents, set_contents) = signal(Vec::<Content>::new());
    let (detail, set_detail) = signal(None::<Content>);

    // Categories, refetched whenever another view changes them
    let api_cats = api.clone();
    Effect::new(move |_| {
        let _ = ctx.categories_version.get();
        let api = api_cats.clone();
        spawn_local(async move {
            match api.list_categories().await {
                Ok(loaded) => { set_categories.try_set(loaded); }
                Err(e) => log::warn!("[PUBLIC] categories: {}", e),
            }
        });
    });

    // Site title clicked
    Effect::new(move |prev: Option<u32>| {
        let version = ctx.home_version.get();
        if prev.is_some_and(|p| p != version) {
            state.update(|s| s.reset());
        }
        version
    });

    // URL is the source of truth for list vs detail
    Effect::new(move |_| {
        let selected = ctx.content_id.get();
        state.update(|s| s.sync_from_path(selected));
        if selected.is_none() {
            set_detail.set(None);
        }
    });

    // Timeline page
    let query = Memo::new(move |_| state.with(|s| (s.category, s.page)));
    let api_list = api.clone();
    Effect::new(move |_| {
        let (category, page) = query.get();
        let Some(ticket) = state.try_update_untracked(|s| s.begin_fetch()) else { return; };
        let api = api_list.clone();
        log::debug!("[PUBLIC] loading category={:?} page={}", category, page);
        spawn_local(async move {
            let items = match api.list_contents(category).await {
                Ok(items) => items,
                Err(e) => {
                    log::warn!("[PUBLIC] contents: {}", e);
                    return;
                }
            };
            match state.try_update(|s| s.apply_results(ticket, &items)) {
                Some(Applied::Show(visible)) => { set_contents.try_set(visible); }
                Some(Applied::Reset) => log::info!("[PUBLIC] page out of range, back to page 1"),
                Some(Applied::Stale) | None => {}
            }
        });
    });

    // Deep link: load the article unless the click already supplied it
    let api_detail = api.clone();
    Effect::new(move |_| {
        let Some(id) = ctx.content_id.get() else { return; };
        if detail.with_untracked(|d| d.as_ref().map(|c| c.id)) == Some(id) {
            return;
        }
        let api = api_detail.clone();
        spawn_local(async move {
            let result = api.get_content(id).await;
            // Ignore answers for an article the user already left
            if ctx.content_id.try_get_untracked().flatten() != Some(id) {
                return;
            }
            match result {
                Ok(content) => { set_detail.try_set(Some(content)); }
                Err(e) => {
                    log::warn!("[PUBLIC] content {} unavailable: {}", id, e);
                    if state.try_update(|s| s.resolve_failed(id)).unwrap_or(false) {
                        ctx.open_content(None);
                    }
                }
            }
        });
    });

    let open = move |content: Content| {
        let id = content.id;
        set_detail.set(Some(content));
        ctx.open_content(Some(id));
    };

    let choose_category = move |category: Option<u32>| {
        let was_detail = state.with_untracked(|s| s.selected().is_some());
        state.update(|s| s.choose_category(category));
        if was_detail {
            ctx.open_content(None);
        }
    };

    let base_url = StoredValue::new(api.base_url().to_string());
    let timezone = move || store_timezone(&store);
    let excerpt_chars = config.excerpt_chars;

    let main = move || match state.with(|s| s.mode) {
        Mode::Detail(id) => match detail.get().filter(|c| c.id == id) {
            Some(content) => view! {
                <ContentDetail
                    content=content
                    base_url=base_url.get_value()
                    timezone=timezone()
                    on_back=move || ctx.open_content(None)
                />
            }.into_any(),
            None => view! { <div class="loading">"読み込み中..."</div> }.into_any(),
        },
        Mode::List => view! {
            {move || if contents.with(|c| c.is_empty()) {
                view! { <p>"まだコンテンツがありません。"</p> }.into_any()
            } else {
                view! {
                    <div class="content-grid">
                        <For
                            each=move || contents.get()
                            key=|c| (c.id, c.updated_at.clone())
                            children=move |content| view! {
                                <ContentCard
                                    content=content
                                    base_url=base_url.get_value()
                                    timezone=timezone()
                                    excerpt_chars=excerpt_chars
                                    on_open=open
                                />
                            }
                        />
                    </div>
                }.into_any()
            }}
            <PaginationBar
                page=Signal::derive(move || state.with(|s| s.page))
                total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                on_change=move |page: usize| state.update(|s| s.set_page(page))
            />
        }.into_any(),
    };

    view! {
        <div class="public-view">
            <div class="main-content">{main}</div>
            <div class="sidebar">
                <h3>"カテゴリ"</h3>
                <ul class="category-filter">
                    <li>
                        <button
                            class=move || if state.with(|s| s.category.is_none()) { "active" } else { "" }
                            on:click=move |_| choose_category(None)
                        >
                            "すべて"
                        </button>
                    </li>
                    <For
                        each=move || categories.get()
                        key=|c| (c.id, c.name.clone())
                        children=move |category| {
                            let id = category.id;
                            view! {
                                <li>
                                    <button
                                        class=move || if state.with(|s| s.category == Some(id)) { "active" } else { "" }
                                        on:click=move |_| choose_category(Some(id))
                                    >
                                        {category.name}
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </div>
    }
}

/// Timeline card
#[component]
fn ContentCard<F>(
    content: Content,
    base_url: String,
    timezone: u32,
    excerpt_chars: usize,
    on_open: F,
) -> impl IntoView
where
    F: Fn(Content) + Copy + 'static,
{
    let thumb = extract_first_image(&content.body).map(|url| resolve_asset_url(&base_url, url));
    let text = excerpt(&content.body, excerpt_chars);
    let date = format_date(&content.created_at, timezone);
    let title = content.title.clone();
    let categories = content.categories.clone();
    let author = content.author_name.clone();

    view! {
        <article class="content-card" on:click=move |_| on_open(content.clone())>
            {thumb.map(|src| view! {
                <div class="card-thumbnail">
                    <ThumbnailImage src=src size=ThumbnailSize::Medium alt=title.clone() class="card-image" />
                </div>
            })}
            <div class="card-content">
                <h3 class="card-title">{title.clone()}</h3>
                <p class="card-excerpt">{text}</p>
                <div class="card-meta">
                    <div class="card-categories">
                        {categories.into_iter().map(|cat| view! { <span class="card-category">{cat}</span> }).collect_view()}
                    </div>
                    <div class="card-info">
                        <span class="card-date">{date}</span>
                        <span class="card-author">{author}</span>
                    </div>
                </div>
            </div>
        </article>
    }
}

/// Full article
#[component]
fn ContentDetail<F>(
    content: Content,
    base_url: String,
    timezone: u32,
    on_back: F,
) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let html = render_markdown(&content.body, &base_url);
    let posted = format_timestamp(&content.created_at, timezone);

    view! {
        <div class="content-nav">
            <a href="/" class="back-link" on:click=move |ev| {
                ev.prevent_default();
                on_back();
            }>"BACK"</a>
        </div>
        <article class="content-detail">
            <header class="content-header">
                <h1>{content.title}</h1>
                <div class="content-meta">
                    <span>"投稿日: " {posted}</span>
                    <div>
                        {content.categories.into_iter().map(|cat| view! { <span class="content-category">{cat}</span> }).collect_view()}
                        <span class="content-author">{content.author_name}</span>
                    </div>
                </div>
            </header>
            <div class="content-body" inner_html=html></div>
        </article>
    }
}
