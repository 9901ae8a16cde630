//! UI Components
//!
//! Reusable Leptos components plus the top-level views.

mod confirm_modal;
mod toast;
mod thumbnail_image;
mod pagination_bar;
mod header;
mod footer;
mod login_form;
mod setup_form;
mod public_view;
mod admin;
mod profile;

pub use confirm_modal::{ConfirmModal, ConfirmRequest};
pub use toast::{use_toasts, ToastHost, Toasts};
pub use thumbnail_image::ThumbnailImage;
pub use pagination_bar::PaginationBar;
pub use header::Header;
pub use footer::Footer;
pub use login_form::LoginForm;
pub use setup_form::SetupForm;
pub use public_view::PublicView;
pub use admin::AdminPanel;
pub use profile::ProfileView;
