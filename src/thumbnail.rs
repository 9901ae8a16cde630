//! Thumbnail URLs
//!
//! The server pre-generates size variants next to every uploaded image as
//! `{name}_s{ext}`, `{name}_m{ext}` and `{name}_l.jpg`.

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailSize {
    Small,
    Medium,
    Large,
}

impl ThumbnailSize {
    fn suffix(self) -> &'static str {
        match self {
            ThumbnailSize::Small => "s",
            ThumbnailSize::Medium => "m",
            ThumbnailSize::Large => "l",
        }
    }
}

/// Split `url` into the path part and its `?query#fragment` tail.
fn split_tail(url: &str) -> (&str, &str) {
    match url.find(|c| c == '?' || c == '#') {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    }
}

/// Split a path into `(dir_with_slash, stem, extension_with_dot)`.
fn split_filename(path: &str) -> (&str, &str, &str) {
    let name_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    let (dir, filename) = path.split_at(name_start);
    match filename.rfind('.') {
        Some(dot) => (dir, &filename[..dot], &filename[dot..]),
        None => (dir, filename, ""),
    }
}

pub fn is_image_url(url: &str) -> bool {
    let (path, _) = split_tail(url);
    let (_, _, ext) = split_filename(path);
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Size-specific thumbnail for `original`; non-images pass through.
pub fn thumbnail_url(original: &str, size: ThumbnailSize) -> String {
    if !is_image_url(original) {
        return original.to_string();
    }
    let (path, tail) = split_tail(original);
    let (dir, stem, ext) = split_filename(path);
    // Large variants are always re-encoded as JPEG
    let ext = if size == ThumbnailSize::Large { ".jpg" } else { ext };
    format!("{}{}_{}{}{}", dir, stem, size.suffix(), ext, tail)
}

/// Prefix server-relative asset paths with the API base URL.
pub fn resolve_asset_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), url)
    }
}

/// What an image should do after a load error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackStep {
    /// Retry with this URL
    Retry(String),
    /// Nothing left to try
    GiveUp,
}

/// Load state of a thumbnail that falls back to its original exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFallback {
    original: String,
    current: String,
}

impl ImageFallback {
    pub fn new(original: impl Into<String>, size: ThumbnailSize) -> Self {
        let original = original.into();
        let current = thumbnail_url(&original, size);
        Self { original, current }
    }

    pub fn src(&self) -> &str {
        &self.current
    }

    pub fn on_error(&mut self) -> FallbackStep {
        if self.current != self.original {
            self.current = self.original.clone();
            FallbackStep::Retry(self.current.clone())
        } else {
            FallbackStep::GiveUp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_rewrite() {
        assert_eq!(thumbnail_url("/uploads/pic.png", ThumbnailSize::Large), "/uploads/pic_l.jpg");
        assert_eq!(thumbnail_url("/uploads/pic.png", ThumbnailSize::Small), "/uploads/pic_s.png");
        assert_eq!(thumbnail_url("/uploads/pic.png", ThumbnailSize::Medium), "/uploads/pic_m.png");
    }

    #[test]
    fn test_non_images_pass_through() {
        assert_eq!(thumbnail_url("/uploads/doc.pdf", ThumbnailSize::Small), "/uploads/doc.pdf");
        assert_eq!(thumbnail_url("/uploads/noext", ThumbnailSize::Small), "/uploads/noext");
        assert_eq!(thumbnail_url("/uploads.v2/file", ThumbnailSize::Large), "/uploads.v2/file");
        assert_eq!(thumbnail_url("", ThumbnailSize::Large), "");
    }

    #[test]
    fn test_extension_check_ignores_case_and_query() {
        assert_eq!(
            thumbnail_url("https://cdn.example.com/a/B.JPEG?v=2#x", ThumbnailSize::Small),
            "https://cdn.example.com/a/B_s.JPEG?v=2#x"
        );
        assert!(is_image_url("photo.WebP"));
        assert!(!is_image_url("/x.png.txt"));
    }

    #[test]
    fn test_resolve_asset_url() {
        assert_eq!(resolve_asset_url("http://api/", "/uploads/a.png"), "http://api/uploads/a.png");
        assert_eq!(resolve_asset_url("http://api", "https://cdn/a.png"), "https://cdn/a.png");
    }

    #[test]
    fn test_fallback_happens_once() {
        let mut img = ImageFallback::new("/uploads/pic.png", ThumbnailSize::Medium);
        assert_eq!(img.src(), "/uploads/pic_m.png");
        assert_eq!(img.on_error(), FallbackStep::Retry("/uploads/pic.png".into()));
        assert_eq!(img.on_error(), FallbackStep::GiveUp);
        assert_eq!(img.on_error(), FallbackStep::GiveUp);
    }

    #[test]
    fn test_fallback_for_non_image_gives_up_immediately() {
        let mut img = ImageFallback::new("/uploads/doc.pdf", ThumbnailSize::Small);
        assert_eq!(img.on_error(), FallbackStep::GiveUp);
    }
}
