//! Markdown Helpers
//!
//! - First-image extraction for card thumbnails and excerpts
//! - HTML rendering on top of pulldown-cmark with:
//!   - Thumbnail-rewritten images that fall back to the original once
//!   - Syntax highlighting (syntect)
//!   - Raw HTML in the body shown as text

use pulldown_cmark::{Parser, Options, Event, CowStr, Tag, TagEnd, CodeBlockKind, html::push_html};
use regex::Regex;
use std::sync::OnceLock;
use syntect::parsing::SyntaxSet;
use syntect::highlighting::{ThemeSet, Theme};
use syntect::html::highlighted_html_for_string;

use crate::thumbnail::{resolve_asset_url, thumbnail_url, ThumbnailSize};

/// `![alt](url)`, matched lazily so the first image wins
static IMAGE_RE: OnceLock<Regex> = OnceLock::new();

/// Syntax highlighter resources (lazy loaded)
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn image_re() -> &'static Regex {
    IMAGE_RE.get_or_init(|| Regex::new(r"!\[.*?\]\((.*?)\)").expect("image pattern is valid"))
}

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme() -> Option<&'static Theme> {
    THEME_SET.get_or_init(ThemeSet::load_defaults).themes.get("InspiredGitHub")
}

/// URL of the first markdown image, exactly as written
pub fn extract_first_image(markdown: &str) -> Option<&str> {
    image_re()
        .captures(markdown)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Body with the first markdown image removed, trimmed
pub fn remove_first_image(markdown: &str) -> String {
    image_re().replace(markdown, "").trim().to_string()
}

/// Card excerpt: body without its lead image, cut at `max_chars`
pub fn excerpt(markdown: &str, max_chars: usize) -> String {
    let text = remove_first_image(markdown);
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}

/// Render an article body to HTML. Relative image paths are resolved
/// against `base_url`.
pub fn render_markdown(text: &str, base_url: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser, base_url);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_TASKLISTS
}

// State for the event transformer
enum State {
    Normal,
    InCodeBlock { lang: Option<String>, content: String },
    InImage { src: String, alt: String, depth: usize },
}

/// Transform parser events to handle images, code and raw HTML
fn transform_events<'a>(parser: Parser<'a>, base_url: &str) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => {
                match event {
                    Event::Start(Tag::CodeBlock(kind)) => {
                        let lang = match kind {
                            CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                            _ => None,
                        };
                        state = State::InCodeBlock { lang, content: String::new() };
                    }

                    Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                        let dest_url = if is_safe_url(&dest_url) { dest_url } else { CowStr::from("#") };
                        events.push(Event::Start(Tag::Link { link_type, dest_url, title, id }));
                    }

                    Event::Start(Tag::Image { dest_url, .. }) => {
                        let src = if is_safe_url(&dest_url) { resolve_asset_url(base_url, &dest_url) } else { String::new() };
                        state = State::InImage {
                            src,
                            alt: String::new(),
                            depth: 0,
                        };
                    }

                    Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

                    other => events.push(other),
                }
            }

            State::InCodeBlock { ref lang, ref mut content } => {
                match event {
                    Event::Text(t) => content.push_str(&t),
                    Event::End(TagEnd::CodeBlock) => {
                        let html = highlight_code(content, lang.as_deref());
                        events.push(Event::Html(CowStr::from(html)));
                        state = State::Normal;
                    }
                    _ => {}
                }
            }

            State::InImage { ref src, ref mut alt, ref mut depth } => {
                match event {
                    Event::Text(t) | Event::Code(t) => alt.push_str(&t),
                    Event::Start(_) => *depth += 1,
                    Event::End(_) if *depth > 0 => *depth -= 1,
                    Event::End(_) => {
                        events.push(Event::Html(CowStr::from(image_html(src, alt))));
                        state = State::Normal;
                    }
                    _ => {}
                }
            }
        }
    }

    events
}

/// `<img>` pointing at the large thumbnail; a failed load swaps to the
/// original once, a second failure hides the element.
fn image_html(original: &str, alt: &str) -> String {
    let thumb = thumbnail_url(original, ThumbnailSize::Large);
    let onerror = format!(
        "if(this.dataset.fallback){{this.style.display='none';}}else{{this.dataset.fallback='1';this.src='{}';}}",
        escape_js(original)
    );
    format!(
        r#"<img class="content-image" src="{}" alt="{}" loading="lazy" onerror="{}" />"#,
        escape_html(&thumb),
        escape_html(alt),
        escape_html(&onerror)
    )
}

/// Relative paths, fragments and http(s)/mailto targets. Anything else
/// (`javascript:`, `data:`, `vbscript:`) is unsafe to emit as an href.
fn is_safe_url(url: &str) -> bool {
    // Browsers skip whitespace and control characters inside the scheme
    let cleaned: String = url.chars().filter(|c| !c.is_whitespace() && !c.is_control()).collect();
    let scheme_end = cleaned.find(|c| c == ':' || c == '/' || c == '?' || c == '#');
    match scheme_end {
        Some(pos) if cleaned[pos..].starts_with(':') => {
            let scheme = cleaned[..pos].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto")
        }
        _ => true,
    }
}

fn highlight_code(code: &str, lang: Option<&str>) -> String {
    let ss = get_syntax_set();
    let syntax = lang
        .and_then(|l| ss.find_syntax_by_token(l))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    get_theme()
        .and_then(|theme| highlighted_html_for_string(code, ss, syntax, theme).ok())
        .unwrap_or_else(|| format!("<pre><code>{}</code></pre>", escape_html(code)))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn escape_js(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "text ![a](x.png) more ![b](y.png)";

    #[test]
    fn test_extract_first_image() {
        assert_eq!(extract_first_image(BODY), Some("x.png"));
        assert_eq!(extract_first_image("no images here"), None);
        assert_eq!(
            extract_first_image("![](https://cdn.example.com/p.jpg)"),
            Some("https://cdn.example.com/p.jpg")
        );
    }

    #[test]
    fn test_remove_first_image_keeps_the_rest() {
        assert_eq!(remove_first_image(BODY), "text  more ![b](y.png)");
        assert_eq!(remove_first_image("  ![a](x.png)\n\nhello  "), "hello");
        assert_eq!(remove_first_image("plain"), "plain");
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let body = format!("![a](x.png){}", "あ".repeat(100));
        let cut = excerpt(&body, 80);
        assert_eq!(cut.chars().count(), 83);
        assert!(cut.ends_with("..."));
        assert_eq!(excerpt("short", 80), "short");
    }

    #[test]
    fn test_render_rewrites_images_to_large_thumbnails() {
        let html = render_markdown("![cat](/uploads/cat.png)", "http://api");
        assert!(html.contains(r#"src="http://api/uploads/cat_l.jpg""#));
        assert!(html.contains(r#"alt="cat""#));
        assert!(html.contains("http://api/uploads/cat.png"));
    }

    #[test]
    fn test_render_escapes_raw_html() {
        let html = render_markdown("<script>alert(1)</script>", "");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_drops_script_links() {
        let html = render_markdown("[click](javascript:alert(document.cookie))", "");
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r##"<a href="#">click</a>"##));

        let html = render_markdown("[x](JavaScript:alert(1)) ![y](data:image/svg+xml,zz)", "");
        assert!(!html.contains("JavaScript:"));
        assert!(!html.contains("data:"));
    }

    #[test]
    fn test_render_keeps_ordinary_links() {
        let html = render_markdown("[a](https://example.com) [b](/content/3) [c](#top) [d](mailto:me@example.com)", "");
        assert!(html.contains(r#"href="https://example.com""#));
        assert!(html.contains(r#"href="/content/3""#));
        assert!(html.contains(r##"href="#top""##));
        assert!(html.contains(r#"href="mailto:me@example.com""#));
    }

    #[test]
    fn test_safe_url_rules() {
        assert!(is_safe_url("images/a.png"));
        assert!(is_safe_url("/uploads/a.png?x=1:2"));
        assert!(is_safe_url("HTTPS://example.com"));
        assert!(!is_safe_url("data:text/html;base64,xx"));
        assert!(!is_safe_url("jav\nascript:alert(1)"));
        assert!(!is_safe_url(" vbscript:msgbox"));
    }

    #[test]
    fn test_render_plain_paragraph() {
        let html = render_markdown("hello **world**", "");
        assert!(html.contains("<strong>world</strong>"));
    }
}
