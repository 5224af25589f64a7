//! Inline link rendering for `{@link ...}` and `{@tutorial ...}` markers.
//!
//! Recognized forms, for both `link` and `tutorial`:
//!
//! - `{@link target}`
//! - `{@link target|text}`
//! - `{@link target text}`
//! - `[text]{@link target}`
//!
//! Every occurrence is handed to a [`LinkRenderer`] in a single left-to-right
//! pass; replacement output is never re-scanned.

use crate::util::non_empty;
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

static RE_INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\[(.*?)\])?\{@(link|tutorial) (.*?)(?:(?:\|| +)(.*?))?\}").unwrap()
});

/// A parsed inline link marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineLink {
    /// `link` or `tutorial`
    pub tag: String,
    pub url: String,
    /// Explicit text, else the bracketed prefix, else the url.
    pub text: String,
    /// The marker exactly as written.
    pub raw: String,
}

/// Turns an [`InlineLink`] into replacement text.
///
/// Renderers are shared by every accessor holding them, across threads.
pub trait LinkRenderer: Send + Sync {
    fn render(&self, link: &InlineLink) -> String;
}

/// Default renderer: an HTML anchor.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnchorRenderer;

impl LinkRenderer for AnchorRenderer {
    fn render(&self, link: &InlineLink) -> String {
        format!("<a href=\"{}\">{}</a>", link.url, link.text)
    }
}

impl<F> LinkRenderer for F
where
    F: Fn(&InlineLink) -> String + Send + Sync,
{
    fn render(&self, link: &InlineLink) -> String {
        self(link)
    }
}

/// Find every inline link marker in `text`, in order.
pub fn find_links(text: &str) -> Vec<InlineLink> {
    RE_INLINE_LINK
        .captures_iter(text)
        .filter_map(|caps| to_link(&caps))
        .collect()
}

/// Replace every inline link marker in `text` with the renderer's output.
pub fn render_links(text: &str, renderer: &dyn LinkRenderer) -> String {
    if !text.contains("{@") {
        return text.to_string();
    }
    RE_INLINE_LINK
        .replace_all(text, |caps: &Captures| match to_link(caps) {
            Some(link) => renderer.render(&link),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn to_link(caps: &Captures) -> Option<InlineLink> {
    let raw = caps.get(0)?.as_str().to_string();
    let tag = caps.get(2)?.as_str().trim().to_string();
    let url = caps.get(3)?.as_str().trim().to_string();
    let text = caps
        .get(4)
        .and_then(|m| non_empty(m.as_str()))
        .or_else(|| caps.get(1).and_then(|m| non_empty(m.as_str())))
        .unwrap_or(&url)
        .to_string();
    Some(InlineLink { tag, url, text, raw })
}
