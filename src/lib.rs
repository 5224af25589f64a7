//! jsdoc-tags: structured metadata from `/** ... */` documentation comments.
//!
//! Operates purely on comment text: it finds comment blocks in a file,
//! splits a block into `@tag` entries, renders `{@link}` / `{@tutorial}`
//! markers, removes tags, and serializes tags back into a comment.
//!
//! ```text
//! let doc = DocComment::new(comment);
//! doc.tag("@param")        // Single, Many, or None
//! doc.parse_all(&["@docgen_types"])
//! ```

pub mod comments;
pub mod extract;
pub mod links;
pub mod model;
pub mod registry;
pub mod remove;
pub mod scanner;
pub mod serialize;
pub mod util;

pub use comments::{scan_comments, ScanOptions};
pub use links::{render_links, AnchorRenderer, InlineLink, LinkRenderer};
pub use model::{DescriptiveTag, ParamTag, PlainTag, Tag, TagMap, TagValue, TypedTag};
pub use remove::remove_tags;
pub use serialize::{render_comment, CommentOptions};

use indexmap::IndexMap;
use util::{normalize_tag, tag_key};

/// Tag accessor over one comment's text.
///
/// Holds no state besides the borrowed text and link renderer, so lookups
/// are pure and may run from any thread.
#[derive(Clone, Copy)]
pub struct DocComment<'a> {
    text: &'a str,
    links: &'a dyn LinkRenderer,
}

impl std::fmt::Debug for DocComment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocComment").field("text", &self.text).finish_non_exhaustive()
    }
}

impl<'a> DocComment<'a> {
    /// Accessor rendering inline links as HTML anchors.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            links: &AnchorRenderer,
        }
    }

    /// Use `links` for every inline link this accessor renders.
    pub fn with_link_renderer(mut self, links: &'a dyn LinkRenderer) -> Self {
        self.links = links;
        self
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Look up one tag, `@` optional.
    ///
    /// Registered tags use their registered shape, anything else is
    /// freeform. One occurrence gives [`TagValue::Single`], several give
    /// [`TagValue::Many`], none gives `None`.
    pub fn tag(&self, name: &str) -> Option<TagValue> {
        let name = normalize_tag(name);
        let shape = registry::shape_of(&name);
        TagValue::collapse(shape.extract(&name, self.text, self.links))
    }

    /// The explicit `@description` or the untagged leading text.
    pub fn description(&self) -> Option<Tag> {
        extract::resolve_description(self.text, self.links)
    }

    /// Every registered tag plus `custom`, keeping only tags that are present.
    ///
    /// Keys are tag names without the `@`, in registry order followed by
    /// the custom tags.
    pub fn parse_all<S: AsRef<str>>(&self, custom: &[S]) -> TagMap {
        registry::known_tags()
            .map(|name| -> &str { name })
            .chain(custom.iter().map(AsRef::as_ref))
            .filter_map(|name| Some((tag_key(name), self.tag(name)?)))
            .collect()
    }

    /// Only the requested tags; absent ones are kept with a `None` value.
    pub fn parse_some<S: AsRef<str>>(&self, names: &[S]) -> IndexMap<String, Option<TagValue>> {
        names
            .iter()
            .map(|name| (tag_key(name.as_ref()), self.tag(name.as_ref())))
            .collect()
    }
}

/// Look up one tag in `comment`, rendering inline links as anchors.
pub fn get_tag(comment: &str, name: &str) -> Option<TagValue> {
    DocComment::new(comment).tag(name)
}

/// Parse `comment` against every registered tag plus `custom`.
pub fn parse_all<S: AsRef<str>>(comment: &str, custom: &[S]) -> TagMap {
    DocComment::new(comment).parse_all(custom)
}

/// Parse `comment` against `names` only.
pub fn parse_some<S: AsRef<str>>(comment: &str, names: &[S]) -> IndexMap<String, Option<TagValue>> {
    DocComment::new(comment).parse_some(names)
}
