//! Comment renderer: re-serializes each parsed comment in canonical
//! `/** ... */` layout.

use crate::document::Document;
use crate::render::Renderer;
use jsdoc_tags::{render_comment, CommentOptions, TagMap};

pub struct CommentRenderer {
    pub indent: usize,
}

impl Renderer for CommentRenderer {
    fn render(&self, doc: &Document) -> String {
        let opts = CommentOptions {
            indent_chars: self.indent,
        };
        let blocks: Vec<String> = doc
            .comments
            .iter()
            .map(|comment| render_comment(&canonical(&comment.tags), opts))
            .filter(|block| !block.is_empty())
            .collect();
        if blocks.is_empty() {
            return String::new();
        }
        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "js"
    }
}

/// Description first, then every other entry once.
///
/// Aliases that resolved to the same records (`desc` / `description`) are
/// emitted a single time.
fn canonical(tags: &TagMap) -> TagMap {
    let mut out = TagMap::new();
    if let Some(description) = tags.get("description").or_else(|| tags.get("desc")) {
        out.insert("description".to_string(), description.clone());
    }
    for (key, value) in tags {
        if out.values().any(|seen| seen == value) {
            continue;
        }
        out.insert(key.clone(), value.clone());
    }
    out
}
