//! Per-file parse results handed to the renderers.

use jsdoc_tags::{remove_tags, scan_comments, DocComment, LinkRenderer, ScanOptions, TagMap};
use serde::Serialize;

/// What to pull out of every comment in a file.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub keep_indent: bool,
    /// Report only these tags. Empty means every registered tag.
    pub only: Vec<String>,
    /// Unregistered tags to look for alongside the registry.
    pub custom: Vec<String>,
    /// Tags stripped from each comment before it is parsed.
    pub remove: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Document {
    pub source: String,
    pub comments: Vec<CommentDoc>,
}

/// One `/** ... */` block and the tags found in it.
#[derive(Debug, Serialize)]
pub struct CommentDoc {
    pub text: String,
    pub tags: TagMap,
}

impl Document {
    /// Scan `content` for comment blocks and parse each one.
    ///
    /// Blocks that yield no tags are dropped.
    pub fn parse(source: &str, content: &str, opts: &ParseOptions, links: &dyn LinkRenderer) -> Self {
        let scan = ScanOptions {
            keep_indent: opts.keep_indent,
        };
        let comments = scan_comments(content, scan)
            .into_iter()
            .filter_map(|text| {
                let text = if opts.remove.is_empty() {
                    text
                } else {
                    remove_tags(&text, &opts.remove)
                };
                let tags = parse_tags(DocComment::new(&text).with_link_renderer(links), opts);
                if tags.is_empty() {
                    tracing::debug!(source, "comment without matching tags skipped");
                    return None;
                }
                Some(CommentDoc { text, tags })
            })
            .collect::<Vec<_>>();

        tracing::debug!(source, comments = comments.len(), "parsed file");
        Document {
            source: source.to_string(),
            comments,
        }
    }
}

fn parse_tags(doc: DocComment<'_>, opts: &ParseOptions) -> TagMap {
    if opts.only.is_empty() {
        return doc.parse_all(&opts.custom);
    }
    doc.parse_some(&opts.only)
        .into_iter()
        .filter_map(|(key, value)| Some((key, value?)))
        .collect()
}
