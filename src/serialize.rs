//! Re-serialize parsed tags into canonical comment text.

use crate::model::TagMap;

/// Options for [`render_comment`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentOptions {
    /// Spaces placed before the `/**` opener.
    pub indent_chars: usize,
}

/// Emit one ` * raw` line per tag record; multi-line raws get a ` * ` per line.
///
/// An empty map renders as the empty string.
pub fn render_comment(tags: &TagMap, opts: CommentOptions) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let indent = " ".repeat(opts.indent_chars + 1);
    let line_break = format!("\n{}* ", indent);
    let mut out = format!("{}/**", " ".repeat(opts.indent_chars));

    for tag in tags.values().flat_map(|value| value.iter()) {
        out.push('\n');
        out.push_str(&indent);
        out.push_str("* ");
        out.push_str(&tag.raw().replace("\r\n", "\n").replace('\n', &line_break));
    }

    out.push('\n');
    out.push_str(&indent);
    out.push_str("*/");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlainTag, Tag, TagValue, TypedTag};

    fn plain(tag: &str, raw: &str) -> Tag {
        Tag::Plain(PlainTag {
            tag: tag.to_string(),
            value: String::new(),
            raw: raw.to_string(),
        })
    }

    fn sample() -> TagMap {
        let mut tags = TagMap::new();
        tags.insert(
            "description".to_string(),
            TagValue::Single(plain("@description", "The description goes here")),
        );
        tags.insert(
            "example".to_string(),
            TagValue::Many(vec![
                plain("@example", "@example\nfoo();"),
                plain("@example", "@example\nbar();"),
            ]),
        );
        tags.insert(
            "returns".to_string(),
            TagValue::Single(Tag::Typed(TypedTag {
                tag: "@returns".to_string(),
                ty: Some("T".to_string()),
                description: None,
                raw: "@returns {T}".to_string(),
            })),
        );
        tags
    }

    #[test]
    fn empty_map() {
        assert_eq!(render_comment(&TagMap::new(), CommentOptions::default()), "");
    }

    #[test]
    fn canonical_layout() {
        assert_eq!(
            render_comment(&sample(), CommentOptions::default()),
            "/**\n * The description goes here\n * @example\n * foo();\n * @example\n * bar();\n * @returns {T}\n */"
        );
    }

    #[test]
    fn indented_layout() {
        let out = render_comment(&sample(), CommentOptions { indent_chars: 4 });
        assert!(out.starts_with("    /**\n     * The description goes here\n"));
        assert!(out.ends_with("\n     * @returns {T}\n     */"));
    }
}
