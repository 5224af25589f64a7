//! Tag removal.
//!
//! Deletes every span of the requested tags, leaving all other text,
//! decoration and indentation untouched. A comment left with nothing but
//! decoration collapses to `/** */`.

use crate::scanner::{self, BoundaryKind};
use crate::util::normalize_tag;
use regex::Regex;
use std::sync::LazyLock;

// An opener followed by nothing but whitespace and `*`, at any indentation.
static RE_EMPTY_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*/\*\*[\s*]*(?:/\s*)?$").unwrap());

const EMPTY_COMMENT: &str = "/** */";

/// Remove every occurrence of `tags` from `comment`.
///
/// Removing `@description` also drops the untagged leading description.
/// Unknown or absent tags are ignored.
pub fn remove_tags<S: AsRef<str>>(comment: &str, tags: &[S]) -> String {
    let mut text = comment.to_string();

    for tag in tags {
        let tag = normalize_tag(tag.as_ref());
        if tag == "@description" {
            text = remove_leading_description(&text);
        }

        let spans: Vec<(usize, usize)> = scanner::scan(&tag, &text)
            .iter()
            .map(|span| (span.start, span.end))
            .collect();
        tracing::debug!(tag = %tag, removed = spans.len(), "removing tag spans");
        for (start, end) in spans.into_iter().rev() {
            text.replace_range(start..end, "");
        }
    }

    if RE_EMPTY_COMMENT.is_match(&text) {
        EMPTY_COMMENT.to_string()
    } else {
        text.replace("**/", "*/")
    }
}

/// Drop the untagged text between `/**` and the first tag.
fn remove_leading_description(text: &str) -> String {
    let Some(lead) = scanner::leading(text) else {
        return text.to_string();
    };
    let body_start = lead.opener + 3;
    let body = &text[body_start..lead.boundary.at];
    if body.chars().all(|c| c.is_whitespace() || c == '*') {
        return text.to_string();
    }

    let (range, replacement) = if !lead.is_single_line() {
        let header = format!("/**\n{} *", opener_indent(text, lead.opener));
        (lead.opener..lead.boundary.at, header)
    } else if lead.boundary.kind == BoundaryKind::CommentEnd {
        (lead.opener..lead.boundary.at + 2, EMPTY_COMMENT.to_string())
    } else {
        (body_start..lead.boundary.at, String::new())
    };

    let mut out = text.to_string();
    out.replace_range(range, &replacement);
    out
}

/// Whitespace before `/**` on its line, or nothing if code precedes it.
fn opener_indent(text: &str, opener: usize) -> &str {
    let line_start = text[..opener].rfind('\n').map_or(0, |i| i + 1);
    let indent = &text[line_start..opener];
    if indent.chars().all(char::is_whitespace) {
        indent
    } else {
        ""
    }
}
