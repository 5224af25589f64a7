//! GitHub-flavored markdown renderer.
//!
//! One `##` section per comment, titled by its naming tag (`@name`,
//! `@function`, `@class`, ...) or by position. Well-known tags get their own
//! `####` blocks; flag tags become badges and everything else is listed
//! under "Tags". Inline links render as markdown links.

use crate::document::{CommentDoc, Document};
use crate::render::Renderer;
use jsdoc_tags::{InlineLink, LinkRenderer, ParamTag, Tag, TagMap};

pub struct MarkdownRenderer;

/// `[text](url)` for every `{@link}` / `{@tutorial}` marker.
pub struct MarkdownLinks;

impl LinkRenderer for MarkdownLinks {
    fn render(&self, link: &InlineLink) -> String {
        format!("[{}]({})", link.text, link.url)
    }
}

// Tags whose value can title a section, in order of preference.
const TITLE_KEYS: &[&str] = &[
    "name",
    "function",
    "func",
    "method",
    "class",
    "typedef",
    "callback",
    "interface",
    "namespace",
    "module",
    "member",
    "event",
    "constant",
    "const",
];

const DESCRIPTION_KEYS: &[&str] = &["description", "desc"];
const PARAM_KEYS: &[&str] = &["param", "arg", "argument"];
const PROPERTY_KEYS: &[&str] = &["property", "prop"];
const TEMPLATE_KEYS: &[&str] = &["template"];
const RETURN_KEYS: &[&str] = &["returns", "return"];
const YIELD_KEYS: &[&str] = &["yields", "yield"];
const THROW_KEYS: &[&str] = &["throws", "exception"];
const EXAMPLE_KEYS: &[&str] = &["example"];
const SEE_KEYS: &[&str] = &["see"];

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &Document) -> String {
        let mut output = String::new();
        if doc.comments.is_empty() {
            return output;
        }

        let titles: Vec<String> = doc
            .comments
            .iter()
            .enumerate()
            .map(|(i, comment)| section_title(i, &comment.tags).0)
            .collect();

        output.push_str("## Index\n\n");
        for title in &titles {
            output.push_str(&format!("* [{}](#{})\n", title, github_slug(title)));
        }
        output.push('\n');

        for (i, comment) in doc.comments.iter().enumerate() {
            output.push_str(&render_section(i, comment));
            output.push('\n');
        }

        output
    }

    fn file_extension(&self) -> &str {
        "md"
    }

    fn links(&self) -> &dyn LinkRenderer {
        &MarkdownLinks
    }
}

/// Section title and the key it came from, if any.
fn section_title(index: usize, tags: &TagMap) -> (String, Option<&'static str>) {
    for key in TITLE_KEYS {
        let Some(tag) = tags.get(*key).and_then(|v| v.iter().next()) else {
            continue;
        };
        let text = match tag {
            Tag::Typed(t) => t.description.as_deref(),
            other => other.value(),
        };
        if let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) {
            return (text.to_string(), Some(*key));
        }
    }
    (format!("Comment {}", index + 1), None)
}

fn render_section(index: usize, comment: &CommentDoc) -> String {
    let tags = &comment.tags;
    let (title, title_key) = section_title(index, tags);
    let mut used: Vec<&str> = title_key.into_iter().collect();
    let mut lines: Vec<String> = vec![format!("### {}\n", title)];

    let badges = render_badges(tags);
    if !badges.is_empty() {
        lines.push(badges);
        lines.push(String::new());
    }

    if let Some(desc) = collect(tags, DESCRIPTION_KEYS).first().and_then(|t| t.value()) {
        lines.push(desc.to_string());
        lines.push(String::new());
    }
    used.extend(DESCRIPTION_KEYS);

    let params = collect(tags, PARAM_KEYS);
    render_list(&mut lines, "Parameters", &params, render_other);
    used.extend(PARAM_KEYS);

    let props = collect(tags, PROPERTY_KEYS);
    render_list(&mut lines, "Properties", &props, render_other);
    used.extend(PROPERTY_KEYS);

    let templates = collect(tags, TEMPLATE_KEYS);
    render_list(&mut lines, "Type parameters", &templates, render_other);
    used.extend(TEMPLATE_KEYS);

    let returns = collect(tags, RETURN_KEYS);
    render_list(&mut lines, "Returns", &returns, render_other);
    used.extend(RETURN_KEYS);

    let yields = collect(tags, YIELD_KEYS);
    render_list(&mut lines, "Yields", &yields, render_other);
    used.extend(YIELD_KEYS);

    let throws = collect(tags, THROW_KEYS);
    render_list(&mut lines, "Throws", &throws, render_other);
    used.extend(THROW_KEYS);

    for example in collect(tags, EXAMPLE_KEYS) {
        lines.push("#### Example\n".to_string());
        lines.push("```js".to_string());
        lines.push(unindent(example.value().unwrap_or_default()));
        lines.push("```".to_string());
        lines.push(String::new());
    }
    used.extend(EXAMPLE_KEYS);

    let see = collect(tags, SEE_KEYS);
    render_list(&mut lines, "See also", &see, render_other);
    used.extend(SEE_KEYS);

    let rest: Vec<&Tag> = tags
        .iter()
        .filter(|(key, _)| !used.contains(&key.as_str()))
        .flat_map(|(_, value)| value.iter())
        .filter(|tag| !is_flag(tag))
        .collect();
    render_list(&mut lines, "Tags", &rest, |tag| {
        format!("**{}** {}", tag.tag(), render_other(tag))
    });

    lines.join("\n")
}

/// Records of every key in `keys`, in key order.
fn collect<'a>(tags: &'a TagMap, keys: &[&str]) -> Vec<&'a Tag> {
    keys.iter()
        .filter_map(|key| tags.get(*key))
        .flat_map(|value| value.iter())
        .collect()
}

fn render_list(lines: &mut Vec<String>, title: &str, items: &[&Tag], render: impl Fn(&Tag) -> String) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("#### {}\n", title));
    for item in items {
        // Indent additional lines for markdown list
        let rendered = render(item).trim_end().replace('\n', "\n  ");
        lines.push(format!("* {}", rendered));
    }
    lines.push(String::new());
}

/// Valueless freeform tags such as `@readonly` or `@async`.
fn is_flag(tag: &Tag) -> bool {
    matches!(tag, Tag::Plain(p) if p.value.is_empty())
}

/// `> `readonly` `async``
fn render_badges(tags: &TagMap) -> String {
    let badges: Vec<String> = tags
        .values()
        .flat_map(|value| value.iter())
        .filter(|tag| is_flag(tag))
        .map(|tag| format!("`{}`", tag.tag().trim_start_matches('@')))
        .collect();
    if badges.is_empty() {
        return String::new();
    }
    format!("> {}", badges.join(" "))
}

/// Single-record rendering by shape.
///
/// `{number} [b=0] - The addend` → `**b** (number, optional, default `0`): The addend`
fn render_other(tag: &Tag) -> String {
    match tag {
        Tag::Plain(p) => p.value.clone(),
        Tag::Param(p) => render_param(p),
        Tag::Typed(t) => match (&t.ty, &t.description) {
            (Some(ty), Some(desc)) => format!("`{}`: {}", ty, desc),
            (Some(ty), None) => format!("`{}`", ty),
            (None, Some(desc)) => desc.clone(),
            (None, None) => String::new(),
        },
        Tag::Descriptive(d) => match (&d.value, &d.description) {
            (Some(value), Some(desc)) => format!("**{}**: {}", value, desc),
            (Some(value), None) => format!("**{}**", value),
            (None, Some(desc)) => desc.clone(),
            (None, None) => String::new(),
        },
    }
}

fn render_param(p: &ParamTag) -> String {
    let mut qualifiers = vec![p.ty.clone()];
    if p.optional {
        qualifiers.push("optional".to_string());
    }
    if let Some(ref default) = p.default_value {
        qualifiers.push(format!("default `{}`", default));
    }
    let mut out = format!("**{}** ({})", p.name, qualifiers.join(", "));
    if let Some(ref desc) = p.description {
        out.push_str(": ");
        out.push_str(desc);
    }
    out
}

/// GitHub heading anchor: lowercase, keep alphanumerics, spaces and
/// hyphens, spaces become hyphens.
fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

/// Remove common leading indentation from a multi-line string.
fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    // Find first non-empty line
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(0);

    let min_indent = lines[start..]
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    lines[start..]
        .iter()
        .map(|l| l.get(min_indent..).unwrap_or(*l))
        .collect::<Vec<_>>()
        .join("\n")
}
