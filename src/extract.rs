//! Tag shape extractors.
//!
//! Each extractor takes the spans the scanner found for one tag name and
//! decomposes every span into a record of its shape. Extractors never fail:
//! a span that does not fit its shape is skipped.

use crate::links::{render_links, LinkRenderer};
use crate::model::{DescriptiveTag, ParamTag, PlainTag, Tag, TypedTag};
use crate::scanner::{self, Span};
use crate::util::{non_empty, non_empty_owned, strip_decoration};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// Line-leading `/**`, or `*` / `*/` decoration together with all surrounding spaces.
static RE_DESCRIPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:/\*\*| *\*/? *)").unwrap());

/// Remainder of a stripped span after its tag name.
fn split_span<'t>(tag: &str, raw: &'t str) -> &'t str {
    raw.strip_prefix(tag).unwrap_or(raw)
}

fn spans_for<'a>(tag: &str, body: &'a str) -> Vec<Span<'a>> {
    let spans = scanner::scan(tag, body);
    tracing::trace!(tag, count = spans.len(), "scanned tag spans");
    spans
}

/// Split `open ... close` at the start of `text`, honoring nesting.
///
/// Returns the inner text and what follows the closing delimiter.
fn balanced(text: &str, open: u8, close: u8) -> Option<(&str, &str)> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&open) {
        return None;
    }
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some((&text[1..i], &text[i + 1..]));
            }
        }
    }
    None
}

fn strip_dash(text: &str) -> &str {
    text.strip_prefix("- ").unwrap_or(text)
}

fn describe(text: &str, links: &dyn LinkRenderer) -> Option<String> {
    non_empty(strip_dash(text.trim_start())).map(|d| render_links(d, links))
}

/// `@tag value`. The value is everything after the tag name.
pub fn extract_freeform(tag: &str, body: &str, links: &dyn LinkRenderer) -> Vec<Tag> {
    spans_for(tag, body)
        .into_iter()
        .map(|span| {
            let raw = strip_decoration(span.text);
            let value = render_links(split_span(tag, &raw).trim(), links);
            Tag::Plain(PlainTag {
                tag: tag.to_string(),
                value,
                raw,
            })
        })
        .collect()
}

/// `@tag [{type}] [- ]description`, type and description both optional.
pub fn extract_typed(tag: &str, body: &str, links: &dyn LinkRenderer) -> Vec<Tag> {
    spans_for(tag, body)
        .into_iter()
        .map(|span| {
            let raw = strip_decoration(span.text);
            let rest = split_span(tag, &raw).trim_start();
            let (ty, rest) = match balanced(rest, b'{', b'}') {
                Some((inner, after)) => (non_empty_owned(inner), after),
                None => (None, rest),
            };
            let description = describe(rest, links);
            Tag::Typed(TypedTag {
                tag: tag.to_string(),
                ty,
                description,
                raw,
            })
        })
        .collect()
}

/// `@tag {type} name|[name]|[name=default] [- ]description`.
///
/// Used for `@param`, `@property` and their aliases. Entries without a
/// `{type}` or a name are skipped.
pub fn extract_param(tag: &str, body: &str, links: &dyn LinkRenderer) -> Vec<Tag> {
    spans_for(tag, body)
        .into_iter()
        .filter_map(|span| {
            let raw = strip_decoration(span.text);
            let param = parse_param(tag, &raw, links);
            if param.is_none() {
                debug!(tag, raw = %raw, "skipping malformed parameter tag");
            }
            param
        })
        .map(Tag::Param)
        .collect()
}

fn parse_param(tag: &str, raw: &str, links: &dyn LinkRenderer) -> Option<ParamTag> {
    let rest = split_span(tag, raw).trim_start();
    let (ty, rest) = balanced(rest, b'{', b'}')?;
    let rest = rest.trim_start();

    let (token, optional, rest) = match balanced(rest, b'[', b']') {
        Some((inner, after)) => (inner, true, after),
        None => {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            (&rest[..end], false, &rest[end..])
        }
    };
    if token.trim().is_empty() {
        return None;
    }

    // Object-literal names keep any `=` they contain.
    let (name, default_value) = if optional && !token.trim_start().starts_with('{') {
        match token.split_once('=') {
            Some((name, default)) => (name.trim(), Some(default.trim().to_string())),
            None => (token.trim(), None),
        }
    } else {
        (token, None)
    };

    Some(ParamTag {
        tag: tag.to_string(),
        ty: ty.trim().to_string(),
        name: name.to_string(),
        description: describe(rest, links),
        optional,
        default_value,
        raw: raw.to_string(),
    })
}

/// `@template [{constraint}] [- ]name-or-description`.
///
/// - `{T} - Description` → value `T`, description `Description`
/// - `T,U,V` → value `T,U,V` (kept as one opaque string)
/// - `{} T` → value `T`
/// - bare `@template` → neither value nor description
pub fn extract_template(tag: &str, body: &str, links: &dyn LinkRenderer) -> Vec<Tag> {
    spans_for(tag, body)
        .into_iter()
        .map(|span| {
            let raw = strip_decoration(span.text);
            let rest = split_span(tag, &raw).trim_start();
            let (value, description) = match balanced(rest, b'{', b'}') {
                Some((inner, after)) if non_empty(inner).is_some() => {
                    (non_empty_owned(inner), describe(after, links))
                }
                // `{}` constrains nothing
                Some((_, after)) => (non_empty_owned(strip_dash(after.trim_start())), None),
                None => (non_empty_owned(strip_dash(rest)), None),
            };
            Tag::Descriptive(DescriptiveTag {
                tag: tag.to_string(),
                value,
                description,
                raw,
            })
        })
        .collect()
}

/// The comment's description.
///
/// An explicit `@description` (or `@desc`) wins. Otherwise the untagged
/// text between `/**` and the first tag is used, whether the comment is a
/// single line or spans several. Returns `None` when neither has text.
pub fn resolve_description(body: &str, links: &dyn LinkRenderer) -> Option<Tag> {
    for explicit in ["@description", "@desc"] {
        if let Some(tag) = extract_freeform(explicit, body, links).into_iter().next() {
            return Some(tag);
        }
    }

    let lead = scanner::leading(body)?;
    let raw = if lead.is_single_line() {
        strip_decoration(lead.text)
    } else {
        RE_DESCRIPTION_LINE.replace_all(lead.text, "").trim().to_string()
    };
    if raw.is_empty() {
        return None;
    }

    Some(Tag::Plain(PlainTag {
        tag: "@description".to_string(),
        value: render_links(&raw, links),
        raw,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::AnchorRenderer;

    const JSDOC: &str = r#"
/**
 * The description goes here
 *
 * @since v1.0.0 (modified v2.0.0)
 * @template T
 * @param {T} children - JSX children
 * @param {any[]} types - Types of children to match
 * @param {GetChildByTypeConfig} [{ customTypeKey: '__TYPE', prioritized: false }] - The configuration params
 * @param {string} [optionalParam='default text'] An optional param with a description without a dash
 * @returns {T} - The first matching child
 * @docgen_types
 * // Custom docgen tag
 * @example
 * // Examples...
 * getTag('@description')(jsdoc);
 * @customTag customTag value 1
 * @customTag customTag value 2
 */"#;

    fn params(tag: &str, body: &str) -> Vec<ParamTag> {
        extract_param(tag, body, &AnchorRenderer)
            .into_iter()
            .filter_map(|t| match t {
                Tag::Param(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn typed(body: &str) -> TypedTag {
        match extract_typed("@yields", body, &AnchorRenderer).pop() {
            Some(Tag::Typed(t)) => t,
            other => panic!("expected typed tag, got {:?}", other),
        }
    }

    fn templates(body: &str) -> Vec<DescriptiveTag> {
        extract_template("@template", body, &AnchorRenderer)
            .into_iter()
            .filter_map(|t| match t {
                Tag::Descriptive(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn freeform_single_line() {
        let tags = extract_freeform("@since", JSDOC, &AnchorRenderer);
        assert_eq!(
            tags,
            vec![Tag::Plain(PlainTag {
                tag: "@since".to_string(),
                value: "v1.0.0 (modified v2.0.0)".to_string(),
                raw: "@since v1.0.0 (modified v2.0.0)".to_string(),
            })]
        );
    }

    #[test]
    fn freeform_multi_line() {
        let tags = extract_freeform("@docgen_types", JSDOC, &AnchorRenderer);
        assert_eq!(tags[0].raw(), "@docgen_types\n// Custom docgen tag");
        assert_eq!(tags[0].value(), Some("// Custom docgen tag"));

        let tags = extract_freeform("@example", JSDOC, &AnchorRenderer);
        assert_eq!(tags[0].value(), Some("// Examples...\ngetTag('@description')(jsdoc);"));
    }

    #[test]
    fn freeform_repeated() {
        let tags = extract_freeform("@customTag", JSDOC, &AnchorRenderer);
        let values: Vec<_> = tags.iter().filter_map(Tag::value).collect();
        assert_eq!(values, ["customTag value 1", "customTag value 2"]);
    }

    #[test]
    fn param_required_with_dash() {
        let p = &params("@param", JSDOC)[0];
        assert_eq!(p.ty, "T");
        assert_eq!(p.name, "children");
        assert!(!p.optional);
        assert_eq!(p.default_value, None);
        assert_eq!(p.description.as_deref(), Some("JSX children"));
        assert_eq!(p.raw, "@param {T} children - JSX children");
    }

    #[test]
    fn param_object_literal_name() {
        let p = &params("@param", JSDOC)[2];
        assert_eq!(p.ty, "GetChildByTypeConfig");
        assert_eq!(p.name, "{ customTypeKey: '__TYPE', prioritized: false }");
        assert!(p.optional);
        assert_eq!(p.default_value, None);
        assert_eq!(p.description.as_deref(), Some("The configuration params"));
    }

    #[test]
    fn param_optional_with_default() {
        let p = &params("@param", JSDOC)[3];
        assert_eq!(p.ty, "string");
        assert_eq!(p.name, "optionalParam");
        assert!(p.optional);
        assert_eq!(p.default_value.as_deref(), Some("'default text'"));
        assert_eq!(
            p.description.as_deref(),
            Some("An optional param with a description without a dash")
        );
    }

    #[test]
    fn param_optional_without_default() {
        let p = &params("@param", "/**\n * @param {number} [count] How many\n */")[0];
        assert_eq!(p.name, "count");
        assert!(p.optional);
        assert_eq!(p.default_value, None);
    }

    #[test]
    fn param_nested_type_braces() {
        let body = "/**\n * @param {{a: number}} opts - Options\n */";
        let p = &params("@param", body)[0];
        assert_eq!(p.ty, "{a: number}");
        assert_eq!(p.name, "opts");
    }

    #[test]
    fn param_without_type_is_skipped() {
        assert!(params("@param", "/**\n * @param name - no type\n */").is_empty());
    }

    #[test]
    fn param_without_description() {
        let p = &params("@arg", "/**\n * @arg {string} path\n */")[0];
        assert_eq!(p.tag, "@arg");
        assert_eq!(p.name, "path");
        assert_eq!(p.description, None);
    }

    #[test]
    fn typed_variants() {
        let t = typed("/**\n * Fib.\n *\n * @yields\n */");
        assert_eq!((t.ty, t.description, t.raw.as_str()), (None, None, "@yields"));

        let t = typed("/**\n * @yields {number}\n */");
        assert_eq!(t.ty.as_deref(), Some("number"));
        assert_eq!(t.description, None);

        let t = typed("/**\n * @yields The next number in the Fibonacci sequence.\n */");
        assert_eq!(t.ty, None);
        assert_eq!(t.description.as_deref(), Some("The next number in the Fibonacci sequence."));

        let t = typed("/**\n * @yields {number} - The next number.\n */");
        assert_eq!(t.ty.as_deref(), Some("number"));
        assert_eq!(t.description.as_deref(), Some("The next number."));
        assert_eq!(t.raw, "@yields {number} - The next number.");
    }

    #[test]
    fn typed_alias_does_not_match_longer_name() {
        assert!(extract_typed("@return", JSDOC, &AnchorRenderer).is_empty());
        assert_eq!(extract_typed("@returns", JSDOC, &AnchorRenderer).len(), 1);
    }

    #[test]
    fn template_variants() {
        let body = "
      /**
       * The description goes here
       *
       * @template
       * @template T
       * @template T,U,V
       * @template {T} - Description
       */";
        let t = templates(body);
        assert_eq!(t.len(), 4);
        assert_eq!((t[0].value.as_deref(), t[0].raw.as_str()), (None, "@template"));
        assert_eq!(t[1].value.as_deref(), Some("T"));
        assert_eq!(t[2].value.as_deref(), Some("T,U,V"));
        assert_eq!(t[2].description, None);
        assert_eq!(t[3].value.as_deref(), Some("T"));
        assert_eq!(t[3].description.as_deref(), Some("Description"));
        assert_eq!(t[3].raw, "@template {T} - Description");
    }

    #[test]
    fn template_empty_constraint() {
        let t = templates("/**\n * @template {} foo\n * @template {}\n */");
        assert_eq!(t.len(), 2);
        assert_eq!(t[0].value.as_deref(), Some("foo"));
        assert_eq!(t[0].description, None);
        assert_eq!(t[0].raw, "@template {} foo");
        assert_eq!(t[1].value, None);
    }

    #[test]
    fn description_from_leading_text() {
        let d = resolve_description(JSDOC, &AnchorRenderer).unwrap();
        assert_eq!(d.tag(), "@description");
        assert_eq!(d.raw(), "The description goes here");
    }

    #[test]
    fn description_explicit_tag_wins() {
        let body = "
     /**
      * The description goes here
      *
      * @description Description override
      * @param {string} myParam - The param
      */";
        let d = resolve_description(body, &AnchorRenderer).unwrap();
        assert_eq!(d.value(), Some("Description override"));
        assert_eq!(d.raw(), "@description Description override");
    }

    #[test]
    fn description_single_line() {
        let d = resolve_description("\n     /** Foo bar */", &AnchorRenderer).unwrap();
        assert_eq!(d.value(), Some("Foo bar"));
        assert_eq!(d.raw(), "Foo bar");
    }

    #[test]
    fn description_absent() {
        assert!(resolve_description("/** @readonly */", &AnchorRenderer).is_none());
        assert!(resolve_description("/**\n * @since v1\n */", &AnchorRenderer).is_none());
        assert!(resolve_description("", &AnchorRenderer).is_none());
    }

    #[test]
    fn description_renders_links() {
        let body = "
      /**
       * See {@tutorial MyClass} and [MyClass's foo property]{@tutorial MyClass#foo}.
       * Also, check out {@tutorial http://www.google.com|Google} and
       * {@tutorial https://github.com GitHub}.
       * @see {@tutorial MyClass}
       */";
        let d = resolve_description(body, &AnchorRenderer).unwrap();
        assert_eq!(
            d.value(),
            Some("See <a href=\"MyClass\">MyClass</a> and <a href=\"MyClass#foo\">MyClass's foo property</a>.\nAlso, check out <a href=\"http://www.google.com\">Google</a> and\n<a href=\"https://github.com\">GitHub</a>.")
        );
        assert_eq!(
            d.raw(),
            "See {@tutorial MyClass} and [MyClass's foo property]{@tutorial MyClass#foo}.\nAlso, check out {@tutorial http://www.google.com|Google} and\n{@tutorial https://github.com GitHub}."
        );
    }
}
