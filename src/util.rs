//! Small shared helpers: blank checks, tag-name normalization and
//! comment decoration stripping.

use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

// `*/` with the spaces before it, a line-leading ` * ` decoration, or the `/** ` opener.
static RE_DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m) *?\*/|^ *?\* ?|/\*\* ?").unwrap());

static RE_TRAILING_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ?\*$").unwrap());

/// "Absent" classification used as a guard throughout extraction.
///
/// A value is blank when it carries nothing: an empty string, an empty
/// collection, or `None`.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for [T] {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Blank for HashMap<K, V> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Blank for indexmap::IndexMap<K, V> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Blank + ?Sized> Blank for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Blank::is_blank)
    }
}

/// Trim `s` and return it only if something is left.
pub fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_blank() {
        None
    } else {
        Some(trimmed)
    }
}

/// Owned variant of [`non_empty`].
pub fn non_empty_owned(s: &str) -> Option<String> {
    non_empty(s).map(str::to_string)
}

/// Ensure a tag name carries its leading `@` ("param" → "@param").
pub fn normalize_tag(name: &str) -> Cow<'_, str> {
    if name.starts_with('@') {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("@{}", name))
    }
}

/// Map key for a tag name: the first `@` removed ("@param" → "param").
pub fn tag_key(name: &str) -> String {
    name.replacen('@', "", 1)
}

/// Remove `/**`, `*/` and line-leading `*` decoration, then trim.
///
/// Only one space after a leading `*` is consumed, so indentation inside
/// example blocks survives.
pub fn strip_decoration(text: &str) -> String {
    let stripped = RE_DECORATION.replace_all(text, "");
    RE_TRAILING_STAR.replace(&stripped, "").trim().to_string()
}
